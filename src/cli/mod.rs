//! # CLI Module
//!
//! Command-line front end of the generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the CRUD screens of every resource in an API document:
//!
//! ```bash
//! crudgen generate --api openapi.yaml --output src
//! ```
//!
//! Options:
//! - `--api <FILE>` - Path to the OpenAPI document (required)
//! - `--output <DIR>` - Directory the front-end sources go to (default: `.`)
//! - `--target <quasar|next>` - Front-end stack (default: `quasar`)
//! - `--resource <NAME>` - Limit generation to a resource, repeatable
//! - `--entrypoint <URL>` - API root used by the generated app
//! - `--force` - Overwrite shared files that already exist
//! - `--dry-run` - Print the plan without writing
//! - `--config <FILE>` - `crudgen.toml` to read defaults from
//!
//! After a successful run the snippet needed to register the new routes,
//! store modules and components is printed for each resource.
//!
//! ### `resources`
//!
//! List the resources the generator finds in a document:
//!
//! ```bash
//! crudgen resources --api openapi.yaml
//! ```
//!
//! ## Exit status
//!
//! `0` when everything was generated, `1` when a file or resource failed or
//! the document could not be used.

mod commands;


pub use commands::{run, Cli, Commands, RunStatus};
