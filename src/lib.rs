//! # crudgen
//!
//! **crudgen** scaffolds the CRUD layer of a front-end application from an
//! [OpenAPI 3](https://spec.openapis.org/oas/v3.1.0) document: list, show,
//! create and edit screens, the state management behind them, routes and
//! i18n labels, for every resource the API exposes.
//!
//! ## Architecture
//!
//! - **[`api`]** - loads the document and extracts resources, fields and list parameters
//! - **[`generator`]** - parameter normalization, generation context, file plans,
//!   templates and the executor that writes them
//! - **[`config`]** - optional `crudgen.toml` project defaults
//! - **[`cli`]** - the `crudgen` command
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(crudgen)
//!     participant Api as api::load_api_document
//!     participant Ctx as generator::resource_context
//!     participant Plan as generator::plan_generation
//!     participant Exec as generator::execute_plan
//!     participant FS as File System
//!
//!     User->>CLI: crudgen generate --api openapi.yaml
//!     CLI->>Api: parse + validate (oas3)
//!     Api-->>CLI: ApiDocument { resources }
//!     loop every selected resource
//!         CLI->>Ctx: normalize parameters, derive fields
//!         Ctx-->>CLI: GenerationContext
//!         CLI->>Plan: target file plan + context
//!         Plan-->>CLI: GenerationPlan (dirs, files, skipped)
//!         CLI->>Exec: render templates
//!         Exec->>FS: create dirs, write files
//!     end
//!     CLI-->>User: registration snippet per resource
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! crudgen generate --api openapi.yaml --output src --target quasar
//! crudgen generate --api openapi.yaml --output app --target next --resource books
//! ```
//!
//! ## Targets
//!
//! - **quasar** - Vue single-file components on Quasar, Vuex store modules,
//!   vue-router routes and vue-i18n label files
//! - **next** - React components, Next.js pages and TypeScript interfaces
//!
//! ## Logging
//!
//! Set `CRUDGEN_LOG_LEVEL` / `CRUDGEN_LOG_FORMAT` or `RUST_LOG`; see
//! [`logging`].

pub mod api;
pub mod cli;
pub mod config;
pub mod generator;
pub mod logging;

pub use api::{load_api_document, ApiDocument, Resource};
pub use generator::{generate_project_with_options, GenerateOptions, Target};
