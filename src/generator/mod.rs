//! # Generator Module
//!
//! Turns one API resource into the CRUD screens, store modules and routes of
//! a front-end app.
//!
//! ## Pipeline
//!
//! ```text
//! Resource ──► normalize_parameters ──► build_context ──► plan_generation ──► execute_plan
//!   │                                      ▲                    │                  │
//!   └──────────── build_fields ────────────┘              FilePlan table    TemplateRegistry
//!                                                                            + FileSystem
//! ```
//!
//! 1. **Parameters** - the list endpoint's query parameters are cleaned up:
//!    `[exists]` filters go away, `key` / `key[]` pairs collapse into one
//!    parameter flagged `multiple` (see [`normalize_parameters`]).
//! 2. **Fields** - schema properties become UI fields with an HTML input kind
//!    (see [`build_field`]).
//! 3. **Context** - parameters are matched against the readable fields and
//!    the cross-cutting flags (`formContainsDate`, `listContainsDate`,
//!    `paramsHaveRefs`) are computed once. The resulting
//!    [`GenerationContext`] is immutable and shared by every render.
//! 4. **Planning** - the target's static [`FilePlan`] is resolved into
//!    concrete directories and files: the shared part once per run, the
//!    rest once per resource. Pure; this is what `--dry-run` shows.
//! 5. **Execution** - every planned file is rendered and written through a
//!    [`FileSystem`]. Shared files (`utils/`, `config/`, common components)
//!    are kept when they already exist; resource files are replaced.
//!
//! ## Targets
//!
//! | Target   | Output                                                      |
//! |----------|-------------------------------------------------------------|
//! | `quasar` | Vue components, Vuex store modules, vue-router routes, i18n |
//! | `next`   | React components, Next.js pages, TypeScript types           |
//!
//! ## Templates
//!
//! Templates live under `templates/<target>/` and are compiled into the
//! binary. They are minijinja templates with `[[ ]]` for variables, so the
//! `{{ }}` of Vue and JSX is left alone, plus a `switch` block:
//!
//! ```text
//! {% switch field.type %}
//!   {% case "date", "dateTime" %}<q-date />
//!   {% default %}<q-input />
//! {% endswitch %}
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudgen::api::load_api_document;
//! use crudgen::generator::{generate_project_with_options, GenerateOptions, LocalFs, Target};
//!
//! let doc = load_api_document("openapi.yaml".as_ref())?;
//! let options = GenerateOptions {
//!     output: "src".into(),
//!     target: Target::Quasar,
//!     ..Default::default()
//! };
//! let report = generate_project_with_options(&doc, &options, &mut LocalFs)?;
//! assert!(report.is_success());
//! ```

mod context;
mod error;
mod fields;
mod fs;
pub mod help;
mod labels;
mod params;
mod plan;
mod project;
mod switch;
mod templates;

pub use context::*;
pub use error::GenerateError;
pub use fields::*;
pub use fs::*;
pub use labels::*;
pub use params::normalize_parameters;
pub use plan::*;
pub use project::*;
pub use switch::{expand_switch_blocks, SwitchError};
pub use templates::{embedded_templates, TemplateRegistry};
