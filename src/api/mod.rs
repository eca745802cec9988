//! # API Module
//!
//! Reads an OpenAPI 3 document and turns it into the resources the generator
//! scaffolds. A resource is a collection path with a `get` operation; its
//! fields come from the item schema and its filter parameters from the
//! collection's query parameters.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
