use std::path::PathBuf;

/// Failures raised while generating one resource.
///
/// `Render` and `Io` are collected per file by the executor; the other
/// variants end the run for the resource they name.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The API document could not provide the resource or its parameters
    #[error("failed to read resource `{resource}` from the API document: {source}")]
    Upstream {
        resource: String,
        #[source]
        source: anyhow::Error,
    },

    /// A template could not be registered (bad syntax or a malformed switch block)
    #[error("template `{template}` is invalid: {source}")]
    Template {
        template: String,
        #[source]
        source: anyhow::Error,
    },

    /// A template failed to render with the resource's context
    #[error("failed to render `{template}` for `{resource}` into {}: {source}", path.display())]
    Render {
        resource: String,
        template: String,
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// A directory or file could not be written
    #[error("failed to write {} for `{resource}`: {source}", path.display())]
    Io {
        resource: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `--resource` filter matched nothing in the document
    #[error("no resource named `{0}` in the API document")]
    UnknownResource(String),
}
