use serde::{Deserialize, Serialize};

/// Schema attribute of a resource, as read from the API document.
///
/// This is the raw input of the field deriver; it carries the OpenAPI
/// typing hints, not the UI input kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Property name
    pub name: String,
    /// JSON Schema `type` (`string`, `integer`, ...)
    pub schema_type: Option<String>,
    /// JSON Schema `format` (`date`, `date-time`, `email`, `iri-reference`, ...)
    pub format: Option<String>,
    /// Name of the schema this property points at, when it is a relation
    pub reference: Option<String>,
    /// Whether the property is an array
    pub multiple: bool,
    pub required: bool,
    pub description: String,
}

/// A list-endpoint query parameter, as read from the API document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParameter {
    /// Query key, possibly suffixed with `[]` or `[exists]`
    pub variable: String,
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub required: bool,
    pub description: String,
}

/// One CRUD-able resource found in the API document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Human title, e.g. `Book`
    pub title: String,
    /// Collection segment, e.g. `books`
    pub name: String,
    /// Collection path, e.g. `/books`
    pub path: String,
    pub readable_fields: Vec<FieldSpec>,
    pub writable_fields: Vec<FieldSpec>,
    pub parameters: Vec<RawParameter>,
}

/// A loaded API document: its resources and entrypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDocument {
    /// `info.title` of the document
    pub title: String,
    /// First `servers[].url`, if any
    pub entrypoint: Option<String>,
    pub resources: Vec<Resource>,
}

impl ApiDocument {
    /// Find a resource by collection name or title, case-insensitively.
    pub fn resource(&self, key: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(key) || r.title.eq_ignore_ascii_case(key))
    }
}

/// Source of a resource's list-endpoint parameters.
///
/// The loader implements this over the parsed document; tests and embedders
/// can supply parameters from elsewhere.
pub trait ParameterSource {
    fn parameters(&self, resource: &Resource) -> anyhow::Result<Vec<RawParameter>>;
}

impl ParameterSource for ApiDocument {
    fn parameters(&self, resource: &Resource) -> anyhow::Result<Vec<RawParameter>> {
        self.resources
            .iter()
            .find(|r| r.path == resource.path)
            .map(|r| r.parameters.clone())
            .ok_or_else(|| anyhow::anyhow!("resource {} is not part of this document", resource.path))
    }
}
