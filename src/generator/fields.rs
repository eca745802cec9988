use crate::api::{FieldSpec, RawParameter};
use serde::Serialize;
use std::fmt;

/// HTML input kind a field or parameter is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputType {
    Text,
    Number,
    Checkbox,
    Date,
    DateTime,
    Time,
    Email,
    Url,
}

/// Input kinds that need a date/time picker
pub const DATE_TYPES: [InputType; 3] = [InputType::Time, InputType::Date, InputType::DateTime];

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Checkbox => "checkbox",
            InputType::Date => "date",
            InputType::DateTime => "dateTime",
            InputType::Time => "time",
            InputType::Email => "email",
            InputType::Url => "url",
        }
    }

    pub fn is_date(&self) -> bool {
        DATE_TYPES.contains(self)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input kind plus the optional `step` attribute for numeric inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlInput {
    pub input_type: InputType,
    pub step: Option<String>,
}

impl HtmlInput {
    fn of(input_type: InputType) -> Self {
        Self {
            input_type,
            step: None,
        }
    }
}

/// Map OpenAPI typing hints onto an HTML input kind.
///
/// Relations are edited as text (an IRI), whatever their declared type.
pub fn html_input(schema_type: Option<&str>, format: Option<&str>, reference: bool) -> HtmlInput {
    if reference {
        return HtmlInput::of(InputType::Text);
    }
    match format {
        Some("email") => return HtmlInput::of(InputType::Email),
        Some("uri") | Some("url") => return HtmlInput::of(InputType::Url),
        Some("date") => return HtmlInput::of(InputType::Date),
        Some("date-time") => return HtmlInput::of(InputType::DateTime),
        Some("time") => return HtmlInput::of(InputType::Time),
        _ => {}
    }
    match schema_type {
        Some("integer") => HtmlInput::of(InputType::Number),
        Some("number") => HtmlInput {
            input_type: InputType::Number,
            step: Some("0.1".to_string()),
        },
        Some("boolean") => HtmlInput::of(InputType::Checkbox),
        _ => HtmlInput::of(InputType::Text),
    }
}

/// UI descriptor of one resource field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub step: Option<String>,
    /// Whether the field points at another resource
    pub reference: bool,
    /// Target schema of the relation, when known
    pub reference_name: Option<String>,
    pub required: bool,
    pub description: String,
    pub readonly: bool,
    pub multiple: bool,
}

/// Derive the UI descriptor for one field spec.
pub fn build_field(spec: &FieldSpec) -> Field {
    let reference = spec.reference.is_some();
    let input = html_input(spec.schema_type.as_deref(), spec.format.as_deref(), reference);
    Field {
        name: spec.name.clone(),
        input_type: input.input_type,
        step: input.step,
        reference,
        reference_name: spec.reference.clone(),
        required: spec.required,
        // descriptions end up inside double-quoted attributes
        description: spec.description.replace('"', "'"),
        readonly: false,
        multiple: spec.multiple,
    }
}

pub fn build_fields(specs: &[FieldSpec]) -> Vec<Field> {
    specs.iter().map(build_field).collect()
}

/// A list-endpoint parameter annotated with its input kind.
///
/// `multiple` is only ever set by [`normalize_parameters`](super::normalize_parameters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub variable: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub step: Option<String>,
    pub required: bool,
    pub description: String,
    pub multiple: bool,
}

impl Parameter {
    /// Bare parameter of text kind, mostly useful in tests.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            input_type: InputType::Text,
            step: None,
            required: false,
            description: String::new(),
            multiple: false,
        }
    }
}

impl From<&RawParameter> for Parameter {
    fn from(raw: &RawParameter) -> Self {
        let input = html_input(raw.schema_type.as_deref(), raw.format.as_deref(), false);
        Self {
            variable: raw.variable.clone(),
            input_type: input.input_type,
            step: input.step,
            required: raw.required,
            description: raw.description.replace('"', "'"),
            multiple: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, ty: Option<&str>, format: Option<&str>) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            schema_type: ty.map(str::to_string),
            format: format.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_html_input_mapping() {
        assert_eq!(html_input(Some("integer"), None, false).input_type, InputType::Number);
        let decimal = html_input(Some("number"), None, false);
        assert_eq!(decimal.input_type, InputType::Number);
        assert_eq!(decimal.step.as_deref(), Some("0.1"));
        assert_eq!(html_input(Some("boolean"), None, false).input_type, InputType::Checkbox);
        assert_eq!(html_input(Some("string"), Some("date"), false).input_type, InputType::Date);
        assert_eq!(
            html_input(Some("string"), Some("date-time"), false).input_type,
            InputType::DateTime
        );
        assert_eq!(html_input(Some("string"), Some("time"), false).input_type, InputType::Time);
        assert_eq!(html_input(Some("string"), Some("email"), false).input_type, InputType::Email);
        assert_eq!(html_input(Some("string"), Some("uri"), false).input_type, InputType::Url);
        assert_eq!(html_input(None, None, false).input_type, InputType::Text);
    }

    #[test]
    fn test_reference_is_text() {
        let mut author = spec("author", Some("integer"), None);
        author.reference = Some("Author".to_string());
        let field = build_field(&author);
        assert_eq!(field.input_type, InputType::Text);
        assert!(field.reference);
        assert_eq!(field.reference_name.as_deref(), Some("Author"));
    }

    #[test]
    fn test_description_quotes_are_replaced() {
        let mut title = spec("title", Some("string"), None);
        title.description = r#"The "main" title"#.to_string();
        assert_eq!(build_field(&title).description, "The 'main' title");
    }

    #[test]
    fn test_input_type_serializes_camel_case() {
        assert_eq!(serde_json::to_value(InputType::DateTime).unwrap(), "dateTime");
        assert_eq!(InputType::DateTime.to_string(), "dateTime");
        assert!(InputType::Time.is_date());
        assert!(!InputType::Text.is_date());
    }
}
