use super::fields::{Field, InputType, Parameter, DATE_TYPES};
use super::labels::{common_label_map, common_label_texts, context_labels};
use crate::api::Resource;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Prefix of Hydra vocabulary keys in API responses (`hydra:member`, ...)
pub const HYDRA_PREFIX: &str = "hydra:";

/// Entrypoint used when neither the document nor the user provides one
pub const DEFAULT_ENTRYPOINT: &str = "http://localhost";

/// API root the generated app talks to, split the way the config templates
/// need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrypoint {
    /// Full URL without trailing slash
    pub url: String,
    /// `scheme://host[:port]`
    pub host: String,
    /// Path component without trailing slash (may be empty)
    pub path: String,
}

impl Entrypoint {
    /// Parse an absolute API URL.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let url = url::Url::parse(raw)
            .map_err(|e| anyhow::anyhow!("invalid entrypoint `{raw}`: {e}"))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("entrypoint `{raw}` has no host"))?;
        let host = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };
        let path = url.path().trim_end_matches('/').to_string();
        Ok(Self {
            url: format!("{host}{path}"),
            host,
            path,
        })
    }

    /// Like [`Entrypoint::parse`], but a relative server URL (`/api`) is
    /// taken against [`DEFAULT_ENTRYPOINT`].
    pub fn resolve(raw: &str) -> anyhow::Result<Self> {
        match url::Url::parse(raw) {
            Ok(_) => Self::parse(raw),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let joined = url::Url::parse(DEFAULT_ENTRYPOINT)?.join(raw)?;
                Self::parse(joined.as_str())
            }
            Err(e) => Err(anyhow::anyhow!("invalid entrypoint `{raw}`: {e}")),
        }
    }
}

impl Default for Entrypoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENTRYPOINT.to_string(),
            host: DEFAULT_ENTRYPOINT.to_string(),
            path: String::new(),
        }
    }
}

/// A filter parameter after matching against the readable fields.
///
/// Templates see both variants through the same set of keys (`kind`, `name`,
/// `variable`, `type`, `step`, `reference`, `multiple`, `required`,
/// `description`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedParameter {
    /// The parameter names a readable field; the field descriptor is used
    Field(Field),
    /// No field matches; the parameter is used as reported
    Raw(Parameter),
}

impl ResolvedParameter {
    pub fn name(&self) -> &str {
        match self {
            ResolvedParameter::Field(f) => &f.name,
            ResolvedParameter::Raw(p) => &p.variable,
        }
    }

    pub fn input_type(&self) -> InputType {
        match self {
            ResolvedParameter::Field(f) => f.input_type,
            ResolvedParameter::Raw(p) => p.input_type,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ResolvedParameter::Field(f) if f.reference)
    }

    pub fn is_multiple(&self) -> bool {
        match self {
            ResolvedParameter::Field(f) => f.multiple,
            ResolvedParameter::Raw(p) => p.multiple,
        }
    }
}

impl Serialize for ResolvedParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (kind, step, required, description) = match self {
            ResolvedParameter::Field(f) => ("field", &f.step, f.required, &f.description),
            ResolvedParameter::Raw(p) => ("raw", &p.step, p.required, &p.description),
        };
        let mut s = serializer.serialize_struct("ResolvedParameter", 9)?;
        s.serialize_field("kind", kind)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("variable", self.name())?;
        s.serialize_field("type", &self.input_type())?;
        s.serialize_field("step", step)?;
        s.serialize_field("reference", &self.is_reference())?;
        s.serialize_field("multiple", &self.is_multiple())?;
        s.serialize_field("required", &required)?;
        s.serialize_field("description", description)?;
        s.end()
    }
}

/// Everything a template may read while rendering one resource.
///
/// Built once per resource by [`build_context`] and only ever borrowed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub title: String,
    pub name: String,
    pub lc: String,
    pub uc: String,
    pub title_uc_first: String,
    pub ucf: String,
    /// Readable fields (list and show screens)
    pub fields: Vec<Field>,
    /// Writable fields (forms)
    pub form_fields: Vec<Field>,
    pub parameters: Vec<ResolvedParameter>,
    pub date_types: Vec<InputType>,
    pub form_contains_date: bool,
    pub list_contains_date: bool,
    pub params_have_refs: bool,
    pub labels: BTreeMap<String, String>,
    pub common_label_texts: Vec<String>,
    pub context_labels: Vec<String>,
    pub hydra_prefix: String,
    pub entrypoint: Entrypoint,
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn contains_date(fields: &[Field]) -> bool {
    fields.iter().any(|f| f.input_type.is_date())
}

/// Match each normalized parameter against the readable fields by name.
pub fn resolve_parameters(params: &[Parameter], fields: &[Field]) -> Vec<ResolvedParameter> {
    params
        .iter()
        .map(|p| match fields.iter().find(|f| f.name == p.variable) {
            Some(field) => ResolvedParameter::Field(Field {
                multiple: p.multiple,
                ..field.clone()
            }),
            None => ResolvedParameter::Raw(p.clone()),
        })
        .collect()
}

/// Assemble the generation context of one resource.
///
/// `params` must already be normalized. The result is a pure function of the
/// inputs.
pub fn build_context(
    resource: &Resource,
    params: &[Parameter],
    fields: Vec<Field>,
    form_fields: Vec<Field>,
    entrypoint: Entrypoint,
) -> GenerationContext {
    let title_uc_first = upper_first(&resource.title);
    let parameters = resolve_parameters(params, &fields);
    let params_have_refs = parameters
        .iter()
        .any(|p| p.input_type() == InputType::Text && p.is_reference());

    GenerationContext {
        title: resource.title.clone(),
        name: resource.name.clone(),
        lc: resource.title.to_lowercase(),
        uc: resource.title.to_uppercase(),
        ucf: title_uc_first.clone(),
        title_uc_first,
        form_contains_date: contains_date(&form_fields),
        list_contains_date: contains_date(&fields),
        params_have_refs,
        context_labels: context_labels(&form_fields, &fields),
        parameters,
        fields,
        form_fields,
        date_types: DATE_TYPES.to_vec(),
        labels: common_label_map(),
        common_label_texts: common_label_texts(),
        hydra_prefix: HYDRA_PREFIX.to_string(),
        entrypoint,
    }
}
