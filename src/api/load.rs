use super::build::build_resources;
use super::types::ApiDocument;
use anyhow::Context;
use oas3::OpenApiV3Spec;
use std::path::Path;

fn strip_unknown_verbs(val: &mut serde_json::Value) {
    const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

    if let Some(serde_json::Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let serde_json::Value::Object(obj) = item {
                obj.retain(|k, _| {
                    let lk = k.to_ascii_lowercase();
                    match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    }
                });
            }
        }
    }
}

/// Parse a document from text, YAML when `yaml` is set, JSON otherwise.
pub fn parse_api_document(content: &str, yaml: bool) -> anyhow::Result<ApiDocument> {
    let mut value: serde_json::Value = if yaml {
        serde_yaml::from_str(content).context("Failed to parse API document as YAML")?
    } else {
        serde_json::from_str(content).context("Failed to parse API document as JSON")?
    };

    strip_unknown_verbs(&mut value);
    let spec: OpenApiV3Spec = serde_json::from_value(value.clone())
        .context("API document is not a valid OpenAPI 3 document")?;

    let entrypoint = value
        .get("servers")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .and_then(|s| s.get("url"))
        .and_then(|u| u.as_str())
        .map(str::to_string);

    let resources = build_resources(&value);
    tracing::debug!(
        title = %spec.info.title,
        resources = resources.len(),
        "loaded API document"
    );

    Ok(ApiDocument {
        title: spec.info.title,
        entrypoint,
        resources,
    })
}

/// Load an OpenAPI document from disk.
///
/// `.yaml` / `.yml` files are read as YAML, anything else as JSON.
pub fn load_api_document(path: &Path) -> anyhow::Result<ApiDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read API document: {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    parse_api_document(&content, yaml)
        .with_context(|| format!("Failed to load API document: {}", path.display()))
}
