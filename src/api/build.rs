use super::types::{FieldSpec, RawParameter, Resource};
use serde_json::{Map, Value};

/// Query parameters that drive pagination rather than filtering
const PAGINATION_PARAMETERS: [&str; 4] = ["page", "itemsPerPage", "pagination", "partial"];

/// Media types tried, in order, when picking a response or request schema
const PREFERRED_MEDIA_TYPES: [&str; 3] = ["application/ld+json", "application/json", "*/*"];

/// Maximum `allOf`/`$ref` nesting followed when collecting properties
const MAX_SCHEMA_DEPTH: usize = 8;

/// Resolve a local `#/components/schemas/<Name>` reference.
///
/// Returns the schema name together with the referenced schema value.
pub fn resolve_schema_ref<'a, 'r>(doc: &'a Value, ref_path: &'r str) -> Option<(&'r str, &'a Value)> {
    let name = ref_path.strip_prefix("#/components/schemas/")?;
    let schema = doc.get("components")?.get("schemas")?.get(name)?;
    Some((name, schema))
}

fn resolve_parameter_ref<'a>(doc: &'a Value, param: &'a Value) -> Option<&'a Value> {
    match param.get("$ref").and_then(Value::as_str) {
        Some(ref_path) => {
            let name = ref_path.strip_prefix("#/components/parameters/")?;
            doc.get("components")?.get("parameters")?.get(name)
        }
        None => Some(param),
    }
}

/// Pick the schema out of a `content` map, honouring [`PREFERRED_MEDIA_TYPES`].
fn content_schema(content: &Value) -> Option<&Value> {
    let map = content.as_object()?;
    PREFERRED_MEDIA_TYPES
        .iter()
        .find_map(|mt| map.get(*mt))
        .or_else(|| map.values().next())
        .and_then(|media| media.get("schema"))
}

fn success_response_schema(operation: &Value) -> Option<&Value> {
    let responses = operation.get("responses")?;
    ["200", "201"]
        .iter()
        .find_map(|code| responses.get(*code))
        .and_then(|r| r.get("content"))
        .and_then(content_schema)
}

fn request_body_schema(operation: &Value) -> Option<&Value> {
    operation
        .get("requestBody")?
        .get("content")
        .and_then(content_schema)
}

/// Follow `$ref`s until a concrete schema is reached, remembering the last
/// schema name seen.
fn deref_schema<'a>(doc: &'a Value, schema: &'a Value) -> (Option<&'a str>, &'a Value) {
    let mut name = None;
    let mut current = schema;
    for _ in 0..MAX_SCHEMA_DEPTH {
        match current
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|r| resolve_schema_ref(doc, r))
        {
            Some((n, s)) => {
                name = Some(n);
                current = s;
            }
            None => break,
        }
    }
    (name, current)
}

/// Unwrap a collection payload down to its item schema.
///
/// Handles plain arrays and Hydra collections (`hydra:member` / `member`).
fn item_schema<'a>(doc: &'a Value, schema: &'a Value) -> (Option<&'a str>, &'a Value) {
    let (name, resolved) = deref_schema(doc, schema);
    if let Some(items) = resolved.get("items") {
        return deref_schema(doc, items);
    }
    let member = resolved
        .get("properties")
        .and_then(|p| p.get("hydra:member").or_else(|| p.get("member")))
        .and_then(|m| m.get("items"));
    match member {
        Some(items) => deref_schema(doc, items),
        None => (name, resolved),
    }
}

/// Gather properties and the `required` list of a schema, merging `allOf`.
fn collect_properties(doc: &Value, schema: &Value, depth: usize) -> (Map<String, Value>, Vec<String>) {
    let mut properties = Map::new();
    let mut required = Vec::new();
    if depth > MAX_SCHEMA_DEPTH {
        return (properties, required);
    }
    let (_, schema) = deref_schema(doc, schema);
    if let Some(parts) = schema.get("allOf").and_then(Value::as_array) {
        for part in parts {
            let (props, req) = collect_properties(doc, part, depth + 1);
            properties.extend(props);
            required.extend(req);
        }
    }
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (k, v) in props {
            properties.insert(k.clone(), v.clone());
        }
    }
    if let Some(req) = schema.get("required").and_then(Value::as_array) {
        required.extend(req.iter().filter_map(Value::as_str).map(str::to_string));
    }
    (properties, required)
}

/// First non-null entry of a JSON Schema `type`, which may be a string or a list
fn schema_type(schema: &Value) -> Option<String> {
    match schema.get("type") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .map(str::to_string),
        _ => None,
    }
}

fn schema_format(schema: &Value) -> Option<String> {
    schema.get("format").and_then(Value::as_str).map(str::to_string)
}

fn ref_name(schema: &Value) -> Option<String> {
    schema
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.rsplit('/').next())
        .map(str::to_string)
}

fn flag(schema: &Value, key: &str) -> bool {
    schema.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Turn one schema property into a [`FieldSpec`].
pub fn field_spec(name: &str, property: &Value, required: bool) -> FieldSpec {
    let multiple = schema_type(property).as_deref() == Some("array");
    let target = if multiple {
        property.get("items").unwrap_or(&Value::Null)
    } else {
        property
    };
    let format = schema_format(target);
    let reference = ref_name(target).or_else(|| {
        (format.as_deref() == Some("iri-reference")).then(|| name.to_string())
    });
    FieldSpec {
        name: name.to_string(),
        schema_type: schema_type(target),
        format,
        reference,
        multiple,
        required,
        description: property
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Build field specs for a schema, keeping properties accepted by `keep`.
///
/// JSON-LD keywords (`@id`, `@type`, `@context`) are never fields.
fn fields_from_schema(doc: &Value, schema: &Value, keep: impl Fn(&Value) -> bool) -> Vec<FieldSpec> {
    let (properties, required) = collect_properties(doc, schema, 0);
    properties
        .iter()
        .filter(|(name, _)| !name.starts_with('@'))
        .filter(|(_, prop)| keep(prop))
        .map(|(name, prop)| field_spec(name, prop, required.iter().any(|r| r == name)))
        .collect()
}

/// Convert a query parameter object into a [`RawParameter`].
pub fn raw_parameter(param: &Value) -> Option<RawParameter> {
    if param.get("in").and_then(Value::as_str) != Some("query") {
        return None;
    }
    let variable = param.get("name").and_then(Value::as_str)?;
    if PAGINATION_PARAMETERS.contains(&variable) {
        return None;
    }
    let schema = param.get("schema").unwrap_or(&Value::Null);
    let target = if schema_type(schema).as_deref() == Some("array") {
        schema.get("items").unwrap_or(&Value::Null)
    } else {
        schema
    };
    Some(RawParameter {
        variable: variable.to_string(),
        schema_type: schema_type(target),
        format: schema_format(target),
        required: flag(param, "required"),
        description: param
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Schema names such as `Book.jsonld-book.read` or `Book-book.write` name the
/// `Book` resource.
pub fn title_from_schema_name(name: &str) -> String {
    name.split(['.', '-']).next().unwrap_or(name).to_string()
}

/// Fallback title from a collection segment: `books` → `Book`.
pub fn title_from_segment(segment: &str) -> String {
    let singular = if let Some(stem) = segment.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = segment.strip_suffix('s') {
        stem.to_string()
    } else {
        segment.to_string()
    };
    let mut chars = singular.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn item_path_for<'a>(paths: &'a Map<String, Value>, collection: &str) -> Option<&'a Value> {
    let prefix = format!("{collection}/{{");
    paths.iter().find_map(|(p, item)| {
        let rest = p.strip_prefix(&prefix)?;
        (rest.ends_with('}') && !rest.contains('/')).then_some(item)
    })
}

/// Build every resource exposed by the document.
///
/// A resource is a collection path (no templated segment) with a `get`
/// operation. Paths are visited in lexical order.
pub fn build_resources(doc: &Value) -> Vec<Resource> {
    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut resources = Vec::new();
    for (path, item) in paths {
        if path.contains('{') {
            continue;
        }
        let Some(list) = item.get("get") else {
            continue;
        };
        let Some(segment) = path.trim_end_matches('/').rsplit('/').next().filter(|s| !s.is_empty())
        else {
            continue;
        };

        let item_get = item_path_for(paths, path).and_then(|i| i.get("get"));
        let post = item.get("post");

        let read_schema = item_get
            .and_then(success_response_schema)
            .map(|s| deref_schema(doc, s))
            .or_else(|| success_response_schema(list).map(|s| item_schema(doc, s)));
        let write_schema = post.and_then(request_body_schema).map(|s| deref_schema(doc, s));

        let title = read_schema
            .and_then(|(name, _)| name)
            .or_else(|| write_schema.and_then(|(name, _)| name))
            .map(title_from_schema_name)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| title_from_segment(segment));

        let readable_fields = read_schema
            .map(|(_, s)| fields_from_schema(doc, s, |p| !flag(p, "writeOnly")))
            .unwrap_or_default();
        let writable_fields = write_schema
            .or(read_schema)
            .map(|(_, s)| fields_from_schema(doc, s, |p| !flag(p, "readOnly")))
            .unwrap_or_default();

        let parameters = item
            .get("parameters")
            .and_then(Value::as_array)
            .into_iter()
            .chain(list.get("parameters").and_then(Value::as_array))
            .flatten()
            .filter_map(|p| resolve_parameter_ref(doc, p))
            .filter_map(raw_parameter)
            .collect();

        resources.push(Resource {
            title,
            name: segment.to_string(),
            path: path.clone(),
            readable_fields,
            writable_fields,
            parameters,
        });
    }
    resources
}
