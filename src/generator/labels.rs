use super::fields::Field;
use std::collections::{BTreeMap, HashSet};

/// UI strings every generated app needs, keyed by the name templates use.
const COMMON_LABELS: [(&str, &str); 18] = [
    ("submit", "Submit"),
    ("reset", "Reset"),
    ("delete", "Delete"),
    ("confirmDelete", "Are you sure you want to delete this item?"),
    ("noresults", "No results"),
    ("close", "Close"),
    ("updated", "Updated"),
    ("field", "Field"),
    ("value", "Value"),
    ("filters", "Filters"),
    ("filter", "Filter"),
    ("unavail", "Data unavailable"),
    ("loading", "Loading..."),
    ("deleted", "Deleted"),
    ("numValidation", "Please, insert a value bigger than zero!"),
    ("stringValidation", "Please type something"),
    ("required", "Field is required"),
    ("recPerPage", "Records per page:"),
];

/// The fixed label table, in catalog order.
pub fn common_labels() -> &'static [(&'static str, &'static str)] {
    &COMMON_LABELS
}

/// The label table as a lookup map for templates (`labels.submit`).
pub fn common_label_map() -> BTreeMap<String, String> {
    COMMON_LABELS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// English texts of the common labels, in catalog order.
pub fn common_label_texts() -> Vec<String> {
    COMMON_LABELS.iter().map(|(_, v)| v.to_string()).collect()
}

/// Labels a resource adds on top of the common table: form field names, then
/// read field names, each name kept once at its first position.
pub fn context_labels(form_fields: &[Field], read_fields: &[Field]) -> Vec<String> {
    let mut seen = HashSet::new();
    form_fields
        .iter()
        .chain(read_fields)
        .map(|f| f.name.clone())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
