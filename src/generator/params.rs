use super::fields::Parameter;
use std::collections::HashMap;

const ARRAY_SUFFIX: &str = "[]";
const EXISTS_SUFFIX: &str = "[exists]";

fn base_key(variable: &str) -> &str {
    variable.strip_suffix(ARRAY_SUFFIX).unwrap_or(variable)
}

/// Clean up the raw parameter list of a collection endpoint.
///
/// - `[exists]` filters are dropped.
/// - A `key[]` parameter survives only when it is the sole form of `key`.
/// - A parameter whose key is counted exactly twice is flagged `multiple`;
///   this is how a search filter accepting one or many values shows up
///   (`author` + `author[]`).
///
/// The count table is keyed by base key while the lookups use the raw
/// variable, so `tag` + `tag[]` yields a single `tag` flagged `multiple`
/// and the `tag[]` entry is dropped.
pub fn normalize_parameters(params: Vec<Parameter>) -> Vec<Parameter> {
    let mut stats: HashMap<String, usize> = HashMap::new();
    for p in &params {
        *stats.entry(base_key(&p.variable).to_string()).or_insert(0) += 1;
    }
    let count = |key: &str| stats.get(key).copied().unwrap_or(0);

    let mut result = Vec::with_capacity(params.len());
    for mut p in params {
        if p.variable.ends_with(EXISTS_SUFFIX) {
            tracing::debug!(variable = %p.variable, "dropping existence filter");
            continue;
        }
        if count(&p.variable) == 0 && p.variable.ends_with(ARRAY_SUFFIX) {
            if count(base_key(&p.variable)) == 1 {
                result.push(p);
            }
            continue;
        }
        if count(&p.variable) == 2 {
            p.multiple = true;
        }
        result.push(p);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(vars: &[&str]) -> Vec<Parameter> {
        vars.iter().map(|v| Parameter::new(*v)).collect()
    }

    fn summary(out: &[Parameter]) -> Vec<(&str, bool)> {
        out.iter().map(|p| (p.variable.as_str(), p.multiple)).collect()
    }

    #[test]
    fn test_exists_filters_are_removed() {
        let out = normalize_parameters(params(&["title", "author[exists]", "isbn[exists]"]));
        assert_eq!(summary(&out), vec![("title", false)]);
    }

    #[test]
    fn test_lone_array_parameter_is_kept_as_is() {
        let out = normalize_parameters(params(&["tags[]"]));
        assert_eq!(summary(&out), vec![("tags[]", false)]);
    }

    #[test]
    fn test_duplicate_key_is_flagged_multiple() {
        let out = normalize_parameters(params(&["author", "title", "author"]));
        assert_eq!(
            summary(&out),
            vec![("author", true), ("title", false), ("author", true)]
        );
    }

    #[test]
    fn test_three_occurrences_are_not_multiple() {
        let out = normalize_parameters(params(&["a", "a", "a"]));
        assert!(out.iter().all(|p| !p.multiple));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_bare_and_array_forms() {
        // base-key count of `tag` is 2: `tag[]` is dropped, `tag` becomes multiple
        let out = normalize_parameters(params(&["tag", "tag[]", "order[title]"]));
        assert_eq!(summary(&out), vec![("tag", true), ("order[title]", false)]);
    }

    #[test]
    fn test_order_is_preserved() {
        let out = normalize_parameters(params(&["z", "b[]", "a"]));
        let vars: Vec<_> = out.iter().map(|p| p.variable.as_str()).collect();
        assert_eq!(vars, vec!["z", "b[]", "a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_parameters(Vec::new()).is_empty());
    }
}
