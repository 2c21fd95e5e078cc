//! Flat property maps and value rendering

use std::collections::BTreeMap;

use serde_json::Value;

/// Flat, dotted-key property mapping
///
/// Ordered so that merged output and echoed layers are deterministic.
pub type PropertyMap = BTreeMap<String, Value>;

/// Render a property value as the string used for field resolution
///
/// Scalars render as-is, sequences of scalars are comma-joined. `null`,
/// maps and nested sequences have no string form and yield `None`.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Array(_) | Value::Object(_) | Value::Null => return None,
                    scalar => parts.push(value_to_string(scalar)?),
                }
            }
            Some(parts.join(","))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Look up a key and return its trimmed, non-empty string form
pub fn non_empty(map: &PropertyMap, key: &str) -> Option<String> {
    map.get(key)
        .and_then(value_to_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Split a comma separated key list into trimmed, non-blank entries
pub fn split_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_string_scalars() {
        assert_eq!(value_to_string(&json!("a")), Some("a".to_string()));
        assert_eq!(value_to_string(&json!(3000)), Some("3000".to_string()));
        assert_eq!(value_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(value_to_string(&Value::Null), None);
    }

    #[test]
    fn test_value_to_string_sequences() {
        assert_eq!(value_to_string(&json!(["a.yml", "b.yml"])), Some("a.yml,b.yml".to_string()));
        assert_eq!(value_to_string(&json!([["nested"]])), None);
        assert_eq!(value_to_string(&json!({"k": "v"})), None);
    }

    #[test]
    fn test_non_empty_trims() {
        let mut map = PropertyMap::new();
        map.insert("blank".into(), json!("   "));
        map.insert("padded".into(), json!("  value "));

        assert_eq!(non_empty(&map, "blank"), None);
        assert_eq!(non_empty(&map, "padded"), Some("value".to_string()));
        assert_eq!(non_empty(&map, "missing"), None);
    }

    #[test]
    fn test_split_key_list() {
        assert_eq!(split_key_list(" a.yml , ,b.properties,"), vec!["a.yml", "b.properties"]);
        assert!(split_key_list("  ").is_empty());
    }
}
