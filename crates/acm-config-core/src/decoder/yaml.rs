//! YAML documents flattened to dotted keys

use serde::Deserialize;
use serde_json::Value;
use serde_yaml::Value as YamlValue;

use super::DecodeError;
use crate::types::PropertyMap;

/// Parse every document in `raw` and flatten it into `a.b.c` / `list[0]` keys
///
/// Later documents in a multi-document stream override earlier ones. Empty
/// documents are skipped.
pub(super) fn decode_yaml(raw: &str) -> Result<PropertyMap, DecodeError> {
    let mut flat = PropertyMap::new();
    for document in serde_yaml::Deserializer::from_str(raw) {
        let value = YamlValue::deserialize(document)?;
        match &value {
            YamlValue::Null => continue,
            YamlValue::Mapping(_) => flatten(&value, None, &mut flat)?,
            YamlValue::Tagged(tagged) if matches!(tagged.value, YamlValue::Mapping(_)) => {
                flatten(&tagged.value, None, &mut flat)?
            }
            _ => return Err(DecodeError::NotAMapping),
        }
    }
    Ok(flat)
}

fn flatten(value: &YamlValue, path: Option<&str>, out: &mut PropertyMap) -> Result<(), DecodeError> {
    match value {
        YamlValue::Mapping(mapping) => {
            if mapping.is_empty() {
                if let Some(path) = path {
                    out.insert(path.to_string(), Value::String(String::new()));
                }
            }
            for (key, child) in mapping {
                let key = key_to_string(key)?;
                let child_path = match path {
                    Some(parent) => format!("{}.{}", parent, key),
                    None => key,
                };
                flatten(child, Some(&child_path), out)?;
            }
        }
        YamlValue::Sequence(items) => {
            let Some(path) = path else {
                return Err(DecodeError::NotAMapping);
            };
            if items.is_empty() {
                out.insert(path.to_string(), Value::String(String::new()));
            }
            for (index, item) in items.iter().enumerate() {
                flatten(item, Some(&format!("{}[{}]", path, index)), out)?;
            }
        }
        YamlValue::Tagged(tagged) => flatten(&tagged.value, path, out)?,
        scalar => {
            if let Some(path) = path {
                out.insert(path.to_string(), scalar_to_json(scalar));
            }
        }
    }
    Ok(())
}

fn key_to_string(key: &YamlValue) -> Result<String, DecodeError> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(DecodeError::InvalidKey(format!("{:?}", other))),
    }
}

fn scalar_to_json(value: &YamlValue) -> Value {
    match value {
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(n.to_string()))
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        // Spring-style flattening renders null as an empty value
        _ => Value::String(String::new()),
    }
}
