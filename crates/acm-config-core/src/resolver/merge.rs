//! Folding resolved settings and fetched documents into one layer

use serde_json::Value;

use crate::types::keys::*;
use crate::types::{PropertyMap, ResolvedConfig};

fn put(map: &mut PropertyMap, key: &str, value: Option<&String>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// Resolved fields under their canonical keys
///
/// Absent optional fields are left out so they never mask a fetched value.
pub fn echo_resolved(config: &ResolvedConfig) -> PropertyMap {
    let mut echo = PropertyMap::new();

    echo.insert(APPLICATION_DATA_ID.to_string(), Value::String(config.primary_key.clone()));
    if !config.key_list.is_empty() {
        echo.insert(DATA_ID_LIST.to_string(), Value::String(config.key_list.join(",")));
    }
    echo.insert(GROUP.to_string(), Value::String(config.group.clone()));
    put(&mut echo, ENDPOINT, config.endpoint.as_ref());
    put(&mut echo, NAMESPACE, config.namespace.as_ref());
    put(&mut echo, ACCESS_KEY, config.credentials.access_key.as_ref());
    put(&mut echo, SECRET_KEY, config.credentials.secret_key.as_ref());
    put(&mut echo, RAM_ROLE_NAME, config.credentials.role_name.as_ref());
    echo.insert(TIME_OUT.to_string(), Value::from(config.timeout_ms));
    echo.insert(OPEN_KMS_FILTER.to_string(), Value::Bool(config.encryption_filter_enabled));
    put(&mut echo, REGION_ID, config.region_id.as_ref());
    echo.insert(VM_PRIORITY.to_string(), Value::Bool(config.override_priority));

    echo
}

/// Echo the resolved fields, overlay fetched properties and stamp the sentinel
pub fn merge(config: &ResolvedConfig, fetched: PropertyMap) -> PropertyMap {
    let mut merged = echo_resolved(config);
    merged.extend(fetched);
    merged.insert(LOADED_MARKER.to_string(), Value::String(LOADED_MARKER_VALUE.to_string()));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Credentials;
    use serde_json::json;

    #[test]
    fn test_echo_omits_absent_fields() {
        let echo = echo_resolved(&ResolvedConfig::default());

        assert_eq!(echo.get(APPLICATION_DATA_ID), Some(&json!("application.yml")));
        assert_eq!(echo.get(GROUP), Some(&json!("DEFAULT_GROUP")));
        assert_eq!(echo.get(TIME_OUT), Some(&json!(3000)));
        assert_eq!(echo.get(OPEN_KMS_FILTER), Some(&json!(false)));
        assert_eq!(echo.get(VM_PRIORITY), Some(&json!(true)));
        for key in [DATA_ID_LIST, ENDPOINT, NAMESPACE, ACCESS_KEY, SECRET_KEY, RAM_ROLE_NAME, REGION_ID] {
            assert!(!echo.contains_key(key), "{} should be omitted", key);
        }
    }

    #[test]
    fn test_echo_all_fields() {
        let mut config = ResolvedConfig::default()
            .with_remote("acm.aliyun.com", "ns-1")
            .with_credentials(Credentials::key_pair("ak", "sk"))
            .with_key_list(["a.yml", "b.yml"]);
        config.region_id = Some("cn-hangzhou".into());

        let echo = echo_resolved(&config);
        assert_eq!(echo.len(), RECOGNISED_KEYS.len() - 1);
        assert_eq!(echo.get(DATA_ID_LIST), Some(&json!("a.yml,b.yml")));
        assert_eq!(echo.get(ENDPOINT), Some(&json!("acm.aliyun.com")));
        assert_eq!(echo.get(SECRET_KEY), Some(&json!("sk")));
    }

    #[test]
    fn test_fetched_overrides_echo() {
        let mut fetched = PropertyMap::new();
        fetched.insert(GROUP.into(), json!("REMOTE"));
        fetched.insert("app.name".into(), json!("demo"));

        let merged = merge(&ResolvedConfig::default(), fetched);
        assert_eq!(merged.get(GROUP), Some(&json!("REMOTE")));
        assert_eq!(merged.get("app.name"), Some(&json!("demo")));
        assert_eq!(merged.get(LOADED_MARKER), Some(&json!("Y")));
    }

    #[test]
    fn test_sentinel_cannot_be_overwritten() {
        let mut fetched = PropertyMap::new();
        fetched.insert(LOADED_MARKER.into(), json!("N"));

        let merged = merge(&ResolvedConfig::default(), fetched);
        assert_eq!(merged.get(LOADED_MARKER), Some(&json!("Y")));
    }
}
