//! Process-wide property registry
//!
//! Launch-time overrides live here for the lifetime of the process. The
//! registry is seeded once from environment variables:
//! - `ALIBABA_ACM_TIME_OUT` -> `alibaba.acm.time-out`
//! - `ADDRESS_SERVER_DOMAIN` -> `address.server.domain`
//! - `RAM_ROLE_NAME` -> `ram.role.name`
//! - `TENANT_ID` -> `tenant.id`

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;

use super::traits::ProcessEnvironment;
use crate::types::keys::{PROPERTY_PREFIX, PUBLISHED_ADDRESS, RAM_ROLE_OVERRIDE, TENANT};
use crate::types::PropertyMap;

const ACM_ENV_PREFIX: &str = "ALIBABA_ACM_";

static GLOBAL_PROPERTIES: Lazy<RwLock<HashMap<String, String>>> =
    Lazy::new(|| RwLock::new(seed_from_env(std::env::vars())));

/// Map environment variables onto property names
fn seed_from_env(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    let mut seeded = HashMap::new();
    for (name, value) in vars {
        let key = if let Some(rest) = name.strip_prefix(ACM_ENV_PREFIX) {
            format!("{}.{}", PROPERTY_PREFIX, rest.to_lowercase().replace('_', "-"))
        } else {
            match name.as_str() {
                "ADDRESS_SERVER_DOMAIN" => PUBLISHED_ADDRESS.to_string(),
                "RAM_ROLE_NAME" => RAM_ROLE_OVERRIDE.to_string(),
                "TENANT_ID" => TENANT.to_string(),
                _ => continue,
            }
        };
        seeded.insert(key, value);
    }
    seeded
}

/// Set a process-wide property
pub fn set_system_property(key: &str, value: &str) {
    GLOBAL_PROPERTIES.write().insert(key.to_string(), value.to_string());
}

/// Get a process-wide property
pub fn get_system_property(key: &str) -> Option<String> {
    GLOBAL_PROPERTIES.read().get(key).cloned()
}

/// Remove a process-wide property
pub fn clear_system_property(key: &str) -> Option<String> {
    GLOBAL_PROPERTIES.write().remove(key)
}

/// Process environment backed by the global registry
///
/// Every instance shares the same state, so values published by the
/// bootstrap are visible to the rest of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessEnvironment;

impl SystemProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessEnvironment for SystemProcessEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        get_system_property(key)
    }

    fn set_property(&self, key: &str, value: &str) {
        set_system_property(key, value);
    }

    fn properties(&self) -> PropertyMap {
        GLOBAL_PROPERTIES
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_env_mapping() {
        let vars = vec![
            ("ALIBABA_ACM_TIME_OUT".to_string(), "5000".to_string()),
            ("ALIBABA_ACM_APPLICATION_DATA_ID".to_string(), "app.yml".to_string()),
            ("ADDRESS_SERVER_DOMAIN".to_string(), "acm.aliyun.com".to_string()),
            ("RAM_ROLE_NAME".to_string(), "ecs-role".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ];
        let seeded = seed_from_env(vars.into_iter());

        assert_eq!(seeded.get("alibaba.acm.time-out").map(String::as_str), Some("5000"));
        assert_eq!(seeded.get("alibaba.acm.application-data-id").map(String::as_str), Some("app.yml"));
        assert_eq!(seeded.get(PUBLISHED_ADDRESS).map(String::as_str), Some("acm.aliyun.com"));
        assert_eq!(seeded.get(RAM_ROLE_OVERRIDE).map(String::as_str), Some("ecs-role"));
        assert_eq!(seeded.len(), 4);
    }

    #[test]
    fn test_system_environment_shares_state() {
        let key = "acm.test.shared-state";
        SystemProcessEnvironment::new().set_property(key, "v");

        assert_eq!(SystemProcessEnvironment::new().property(key).as_deref(), Some("v"));
        assert_eq!(clear_system_property(key).as_deref(), Some("v"));
        assert_eq!(get_system_property(key), None);
    }
}
