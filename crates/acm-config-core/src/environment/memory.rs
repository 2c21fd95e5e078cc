//! In-memory process environment

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::traits::ProcessEnvironment;
use crate::types::PropertyMap;

/// Process environment held in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryProcessEnvironment {
    properties: RwLock<HashMap<String, String>>,
}

impl MemoryProcessEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment with initial properties
    pub fn with_properties<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: RwLock::new(
                initial.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ),
        }
    }

    pub fn remove_property(&self, key: &str) -> Option<String> {
        self.properties.write().remove(key)
    }
}

impl ProcessEnvironment for MemoryProcessEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        self.properties.read().get(key).cloned()
    }

    fn set_property(&self, key: &str, value: &str) {
        self.properties.write().insert(key.to_string(), value.to_string());
    }

    fn properties(&self) -> PropertyMap {
        self.properties
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}
