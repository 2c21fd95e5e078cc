//! Ordered, named property layers

use parking_lot::RwLock;
use serde_json::Value;

use super::traits::{HostError, HostResult, HostStore};
use crate::types::PropertyMap;

/// One named set of properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyLayer {
    pub name: String,
    pub properties: PropertyMap,
}

impl PropertyLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Create a layer from string pairs
    pub fn with_properties<I, K, V>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }
}

/// Where the merged result goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Push a new named layer on top (or replace one with the same name)
    #[default]
    AppendLayer,
    /// Fold the result into every layer whose name contains the pattern
    MergeInto { layer_pattern: String },
}

/// In-process host store made of ordered layers
///
/// Later layers take precedence over earlier ones.
#[derive(Debug, Default)]
pub struct LayeredStore {
    layers: RwLock<Vec<PropertyLayer>>,
    write_mode: WriteMode,
}

impl LayeredStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_mode(write_mode: WriteMode) -> Self {
        Self {
            layers: RwLock::new(Vec::new()),
            write_mode,
        }
    }

    /// Add a layer with the highest precedence
    pub fn add_last(&self, layer: PropertyLayer) {
        self.layers.write().push(layer);
    }

    /// Add a layer with the lowest precedence
    pub fn add_first(&self, layer: PropertyLayer) {
        self.layers.write().insert(0, layer);
    }

    /// Builder form of [`LayeredStore::add_last`]
    pub fn with_layer(self, layer: PropertyLayer) -> Self {
        self.add_last(layer);
        self
    }

    pub fn layer(&self, name: &str) -> Option<PropertyLayer> {
        self.layers.read().iter().find(|l| l.name == name).cloned()
    }

    pub fn layer_names(&self) -> Vec<String> {
        self.layers.read().iter().map(|l| l.name.clone()).collect()
    }

    /// Effective value of `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.layers
            .read()
            .iter()
            .rev()
            .find_map(|l| l.properties.get(key).cloned())
    }

    pub fn write_mode(&self) -> &WriteMode {
        &self.write_mode
    }
}

impl HostStore for LayeredStore {
    fn local_properties(&self) -> PropertyMap {
        let mut merged = PropertyMap::new();
        for layer in self.layers.read().iter() {
            merged.extend(layer.properties.clone());
        }
        merged
    }

    fn contains_key(&self, key: &str) -> bool {
        self.layers.read().iter().any(|l| l.properties.contains_key(key))
    }

    fn contains_layer(&self, name: &str) -> bool {
        self.layers.read().iter().any(|l| l.name == name)
    }

    fn write_merged(&self, layer_name: &str, merged: PropertyMap) -> HostResult<()> {
        let mut layers = self.layers.write();
        match &self.write_mode {
            WriteMode::AppendLayer => {
                if let Some(existing) = layers.iter_mut().find(|l| l.name == layer_name) {
                    existing.properties = merged;
                } else {
                    layers.push(PropertyLayer {
                        name: layer_name.to_string(),
                        properties: merged,
                    });
                }
                Ok(())
            }
            WriteMode::MergeInto { layer_pattern } => {
                let mut touched = false;
                for layer in layers.iter_mut().filter(|l| l.name.contains(layer_pattern.as_str())) {
                    layer.properties.extend(merged.clone());
                    touched = true;
                }
                if touched {
                    Ok(())
                } else {
                    Err(HostError::LayerNotFound(layer_pattern.clone()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect()
    }

    #[test]
    fn test_later_layers_win() {
        let store = LayeredStore::new()
            .with_layer(PropertyLayer::with_properties("applicationConfig: [application.yml]", [("a", "1"), ("b", "1")]))
            .with_layer(PropertyLayer::with_properties("applicationConfig: [application-prod.yml]", [("b", "2")]));

        let local = store.local_properties();
        assert_eq!(local.get("a"), Some(&json!("1")));
        assert_eq!(local.get("b"), Some(&json!("2")));
        assert_eq!(store.get("b"), Some(json!("2")));
    }

    #[test]
    fn test_add_first_has_lowest_precedence() {
        let store = LayeredStore::new().with_layer(PropertyLayer::with_properties("main", [("a", "main")]));
        store.add_first(PropertyLayer::with_properties("defaults", [("a", "default")]));

        assert_eq!(store.layer_names(), vec!["defaults", "main"]);
        assert_eq!(store.get("a"), Some(json!("main")));
    }

    #[test]
    fn test_append_layer_mode() {
        let store = LayeredStore::new().with_layer(PropertyLayer::with_properties("local", [("a", "1")]));
        store.write_merged("remote", merged(&[("a", "2")])).unwrap();

        assert!(store.contains_layer("remote"));
        assert_eq!(store.get("a"), Some(json!("2")));

        // Same name replaces rather than stacking
        store.write_merged("remote", merged(&[("a", "3")])).unwrap();
        assert_eq!(store.layer_names().len(), 2);
        assert_eq!(store.get("a"), Some(json!("3")));
    }

    #[test]
    fn test_merge_into_mode() {
        let store = LayeredStore::with_write_mode(WriteMode::MergeInto {
            layer_pattern: "applicationConfig".to_string(),
        })
        .with_layer(PropertyLayer::with_properties("applicationConfig: [a.yml]", [("a", "1")]))
        .with_layer(PropertyLayer::with_properties("systemProperties", [("s", "1")]));

        store.write_merged("remote", merged(&[("r", "x")])).unwrap();

        assert!(!store.contains_layer("remote"));
        assert_eq!(store.layer("applicationConfig: [a.yml]").unwrap().properties.get("r"), Some(&json!("x")));
        assert!(store.layer("systemProperties").unwrap().properties.get("r").is_none());
        assert!(store.contains_key("r"));
    }

    #[test]
    fn test_merge_into_without_match_fails() {
        let store = LayeredStore::with_write_mode(WriteMode::MergeInto {
            layer_pattern: "applicationConfig".to_string(),
        });
        assert!(matches!(
            store.write_merged("remote", PropertyMap::new()),
            Err(HostError::LayerNotFound(_))
        ));
    }
}
