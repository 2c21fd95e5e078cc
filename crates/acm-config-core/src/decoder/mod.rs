//! Remote document decoding
//!
//! A document's key decides how its content is read:
//! - `.yaml` / `.yml`: YAML, flattened to dotted keys
//! - `.properties`: line-based `key=value`
//! - anything else: one opaque value stored under the document's own key,
//!   so certificates or scripts can be exposed as a single property

mod properties;
mod yaml;

use serde_json::Value;
use thiserror::Error;

use crate::types::PropertyMap;

/// Errors raised while decoding structured documents
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("YAML document is not a mapping")]
    NotAMapping,

    #[error("Unsupported YAML key: {0}")]
    InvalidKey(String),

    #[error("Properties error at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("Key list '{0}' is not a string or a list of strings")]
    InvalidKeyList(String),
}

impl DecodeError {
    pub(crate) fn properties(line: usize, message: impl Into<String>) -> Self {
        Self::Properties {
            line,
            message: message.into(),
        }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// How a document is interpreted, decided by its key suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Properties,
    Opaque,
}

impl DocumentFormat {
    pub fn from_key(key: &str) -> Self {
        if key.ends_with(".yaml") || key.ends_with(".yml") {
            DocumentFormat::Yaml
        } else if key.ends_with(".properties") {
            DocumentFormat::Properties
        } else {
            DocumentFormat::Opaque
        }
    }

    /// Structured formats are parsed, opaque ones are passed through
    pub fn is_structured(&self) -> bool {
        !matches!(self, DocumentFormat::Opaque)
    }
}

/// Decode raw remote content into a flat property map
///
/// Blank content decodes to an empty map for every format.
///
/// # Errors
///
/// Returns `DecodeError` when a `.yaml`/`.yml`/`.properties` document is malformed.
pub fn decode(key: &str, raw: &str) -> DecodeResult<PropertyMap> {
    if raw.trim().is_empty() {
        return Ok(PropertyMap::new());
    }
    match DocumentFormat::from_key(key) {
        DocumentFormat::Yaml => yaml::decode_yaml(raw),
        DocumentFormat::Properties => properties::decode_properties(raw),
        DocumentFormat::Opaque => {
            let mut map = PropertyMap::new();
            map.insert(key.to_string(), Value::String(raw.to_string()));
            Ok(map)
        }
    }
}
