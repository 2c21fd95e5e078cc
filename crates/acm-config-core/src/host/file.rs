//! Local configuration files as host layers
//!
//! Loads `application.yml` / `application.properties` style files into a
//! [`LayeredStore`] through the same decoder used for remote documents.

use std::fs;
use std::path::Path;

use super::layered::{LayeredStore, PropertyLayer};
use super::traits::{HostError, HostResult};
use crate::decoder::{self, DocumentFormat};

impl PropertyLayer {
    /// Read a `.yml`, `.yaml` or `.properties` file into a layer
    ///
    /// # Errors
    ///
    /// `HostError::UnsupportedFormat` for other extensions, `Io` when the file
    /// can't be read and `Decode` when its content is malformed.
    pub fn from_file(name: impl Into<String>, path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if !DocumentFormat::from_key(&file_name).is_structured() {
            return Err(HostError::UnsupportedFormat(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        Ok(Self {
            name: name.into(),
            properties: decoder::decode(&file_name, &content)?,
        })
    }
}

impl LayeredStore {
    /// Load `path` as the highest-precedence layer if it exists
    ///
    /// Returns `Ok(false)` when there is no such file.
    pub fn load_file(&self, name: impl Into<String>, path: impl AsRef<Path>) -> HostResult<bool> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(false);
        }
        self.add_last(PropertyLayer::from_file(name, path)?);
        Ok(true)
    }
}
