//! Host configuration store trait

use crate::decoder::DecodeError;
use crate::types::PropertyMap;

/// Host application's property container
///
/// The bootstrap reads locally declared settings from it and writes the
/// merged result back. Implementations decide whether the result lands in a
/// new layer or is folded into existing ones, as long as later reads see it.
pub trait HostStore: Send + Sync {
    /// Effective view of the locally declared settings
    fn local_properties(&self) -> PropertyMap;

    /// Whether any layer defines `key`
    fn contains_key(&self, key: &str) -> bool;

    /// Whether a layer called `name` exists
    fn contains_layer(&self, name: &str) -> bool;

    /// Write the merged result
    fn write_merged(&self, layer_name: &str, merged: PropertyMap) -> HostResult<()>;
}

/// Errors that can occur during host store operations
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("No layer matches '{0}'")]
    LayerNotFound(String),

    #[error("Unsupported configuration file: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

pub type HostResult<T> = Result<T, HostError>;
