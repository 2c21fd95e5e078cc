//! Remote config client trait definition

use std::time::Duration;

use async_trait::async_trait;

use super::error::RemoteResult;
use crate::types::ClientSettings;

/// Client for a remote key/value configuration store
///
/// Documents are addressed by `(key, group)` within the namespace given at
/// init. Implementations wrap a concrete wire client; the bootstrap only
/// depends on this trait.
#[async_trait]
pub trait RemoteConfigClient: Send + Sync {
    /// Human-readable client name
    fn name(&self) -> &str;

    /// Connect and authenticate
    ///
    /// Called once per bootstrap pass, before any fetch. Failures here are fatal.
    async fn init(&self, settings: &ClientSettings) -> RemoteResult<()>;

    /// Fetch the raw content of one document
    ///
    /// `Ok(None)` means the document does not exist.
    async fn fetch_raw(&self, key: &str, group: &str, timeout: Duration) -> RemoteResult<Option<String>>;
}
