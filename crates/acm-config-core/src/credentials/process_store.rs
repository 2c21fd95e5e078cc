//! Process-wide default credential provider
//!
//! One in-memory store shared by the whole process, read before the
//! `ALIBABA_CLOUD_ACCESS_KEY_*` environment variables. Resolved pairs are
//! published into the shared store, so every default bootstrap and any other
//! caller of [`process_credentials`] sees them.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::chain_store::ChainCredentialProvider;
use super::env_store::EnvCredentialProvider;
use super::memory_store::MemoryCredentialProvider;
use super::traits::CredentialProvider;

static PROCESS_STORE: Lazy<Arc<MemoryCredentialProvider>> =
    Lazy::new(|| Arc::new(MemoryCredentialProvider::new()));

/// Chain a writable store in front of the environment variables
fn store_then_env(store: Arc<MemoryCredentialProvider>) -> ChainCredentialProvider {
    ChainCredentialProvider::with_write_provider(vec![store, Arc::new(EnvCredentialProvider::new())], 0)
}

/// The shared in-memory store behind [`process_credentials`]
pub fn process_credential_store() -> Arc<MemoryCredentialProvider> {
    PROCESS_STORE.clone()
}

/// Process-wide credential provider used when none is configured
pub fn process_credentials() -> Arc<dyn CredentialProvider> {
    Arc::new(store_then_env(PROCESS_STORE.clone()))
}
