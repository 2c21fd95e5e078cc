//! Chained credential provider with fallback behavior

use std::sync::Arc;

use super::traits::{CredentialProvider, CredentialResult};
use crate::types::Credentials;

/// A credential provider that chains several providers together
///
/// Reads fill each half of the key pair from the first available provider
/// that has it. Writes go to the designated write provider (default: first).
pub struct ChainCredentialProvider {
    providers: Vec<Arc<dyn CredentialProvider>>,
    write_index: usize,
}

impl ChainCredentialProvider {
    /// Create a new chain; the first provider receives writes
    pub fn new(providers: Vec<Arc<dyn CredentialProvider>>) -> Self {
        if providers.is_empty() {
            panic!("ChainCredentialProvider requires at least one provider");
        }
        Self {
            providers,
            write_index: 0,
        }
    }

    /// Create a chain with a specific write provider
    pub fn with_write_provider(providers: Vec<Arc<dyn CredentialProvider>>, write_index: usize) -> Self {
        if providers.is_empty() {
            panic!("ChainCredentialProvider requires at least one provider");
        }
        if write_index >= providers.len() {
            panic!("write_index out of bounds");
        }
        Self {
            providers,
            write_index,
        }
    }

    pub fn providers(&self) -> &[Arc<dyn CredentialProvider>] {
        &self.providers
    }
}

impl CredentialProvider for ChainCredentialProvider {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_available())
    }

    fn get(&self) -> Credentials {
        let mut resolved = Credentials::default();
        for provider in self.providers.iter().filter(|p| p.is_available()) {
            let found = provider.get();
            if resolved.access_key.is_none() {
                resolved.access_key = found.access_key;
            }
            if resolved.secret_key.is_none() {
                resolved.secret_key = found.secret_key;
            }
            if resolved.has_key_pair() {
                break;
            }
        }
        resolved
    }

    fn set(&self, credentials: &Credentials) -> CredentialResult<()> {
        self.providers[self.write_index].set(credentials)
    }
}

impl std::fmt::Debug for ChainCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainCredentialProvider")
            .field("providers", &format!("[{} providers]", self.providers.len()))
            .field("write_index", &self.write_index)
            .finish()
    }
}
