//! In-memory credential provider

use parking_lot::RwLock;

use super::traits::{CredentialProvider, CredentialResult};
use crate::types::Credentials;

/// In-memory credential provider for tests and single-process use
///
/// # Example
///
/// ```
/// use acm_config_core::credentials::{CredentialProvider, MemoryCredentialProvider};
/// use acm_config_core::types::Credentials;
///
/// let provider = MemoryCredentialProvider::new();
/// provider.set(&Credentials::key_pair("ak", "sk")).unwrap();
/// assert_eq!(provider.get().access_key.as_deref(), Some("ak"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryCredentialProvider {
    credentials: RwLock<Credentials>,
    writes: RwLock<usize>,
}

impl MemoryCredentialProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding a key pair
    pub fn with_key_pair(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            credentials: RwLock::new(Credentials::key_pair(access_key, secret_key)),
            writes: RwLock::new(0),
        }
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }
}

impl CredentialProvider for MemoryCredentialProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self) -> Credentials {
        let stored = self.credentials.read();
        Credentials {
            access_key: stored.access_key.clone(),
            secret_key: stored.secret_key.clone(),
            role_name: None,
        }
    }

    fn set(&self, credentials: &Credentials) -> CredentialResult<()> {
        let mut stored = self.credentials.write();
        stored.access_key = credentials.access_key.clone();
        stored.secret_key = credentials.secret_key.clone();
        *self.writes.write() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_name() {
        assert_eq!(MemoryCredentialProvider::new().name(), "memory");
    }

    #[test]
    fn test_memory_provider_set_and_get() {
        let provider = MemoryCredentialProvider::new();
        assert_eq!(provider.get(), Credentials::default());

        provider.set(&Credentials::key_pair("ak", "sk")).unwrap();
        assert_eq!(provider.get(), Credentials::key_pair("ak", "sk"));
        assert_eq!(provider.write_count(), 1);
    }

    #[test]
    fn test_memory_provider_drops_role_name() {
        let provider = MemoryCredentialProvider::new();
        let mut creds = Credentials::key_pair("ak", "sk");
        creds.role_name = Some("role".to_string());

        provider.set(&creds).unwrap();
        assert_eq!(provider.get().role_name, None);
    }
}
