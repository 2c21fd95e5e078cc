//! System keychain credential provider
//!
//! Uses the OS keychain for persistent storage:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;

use super::traits::{CredentialError, CredentialProvider, CredentialResult};
use crate::types::Credentials;

const ACCESS_KEY_ENTRY: &str = "access-key";
const SECRET_KEY_ENTRY: &str = "secret-key";

/// Credential provider backed by the system keychain
///
/// The key pair is stored as two entries, `<service>:access-key` and
/// `<service>:secret-key`.
pub struct KeychainCredentialProvider {
    service_name: String,
}

impl KeychainCredentialProvider {
    /// Create a provider with the default service name "acm-config"
    pub fn new() -> Self {
        Self::with_service("acm-config")
    }

    /// Create a provider with a custom service name
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service_name: service.into(),
        }
    }

    fn entry(&self, key: &str) -> CredentialResult<Entry> {
        Entry::new(&self.service_name, key)
            .map_err(|e| CredentialError::Other(format!("Failed to create keychain entry: {}", e)))
    }

    fn read(&self, key: &str) -> Option<String> {
        let entry = self.entry(key).ok()?;
        match entry.get_password() {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    fn write(&self, key: &str, value: Option<&str>) -> CredentialResult<()> {
        let entry = self.entry(key)?;
        match value {
            Some(value) => entry
                .set_password(value)
                .map_err(|e| CredentialError::Other(format!("Failed to store in keychain: {}", e))),
            None => match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(CredentialError::Other(format!("Failed to delete from keychain: {}", e))),
            },
        }
    }
}

impl Default for KeychainCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeychainCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainCredentialProvider")
            .field("service_name", &self.service_name)
            .finish()
    }
}

impl CredentialProvider for KeychainCredentialProvider {
    fn name(&self) -> &str {
        "keychain"
    }

    fn is_available(&self) -> bool {
        // Creating an entry never touches the backend; a read does
        match self.entry(ACCESS_KEY_ENTRY).map(|entry| entry.get_password()) {
            Ok(Ok(_)) | Ok(Err(keyring::Error::NoEntry)) => true,
            _ => false,
        }
    }

    fn get(&self) -> Credentials {
        Credentials {
            access_key: self.read(ACCESS_KEY_ENTRY),
            secret_key: self.read(SECRET_KEY_ENTRY),
            role_name: None,
        }
    }

    fn set(&self, credentials: &Credentials) -> CredentialResult<()> {
        self.write(ACCESS_KEY_ENTRY, credentials.access_key.as_deref())?;
        self.write(SECRET_KEY_ENTRY, credentials.secret_key.as_deref())
    }
}
