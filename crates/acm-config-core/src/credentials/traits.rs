//! Core trait and errors for credential providers

use thiserror::Error;

use crate::types::Credentials;

/// Errors that can occur during credential provider operations
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Credential provider is read-only")]
    ReadOnly,

    #[error("Credential provider not available: {0}")]
    NotAvailable(String),

    #[error("Credential provider error: {0}")]
    Other(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Process-wide access key holder
///
/// The bootstrap reads from it as a last resort when neither local settings
/// nor process overrides carry a key pair, and publishes the resolved pair
/// back so code outside the engine sees the same credentials. It is a sync
/// target, not the authoritative store.
///
/// Implementations:
/// - `MemoryCredentialProvider`: In-memory, read-write
/// - `EnvCredentialProvider`: Environment variables, read-only
/// - `ChainCredentialProvider`: Fallback across several providers
/// - `KeychainCredentialProvider`: OS keychain
pub trait CredentialProvider: Send + Sync {
    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Check if this provider can currently be used
    fn is_available(&self) -> bool {
        true
    }

    /// Current access key pair; `role_name` is never populated
    fn get(&self) -> Credentials;

    /// Replace the stored access key pair
    ///
    /// Returns `Err(CredentialError::ReadOnly)` if the provider doesn't support writing.
    fn set(&self, credentials: &Credentials) -> CredentialResult<()>;
}
