//! Remote client error types

use thiserror::Error;

/// Errors that can occur while talking to the remote config store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Store unreachable during initialisation
    #[error("Connection error: {0}")]
    Connection(String),

    /// Credentials rejected
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Remote side failed to serve a document
    #[error("Failed to fetch '{key}': {message}")]
    Fetch { key: String, message: String },

    /// Fetch exceeded its time budget
    #[error("Fetching '{key}' timed out after {timeout_ms}ms")]
    Timeout { key: String, timeout_ms: u64 },

    #[error("Remote client used before init")]
    NotInitialized,
}

impl RemoteError {
    /// Create a fetch error
    pub fn fetch(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(key: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            key: key.into(),
            timeout_ms,
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
