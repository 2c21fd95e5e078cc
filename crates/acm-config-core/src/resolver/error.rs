//! Fatal bootstrap errors

use thiserror::Error;

use crate::host::HostError;
use crate::remote::RemoteError;

/// Errors that abort a bootstrap pass
///
/// Per-document fetch and decode failures never surface here; they are
/// logged and the document is treated as absent.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No remote endpoint configured: set 'alibaba.acm.endpoint' or 'address.server.domain'")]
    MissingEndpoint,

    #[error("No remote namespace configured: set 'alibaba.acm.namespace'")]
    MissingNamespace,

    #[error("No remote credentials: configure 'ram-role-name', or both 'access-key' and 'secret-key'")]
    MissingCredentials,

    #[error("'open-kms-filter' is enabled but 'region-id' is not set")]
    MissingRegion,

    #[error("Invalid 'time-out' value '{value}': expected milliseconds as an integer")]
    InvalidTimeout { value: String },

    #[error("Remote client init failed: {0}")]
    ClientInit(#[from] RemoteError),

    #[error("Host store error: {0}")]
    Host(#[from] HostError),

    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
