//! Credential provider abstractions and implementations
//!
//! The resolver consults a `CredentialProvider` when no access key pair is
//! configured, and publishes the resolved pair back into it.

mod traits;
mod memory_store;
mod env_store;
mod chain_store;
mod keychain_store;
mod process_store;

pub use traits::{CredentialError, CredentialProvider, CredentialResult};
pub use memory_store::MemoryCredentialProvider;
pub use env_store::EnvCredentialProvider;
pub use chain_store::ChainCredentialProvider;
pub use keychain_store::KeychainCredentialProvider;
pub use process_store::{process_credential_store, process_credentials};
