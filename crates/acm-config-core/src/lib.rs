//! ACM Config Core
//!
//! Startup configuration bootstrap for applications backed by a remote
//! key/value configuration store.
//!
//! A bootstrap pass layers process-wide overrides over locally declared
//! settings, initialises the remote client, fetches the primary document plus
//! any listed keys, and writes one merged layer into the host's property store.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use acm_config_core::{Bootstrap, BootstrapOutcome, LayeredStore, ConsoleLogger};
//!
//! let store = LayeredStore::new();
//! store.load_file("applicationConfig: [application.yml]", "application.yml")?;
//!
//! let bootstrap = Bootstrap::new(Arc::new(my_client)).with_logger(Arc::new(ConsoleLogger));
//! if let BootstrapOutcome::Applied { properties } = bootstrap.run(&store).await? {
//!     println!("loaded {} properties", properties.len());
//! }
//! ```

pub mod types;
pub mod logging;
pub mod credentials;
pub mod environment;
pub mod decoder;
pub mod host;
pub mod remote;
pub mod resolver;
pub mod bootstrap;

// Re-export commonly used types
pub use types::{ClientSettings, Credentials, FetchedDocument, PropertyMap, ResolvedConfig};

pub use logging::{Logger, SharedLogger, NoOpLogger, ConsoleLogger, DeferredLogger, LogLevel};

pub use credentials::{
    CredentialProvider, CredentialError, CredentialResult,
    MemoryCredentialProvider, EnvCredentialProvider, ChainCredentialProvider, KeychainCredentialProvider,
    process_credentials,
};

pub use environment::{ProcessEnvironment, MemoryProcessEnvironment, SystemProcessEnvironment};

pub use decoder::{decode, DecodeError, DocumentFormat};

pub use host::{HostStore, HostError, LayeredStore, PropertyLayer, WriteMode};

pub use remote::{RemoteConfigClient, RemoteError, RemoteResult, MemoryConfigClient};

pub use resolver::{
    PrecedenceResolver, RemoteKeySetFetcher, ResolveError, ResolveResult,
    merge, echo_resolved,
};

pub use bootstrap::{Bootstrap, BootstrapOutcome};
