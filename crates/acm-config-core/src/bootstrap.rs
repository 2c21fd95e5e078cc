//! Bootstrap pipeline
//!
//! One pass: resolve settings, initialise the remote client, fetch the key
//! set, merge, and write the result into the host store. A second pass on the
//! same store is a no-op.

use std::sync::Arc;

use crate::credentials::{process_credentials, CredentialProvider};
use crate::environment::{ProcessEnvironment, SystemProcessEnvironment};
use crate::host::HostStore;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::remote::RemoteConfigClient;
use crate::resolver::{
    merge, override_priority, PrecedenceResolver, RemoteKeySetFetcher, ResolveResult,
};
use crate::types::keys::{LOADED_MARKER, MERGED_LAYER_NAME};
use crate::types::PropertyMap;
use crate::{log_debug, log_error, log_info};

/// Result of a bootstrap pass
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    /// The host store already carries a merged layer
    Skipped,
    /// The merged layer that was written
    Applied { properties: PropertyMap },
}

/// Remote configuration bootstrap
///
/// Defaults to the process-wide [`SystemProcessEnvironment`], the
/// process-wide [`process_credentials`] provider and a silent logger.
pub struct Bootstrap {
    client: Arc<dyn RemoteConfigClient>,
    environment: Arc<dyn ProcessEnvironment>,
    credentials: Arc<dyn CredentialProvider>,
    logger: SharedLogger,
}

impl Bootstrap {
    pub fn new(client: Arc<dyn RemoteConfigClient>) -> Self {
        Self {
            client,
            environment: Arc::new(SystemProcessEnvironment::new()),
            credentials: process_credentials(),
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_environment(mut self, environment: Arc<dyn ProcessEnvironment>) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Run one bootstrap pass against `host`
    ///
    /// # Errors
    ///
    /// Fails before any fetch when the settings are incomplete or the client
    /// can't be initialised, and when the host store rejects the result.
    /// Individual document failures only produce log records.
    pub async fn run(&self, host: &dyn HostStore) -> ResolveResult<BootstrapOutcome> {
        if host.contains_key(LOADED_MARKER) || host.contains_layer(MERGED_LAYER_NAME) {
            log_debug!(self.logger, "remote configuration already loaded, skipping");
            return Ok(BootstrapOutcome::Skipped);
        }

        let local = host.local_properties();
        let overrides = self.environment.properties();
        let priority = override_priority(&local, &overrides);

        let resolver = PrecedenceResolver::new(
            self.environment.clone(),
            self.credentials.clone(),
            self.logger.clone(),
        );
        let config = resolver.resolve(&local, &overrides, priority)?;
        let settings = config.client_settings().map_err(|e| {
            log_error!(self.logger, "{}", e);
            e
        })?;

        log_info!(
            self.logger,
            "connecting '{}' client to {} (namespace '{}')",
            self.client.name(),
            settings.endpoint,
            settings.namespace
        );
        if let Err(e) = self.client.init(&settings).await {
            log_error!(self.logger, "remote client init failed: {}", e);
            return Err(e.into());
        }

        let fetched = RemoteKeySetFetcher::new(self.client.clone(), self.logger.clone())
            .fetch_all(&config)
            .await;
        let merged = merge(&config, fetched);
        host.write_merged(MERGED_LAYER_NAME, merged.clone())?;

        log_info!(self.logger, "applied {} properties as '{}'", merged.len(), MERGED_LAYER_NAME);
        Ok(BootstrapOutcome::Applied { properties: merged })
    }

    /// Run one pass on a private current-thread runtime
    ///
    /// For hosts without an async runtime. Panics if called from inside one.
    pub fn run_blocking(&self, host: &dyn HostStore) -> ResolveResult<BootstrapOutcome> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(host))
    }
}
