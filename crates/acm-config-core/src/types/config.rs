//! Resolved bootstrap configuration

use serde::{Deserialize, Serialize};

use super::keys::{DEFAULT_APPLICATION_DATA_ID, DEFAULT_GROUP, DEFAULT_TIMEOUT_MS};
use crate::resolver::{ResolveError, ResolveResult};

/// Credentials used to authenticate against the remote store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

impl Credentials {
    /// Create a key pair credential
    pub fn key_pair(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: Some(access_key.into()),
            secret_key: Some(secret_key.into()),
            role_name: None,
        }
    }

    /// Create a role-based credential
    pub fn role(role_name: impl Into<String>) -> Self {
        Self {
            role_name: Some(role_name.into()),
            ..Self::default()
        }
    }

    /// Both halves of the access key pair are present
    pub fn has_key_pair(&self) -> bool {
        self.access_key.is_some() && self.secret_key.is_some()
    }

    /// Either a role name or a complete key pair is present
    pub fn is_usable(&self) -> bool {
        self.role_name.is_some() || self.has_key_pair()
    }
}

/// Inputs handed to the remote client on initialisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub endpoint: String,
    pub namespace: String,
    pub credentials: Credentials,
    /// Set only when the encryption filter is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_region_id: Option<String>,
}

/// Effective configuration produced by layering local settings and process overrides
///
/// Built once per bootstrap pass, then read-only for the fetch and merge stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedConfig {
    /// Main configuration document
    pub primary_key: String,
    /// Additional documents to fetch
    pub key_list: Vec<String>,
    pub group: String,
    pub endpoint: Option<String>,
    pub namespace: Option<String>,
    pub credentials: Credentials,
    pub timeout_ms: u64,
    /// Process overrides win over local values when set
    pub override_priority: bool,
    pub encryption_filter_enabled: bool,
    pub region_id: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            primary_key: DEFAULT_APPLICATION_DATA_ID.to_string(),
            key_list: Vec::new(),
            group: DEFAULT_GROUP.to_string(),
            endpoint: None,
            namespace: None,
            credentials: Credentials::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            override_priority: true,
            encryption_filter_enabled: false,
            region_id: None,
        }
    }
}

impl ResolvedConfig {
    /// Set the remote coordinates
    pub fn with_remote(mut self, endpoint: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the primary document key
    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = key.into();
        self
    }

    /// Set the additional keys
    pub fn with_key_list<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_list = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Check everything remote initialisation depends on
    ///
    /// # Errors
    ///
    /// Returns the first missing requirement: endpoint, namespace, usable
    /// credentials, then region id when the encryption filter is on.
    pub fn validate(&self) -> ResolveResult<()> {
        if self.endpoint.as_deref().map_or(true, str::is_empty) {
            return Err(ResolveError::MissingEndpoint);
        }
        if self.namespace.as_deref().map_or(true, str::is_empty) {
            return Err(ResolveError::MissingNamespace);
        }
        if !self.credentials.is_usable() {
            return Err(ResolveError::MissingCredentials);
        }
        if self.encryption_filter_enabled && self.region_id.is_none() {
            return Err(ResolveError::MissingRegion);
        }
        Ok(())
    }

    /// Project the remote initialisation inputs
    ///
    /// # Errors
    ///
    /// Same as [`ResolvedConfig::validate`].
    pub fn client_settings(&self) -> ResolveResult<ClientSettings> {
        self.validate()?;
        Ok(ClientSettings {
            endpoint: self.endpoint.clone().unwrap_or_default(),
            namespace: self.namespace.clone().unwrap_or_default(),
            credentials: self.credentials.clone(),
            kms_region_id: if self.encryption_filter_enabled {
                self.region_id.clone()
            } else {
                None
            },
        })
    }
}
