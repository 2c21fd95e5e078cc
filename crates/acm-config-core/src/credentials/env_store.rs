//! Environment variable credential provider

use std::env;

use super::traits::{CredentialError, CredentialProvider, CredentialResult};
use crate::types::Credentials;

/// Access key id variables, checked in order
const ACCESS_KEY_VARS: [&str; 2] = ["ALIBABA_CLOUD_ACCESS_KEY_ID", "ALICLOUD_ACCESS_KEY"];

/// Access key secret variables, checked in order
const SECRET_KEY_VARS: [&str; 2] = ["ALIBABA_CLOUD_ACCESS_KEY_SECRET", "ALICLOUD_SECRET_KEY"];

/// Credential provider that reads from environment variables
///
/// This provider is read-only. Publishing a resolved pair to it fails with
/// `CredentialError::ReadOnly`, which the resolver logs and ignores.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider {
    _private: (),
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn first_set(vars: &[&str]) -> Option<String> {
        vars.iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty())
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self) -> Credentials {
        Credentials {
            access_key: Self::first_set(&ACCESS_KEY_VARS),
            secret_key: Self::first_set(&SECRET_KEY_VARS),
            role_name: None,
        }
    }

    fn set(&self, _credentials: &Credentials) -> CredentialResult<()> {
        Err(CredentialError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_provider_read_only() {
        let provider = EnvCredentialProvider::new();
        assert_eq!(provider.name(), "env");
        assert!(matches!(
            provider.set(&Credentials::key_pair("ak", "sk")),
            Err(CredentialError::ReadOnly)
        ));
    }

    #[test]
    fn test_env_provider_fallback_variable() {
        env::set_var("ALICLOUD_ACCESS_KEY", "legacy-ak");

        let provider = EnvCredentialProvider::new();
        if env::var("ALIBABA_CLOUD_ACCESS_KEY_ID").is_err() {
            assert_eq!(provider.get().access_key.as_deref(), Some("legacy-ak"));
        }

        env::remove_var("ALICLOUD_ACCESS_KEY");
    }
}
