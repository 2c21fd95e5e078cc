//! Layering process overrides over locally declared settings

use std::sync::Arc;

use super::error::{ResolveError, ResolveResult};
use crate::credentials::CredentialProvider;
use crate::environment::ProcessEnvironment;
use crate::logging::SharedLogger;
use crate::types::keys::*;
use crate::types::{non_empty, split_key_list, value_to_string, Credentials, PropertyMap, ResolvedConfig};
use crate::{log_debug, log_warn};

/// Pick between a local and an override value
///
/// With priority a present override always wins; without it the override
/// only fills an absent local value.
fn layer<T>(local: Option<T>, override_value: Option<T>, priority: bool) -> Option<T> {
    if override_value.is_some() && (priority || local.is_none()) {
        override_value
    } else {
        local
    }
}

fn parse_timeout(value: Option<String>) -> ResolveResult<Option<u64>> {
    value
        .map(|v| v.parse::<u64>().map_err(|_| ResolveError::InvalidTimeout { value: v }))
        .transpose()
}

/// Untrimmed string form, blank counts as absent
fn verbatim(map: &PropertyMap, key: &str) -> Option<String> {
    map.get(key)
        .and_then(value_to_string)
        .filter(|s| !s.trim().is_empty())
}

fn key_list(map: &PropertyMap) -> Option<Vec<String>> {
    non_empty(map, DATA_ID_LIST)
        .map(|raw| split_key_list(&raw))
        .filter(|keys| !keys.is_empty())
}

/// Whether process overrides win for this deployment
///
/// Read from `vm-priority`, override layer first. Defaults to `true`; only
/// the literal `"false"` turns it off.
pub fn override_priority(local: &PropertyMap, overrides: &PropertyMap) -> bool {
    non_empty(overrides, VM_PRIORITY)
        .or_else(|| non_empty(local, VM_PRIORITY))
        .map_or(true, |v| v != "false")
}

/// Builds a [`ResolvedConfig`] from local settings and process overrides
///
/// The endpoint and namespace are kept in sync with the process environment,
/// and the credential provider is consulted as a last resort and updated with
/// the resolved key pair.
pub struct PrecedenceResolver {
    environment: Arc<dyn ProcessEnvironment>,
    credentials: Arc<dyn CredentialProvider>,
    logger: SharedLogger,
}

impl PrecedenceResolver {
    pub fn new(
        environment: Arc<dyn ProcessEnvironment>,
        credentials: Arc<dyn CredentialProvider>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            environment,
            credentials,
            logger,
        }
    }

    /// Resolve every recognised field
    ///
    /// # Errors
    ///
    /// `ResolveError::InvalidTimeout` when either layer carries a non-integer `time-out`.
    pub fn resolve(
        &self,
        local: &PropertyMap,
        overrides: &PropertyMap,
        override_priority: bool,
    ) -> ResolveResult<ResolvedConfig> {
        let pick = |key: &str| layer(non_empty(local, key), non_empty(overrides, key), override_priority);
        let defaults = ResolvedConfig::default();

        let timeout_ms = layer(
            parse_timeout(non_empty(local, TIME_OUT))?,
            parse_timeout(non_empty(overrides, TIME_OUT))?,
            override_priority,
        );

        let endpoint = layer(
            non_empty(local, ENDPOINT),
            self.environment
                .published_address()
                .or_else(|| non_empty(overrides, ENDPOINT)),
            override_priority,
        );
        // Published before validation; a pass that fails later keeps these values
        if let Some(endpoint) = &endpoint {
            self.environment.publish_address(endpoint);
        }

        let namespace = layer(
            non_empty(local, NAMESPACE),
            self.environment
                .tenant()
                .or_else(|| non_empty(overrides, NAMESPACE)),
            override_priority,
        );
        if let Some(namespace) = &namespace {
            self.environment.set_tenant(namespace);
        }

        let role_name = layer(
            non_empty(local, RAM_ROLE_NAME),
            non_empty(overrides, RAM_ROLE_NAME).or_else(|| non_empty(overrides, RAM_ROLE_OVERRIDE)),
            override_priority,
        );

        let credentials = self.resolve_key_pair(pick(ACCESS_KEY), pick(SECRET_KEY), role_name);

        Ok(ResolvedConfig {
            primary_key: pick(APPLICATION_DATA_ID).unwrap_or(defaults.primary_key),
            key_list: layer(key_list(local), key_list(overrides), override_priority).unwrap_or_default(),
            group: pick(GROUP).unwrap_or(defaults.group),
            endpoint,
            namespace,
            credentials,
            timeout_ms: timeout_ms.unwrap_or(defaults.timeout_ms),
            override_priority,
            encryption_filter_enabled: layer(
                verbatim(local, OPEN_KMS_FILTER),
                verbatim(overrides, OPEN_KMS_FILTER),
                override_priority,
            )
            .map_or(false, |v| v == TRUE_LITERAL),
            region_id: pick(REGION_ID),
        })
    }

    /// Fill missing key halves from the provider, then publish the pair back
    fn resolve_key_pair(
        &self,
        access_key: Option<String>,
        secret_key: Option<String>,
        role_name: Option<String>,
    ) -> Credentials {
        let mut from_provider = 0;
        let mut resolved = Credentials {
            access_key,
            secret_key,
            role_name,
        };

        if resolved.access_key.is_none() || resolved.secret_key.is_none() {
            let stored = self.credentials.get();
            if resolved.access_key.is_none() && stored.access_key.is_some() {
                resolved.access_key = stored.access_key;
                from_provider += 1;
            }
            if resolved.secret_key.is_none() && stored.secret_key.is_some() {
                resolved.secret_key = stored.secret_key;
                from_provider += 1;
            }
        }

        if resolved.has_key_pair() && from_provider < 2 {
            let pair = Credentials {
                role_name: None,
                ..resolved.clone()
            };
            match self.credentials.set(&pair) {
                Ok(()) => log_debug!(self.logger, "published access key to '{}' credential provider", self.credentials.name()),
                Err(e) => log_warn!(self.logger, "could not publish access key to '{}' credential provider: {}", self.credentials.name(), e),
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{EnvCredentialProvider, MemoryCredentialProvider};
    use crate::environment::MemoryProcessEnvironment;
    use crate::logging::{DeferredLogger, LogLevel, NoOpLogger};
    use serde_json::json;

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect()
    }

    struct Fixture {
        environment: Arc<MemoryProcessEnvironment>,
        credentials: Arc<MemoryCredentialProvider>,
        resolver: PrecedenceResolver,
    }

    fn fixture() -> Fixture {
        let environment = Arc::new(MemoryProcessEnvironment::new());
        let credentials = Arc::new(MemoryCredentialProvider::new());
        let resolver = PrecedenceResolver::new(environment.clone(), credentials.clone(), Arc::new(NoOpLogger));
        Fixture {
            environment,
            credentials,
            resolver,
        }
    }

    #[test]
    fn test_layer_rule() {
        assert_eq!(layer(Some("l"), Some("o"), true), Some("o"));
        assert_eq!(layer(Some("l"), Some("o"), false), Some("l"));
        assert_eq!(layer(None, Some("o"), false), Some("o"));
        assert_eq!(layer(Some("l"), None, true), Some("l"));
        assert_eq!(layer::<&str>(None, None, true), None);
    }

    #[test]
    fn test_defaults_when_nothing_declared() {
        let f = fixture();
        let config = f.resolver.resolve(&PropertyMap::new(), &PropertyMap::new(), true).unwrap();
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn test_override_priority_wins_everywhere() {
        let f = fixture();
        f.environment.publish_address("override.endpoint");
        f.environment.set_tenant("override-ns");

        let local = props(&[
            (APPLICATION_DATA_ID, "local.yml"),
            (GROUP, "LOCAL"),
            (ENDPOINT, "local.endpoint"),
            (NAMESPACE, "local-ns"),
            (TIME_OUT, "1000"),
            (DATA_ID_LIST, "a.yml"),
            (ACCESS_KEY, "local-ak"),
            (SECRET_KEY, "local-sk"),
            (RAM_ROLE_NAME, "local-role"),
            (REGION_ID, "cn-local"),
            (OPEN_KMS_FILTER, "false"),
        ]);
        let overrides = props(&[
            (APPLICATION_DATA_ID, "override.yml"),
            (GROUP, "OVERRIDE"),
            (TIME_OUT, "2000"),
            (DATA_ID_LIST, "b.yml,c.yml"),
            (ACCESS_KEY, "override-ak"),
            (SECRET_KEY, "override-sk"),
            (RAM_ROLE_NAME, "override-role"),
            (REGION_ID, "cn-override"),
            (OPEN_KMS_FILTER, "true"),
        ]);

        let config = f.resolver.resolve(&local, &overrides, true).unwrap();
        assert_eq!(config.primary_key, "override.yml");
        assert_eq!(config.group, "OVERRIDE");
        assert_eq!(config.endpoint.as_deref(), Some("override.endpoint"));
        assert_eq!(config.namespace.as_deref(), Some("override-ns"));
        assert_eq!(config.timeout_ms, 2000);
        assert_eq!(config.key_list, vec!["b.yml", "c.yml"]);
        assert_eq!(config.credentials.access_key.as_deref(), Some("override-ak"));
        assert_eq!(config.credentials.secret_key.as_deref(), Some("override-sk"));
        assert_eq!(config.credentials.role_name.as_deref(), Some("override-role"));
        assert_eq!(config.region_id.as_deref(), Some("cn-override"));
        assert!(config.encryption_filter_enabled);
    }

    #[test]
    fn test_local_kept_without_priority() {
        let f = fixture();
        f.environment.publish_address("override.endpoint");
        f.environment.set_tenant("override-ns");

        let local = props(&[(ENDPOINT, "local.endpoint"), (NAMESPACE, "local-ns"), (GROUP, "LOCAL")]);
        let overrides = props(&[(GROUP, "OVERRIDE"), (REGION_ID, "cn-hangzhou")]);

        let config = f.resolver.resolve(&local, &overrides, false).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("local.endpoint"));
        assert_eq!(config.namespace.as_deref(), Some("local-ns"));
        assert_eq!(config.group, "LOCAL");
        // Unset locally, so the override fills it
        assert_eq!(config.region_id.as_deref(), Some("cn-hangzhou"));
    }

    #[test]
    fn test_endpoint_and_namespace_published() {
        let f = fixture();
        let local = props(&[(ENDPOINT, "local.endpoint"), (NAMESPACE, "local-ns")]);

        f.resolver.resolve(&local, &PropertyMap::new(), false).unwrap();
        assert_eq!(f.environment.published_address().as_deref(), Some("local.endpoint"));
        assert_eq!(f.environment.tenant().as_deref(), Some("local-ns"));
    }

    #[test]
    fn test_padded_override_does_not_enable_filter() {
        let f = fixture();
        let local = props(&[(OPEN_KMS_FILTER, "true")]);
        let overrides = props(&[(OPEN_KMS_FILTER, " true")]);
        let config = f.resolver.resolve(&local, &overrides, true).unwrap();
        assert!(!config.encryption_filter_enabled);
    }

    #[test]
    fn test_endpoint_read_from_published_address() {
        let f = fixture();
        f.environment.publish_address("published.endpoint");

        let config = f.resolver.resolve(&PropertyMap::new(), &PropertyMap::new(), false).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("published.endpoint"));
    }

    #[test]
    fn test_invalid_timeout_is_fatal() {
        let f = fixture();
        let local = props(&[(TIME_OUT, "3s")]);
        let err = f.resolver.resolve(&local, &PropertyMap::new(), true).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTimeout { value } if value == "3s"));
    }

    #[test]
    fn test_numeric_timeout_from_yaml() {
        let f = fixture();
        let mut local = PropertyMap::new();
        local.insert(TIME_OUT.to_string(), json!(5000));
        let config = f.resolver.resolve(&local, &PropertyMap::new(), true).unwrap();
        assert_eq!(config.timeout_ms, 5000);
    }

    #[test]
    fn test_kms_filter_exact_literal() {
        let f = fixture();
        for (raw, expected) in [
            ("true", true),
            ("TRUE", false),
            ("yes", false),
            ("false", false),
            (" true ", false),
            ("true\n", false),
        ] {
            let local = props(&[(OPEN_KMS_FILTER, raw)]);
            let config = f.resolver.resolve(&local, &PropertyMap::new(), true).unwrap();
            assert_eq!(config.encryption_filter_enabled, expected, "literal {:?}", raw);
        }

        let mut local = PropertyMap::new();
        local.insert(OPEN_KMS_FILTER.to_string(), json!(true));
        let config = f.resolver.resolve(&local, &PropertyMap::new(), true).unwrap();
        assert!(config.encryption_filter_enabled);
    }

    #[test]
    fn test_key_list_trimmed() {
        let f = fixture();
        let local = props(&[(DATA_ID_LIST, " b.yml , a.properties ,, ")]);
        let config = f.resolver.resolve(&local, &PropertyMap::new(), true).unwrap();
        assert_eq!(config.key_list, vec!["b.yml", "a.properties"]);
    }

    #[test]
    fn test_role_name_override_property() {
        let f = fixture();
        let overrides = props(&[(RAM_ROLE_OVERRIDE, "ecs-role")]);
        let config = f.resolver.resolve(&PropertyMap::new(), &overrides, true).unwrap();
        assert_eq!(config.credentials.role_name.as_deref(), Some("ecs-role"));
    }

    #[test]
    fn test_provider_is_last_resort() {
        let f = fixture();
        f.credentials.set(&Credentials::key_pair("provider-ak", "provider-sk")).unwrap();

        let local = props(&[(ACCESS_KEY, "local-ak"), (SECRET_KEY, "local-sk")]);
        let config = f.resolver.resolve(&local, &PropertyMap::new(), true).unwrap();
        assert_eq!(config.credentials.access_key.as_deref(), Some("local-ak"));
        assert_eq!(config.credentials.secret_key.as_deref(), Some("local-sk"));

        // Resolved pair is published back
        assert_eq!(f.credentials.get(), Credentials::key_pair("local-ak", "local-sk"));
    }

    #[test]
    fn test_provider_pair_not_republished() {
        let f = fixture();
        f.credentials.set(&Credentials::key_pair("provider-ak", "provider-sk")).unwrap();

        let config = f.resolver.resolve(&PropertyMap::new(), &PropertyMap::new(), true).unwrap();
        assert_eq!(config.credentials, Credentials::key_pair("provider-ak", "provider-sk"));
        assert_eq!(f.credentials.write_count(), 1);
    }

    #[test]
    fn test_half_from_provider_is_published() {
        let f = fixture();
        f.credentials.set(&Credentials::key_pair("provider-ak", "provider-sk")).unwrap();

        let overrides = props(&[(ACCESS_KEY, "override-ak")]);
        let config = f.resolver.resolve(&PropertyMap::new(), &overrides, true).unwrap();
        assert_eq!(config.credentials, Credentials::key_pair("override-ak", "provider-sk"));
        assert_eq!(f.credentials.get(), Credentials::key_pair("override-ak", "provider-sk"));
    }

    #[test]
    fn test_read_only_provider_logs_warning() {
        let logger = Arc::new(DeferredLogger::new());
        let resolver = PrecedenceResolver::new(
            Arc::new(MemoryProcessEnvironment::new()),
            Arc::new(EnvCredentialProvider::new()),
            logger.clone(),
        );

        let local = props(&[(ACCESS_KEY, "ak"), (SECRET_KEY, "sk")]);
        let config = resolver.resolve(&local, &PropertyMap::new(), true).unwrap();
        assert!(config.credentials.has_key_pair());
        assert_eq!(logger.records_at(LogLevel::Warn).len(), 1);
    }

    #[test]
    fn test_override_priority_flag() {
        assert!(override_priority(&PropertyMap::new(), &PropertyMap::new()));
        assert!(!override_priority(&props(&[(VM_PRIORITY, "false")]), &PropertyMap::new()));
        assert!(override_priority(
            &props(&[(VM_PRIORITY, "false")]),
            &props(&[(VM_PRIORITY, "true")])
        ));
    }
}
