//! Process environment capability

use crate::types::keys::{PUBLISHED_ADDRESS, TENANT};
use crate::types::PropertyMap;

/// Process-wide string properties available before the host loads its own configuration
///
/// Covers launch-time overrides as well as the two values the bootstrap keeps
/// in sync with the outside world: the published server address and the tenant.
pub trait ProcessEnvironment: Send + Sync {
    /// Read a single property
    fn property(&self, key: &str) -> Option<String>;

    /// Write a single property
    fn set_property(&self, key: &str, value: &str);

    /// Snapshot of every property, used as the process override layer
    fn properties(&self) -> PropertyMap;

    /// Address published for endpoint discovery
    fn published_address(&self) -> Option<String> {
        self.property(PUBLISHED_ADDRESS).filter(|v| !v.trim().is_empty())
    }

    fn publish_address(&self, address: &str) {
        self.set_property(PUBLISHED_ADDRESS, address);
    }

    /// Tenant mirrored from the namespace
    fn tenant(&self) -> Option<String> {
        self.property(TENANT).filter(|v| !v.trim().is_empty())
    }

    fn set_tenant(&self, tenant: &str) {
        self.set_property(TENANT, tenant);
    }
}
