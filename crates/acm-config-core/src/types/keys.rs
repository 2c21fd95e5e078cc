//! Canonical property names

/// Prefix shared by every recognised configuration field
pub const PROPERTY_PREFIX: &str = "alibaba.acm";

pub const APPLICATION_DATA_ID: &str = "alibaba.acm.application-data-id";
pub const DATA_ID_LIST: &str = "alibaba.acm.data-id-list";
pub const GROUP: &str = "alibaba.acm.group";
pub const ENDPOINT: &str = "alibaba.acm.endpoint";
pub const NAMESPACE: &str = "alibaba.acm.namespace";
pub const ACCESS_KEY: &str = "alibaba.acm.access-key";
pub const SECRET_KEY: &str = "alibaba.acm.secret-key";
pub const TIME_OUT: &str = "alibaba.acm.time-out";
pub const RAM_ROLE_NAME: &str = "alibaba.acm.ram-role-name";
pub const OPEN_KMS_FILTER: &str = "alibaba.acm.open-kms-filter";
pub const REGION_ID: &str = "alibaba.acm.region-id";
pub const VM_PRIORITY: &str = "alibaba.acm.vm-priority";

/// All twelve recognised fields, in echo order
pub const RECOGNISED_KEYS: [&str; 12] = [
    APPLICATION_DATA_ID,
    DATA_ID_LIST,
    GROUP,
    ENDPOINT,
    NAMESPACE,
    ACCESS_KEY,
    SECRET_KEY,
    TIME_OUT,
    RAM_ROLE_NAME,
    OPEN_KMS_FILTER,
    REGION_ID,
    VM_PRIORITY,
];

/// Sentinel written once a bootstrap pass has completed
pub const LOADED_MARKER: &str = "alibaba.acm.config.loaded";
pub const LOADED_MARKER_VALUE: &str = "Y";

/// Name of the layer the merged result is written to
pub const MERGED_LAYER_NAME: &str = "alibaba.acm.config";

/// Process-wide address variable used for endpoint discovery
pub const PUBLISHED_ADDRESS: &str = "address.server.domain";

/// Process-wide role name override
pub const RAM_ROLE_OVERRIDE: &str = "ram.role.name";

/// Process-wide tenant variable mirrored from the namespace
pub const TENANT: &str = "tenant.id";

pub const DEFAULT_APPLICATION_DATA_ID: &str = "application.yml";
pub const DEFAULT_GROUP: &str = "DEFAULT_GROUP";
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Only this literal switches a boolean field on
pub const TRUE_LITERAL: &str = "true";
