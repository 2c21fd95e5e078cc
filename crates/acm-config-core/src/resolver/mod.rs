//! Settings resolution, remote fetching and merging
//!
//! - `PrecedenceResolver`: layers process overrides over local settings
//! - `RemoteKeySetFetcher`: fetches the primary document and key list
//! - `merge`: folds the resolved fields and fetched documents into one map

mod error;
mod fetcher;
mod merge;
mod precedence;

pub use error::{ResolveError, ResolveResult};
pub use fetcher::{ordered_keys, redeclared_key_list, RemoteKeySetFetcher};
pub use merge::{echo_resolved, merge};
pub use precedence::{override_priority, PrecedenceResolver};
