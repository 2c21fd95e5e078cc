//! Remote key set fetching
//!
//! Fetches the primary document, lets it re-declare the key list, then
//! fetches every listed key and folds the results together. Individual
//! document failures are logged and skipped.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::decoder::{self, DecodeError, DecodeResult};
use crate::logging::SharedLogger;
use crate::remote::{RemoteConfigClient, RemoteError};
use crate::types::keys::DATA_ID_LIST;
use crate::types::{split_key_list, value_to_string, FetchedDocument, PropertyMap, ResolvedConfig};
use crate::{log_debug, log_error, log_info, log_warn};

/// Key list declared inside a fetched document
///
/// Accepts the comma separated form and the indexed `data-id-list[i]` form
/// a YAML sequence flattens into. A blank list counts as not declared.
///
/// # Errors
///
/// `DecodeError::InvalidKeyList` when the value has no string form.
pub fn redeclared_key_list(document: &PropertyMap) -> DecodeResult<Option<Vec<String>>> {
    let keys = match document.get(DATA_ID_LIST) {
        Some(value) => {
            let raw = value_to_string(value).ok_or_else(|| DecodeError::InvalidKeyList(value.to_string()))?;
            split_key_list(&raw)
        }
        None => indexed_key_list(document)?,
    };
    Ok(Some(keys).filter(|k| !k.is_empty()))
}

fn indexed_key_list(document: &PropertyMap) -> DecodeResult<Vec<String>> {
    let prefix = format!("{}[", DATA_ID_LIST);
    let mut entries = Vec::new();
    for (key, value) in document.range(prefix.clone()..) {
        let Some(index) = key.strip_prefix(&prefix) else {
            break;
        };
        let Some(index) = index.strip_suffix(']').and_then(|i| i.parse::<usize>().ok()) else {
            continue;
        };
        let raw = value_to_string(value).ok_or_else(|| DecodeError::InvalidKeyList(value.to_string()))?;
        entries.push((index, raw));
    }
    entries.sort_by_key(|(index, _)| *index);
    Ok(entries.iter().flat_map(|(_, raw)| split_key_list(raw)).collect())
}

/// Trim, drop blanks, dedupe and sort lexically
pub fn ordered_keys<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .map(|k| k.as_ref().trim().to_string())
        .filter(|k| !k.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetches and folds the documents named by a [`ResolvedConfig`]
pub struct RemoteKeySetFetcher {
    client: Arc<dyn RemoteConfigClient>,
    logger: SharedLogger,
}

impl RemoteKeySetFetcher {
    pub fn new(client: Arc<dyn RemoteConfigClient>, logger: SharedLogger) -> Self {
        Self { client, logger }
    }

    /// Fetch every document and merge them, primary document last
    ///
    /// Never fails; an empty map means nothing could be fetched.
    pub async fn fetch_all(&self, config: &ResolvedConfig) -> PropertyMap {
        let timeout = Duration::from_millis(config.timeout_ms);
        let primary = self.fetch_one(&config.primary_key, &config.group, timeout).await;
        let key_list = self.effective_key_list(&primary, &config.key_list);

        let mut merged = PropertyMap::new();
        for key in ordered_keys(&key_list) {
            self.fetch_one(&key, &config.group, timeout)
                .await
                .merge_into(&mut merged);
        }
        primary.merge_into(&mut merged);

        log_info!(
            self.logger,
            "fetched {} properties for '{}' and {} listed key(s) in group '{}'",
            merged.len(),
            config.primary_key,
            key_list.len(),
            config.group
        );
        merged
    }

    /// Key list to fetch: the primary document's own list if it declares one
    pub fn effective_key_list(&self, primary: &FetchedDocument, local: &[String]) -> Vec<String> {
        let Some(content) = &primary.content else {
            return local.to_vec();
        };
        match redeclared_key_list(content) {
            Ok(Some(keys)) => {
                log_debug!(self.logger, "'{}' re-declares the key list: {}", primary.key, keys.join(","));
                keys
            }
            Ok(None) => local.to_vec(),
            Err(e) => {
                log_error!(self.logger, "ignoring key list in '{}': {}", primary.key, e);
                local.to_vec()
            }
        }
    }

    /// Fetch and decode one document
    ///
    /// A blank key is skipped silently. Missing documents and fetch or decode
    /// failures are logged and come back as [`FetchedDocument::missing`].
    pub async fn fetch_one(&self, key: &str, group: &str, timeout: Duration) -> FetchedDocument {
        let key = key.trim();
        if key.is_empty() {
            return FetchedDocument::missing(key);
        }

        let raw = match tokio::time::timeout(timeout, self.client.fetch_raw(key, group, timeout)).await {
            Ok(Ok(Some(raw))) => raw,
            Ok(Ok(None)) => {
                log_error!(self.logger, "config '{}' not found in group '{}'", key, group);
                return FetchedDocument::missing(key);
            }
            Ok(Err(e)) => {
                log_error!(self.logger, "failed to fetch config '{}' from '{}': {}", key, self.client.name(), e);
                return FetchedDocument::missing(key);
            }
            Err(_) => {
                let e = RemoteError::timeout(key, timeout.as_millis() as u64);
                log_error!(self.logger, "{}", e);
                return FetchedDocument::missing(key);
            }
        };

        match decoder::decode(key, &raw) {
            Ok(content) => {
                if content.is_empty() {
                    log_warn!(self.logger, "config '{}' is empty", key);
                }
                FetchedDocument::found(key, content)
            }
            Err(e) => {
                log_error!(self.logger, "failed to decode config '{}': {}", key, e);
                FetchedDocument::missing(key)
            }
        }
    }
}
