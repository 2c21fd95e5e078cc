//! In-memory remote config client
//!
//! Serves documents from a local table without network access. Supports
//! failure injection, artificial latency and records every call, which
//! makes it the client of choice for tests and offline development.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::{RemoteError, RemoteResult};
use super::traits::RemoteConfigClient;
use crate::types::ClientSettings;

#[derive(Debug, Default)]
struct ClientState {
    settings: Option<ClientSettings>,
    init_calls: usize,
    fetch_log: Vec<String>,
}

/// Remote config client backed by an in-memory document table
#[derive(Debug, Default)]
pub struct MemoryConfigClient {
    documents: RwLock<HashMap<(String, String), String>>,
    failures: RwLock<HashMap<String, RemoteError>>,
    delays: RwLock<HashMap<String, Duration>>,
    init_failure: RwLock<Option<RemoteError>>,
    state: RwLock<ClientState>,
}

impl MemoryConfigClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under `(key, group)`
    pub fn insert(&self, group: &str, key: &str, content: impl Into<String>) {
        self.documents
            .write()
            .insert((group.to_string(), key.to_string()), content.into());
    }

    /// Builder form of [`MemoryConfigClient::insert`]
    pub fn with_document(self, group: &str, key: &str, content: impl Into<String>) -> Self {
        self.insert(group, key, content);
        self
    }

    /// Make every fetch of `key` fail with `error`
    pub fn fail_key(&self, key: &str, error: RemoteError) {
        self.failures.write().insert(key.to_string(), error);
    }

    /// Delay every fetch of `key`
    pub fn delay_key(&self, key: &str, delay: Duration) {
        self.delays.write().insert(key.to_string(), delay);
    }

    /// Make `init` fail with `error`
    pub fn fail_init(&self, error: RemoteError) {
        *self.init_failure.write() = Some(error);
    }

    /// Keys requested so far, in request order
    pub fn fetch_log(&self) -> Vec<String> {
        self.state.read().fetch_log.clone()
    }

    pub fn init_calls(&self) -> usize {
        self.state.read().init_calls
    }

    /// Settings from the last successful init
    pub fn settings(&self) -> Option<ClientSettings> {
        self.state.read().settings.clone()
    }
}

#[async_trait]
impl RemoteConfigClient for MemoryConfigClient {
    fn name(&self) -> &str {
        "memory"
    }

    async fn init(&self, settings: &ClientSettings) -> RemoteResult<()> {
        let mut state = self.state.write();
        state.init_calls += 1;
        if let Some(error) = self.init_failure.read().clone() {
            return Err(error);
        }
        state.settings = Some(settings.clone());
        Ok(())
    }

    async fn fetch_raw(&self, key: &str, group: &str, _timeout: Duration) -> RemoteResult<Option<String>> {
        {
            let mut state = self.state.write();
            if state.settings.is_none() {
                return Err(RemoteError::NotInitialized);
            }
            state.fetch_log.push(key.to_string());
        }

        let delay = self.delays.read().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failures.read().get(key).cloned() {
            return Err(error);
        }

        Ok(self
            .documents
            .read()
            .get(&(group.to_string(), key.to_string()))
            .cloned())
    }
}
