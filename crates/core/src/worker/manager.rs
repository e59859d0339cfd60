//! The offline cache manager and its three lifecycle hooks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

use super::manifest::WorkerConfig;
use super::state::WorkerState;
use crate::network::{Network, Request, Response};
use crate::{CacheDb, Error};

/// Which path produced a fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Cache,
    Network,
    OfflineFallback,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSource::Cache => write!(f, "cache"),
            ResponseSource::Network => write!(f, "network"),
            ResponseSource::OfflineFallback => write!(f, "offline_fallback"),
        }
    }
}

/// Result of intercepting one request.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub source: ResponseSource,
    pub response: Response,
}

/// Cache-first request handler bound to one cache generation.
///
/// Each instance owns only its lifecycle state; everything else it touches
/// lives in the shared [`CacheDb`], so several managers (one per host) can
/// run against the same store.
pub struct OfflineCacheManager {
    config: WorkerConfig,
    db: CacheDb,
    network: Arc<dyn Network>,
    state: RwLock<WorkerState>,
    /// Set once the first activate completes; never cleared.
    activated: AtomicBool,
}

impl OfflineCacheManager {
    pub fn new(config: WorkerConfig, db: CacheDb, network: Arc<dyn Network>) -> Self {
        Self { config, db, network, state: RwLock::new(WorkerState::Idle), activated: AtomicBool::new(false) }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn generation(&self) -> &str {
        &self.config.generation
    }

    pub fn db(&self) -> &CacheDb {
        &self.db
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    /// Move to `next` if `allowed` accepts the current state, returning the
    /// state we left.
    async fn enter(&self, allowed: fn(&WorkerState) -> bool, next: WorkerState) -> Result<WorkerState, Error> {
        let mut state = self.state.write().await;
        if !allowed(&*state) {
            return Err(Error::InvalidState(format!("cannot start {next} while {}", *state)));
        }
        let previous = *state;
        *state = next;
        Ok(previous)
    }

    async fn set_state(&self, next: WorkerState) {
        *self.state.write().await = next;
    }

    /// Populate the current generation with every manifest URL.
    ///
    /// All manifest URLs are fetched concurrently; any network failure or
    /// non-OK status fails the whole phase and nothing is written. On success
    /// the entries are stored in one transaction and their URLs returned.
    /// Running it again with the same manifest overwrites the same entries;
    /// an active manager stays active and keeps answering fetches meanwhile.
    pub async fn install(&self) -> Result<Vec<String>, Error> {
        let previous = self.enter(WorkerState::can_install, WorkerState::Installing).await?;
        tracing::info!(generation = %self.config.generation, urls = self.config.manifest.len(), "installing");

        match self.populate().await {
            Ok(urls) => {
                let next = if previous == WorkerState::Active { WorkerState::Active } else { WorkerState::Installed };
                self.set_state(next).await;
                tracing::info!(generation = %self.config.generation, "install complete");
                Ok(urls)
            }
            Err(e) => {
                self.set_state(previous).await;
                tracing::warn!(generation = %self.config.generation, error = %e, "install failed");
                Err(e)
            }
        }
    }

    async fn populate(&self) -> Result<Vec<String>, Error> {
        self.db.open_cache(&self.config.generation).await?;

        let fetched = try_join_all(self.config.manifest.urls().iter().map(|url| self.fetch_for_install(url))).await?;
        let urls: Vec<String> = fetched.iter().map(|(req, _)| req.cache_url()).collect();

        self.db.put_entries(&self.config.generation, fetched).await?;
        Ok(urls)
    }

    async fn fetch_for_install(&self, url: &Url) -> Result<(Request, Response), Error> {
        let request = Request::get(url.clone());
        let response = self.network.fetch(&request).await?;
        if !response.is_ok() {
            return Err(Error::HttpError(format!("{url} returned status {}", response.status)));
        }
        tracing::debug!(%url, bytes = response.body.len(), "precached");
        Ok((request, response))
    }

    /// Delete every cache that does not belong to the current generation.
    ///
    /// Deletions run concurrently; a failure is logged and does not stop the
    /// others. Returns the names this call actually removed.
    pub async fn activate(&self) -> Result<Vec<String>, Error> {
        let previous = self.enter(WorkerState::can_activate, WorkerState::Activating).await?;

        let names = match self.db.cache_names().await {
            Ok(names) => names,
            Err(e) => {
                self.set_state(previous).await;
                return Err(e);
            }
        };

        let stale: Vec<String> = names
            .into_iter()
            .filter(|name| *name != self.config.generation)
            .collect();

        let results = join_all(stale.iter().map(|name| async move { (name, self.db.delete_cache(name).await) })).await;

        let mut deleted = Vec::new();
        for (name, result) in results {
            match result {
                Ok(true) => deleted.push(name.clone()),
                Ok(false) => tracing::debug!(cache = %name, "cache already removed"),
                Err(e) => tracing::warn!(cache = %name, error = %e, "failed to delete stale cache"),
            }
        }

        self.set_state(WorkerState::Active).await;
        self.activated.store(true, Ordering::Release);
        tracing::info!(generation = %self.config.generation, deleted = deleted.len(), "activated");
        Ok(deleted)
    }

    /// Answer a request: cache, then network, then the offline page.
    ///
    /// Network responses are returned as-is whatever their status and are
    /// never written back to the cache. When the network fails outright only
    /// document requests get the offline page; other requests see the error.
    pub async fn handle_fetch(&self, request: &Request) -> Result<FetchOutcome, Error> {
        let state = self.state().await;
        if !state.can_intercept_fetch() && !self.activated.load(Ordering::Acquire) {
            return Err(Error::InvalidState(format!("cannot handle fetch while {state}")));
        }

        match self.db.match_request(&self.config.generation, request).await {
            Ok(Some(response)) => {
                tracing::debug!(url = %request.url, "cache hit");
                return Ok(FetchOutcome { source: ResponseSource::Cache, response });
            }
            Ok(None) => tracing::debug!(url = %request.url, "cache miss"),
            Err(e) => tracing::warn!(url = %request.url, error = %e, "cache lookup failed, treating as miss"),
        }

        let err = match self.network.fetch(request).await {
            Ok(response) => return Ok(FetchOutcome { source: ResponseSource::Network, response }),
            Err(err) => err,
        };

        if !err.is_network_failure() || !request.is_document() {
            return Err(err);
        }

        let offline = Request::get(self.config.offline_page.clone());
        match self.db.match_request(&self.config.generation, &offline).await {
            Ok(Some(response)) => {
                tracing::debug!(url = %request.url, error = %err, "serving offline page");
                Ok(FetchOutcome { source: ResponseSource::OfflineFallback, response })
            }
            Ok(None) => {
                tracing::warn!(offline_page = %self.config.offline_page, "offline page missing from cache");
                Err(err)
            }
            Err(e) => {
                tracing::warn!(error = %e, "offline page lookup failed");
                Err(err)
            }
        }
    }
}
