use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use folio_config::QueryConfig;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;

use super::QueryKey;
use super::fetcher::{FetchError, Fetcher};

/// Result of a query as a widget sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Last good data, kept across later failures
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_success(&self) -> bool {
        self.data.is_some() && !self.is_error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Cached data younger than this is served without refetching
    pub stale_after: Duration,
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Delay before the first retry; doubles per attempt
    pub retry_backoff: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::from(&QueryConfig::default())
    }
}

impl From<&QueryConfig> for QueryOptions {
    fn from(config: &QueryConfig) -> Self {
        Self {
            stale_after: Duration::from_millis(config.stale_after_ms()),
            retries: config.retries(),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms()),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    data: Option<Value>,
    fetched_at: Option<Instant>,
    in_flight: bool,
    error: Option<String>,
}

impl CacheEntry {
    fn state(&self) -> QueryState<Value> {
        QueryState {
            data: self.data.clone(),
            is_loading: self.in_flight,
            is_error: self.error.is_some(),
            error: self.error.clone(),
        }
    }

    fn is_fresh(&self, stale_after: Duration) -> bool {
        self.error.is_none()
            && self
                .fetched_at
                .is_some_and(|at| at.elapsed() < stale_after)
    }
}

/// Clears the key's loading flag if the fetch future is dropped early.
struct InFlight<'a> {
    entries: &'a DashMap<QueryKey, CacheEntry>,
    key: &'a QueryKey,
    finished: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Some(mut entry) = self.entries.get_mut(self.key) {
            log::debug!("Query {} cancelled before completion", self.key);
            entry.in_flight = false;
        }
    }
}

/// Cached, retrying front for widget data.
///
/// Created once at the app root and handed to each widget; clones share the
/// same cache.
#[derive(Debug, Clone)]
pub struct QueryClient {
    fetcher: Arc<dyn Fetcher>,
    entries: Arc<DashMap<QueryKey, CacheEntry>>,
    options: QueryOptions,
}

impl QueryClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, options: QueryOptions) -> Self {
        Self {
            fetcher,
            entries: Arc::new(DashMap::new()),
            options,
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Current state without triggering a fetch.
    pub fn snapshot(&self, key: &QueryKey) -> QueryState<Value> {
        self.entries
            .get(key)
            .map(|entry| entry.state())
            .unwrap_or_default()
    }

    /// Serve fresh cached data, or fetch (with retries) and cache the result.
    ///
    /// A key already being fetched returns its loading snapshot instead of
    /// starting a second request.
    pub async fn fetch(&self, key: &QueryKey) -> QueryState<Value> {
        {
            let mut entry = self.entries.entry(key.clone()).or_default();
            if entry.in_flight || entry.is_fresh(self.options.stale_after) {
                return entry.state();
            }
            entry.in_flight = true;
        }

        let mut guard = InFlight {
            entries: &self.entries,
            key,
            finished: false,
        };
        let result = self.fetch_with_retry(key).await;
        guard.finished = true;
        drop(guard);

        let mut entry = self.entries.entry(key.clone()).or_default();
        entry.in_flight = false;
        match result {
            Ok(value) => {
                entry.data = Some(value);
                entry.fetched_at = Some(Instant::now());
                entry.error = None;
            }
            Err(err) => {
                log::warn!("Query {} failed: {}", key, err);
                entry.error = Some(err.to_string());
            }
        }
        entry.state()
    }

    /// Like [`QueryClient::fetch`] but decoded into `T`. A decode failure is
    /// reported as an error state.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
    ) -> QueryState<T> {
        let state = self.fetch(key).await;
        let (data, decode_error) = match state.data {
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(decoded) => (Some(decoded), None),
                Err(err) => (None, Some(FetchError::from(err).to_string())),
            },
            None => (None, None),
        };

        let error = decode_error.or(state.error);
        QueryState {
            data,
            is_loading: state.is_loading,
            is_error: error.is_some(),
            error,
        }
    }

    /// Mark `key` stale so the next fetch goes to the network.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.fetched_at = None;
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    async fn fetch_with_retry(&self, key: &QueryKey) -> Result<Value, FetchError> {
        let mut attempt = 0u32;
        loop {
            match self.fetcher.fetch(key).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.options.retries => {
                    let delay = self
                        .options
                        .retry_backoff
                        .saturating_mul(2u32.saturating_pow(attempt));
                    log::debug!(
                        "Query {} attempt {} failed ({}), retrying in {:?}",
                        key,
                        attempt + 1,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
