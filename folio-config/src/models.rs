//! Configuration models

use folio_core::{AmbientTuning, CarouselTuning};
use serde::{Deserialize, Serialize};

/// Widget data fetching defaults.
pub mod defaults {
    /// Cached widget data younger than this is served as-is (ms).
    pub const STALE_AFTER_MS: u64 = 5 * 60 * 1_000;
    /// Extra attempts after a failed fetch.
    pub const RETRIES: u32 = 3;
    /// Delay before the first retry (ms); doubles per attempt.
    pub const RETRY_BACKOFF_MS: u64 = 500;
    /// Per-request timeout (ms).
    pub const TIMEOUT_MS: u64 = 10_000;
}

/// Settings for the widget data client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Base URL widget keys are resolved against. Without one, widgets stay
    /// empty and the host is expected to inject its own fetcher.
    pub base_url: Option<String>,
    /// See [`defaults::STALE_AFTER_MS`]
    pub stale_after_ms: Option<u64>,
    /// See [`defaults::RETRIES`]
    pub retries: Option<u32>,
    /// See [`defaults::RETRY_BACKOFF_MS`]
    pub retry_backoff_ms: Option<u64>,
    /// See [`defaults::TIMEOUT_MS`]
    pub timeout_ms: Option<u64>,
}

impl QueryConfig {
    /// Freshness window (ms).
    pub fn stale_after_ms(&self) -> u64 {
        self.stale_after_ms.unwrap_or(defaults::STALE_AFTER_MS)
    }

    /// Retries after the first attempt.
    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or(defaults::RETRIES)
    }

    /// First retry delay (ms).
    pub fn retry_backoff_ms(&self) -> u64 {
        self.retry_backoff_ms.unwrap_or(defaults::RETRY_BACKOFF_MS)
    }

    /// Per-request timeout (ms).
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(defaults::TIMEOUT_MS)
    }
}

/// Source that produced the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// Nothing found; compiled defaults
    #[default]
    Default,
    /// File named by `$FOLIO_CONFIG_PATH`
    EnvPath(std::path::PathBuf),
    /// JSON in `$FOLIO_CONFIG_JSON`
    EnvInline,
    /// Default file in the working directory
    File(std::path::PathBuf),
}

/// Everything a folio host needs to build its carousels and widgets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Paging and gesture thresholds
    pub carousel: CarouselTuning,
    /// Ambient rotation timing
    pub ambient: AmbientTuning,
    /// Widget data fetching
    pub query: QueryConfig,
}
