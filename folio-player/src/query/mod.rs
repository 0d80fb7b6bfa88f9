//! Widget data queries
//!
//! Widgets (GitHub, Spotify, Instagram and friends) render JSON fetched
//! through a shared [`QueryClient`]. The client is constructed at the app
//! root with an injected [`Fetcher`] rather than living in a global.

pub mod client;
pub mod fetcher;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use client::{QueryClient, QueryOptions, QueryState};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};

/// Cache key; for [`HttpFetcher`] also the path below the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WidgetSource> for QueryKey {
    fn from(source: WidgetSource) -> Self {
        Self::new(format!("widgets/{}", source.slug()))
    }
}

/// Third-party feeds the site shows widgets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetSource {
    GitHub,
    Spotify,
    Instagram,
    Discogs,
    Steam,
    Goodreads,
    Flickr,
}

impl WidgetSource {
    pub const ALL: [Self; 7] = [
        Self::GitHub,
        Self::Spotify,
        Self::Instagram,
        Self::Discogs,
        Self::Steam,
        Self::Goodreads,
        Self::Flickr,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Spotify => "spotify",
            Self::Instagram => "instagram",
            Self::Discogs => "discogs",
            Self::Steam => "steam",
            Self::Goodreads => "goodreads",
            Self::Flickr => "flickr",
        }
    }
}

impl fmt::Display for WidgetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
