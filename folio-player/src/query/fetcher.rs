use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::QueryKey;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {key}")]
    Status { status: StatusCode, key: QueryKey },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Fetch failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Client errors will not get better by asking again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => !status.is_client_error(),
            Self::Url(_) | Self::Decode(_) => false,
            Self::Http(_) | Self::Other(_) => true,
        }
    }
}

/// Source of widget JSON. Injected into [`super::QueryClient`].
#[async_trait]
pub trait Fetcher: Debug + Send + Sync {
    async fn fetch(&self, key: &QueryKey) -> Result<Value, FetchError>;
}

/// Fetches `GET {base_url}/{key}` and parses the body as JSON.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.starts_with("http://")
            && !normalized.starts_with("https://")
        {
            log::warn!(
                "[HttpFetcher] Base URL '{}' has no scheme, assuming https",
                normalized
            );
            normalized = format!("https://{normalized}");
        }
        // Url::join drops the last segment unless the base ends with '/'
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(&normalized)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, key: &QueryKey) -> Result<Url, FetchError> {
        Ok(self.base_url.join(key.as_str().trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, key: &QueryKey) -> Result<Value, FetchError> {
        let url = self.url_for(key)?;
        log::debug!("[HttpFetcher] GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                key: key.clone(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_below_the_base_path() {
        let fetcher =
            HttpFetcher::new("example.com/api", Duration::from_secs(5))
                .unwrap();
        assert_eq!(fetcher.base_url().as_str(), "https://example.com/api/");
        let url = fetcher.url_for(&QueryKey::new("/widgets/github")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/widgets/github");
    }

    #[test]
    fn client_errors_are_not_retried() {
        let not_found = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            key: QueryKey::new("x"),
        };
        assert!(!not_found.is_retryable());
        let unavailable = FetchError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            key: QueryKey::new("x"),
        };
        assert!(unavailable.is_retryable());
    }
}
