//! Post-parse checks

use folio_core::CarouselError;
use thiserror::Error;

use crate::models::FolioConfig;

/// Why a parsed config cannot be used.
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    /// `[carousel]` section rejected
    #[error("carousel: {0}")]
    Carousel(CarouselError),

    /// `[ambient]` section rejected
    #[error("ambient: {0}")]
    Ambient(CarouselError),

    /// `query.base_url` does not parse, even with `https://` prefixed
    #[error("query.base_url '{url}' is not a valid URL: {source}")]
    BaseUrl {
        /// Value as configured
        url: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },

    /// `query.timeout_ms` is zero
    #[error("query.timeout_ms must be greater than zero")]
    ZeroTimeout,
}

impl FolioConfig {
    /// Check every section; the first failure wins.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.carousel
            .validate()
            .map_err(ConfigValidationError::Carousel)?;
        self.ambient
            .validate()
            .map_err(ConfigValidationError::Ambient)?;

        if let Some(raw) = self.query.base_url.as_deref() {
            let candidate = if raw.contains("://") {
                raw.to_string()
            } else {
                format!("https://{raw}")
            };
            url::Url::parse(&candidate).map_err(|source| {
                ConfigValidationError::BaseUrl {
                    url: raw.to_string(),
                    source,
                }
            })?;
        }

        if self.query.timeout_ms() == 0 {
            return Err(ConfigValidationError::ZeroTimeout);
        }

        if self.ambient.startup_delay_ms() == 0 {
            tracing::warn!(
                "ambient.startup_delay_ms is 0; rotation starts the moment a carousel becomes visible"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::CarouselTuning;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FolioConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_items_per_page_is_rejected() {
        let config = FolioConfig {
            carousel: CarouselTuning {
                items_per_page: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::Carousel(_))
        ));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = FolioConfig::default();
        config.query.base_url = Some("http://[::1".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::BaseUrl { .. })
        ));
    }
}
