//! Shared configuration for folio.
//!
//! Centralizes config loading (TOML, JSON or environment) and validation so
//! hosts and the replay tool agree on defaults. Carousel and ambient tuning
//! types live in `folio-core`; this crate composes them with the widget query
//! settings.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{CONFIG_JSON_ENV, CONFIG_PATH_ENV, ConfigFormat};
pub use models::{ConfigSource, FolioConfig, QueryConfig};
pub use validation::ConfigValidationError;
