//! Error types

use thiserror::Error;

/// Errors raised while building carousel state from tuning values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    /// A tuning value is out of range. The message names the field.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias for fallible folio-core constructors.
pub type Result<T> = std::result::Result<T, CarouselError>;
