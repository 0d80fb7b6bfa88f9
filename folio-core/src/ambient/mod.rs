//! Ambient rotation
//!
//! Periodically highlights a different sub-item (for example the next photo
//! of a multi-image post) without user interaction, only while the carousel
//! is on screen and uncovered.

/// Shuffled no-repeat queue over sub-items.
pub mod rotation;
/// Gate-driven phases; the host owns the timers.
pub mod scheduler;

pub use rotation::{AmbientRotation, AmbientStep};
pub use scheduler::{
    AmbientGates, AmbientMessage, AmbientPhase, AmbientScheduler,
};
