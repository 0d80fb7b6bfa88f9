//! Pointer gesture recognition
//!
//! `tracker` turns raw pointer samples into drag distance and velocity with
//! elastic resistance at the ends. `release` holds the policy that turns a
//! finished drag, or a horizontal wheel scroll, into a page direction.

/// Release and wheel thresholds.
pub mod release;
/// Drag tracking with elastic edges.
pub mod tracker;

pub use release::ReleasePolicy;
pub use tracker::{
    GestureOutput, GesturePhase, GestureRelease, GestureSample,
    GestureTracker, PageBounds,
};
