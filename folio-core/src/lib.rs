//! Core state machines for folio's paged carousels.
//!
//! Everything here is pure: no clocks, no timers, no I/O. Input arrives as
//! platform-neutral messages and the observable state is read back as plain
//! snapshots. `folio-player` supplies the clock, the timer queue and the
//! effect runner that turns state changes into scheduled work.
//!
//! Data flow for a drag: pointer events → [`gesture::GestureTracker`] →
//! [`gesture::ReleasePolicy`] → [`transition::TransitionController`] →
//! [`window`] recomputed → [`render::RenderFrame`] handed to the host.

pub mod ambient;
pub mod carousel;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod input;
pub mod render;
pub mod transition;
pub mod tuning;
pub mod window;

pub use ambient::{
    AmbientMessage, AmbientPhase, AmbientRotation, AmbientScheduler,
    AmbientStep,
};
pub use carousel::{Carousel, CarouselMessage, CarouselOutcome, CarouselState};
pub use error::{CarouselError, Result};
pub use input::{
    Direction, PointerEvent, PointerId, PointerKind, PointerPhase, WheelEvent,
};
pub use render::RenderFrame;
pub use tuning::{AmbientTuning, CarouselTuning};
pub use window::{PageWindow, compute_window};
