//! Paged carousel
//!
//! Combines the page window, gesture tracker and transition lockout behind a
//! single message-driven `update`. The carousel never touches a clock; the
//! host turns `is_transitioning` edges into settle timers.

/// Inputs to [`Carousel::update`] and what it reports back.
pub mod messages;
pub mod state;
mod update;

pub use messages::{CarouselMessage, CarouselOutcome};
pub use state::{Carousel, CarouselState};
