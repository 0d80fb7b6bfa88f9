use serde::{Deserialize, Serialize};

use crate::gesture::GestureOutput;
use crate::input::{PointerEvent, WheelEvent};

/// Everything that can change a [`crate::Carousel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselMessage {
    /// Raw pointer sample
    Pointer(PointerEvent),
    /// Trackpad or wheel scroll
    Wheel(WheelEvent),
    /// Jump to a 1-based page (pagination dots)
    RequestPage {
        /// Target page, clamped
        page: usize,
    },
    /// Arrow button or key
    Next,
    /// Arrow button or key
    Previous,
    /// The settle timer for the running transition fired
    TransitionSettled,
    /// The platform stopped delivering pointer events (teardown, focus
    /// loss). Any tracked pointer is dropped without a release.
    PointerLost,
    /// The item collection grew or shrank; the page is clamped
    SetItemCount {
        /// New item count
        total_items: usize,
    },
    /// Layout changed; only affects drag offsets
    SetViewportWidth {
        /// Viewport width (px)
        width: f32,
    },
}

/// What a single update did, for the host's event plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarouselOutcome {
    /// Gesture tracker result for pointer messages
    pub gesture: Option<GestureOutput>,
    /// Page committed by this update, if any
    pub committed_page: Option<usize>,
}

impl CarouselOutcome {
    /// Host should call its platform's prevent-default for this event.
    pub fn suppress_default(&self) -> bool {
        self.gesture.is_some_and(|g| g.claims_pointer())
    }
}
