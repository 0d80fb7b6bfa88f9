//! Carousel constants
//!
//! Default thresholds and timings for paging, gestures and ambient rotation.
//! These were tuned by feel for mouse and touch input; `CarouselTuning` and
//! `AmbientTuning` can override every value at runtime.

/// Paging defaults.
pub mod paging {
    /// Items shown per page when a host does not specify one.
    pub const ITEMS_PER_PAGE: usize = 4;
    /// Duration (ms) of the page slide; navigation is locked for this long.
    pub const SETTLE_MS: u64 = 300;
}

/// Pointer gesture thresholds, in logical pixels.
pub mod gesture {
    /// Movement required before a press is reclassified as a drag.
    pub const ACTIVATION_PX: f32 = 8.0;
    /// Scale applied to drag distance when pulling past the first/last page.
    pub const ELASTIC_RESISTANCE: f32 = 0.3;
    /// Release distance that commits a page change for mouse and pen.
    pub const MOUSE_PAGE_THRESHOLD_PX: f32 = 80.0;
    /// Release distance that commits a page change for touch.
    pub const TOUCH_DISTANCE_THRESHOLD_PX: f32 = 60.0;
    /// Release velocity (px/ms) that commits a touch flick.
    pub const TOUCH_VELOCITY_THRESHOLD: f32 = 0.5;
    /// Horizontal wheel delta that commits a page change.
    pub const WHEEL_THRESHOLD_PX: f32 = 50.0;
}

/// Ambient rotation timings.
pub mod ambient {
    /// Delay (ms) after the gates open before the first rotation.
    pub const STARTUP_DELAY_MS: u64 = 2_000;
    /// Interval (ms) between subsequent rotations.
    pub const INTERVAL_MS: u64 = 3_500;
    /// Items need more than this many sub-items to take part in rotation.
    pub const MIN_SUB_ITEMS: usize = 1;
}
