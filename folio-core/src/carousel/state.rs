//! Carousel: paging state plus the gesture and transition machines

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};
use crate::gesture::{GestureTracker, PageBounds, ReleasePolicy};
use crate::render::{self, RenderFrame};
use crate::transition::TransitionController;
use crate::tuning::CarouselTuning;
use crate::window::{self, PageWindow};

/// Observable carousel state. Hosts diff successive snapshots to decide
/// which timers to start or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    /// 1-based, always within `1..=max(total_pages, 1)`
    pub current_page: usize,
    /// Zero when there are no items
    pub total_pages: usize,
    /// A pointer crossed the activation distance and is claimed
    pub is_dragging: bool,
    /// Navigation locked until `TransitionSettled`
    pub is_transitioning: bool,
    /// Resisted drag distance (px)
    pub drag_distance: f32,
    /// Release velocity estimate (px/ms)
    pub velocity: f32,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            is_dragging: false,
            is_transitioning: false,
            drag_distance: 0.0,
            velocity: 0.0,
        }
    }
}

/// One paged carousel instance.
#[derive(Debug, Clone)]
pub struct Carousel {
    pub(super) total_items: usize,
    pub(super) items_per_page: usize,
    pub(super) viewport_width: f32,
    pub(super) state: CarouselState,
    pub(super) tracker: GestureTracker,
    pub(super) transition: TransitionController,
    pub(super) policy: ReleasePolicy,
}

impl Carousel {
    /// Build a carousel over `total_items` opaque items.
    ///
    /// Fails fast with `InvalidConfiguration` when the tuning is unusable,
    /// most notably `items_per_page == 0`.
    pub fn new(total_items: usize, tuning: &CarouselTuning) -> Result<Self> {
        tuning.validate()?;
        let items_per_page = tuning.items_per_page();
        let total_pages = window::page_count(total_items, items_per_page)?;

        Ok(Self {
            total_items,
            items_per_page,
            viewport_width: 0.0,
            state: CarouselState {
                total_pages,
                ..CarouselState::default()
            },
            tracker: GestureTracker::new(
                tuning.activation_px(),
                tuning.elastic_resistance(),
            ),
            transition: TransitionController::new(tuning.settle_ms()),
            policy: ReleasePolicy::from_tuning(tuning),
        })
    }

    /// Copy of the observable state.
    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// 1-based current page.
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Zero when there are no items.
    pub fn total_pages(&self) -> usize {
        self.state.total_pages
    }

    /// Item count last set.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Page size.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Width used to convert drag px to percent.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Lockout length the host should wait before sending
    /// `TransitionSettled`.
    pub fn settle_ms(&self) -> u64 {
        self.transition.settle_ms()
    }

    /// Not on the last page.
    pub fn can_go_next(&self) -> bool {
        self.state.current_page < self.state.total_pages
    }

    /// Not on page 1.
    pub fn can_go_previous(&self) -> bool {
        self.state.current_page > 1
    }

    /// Window for the current page.
    pub fn window(&self) -> PageWindow {
        window::window_for(
            self.state.total_pages,
            self.total_items,
            self.items_per_page,
            self.state.current_page,
        )
    }

    /// Indices of the items to render.
    pub fn visible_range(&self) -> Range<usize> {
        self.window().slice
    }

    /// Frame to draw. The drag offset only applies while dragging.
    pub fn frame(&self) -> RenderFrame {
        let offset = if self.state.is_dragging {
            render::drag_offset_percent(
                self.state.drag_distance,
                self.viewport_width,
                self.state.total_pages,
            )
        } else {
            0.0
        };

        RenderFrame {
            current_page: self.state.current_page,
            total_pages: self.state.total_pages,
            transform_percent: render::transform_percent(
                self.state.current_page,
                self.state.total_pages,
                offset,
            ),
            is_dragging: self.state.is_dragging,
        }
    }

    /// Change the page size and clamp the current page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        if items_per_page == 0 {
            return Err(CarouselError::InvalidConfiguration(
                "items_per_page must be greater than zero".into(),
            ));
        }
        self.items_per_page = items_per_page;
        self.recompute_pages();
        Ok(())
    }

    pub(super) fn recompute_pages(&mut self) {
        let pages = self.total_items.div_ceil(self.items_per_page);
        self.state.total_pages = pages;
        self.state.current_page =
            window::clamp_page(self.state.current_page, pages);
        log::debug!(
            "Carousel pages recomputed: page {}/{} ({} items, {} per page)",
            self.state.current_page,
            pages,
            self.total_items,
            self.items_per_page
        );
    }

    pub(super) fn bounds(&self) -> PageBounds {
        PageBounds::new(self.state.current_page, self.state.total_pages)
    }

    pub(super) fn sync_gesture(&mut self) {
        self.state.is_dragging = self.tracker.is_dragging();
        self.state.drag_distance = self.tracker.distance();
        self.state.velocity = self.tracker.velocity();
    }
}
