//! Renderer contract
//!
//! The host draws a horizontal strip holding every page side by side, sized
//! `total_pages * 100%` of the viewport, and translates it by
//! `transform_percent` of the strip's own width.

use serde::{Deserialize, Serialize};

/// Everything a host needs to draw the paged strip and its pagination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// 1-based page, 1 when there are no pages
    pub current_page: usize,
    /// Pagination dot count
    pub total_pages: usize,
    /// Strip translation as a percentage of its own width
    pub transform_percent: f32,
    /// Hosts disable the slide animation while this is set
    pub is_dragging: bool,
}

/// Drag offset as a percentage of the strip width, 1:1 with pointer travel.
pub fn drag_offset_percent(
    drag_distance_px: f32,
    viewport_width_px: f32,
    total_pages: usize,
) -> f32 {
    if total_pages == 0 || viewport_width_px <= 0.0 {
        return 0.0;
    }
    (drag_distance_px / viewport_width_px) * (100.0 / total_pages as f32)
}

/// Strip translation: page offset plus any live drag offset.
pub fn transform_percent(
    current_page: usize,
    total_pages: usize,
    drag_offset_percent: f32,
) -> f32 {
    if total_pages == 0 {
        return 0.0;
    }
    let page_width = 100.0 / total_pages as f32;
    -((current_page.saturating_sub(1)) as f32 * page_width) + drag_offset_percent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_transform_steps_by_page_width() {
        assert_eq!(transform_percent(1, 4, 0.0), 0.0);
        assert_eq!(transform_percent(3, 4, 0.0), -50.0);
    }

    #[test]
    fn drag_offset_tracks_pointer_regardless_of_page_count() {
        // 100px on a 400px viewport is a quarter page
        let two = drag_offset_percent(100.0, 400.0, 2);
        let four = drag_offset_percent(100.0, 400.0, 4);
        assert_eq!(two, 12.5);
        assert_eq!(four, 6.25);
        assert_eq!(transform_percent(2, 4, -four), -31.25);
    }

    #[test]
    fn degenerate_inputs_render_flat() {
        assert_eq!(drag_offset_percent(50.0, 0.0, 3), 0.0);
        assert_eq!(drag_offset_percent(50.0, 400.0, 0), 0.0);
        assert_eq!(transform_percent(1, 0, 0.0), 0.0);
    }
}
