use crate::gesture::tracker::GestureRelease;
use crate::input::{Direction, WheelEvent};
use crate::tuning::CarouselTuning;

/// Decides whether a finished gesture commits a page change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasePolicy {
    /// Resisted travel a mouse or pen drag needs to commit (px)
    pub mouse_page_threshold_px: f32,
    /// Resisted travel a touch drag needs without a flick (px)
    pub touch_distance_threshold_px: f32,
    /// Release speed that commits a touch flick (px/ms)
    pub touch_velocity_threshold: f32,
    /// Horizontal wheel delta that turns a page (px)
    pub wheel_threshold_px: f32,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self::from_tuning(&CarouselTuning::default())
    }
}

impl ReleasePolicy {
    /// Thresholds resolved from `tuning`, defaults filled in.
    pub fn from_tuning(tuning: &CarouselTuning) -> Self {
        Self {
            mouse_page_threshold_px: tuning.mouse_page_threshold_px(),
            touch_distance_threshold_px: tuning.touch_distance_threshold_px(),
            touch_velocity_threshold: tuning.touch_velocity_threshold(),
            wheel_threshold_px: tuning.wheel_threshold_px(),
        }
    }

    /// Direction to move in, or `None` when the drag should snap back.
    ///
    /// Mouse and pen need distance alone. Touch also commits on a fast flick
    /// even when the travel is short.
    pub fn direction(&self, release: &GestureRelease) -> Option<Direction> {
        let distance = release.distance;
        let commits = if release.kind.is_touch() {
            distance.abs() > self.touch_distance_threshold_px
                || release.velocity.abs() > self.touch_velocity_threshold
        } else {
            distance.abs() > self.mouse_page_threshold_px
        };
        if !commits {
            return None;
        }

        // A flick can commit with near-zero travel; fall back to velocity sign.
        let signal = if distance != 0.0 {
            distance
        } else {
            release.velocity
        };
        if signal > 0.0 {
            Some(Direction::Previous)
        } else if signal < 0.0 {
            Some(Direction::Next)
        } else {
            None
        }
    }

    /// Target page for a release, clamped to `1..=total_pages`.
    pub fn target_page(
        &self,
        release: &GestureRelease,
        current_page: usize,
        total_pages: usize,
    ) -> Option<usize> {
        self.direction(release)
            .map(|dir| dir.target_from(current_page, total_pages))
    }

    /// Horizontal trackpad/wheel scrolls commit immediately, no drag state.
    pub fn wheel_direction(&self, wheel: &WheelEvent) -> Option<Direction> {
        let dx = wheel.delta_x;
        if dx.abs() > wheel.delta_y.abs() && dx.abs() > self.wheel_threshold_px
        {
            Some(if dx > 0.0 {
                Direction::Next
            } else {
                Direction::Previous
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerKind;

    fn release(distance: f32, velocity: f32, kind: PointerKind) -> GestureRelease {
        GestureRelease {
            distance,
            velocity,
            kind,
        }
    }

    #[test]
    fn mouse_commits_past_eighty_pixels() {
        let policy = ReleasePolicy::default();
        let r = release(-90.0, 0.0, PointerKind::Mouse);
        assert_eq!(policy.target_page(&r, 2, 3), Some(3));
        let r = release(-50.0, 0.0, PointerKind::Mouse);
        assert_eq!(policy.target_page(&r, 2, 3), None);
    }

    #[test]
    fn pen_follows_mouse_threshold() {
        let policy = ReleasePolicy::default();
        let r = release(85.0, 0.0, PointerKind::Pen);
        assert_eq!(policy.target_page(&r, 2, 3), Some(1));
    }

    #[test]
    fn touch_flick_commits_on_velocity() {
        let policy = ReleasePolicy::default();
        let flick = release(-20.0, -0.8, PointerKind::Touch);
        assert_eq!(policy.target_page(&flick, 2, 3), Some(3));

        let mouse = release(-20.0, -0.8, PointerKind::Mouse);
        assert_eq!(policy.target_page(&mouse, 2, 3), None);
    }

    #[test]
    fn touch_commits_on_distance() {
        let policy = ReleasePolicy::default();
        let r = release(61.0, 0.0, PointerKind::Touch);
        assert_eq!(policy.direction(&r), Some(Direction::Previous));
    }

    #[test]
    fn targets_are_clamped_at_the_ends() {
        let policy = ReleasePolicy::default();
        let r = release(-200.0, 0.0, PointerKind::Mouse);
        assert_eq!(policy.target_page(&r, 3, 3), Some(3));
        let r = release(200.0, 0.0, PointerKind::Mouse);
        assert_eq!(policy.target_page(&r, 1, 3), Some(1));
    }

    #[test]
    fn wheel_requires_dominant_horizontal_delta() {
        let policy = ReleasePolicy::default();
        let horizontal = WheelEvent {
            delta_x: 60.0,
            delta_y: 5.0,
        };
        assert_eq!(policy.wheel_direction(&horizontal), Some(Direction::Next));

        let back = WheelEvent {
            delta_x: -75.0,
            delta_y: 0.0,
        };
        assert_eq!(policy.wheel_direction(&back), Some(Direction::Previous));

        let vertical = WheelEvent {
            delta_x: 60.0,
            delta_y: 80.0,
        };
        assert_eq!(policy.wheel_direction(&vertical), None);

        let small = WheelEvent {
            delta_x: 30.0,
            delta_y: 0.0,
        };
        assert_eq!(policy.wheel_direction(&small), None);
    }
}
