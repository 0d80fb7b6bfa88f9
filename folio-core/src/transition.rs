//! Page transition lockout
//!
//! A committed page change locks navigation for the settle duration. Requests
//! arriving while locked are dropped, never queued. The controller does not
//! own a timer: the host schedules one for `settle_ms` when it sees the
//! transition start and reports back through [`TransitionController::settle`].

use crate::window::clamp_page;

/// Whether a committed page change is still sliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// Navigation accepted.
    #[default]
    Idle,
    /// Locked until [`TransitionController::settle`]. Pages are 1-based.
    Transitioning {
        /// Page shown before the request
        from: usize,
        /// Committed target
        to: usize,
    },
}

/// Navigation lockout around page changes.
#[derive(Debug, Clone)]
pub struct TransitionController {
    phase: TransitionPhase,
    settle_ms: u64,
}

impl TransitionController {
    /// Idle controller; `settle_ms` is only reported back to the host.
    pub fn new(settle_ms: u64) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            settle_ms,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// True while navigation is locked.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, TransitionPhase::Transitioning { .. })
    }

    /// How long the host should wait before calling [`Self::settle`].
    pub fn settle_ms(&self) -> u64 {
        self.settle_ms
    }

    /// Try to move from `current_page` to `target`.
    ///
    /// Returns the committed page, or `None` when the request was a no-op
    /// (same page after clamping) or dropped by the lockout.
    pub fn request(
        &mut self,
        target: usize,
        current_page: usize,
        total_pages: usize,
    ) -> Option<usize> {
        if self.is_transitioning() {
            log::debug!(
                "Dropping page request {} during transition ({:?})",
                target,
                self.phase
            );
            return None;
        }

        let target = clamp_page(target, total_pages);
        if target == current_page {
            return None;
        }

        self.phase = TransitionPhase::Transitioning {
            from: current_page,
            to: target,
        };
        Some(target)
    }

    /// Called when the settle timer fires. Returns true if a transition ended.
    pub fn settle(&mut self) -> bool {
        let was_transitioning = self.is_transitioning();
        self.phase = TransitionPhase::Idle;
        was_transitioning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_page_never_starts_a_transition() {
        let mut c = TransitionController::new(300);
        assert_eq!(c.request(2, 2, 3), None);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn second_request_is_dropped_until_settled() {
        let mut c = TransitionController::new(300);
        assert_eq!(c.request(2, 1, 3), Some(2));
        assert!(c.is_transitioning());
        assert_eq!(c.request(3, 2, 3), None);

        assert!(c.settle());
        assert_eq!(c.request(3, 2, 3), Some(3));
    }

    #[test]
    fn out_of_range_targets_are_clamped() {
        let mut c = TransitionController::new(300);
        assert_eq!(c.request(0, 1, 3), None);
        assert_eq!(c.request(9, 1, 3), Some(3));
    }

    #[test]
    fn settle_without_transition_is_harmless() {
        let mut c = TransitionController::new(300);
        assert!(!c.settle());
        assert_eq!(c.phase(), TransitionPhase::Idle);
    }
}
