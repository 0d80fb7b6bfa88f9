//! Platform-neutral input events
//!
//! Hosts adapt their toolkit's pointer, touch and wheel events into these
//! shapes before handing them to the carousel.

use serde::{Deserialize, Serialize};

/// Identifier a platform assigns to an active pointer.
pub type PointerId = u64;

/// Device class that produced a pointer event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// Mouse or trackpad click-drag
    #[default]
    Mouse,
    /// Stylus. Released with the mouse thresholds.
    Pen,
    /// Finger on a touch screen; may flick.
    Touch,
}

impl PointerKind {
    /// Only touch releases consult velocity.
    pub fn is_touch(self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// Lifecycle stage of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Button pressed or finger landed.
    Down,
    /// Position changed while down.
    Move,
    /// Released normally; may commit a page change.
    Up,
    /// Aborted by the platform. Never commits.
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Platform pointer id; only the tracked pointer is honoured
    pub id: PointerId,
    /// Stage of the interaction
    pub phase: PointerPhase,
    /// Device class
    pub kind: PointerKind,
    /// Horizontal client coordinate (px)
    pub x: f32,
    /// Host timestamp (ms), monotonic per pointer
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Build a sample from its parts.
    pub fn new(
        id: PointerId,
        phase: PointerPhase,
        kind: PointerKind,
        x: f32,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            id,
            phase,
            kind,
            x,
            timestamp_ms,
        }
    }

    /// Shorthand for a [`PointerPhase::Down`] sample.
    pub fn down(id: PointerId, kind: PointerKind, x: f32, ts: u64) -> Self {
        Self::new(id, PointerPhase::Down, kind, x, ts)
    }

    /// Shorthand for a [`PointerPhase::Move`] sample.
    pub fn moved(id: PointerId, kind: PointerKind, x: f32, ts: u64) -> Self {
        Self::new(id, PointerPhase::Move, kind, x, ts)
    }

    /// Shorthand for a [`PointerPhase::Up`] sample.
    pub fn up(id: PointerId, kind: PointerKind, x: f32, ts: u64) -> Self {
        Self::new(id, PointerPhase::Up, kind, x, ts)
    }

    /// Cancel carries no position; `x` is zero and ignored.
    pub fn cancel(id: PointerId, kind: PointerKind, ts: u64) -> Self {
        Self::new(id, PointerPhase::Cancel, kind, 0.0, ts)
    }
}

/// Trackpad or wheel scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Horizontal delta (px); positive scrolls toward the next page
    pub delta_x: f32,
    /// Vertical delta (px); vertical-dominant scrolls are ignored
    pub delta_y: f32,
}

/// Page navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward page 1.
    Previous,
    /// Toward the last page.
    Next,
}

impl Direction {
    /// Apply this direction to a 1-based page, clamped to `1..=pages`.
    pub fn target_from(self, current: usize, pages: usize) -> usize {
        let target = match self {
            Self::Previous => current.saturating_sub(1),
            Self::Next => current.saturating_add(1),
        };
        target.clamp(1, pages.max(1))
    }
}
