use crate::input::{PointerEvent, PointerId, PointerKind, PointerPhase};

/// Per-interaction bookkeeping, alive from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// The one pointer this interaction follows
    pub pointer_id: PointerId,
    /// Device class, fixed at pointer-down
    pub kind: PointerKind,
    /// x at pointer-down (px)
    pub start_x: f32,
    /// Timestamp of the previous sample, for velocity (ms)
    pub last_move_timestamp: u64,
}

/// Tracker state between pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    /// No pointer tracked
    #[default]
    Idle,
    /// Pointer is down but has not travelled past the activation distance
    Armed(GestureSample),
    /// Pointer is claimed; default scrolling should be suppressed
    Dragging(GestureSample),
}

/// Whether the carousel sits at either end, for elastic resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageBounds {
    /// On page 1; rightward travel is resisted
    pub at_first: bool,
    /// On the last page; leftward travel is resisted
    pub at_last: bool,
}

impl PageBounds {
    /// Bounds for a 1-based page. With no pages both ends are set.
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            at_first: current_page <= 1,
            at_last: current_page >= total_pages,
        }
    }
}

/// Final drag signal emitted on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    /// Signed drag distance after resistance (px); positive is rightwards
    pub distance: f32,
    /// Signed velocity (px/ms); always zero for non-touch pointers
    pub velocity: f32,
    /// Device class, selects the release thresholds
    pub kind: PointerKind,
}

/// What a single pointer event did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    /// Event did not belong to the tracked pointer or was out of sequence
    Ignored,
    /// Pointer-down accepted
    Armed,
    /// Pointer moved while armed but stayed under the activation distance
    Held,
    /// Activation distance crossed; the pointer is now claimed
    DragStarted {
        /// Resisted distance so far (px)
        distance: f32,
    },
    /// Further movement of a claimed pointer
    Dragged {
        /// Resisted distance from pointer-down (px)
        distance: f32,
    },
    /// Drag finished; feed this to [`crate::gesture::ReleasePolicy`]
    Released(GestureRelease),
    /// Pointer went up without ever becoming a drag
    Clicked,
    /// Platform cancelled the tracked pointer
    Cancelled,
}

impl GestureOutput {
    /// True when the host should suppress default scroll/navigation.
    pub fn claims_pointer(&self) -> bool {
        matches!(self, Self::DragStarted { .. } | Self::Dragged { .. })
    }
}

/// Turns a stream of pointer events into drag distance and velocity.
///
/// Tracks a single pointer at a time. A second pointer-down while one is
/// already tracked is ignored, as are events from any other pointer id.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    phase: GesturePhase,
    activation_px: f32,
    elastic_resistance: f32,
    distance: f32,
    velocity: f32,
}

impl GestureTracker {
    /// Idle tracker. `elastic_resistance` scales travel past either end
    /// and is expected in `0.0..=1.0`.
    pub fn new(activation_px: f32, elastic_resistance: f32) -> Self {
        Self {
            phase: GesturePhase::Idle,
            activation_px,
            elastic_resistance,
            distance: 0.0,
            velocity: 0.0,
        }
    }

    /// Current phase, including the tracked sample.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// No pointer tracked.
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    /// Past the activation distance.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging(_))
    }

    /// Current drag distance (px), zero unless dragging.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Resisted distance over the time since the previous move (px/ms).
    /// Only touch drags update it.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Whether `id` is the pointer currently claimed by a drag.
    pub fn claims(&self, id: PointerId) -> bool {
        matches!(self.phase, GesturePhase::Dragging(s) if s.pointer_id == id)
    }

    fn tracked(&self) -> Option<GestureSample> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Armed(s) | GesturePhase::Dragging(s) => Some(s),
        }
    }

    /// Feed one pointer event. `bounds` decides where resistance applies.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        bounds: PageBounds,
    ) -> GestureOutput {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event, bounds),
            PointerPhase::Up => self.pointer_up(event),
            PointerPhase::Cancel => self.pointer_cancel(event),
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> GestureOutput {
        if let Some(active) = self.tracked() {
            log::trace!(
                "Ignoring pointer {} down while tracking pointer {}",
                event.id,
                active.pointer_id
            );
            return GestureOutput::Ignored;
        }

        self.distance = 0.0;
        self.velocity = 0.0;
        self.phase = GesturePhase::Armed(GestureSample {
            pointer_id: event.id,
            kind: event.kind,
            start_x: event.x,
            last_move_timestamp: event.timestamp_ms,
        });
        GestureOutput::Armed
    }

    fn pointer_move(
        &mut self,
        event: &PointerEvent,
        bounds: PageBounds,
    ) -> GestureOutput {
        let Some(mut sample) = self.tracked() else {
            return GestureOutput::Ignored;
        };
        if sample.pointer_id != event.id {
            return GestureOutput::Ignored;
        }

        let raw = event.x - sample.start_x;
        let elapsed = event
            .timestamp_ms
            .saturating_sub(sample.last_move_timestamp);
        sample.last_move_timestamp = event.timestamp_ms;

        let phase = self.phase;
        match phase {
            GesturePhase::Armed(_) if raw.abs() <= self.activation_px => {
                self.phase = GesturePhase::Armed(sample);
                GestureOutput::Held
            }
            GesturePhase::Armed(_) => {
                self.phase = GesturePhase::Dragging(sample);
                self.apply_sample(raw, elapsed, sample.kind, bounds);
                log::debug!(
                    "Pointer {} became a drag at {:.1}px",
                    sample.pointer_id,
                    raw
                );
                GestureOutput::DragStarted {
                    distance: self.distance,
                }
            }
            GesturePhase::Dragging(_) => {
                self.phase = GesturePhase::Dragging(sample);
                self.apply_sample(raw, elapsed, sample.kind, bounds);
                GestureOutput::Dragged {
                    distance: self.distance,
                }
            }
            GesturePhase::Idle => GestureOutput::Ignored,
        }
    }

    fn apply_sample(
        &mut self,
        raw: f32,
        elapsed_ms: u64,
        kind: PointerKind,
        bounds: PageBounds,
    ) {
        let pulling_past_start = raw > 0.0 && bounds.at_first;
        let pulling_past_end = raw < 0.0 && bounds.at_last;
        self.distance = if pulling_past_start || pulling_past_end {
            raw * self.elastic_resistance
        } else {
            raw
        };

        // Same-timestamp samples keep the previous velocity.
        if kind.is_touch() && elapsed_ms > 0 {
            self.velocity = self.distance / elapsed_ms as f32;
        }
    }

    fn pointer_up(&mut self, event: &PointerEvent) -> GestureOutput {
        let Some(sample) = self.tracked() else {
            return GestureOutput::Ignored;
        };
        if sample.pointer_id != event.id {
            return GestureOutput::Ignored;
        }

        let phase = self.phase;
        let output = match phase {
            GesturePhase::Dragging(_) => {
                GestureOutput::Released(GestureRelease {
                    distance: self.distance,
                    velocity: self.velocity,
                    kind: sample.kind,
                })
            }
            _ => GestureOutput::Clicked,
        };
        self.reset();
        output
    }

    fn pointer_cancel(&mut self, event: &PointerEvent) -> GestureOutput {
        match self.tracked() {
            Some(sample) if sample.pointer_id == event.id => {
                self.reset();
                GestureOutput::Cancelled
            }
            _ => GestureOutput::Ignored,
        }
    }

    /// Drop any tracked pointer without emitting a release.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.distance = 0.0;
        self.velocity = 0.0;
    }
}
