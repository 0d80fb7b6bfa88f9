use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::rotation::{AmbientRotation, AmbientStep};
use crate::tuning::AmbientTuning;

/// Level-triggered conditions that must all hold for rotation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmbientGates {
    /// Host attached to the page
    pub mounted: bool,
    /// Container intersects the viewport
    pub visible: bool,
    /// A modal or lightbox is covering the carousel
    pub overlay_open: bool,
}

impl AmbientGates {
    /// All three conditions hold.
    pub fn is_open(&self) -> bool {
        self.mounted && self.visible && !self.overlay_open
    }
}

/// Where the scheduler is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbientPhase {
    /// Gates closed or nothing to rotate; no timers should exist
    #[default]
    Idle,
    /// Gates just opened; waiting out the startup delay
    WarmingUp,
    /// Rotating on the fixed interval
    Rotating,
}

/// Gate changes and timer expiries fed to [`AmbientScheduler::update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AmbientMessage {
    /// Host attached
    Mounted,
    /// Host detached; rotation stops
    Unmounted,
    /// Viewport intersection changed
    VisibilityChanged {
        /// Container now on screen
        visible: bool,
    },
    /// A covering overlay opened or closed
    OverlayChanged {
        /// Overlay now shown
        open: bool,
    },
    /// Startup delay timer fired
    StartupElapsed,
    /// Interval timer fired
    IntervalElapsed,
    /// Replace the items, given as their sub-item counts
    SetItems {
        /// Sub-item count per item
        sub_counts: Vec<usize>,
    },
}

/// Drives [`AmbientRotation`] from gate changes and timer expiries.
///
/// Like the carousel, it owns no timers. The host diffs [`AmbientPhase`]
/// before and after each update: entering `WarmingUp` starts the startup
/// timer, entering `Rotating` starts the interval, entering `Idle` cancels
/// both.
#[derive(Debug, Clone)]
pub struct AmbientScheduler {
    rotation: AmbientRotation,
    gates: AmbientGates,
    phase: AmbientPhase,
    active: Option<AmbientStep>,
    enabled: bool,
    min_sub_items: usize,
    startup_delay_ms: u64,
    interval_ms: u64,
    rng: StdRng,
}

impl AmbientScheduler {
    /// Idle scheduler with an OS-seeded shuffle.
    pub fn new(sub_counts: Vec<usize>, tuning: &AmbientTuning) -> Self {
        Self::with_rng(sub_counts, tuning, StdRng::from_os_rng())
    }

    /// Deterministic shuffles for tests and replays.
    pub fn with_seed(
        sub_counts: Vec<usize>,
        tuning: &AmbientTuning,
        seed: u64,
    ) -> Self {
        Self::with_rng(sub_counts, tuning, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        sub_counts: Vec<usize>,
        tuning: &AmbientTuning,
        rng: StdRng,
    ) -> Self {
        let min_sub_items = tuning.min_sub_items();
        Self {
            rotation: AmbientRotation::new(sub_counts, min_sub_items),
            gates: AmbientGates::default(),
            phase: AmbientPhase::Idle,
            active: None,
            enabled: !tuning.disabled,
            min_sub_items,
            startup_delay_ms: tuning.startup_delay_ms(),
            interval_ms: tuning.interval_ms(),
            rng,
        }
    }

    /// Current phase; hosts diff it to manage timers.
    pub fn phase(&self) -> AmbientPhase {
        self.phase
    }

    /// Gate levels as last reported.
    pub fn gates(&self) -> AmbientGates {
        self.gates
    }

    /// The most recent highlight, if rotation has run.
    pub fn active(&self) -> Option<AmbientStep> {
        self.active
    }

    /// Underlying queue, for inspection.
    pub fn rotation(&self) -> &AmbientRotation {
        &self.rotation
    }

    /// Delay to schedule on entering `WarmingUp`.
    pub fn startup_delay_ms(&self) -> u64 {
        self.startup_delay_ms
    }

    /// Period to schedule on entering `Rotating`.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns the step taken when this message caused a rotation.
    pub fn update(&mut self, message: AmbientMessage) -> Option<AmbientStep> {
        match message {
            AmbientMessage::Mounted => {
                self.gates.mounted = true;
                self.reconcile();
                None
            }
            AmbientMessage::Unmounted => {
                self.gates.mounted = false;
                self.reconcile();
                None
            }
            AmbientMessage::VisibilityChanged { visible } => {
                self.gates.visible = visible;
                self.reconcile();
                None
            }
            AmbientMessage::OverlayChanged { open } => {
                self.gates.overlay_open = open;
                self.reconcile();
                None
            }
            AmbientMessage::StartupElapsed => {
                if self.phase != AmbientPhase::WarmingUp {
                    return None;
                }
                self.phase = AmbientPhase::Rotating;
                self.rotate()
            }
            AmbientMessage::IntervalElapsed => {
                if self.phase != AmbientPhase::Rotating {
                    return None;
                }
                self.rotate()
            }
            AmbientMessage::SetItems { sub_counts } => {
                self.rotation =
                    AmbientRotation::new(sub_counts, self.min_sub_items);
                self.active = None;
                self.reconcile();
                None
            }
        }
    }

    fn rotate(&mut self) -> Option<AmbientStep> {
        let step = self.rotation.next(&mut self.rng);
        if let Some(step) = step {
            log::trace!(
                "Ambient highlight item {} sub-item {}",
                step.item,
                step.sub_index
            );
            self.active = Some(step);
        }
        step
    }

    fn reconcile(&mut self) {
        let should_run =
            self.enabled && self.gates.is_open() && self.rotation.has_eligible();
        let next = match (should_run, self.phase) {
            (false, _) => AmbientPhase::Idle,
            (true, AmbientPhase::Idle) => AmbientPhase::WarmingUp,
            (true, running) => running,
        };
        if next != self.phase {
            log::debug!("Ambient rotation {:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
    }
}
