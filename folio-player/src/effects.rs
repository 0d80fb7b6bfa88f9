//! Effect runner
//!
//! Diffs state snapshots taken before and after each update and turns the
//! differences into timer commands. Keeping this apart from the state
//! machines means they stay pure and the scheduling policy lives in one place.

use folio_core::{AmbientPhase, CarouselState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Ends the page transition lockout
    TransitionSettle,
    /// First ambient rotation after the gates open
    AmbientStartup,
    /// Subsequent ambient rotations
    AmbientInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Once { key: TimerKey, delay_ms: u64 },
    Repeating { key: TimerKey, period_ms: u64 },
    Cancel(TimerKey),
}

/// What the effect runner looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSnapshot {
    pub carousel: CarouselState,
    pub ambient: AmbientPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectRunner {
    pub settle_ms: u64,
    pub ambient_startup_ms: u64,
    pub ambient_interval_ms: u64,
}

impl EffectRunner {
    pub fn reconcile(
        &self,
        old: &HostSnapshot,
        new: &HostSnapshot,
    ) -> Vec<TimerCommand> {
        let mut commands = Vec::new();

        match (old.carousel.is_transitioning, new.carousel.is_transitioning) {
            (false, true) => commands.push(TimerCommand::Once {
                key: TimerKey::TransitionSettle,
                delay_ms: self.settle_ms,
            }),
            (true, false) => {
                commands.push(TimerCommand::Cancel(TimerKey::TransitionSettle))
            }
            _ => {}
        }

        if old.ambient != new.ambient {
            match new.ambient {
                AmbientPhase::Idle => {
                    commands.push(TimerCommand::Cancel(TimerKey::AmbientStartup));
                    commands
                        .push(TimerCommand::Cancel(TimerKey::AmbientInterval));
                }
                AmbientPhase::WarmingUp => {
                    commands
                        .push(TimerCommand::Cancel(TimerKey::AmbientInterval));
                    commands.push(TimerCommand::Once {
                        key: TimerKey::AmbientStartup,
                        delay_ms: self.ambient_startup_ms,
                    });
                }
                AmbientPhase::Rotating => {
                    commands.push(TimerCommand::Cancel(TimerKey::AmbientStartup));
                    commands.push(TimerCommand::Repeating {
                        key: TimerKey::AmbientInterval,
                        period_ms: self.ambient_interval_ms,
                    });
                }
            }
        }

        commands
    }
}
