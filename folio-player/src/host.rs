//! Carousel host
//!
//! Owns one carousel instance, its ambient scheduler and every timer they
//! need. All input, timer expiry and teardown goes through here on a single
//! thread; nothing is shared with other instances.

use folio_core::{
    AmbientMessage, AmbientScheduler, Carousel, CarouselMessage,
    CarouselOutcome, RenderFrame,
};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::effects::{EffectRunner, HostSnapshot, TimerCommand, TimerKey};
use crate::sink::RenderSink;
use crate::timers::TimerQueue;

/// Anything a host platform can deliver to a carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "message", rename_all = "snake_case")]
pub enum HostEvent {
    Carousel(CarouselMessage),
    Ambient(AmbientMessage),
}

impl From<CarouselMessage> for HostEvent {
    fn from(message: CarouselMessage) -> Self {
        Self::Carousel(message)
    }
}

impl From<AmbientMessage> for HostEvent {
    fn from(message: AmbientMessage) -> Self {
        Self::Ambient(message)
    }
}

#[derive(Debug)]
pub struct CarouselHost<S, C> {
    carousel: Carousel,
    ambient: AmbientScheduler,
    timers: TimerQueue<TimerKey>,
    effects: EffectRunner,
    sink: S,
    clock: C,
    last_frame: Option<RenderFrame>,
    mounted: bool,
}

impl<S: RenderSink, C: Clock> CarouselHost<S, C> {
    pub fn new(
        carousel: Carousel,
        ambient: AmbientScheduler,
        sink: S,
        clock: C,
    ) -> Self {
        let effects = EffectRunner {
            settle_ms: carousel.settle_ms(),
            ambient_startup_ms: ambient.startup_delay_ms(),
            ambient_interval_ms: ambient.interval_ms(),
        };
        Self {
            carousel,
            ambient,
            timers: TimerQueue::new(),
            effects,
            sink,
            clock,
            last_frame: None,
            mounted: false,
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn ambient(&self) -> &AmbientScheduler {
        &self.ambient
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.timers.is_scheduled(key)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Attach to the UI: draw the first frame and arm the ambient gates.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        log::debug!(
            "Mounting carousel: {} items over {} pages",
            self.carousel.total_items(),
            self.carousel.total_pages()
        );
        self.apply(HostEvent::Ambient(AmbientMessage::Mounted));
        self.emit_frame();
    }

    /// Detach from the UI. Every timer is cancelled and the gesture tracker
    /// forgets any pointer in flight.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.apply(HostEvent::Ambient(AmbientMessage::Unmounted));
        self.carousel.update(CarouselMessage::PointerLost);
        if self.carousel.state().is_transitioning {
            self.carousel.update(CarouselMessage::TransitionSettled);
        }
        self.timers.cancel_all();
        self.mounted = false;
        log::debug!("Carousel unmounted");
    }

    /// Deliver one event, reconcile timers and push a frame if it changed.
    pub fn dispatch(&mut self, event: impl Into<HostEvent>) -> CarouselOutcome {
        let event = event.into();
        if !self.mounted {
            log::trace!("Dropping {:?} for unmounted carousel", event);
            return CarouselOutcome::default();
        }
        let outcome = self.apply(event);
        self.emit_frame();
        outcome
    }

    /// Fire every timer due at the clock's current time, in deadline order.
    /// Returns how many fired.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some((key, at)) = self.timers.pop_due(now) {
            fired += 1;
            log::trace!("Timer {:?} fired (due {}ms, now {}ms)", key, at, now);
            let event = match key {
                TimerKey::TransitionSettle => {
                    HostEvent::Carousel(CarouselMessage::TransitionSettled)
                }
                TimerKey::AmbientStartup => {
                    HostEvent::Ambient(AmbientMessage::StartupElapsed)
                }
                TimerKey::AmbientInterval => {
                    HostEvent::Ambient(AmbientMessage::IntervalElapsed)
                }
            };
            self.apply_at(event, at);
        }
        if fired > 0 {
            self.emit_frame();
        }
        fired
    }

    fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            carousel: self.carousel.state(),
            ambient: self.ambient.phase(),
        }
    }

    fn apply(&mut self, event: HostEvent) -> CarouselOutcome {
        let now = self.clock.now_ms();
        self.apply_at(event, now)
    }

    /// Timers fired late still chain from their own deadline, so a clock
    /// jump does not stretch the schedule.
    fn apply_at(&mut self, event: HostEvent, now_ms: u64) -> CarouselOutcome {
        let before = self.snapshot();

        let outcome = match event {
            HostEvent::Carousel(message) => self.carousel.update(message),
            HostEvent::Ambient(message) => {
                if let Some(step) = self.ambient.update(message) {
                    self.sink.highlight(&step);
                }
                CarouselOutcome::default()
            }
        };

        let after = self.snapshot();
        for command in self.effects.reconcile(&before, &after) {
            match command {
                TimerCommand::Once { key, delay_ms } => {
                    self.timers.schedule_once(key, now_ms, delay_ms)
                }
                TimerCommand::Repeating { key, period_ms } => {
                    self.timers.schedule_repeating(key, now_ms, period_ms)
                }
                TimerCommand::Cancel(key) => {
                    self.timers.cancel(key);
                }
            }
        }
        outcome
    }

    fn emit_frame(&mut self) {
        let frame = self.carousel.frame();
        if self.last_frame != Some(frame) {
            self.sink.render(&frame);
            self.last_frame = Some(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::{AmbientTuning, CarouselTuning};

    use super::*;
    use crate::clock::ManualClock;
    use crate::sink::RecordingSink;

    fn host() -> (CarouselHost<RecordingSink, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let carousel = Carousel::new(8, &CarouselTuning::default()).unwrap();
        let ambient =
            AmbientScheduler::with_seed(vec![2, 3], &AmbientTuning::default(), 5);
        let host =
            CarouselHost::new(carousel, ambient, RecordingSink::new(), clock.clone());
        (host, clock)
    }

    #[test]
    fn mount_renders_initial_frame_once() {
        let (mut host, _) = host();
        host.mount();
        host.mount();
        assert_eq!(host.sink().frames().len(), 1);
        assert_eq!(host.sink().last_frame().unwrap().current_page, 1);
    }

    #[test]
    fn events_before_mount_are_dropped() {
        let (mut host, _) = host();
        host.dispatch(CarouselMessage::Next);
        assert_eq!(host.carousel().current_page(), 1);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn settle_timer_releases_lockout() {
        let (mut host, clock) = host();
        host.mount();
        host.dispatch(CarouselMessage::Next);
        assert!(host.is_scheduled(TimerKey::TransitionSettle));
        assert_eq!(host.next_deadline(), Some(300));

        clock.advance(300);
        assert_eq!(host.advance(), 1);
        assert!(!host.carousel().state().is_transitioning);
        assert_eq!(host.pending_timers(), 0);
    }
}
