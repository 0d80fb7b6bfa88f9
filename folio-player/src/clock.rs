//! Time sources for the host runtime
//!
//! The carousel and ambient scheduler never read the clock themselves; the
//! host samples a [`Clock`] to decide which timers are due. Tests and the
//! replay tool drive a [`ManualClock`] so timing is deterministic.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Monotonic millisecond clock.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Milliseconds since this clock's origin.
    fn now_ms(&self) -> u64;
}

/// Real time, measured from construction.
///
/// Backed by tokio's clock so `start_paused` tests can drive it.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Virtual clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now: Arc::new(Mutex::new(now_ms)),
        }
    }

    /// Advance by `delta_ms` and return the new time.
    pub fn advance(&self, delta_ms: u64) -> u64 {
        let mut now = self.now.lock();
        *now = now.saturating_add(delta_ms);
        *now
    }

    /// Move to `now_ms`. Time never runs backwards; earlier values are ignored.
    pub fn set(&self, now_ms: u64) {
        let mut now = self.now.lock();
        if now_ms > *now {
            *now = now_ms;
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(250);
        assert_eq!(other.now_ms(), 250);
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::starting_at(1_000);
        clock.set(500);
        assert_eq!(clock.now_ms(), 1_000);
        clock.set(1_200);
        assert_eq!(clock.now_ms(), 1_200);
    }

    #[tokio::test(start_paused = true)]
    async fn system_clock_follows_tokio_time() {
        let clock = SystemClock::new();
        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(clock.now_ms(), 1_500);
    }
}
