//! Keyed timer queue
//!
//! At most one timer exists per key; scheduling a key again replaces it.
//! Nothing fires on its own: the host asks for due keys after reading its
//! clock, which keeps the whole runtime single-threaded and deterministic.

use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    deadline_ms: u64,
    period_ms: Option<u64>,
    /// Insertion order, to fire same-deadline timers first-in first-out
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `key` once, `delay_ms` after `now_ms`.
    pub fn schedule_once(&mut self, key: K, now_ms: u64, delay_ms: u64) {
        self.insert(key, now_ms.saturating_add(delay_ms), None);
    }

    /// Fire `key` every `period_ms`, starting `period_ms` after `now_ms`.
    pub fn schedule_repeating(&mut self, key: K, now_ms: u64, period_ms: u64) {
        let period = period_ms.max(1);
        self.insert(key, now_ms.saturating_add(period), Some(period));
    }

    fn insert(&mut self, key: K, deadline_ms: u64, period_ms: Option<u64>) {
        self.cancel(key);
        log::trace!("Timer {:?} scheduled for {}ms", key, deadline_ms);
        self.entries.push(Entry {
            key,
            deadline_ms,
            period_ms,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Returns true if a timer for `key` existed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        before != self.entries.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Cancelling {} pending timers", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn is_scheduled(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline_ms).min()
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Repeating timers are re-armed one period later, so a large clock jump
    /// yields one firing per elapsed period when called in a loop. Returns the
    /// key together with the deadline it fired for.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(K, u64)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline_ms <= now_ms)
            .min_by_key(|(_, e)| (e.deadline_ms, e.seq))
            .map(|(i, _)| i)?;

        let fired_at = self.entries[index].deadline_ms;
        let key = self.entries[index].key;
        match self.entries[index].period_ms {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.deadline_ms = fired_at.saturating_add(period);
                entry.seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.entries.swap_remove(index);
            }
        }
        Some((key, fired_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        q.schedule_once(Key::A, 0, 300);
        assert_eq!(q.pop_due(299), None);
        assert_eq!(q.pop_due(300), Some((Key::A, 300)));
        assert_eq!(q.pop_due(10_000), None);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn rescheduling_replaces_the_timer() {
        let mut q = TimerQueue::new();
        q.schedule_once(Key::A, 0, 100);
        q.schedule_once(Key::A, 50, 100);
        assert_eq!(q.pending(), 1);
        assert_eq!(q.pop_due(100), None);
        assert_eq!(q.pop_due(150), Some((Key::A, 150)));
    }

    #[test]
    fn repeating_fires_each_elapsed_period() {
        let mut q = TimerQueue::new();
        q.schedule_repeating(Key::B, 0, 1_000);
        let mut fired = Vec::new();
        while let Some((_, at)) = q.pop_due(3_500) {
            fired.push(at);
        }
        assert_eq!(fired, vec![1_000, 2_000, 3_000]);
        assert_eq!(q.next_deadline(), Some(4_000));
    }

    #[test]
    fn earliest_deadline_fires_first() {
        let mut q = TimerQueue::new();
        q.schedule_once(Key::B, 0, 200);
        q.schedule_once(Key::A, 0, 100);
        assert_eq!(q.pop_due(500).map(|(k, _)| k), Some(Key::A));
        assert_eq!(q.pop_due(500).map(|(k, _)| k), Some(Key::B));
    }

    #[test]
    fn cancel_reports_existence() {
        let mut q = TimerQueue::new();
        q.schedule_once(Key::A, 0, 10);
        assert!(q.cancel(Key::A));
        assert!(!q.cancel(Key::A));
        q.schedule_once(Key::A, 0, 10);
        q.schedule_repeating(Key::B, 0, 10);
        q.cancel_all();
        assert_eq!(q.pending(), 0);
    }
}
