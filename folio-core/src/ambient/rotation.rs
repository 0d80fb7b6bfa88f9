use std::collections::VecDeque;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

/// One ambient highlight: which item to touch and which of its sub-items to
/// bring forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbientStep {
    /// Index into the item list
    pub item: usize,
    /// Sub-item to show, `progress % sub_count`
    pub sub_index: usize,
}

/// Shuffled round-robin over eligible items.
///
/// No item is picked twice before every other item in the current cycle has
/// been picked once. An item is exhausted after all of its sub-items beyond
/// the first have been revealed; once every item is exhausted the counters
/// reset and a fresh cycle begins.
#[derive(Debug, Clone, Default)]
pub struct AmbientRotation {
    sub_counts: Vec<usize>,
    eligible: Vec<usize>,
    queue: VecDeque<usize>,
    progress: Vec<usize>,
    last: Option<usize>,
}

impl AmbientRotation {
    /// Items with more than `min_sub_items` sub-items are eligible.
    pub fn new(sub_counts: Vec<usize>, min_sub_items: usize) -> Self {
        Self::with_predicate(sub_counts, |_, count| count > min_sub_items)
    }

    /// Eligibility decided by `eligible(index, sub_count)`.
    pub fn with_predicate<F>(sub_counts: Vec<usize>, eligible: F) -> Self
    where
        F: Fn(usize, usize) -> bool,
    {
        let eligible_items = sub_counts
            .iter()
            .enumerate()
            .filter(|&(index, &count)| count > 0 && eligible(index, count))
            .map(|(index, _)| index)
            .collect();

        Self {
            progress: vec![0; sub_counts.len()],
            sub_counts,
            eligible: eligible_items,
            queue: VecDeque::new(),
            last: None,
        }
    }

    /// Eligible item indices, ascending.
    pub fn eligible(&self) -> &[usize] {
        &self.eligible
    }

    /// False means the scheduler should stay idle.
    pub fn has_eligible(&self) -> bool {
        !self.eligible.is_empty()
    }

    /// Indices still waiting in the current pass, front first.
    pub fn queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// How many times `item` has been shown this cycle.
    pub fn progress(&self, item: usize) -> usize {
        self.progress.get(item).copied().unwrap_or(0)
    }

    fn is_exhausted(&self, item: usize) -> bool {
        let count = self.sub_counts.get(item).copied().unwrap_or(0);
        self.progress(item) >= count.saturating_sub(1)
    }

    /// Pick the next highlight, rebuilding the queue between passes.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<AmbientStep> {
        if self.eligible.is_empty() {
            return None;
        }
        if self.queue.is_empty() {
            self.rebuild(rng);
        }

        let item = self.queue.pop_front()?;
        let count = self.sub_counts[item].max(1);
        self.progress[item] += 1;
        self.last = Some(item);

        Some(AmbientStep {
            item,
            sub_index: self.progress[item] % count,
        })
    }

    fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut pending: Vec<usize> = self
            .eligible
            .iter()
            .copied()
            .filter(|&item| !self.is_exhausted(item))
            .collect();

        if pending.is_empty() {
            log::debug!(
                "Ambient rotation cycle complete over {} items, resetting",
                self.eligible.len()
            );
            self.progress.iter_mut().for_each(|p| *p = 0);
            pending = self.eligible.clone();
        }

        pending.shuffle(rng);

        // Never lead a new pass with the item that was just shown.
        if pending.first().copied() == self.last {
            if pending.len() > 1 {
                let end = pending.len() - 1;
                pending.swap(0, end);
            } else if let Some(last) = self.last {
                // Only the last item is left unfinished; show another one in
                // between so it is not picked twice in a row.
                let others: Vec<usize> = self
                    .eligible
                    .iter()
                    .copied()
                    .filter(|&item| item != last)
                    .collect();
                if let Some(&filler) = others.choose(rng) {
                    pending.insert(0, filler);
                }
            }
        }

        self.queue = pending.into();
    }
}
