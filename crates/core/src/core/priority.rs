//! Priority queue for BPE merge candidates.
//!
//! The trainer needs the highest-count pair at every step, with a fixed
//! tie-break so training is reproducible. Counts change after every merge,
//! so the queue tolerates stale entries: every count change is pushed as a
//! fresh entry and `pop` skips entries whose count no longer matches the
//! current value.

use crate::core::merges::Pair;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbol IDs to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Higher count = higher priority. On equal counts the smaller pair wins:
// IDs are assigned in first-appearance order, so this is the documented
// tie-break of preferring the pair whose left symbol (then right symbol)
// appeared first in the corpus.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge selection.
///
/// Uses an 8-ary heap for better cache locality than a binary heap.
pub struct PairPriorityQueue {
    /// The heap storing (possibly stale) merge candidates
    heap: OctonaryHeap<MergeCandidate>,
    /// Current count per pair, used to detect stale heap entries
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.current_counts.insert(candidate.pair, candidate.count);
        self.heap.push(candidate);
    }

    /// Update the count for a pair, marking any existing entries stale.
    ///
    /// Every count change must be reported here (including drops to zero),
    /// otherwise a stale higher count could be popped as valid.
    pub fn update(&mut self, pair: Pair, new_count: u64) {
        self.push(MergeCandidate::new(pair, new_count));
    }

    /// Remove a pair entirely, so no entry for it will ever pop as valid.
    pub fn remove(&mut self, pair: Pair) {
        self.current_counts.remove(&pair);
    }

    /// Pop the highest-priority merge candidate.
    ///
    /// Skips stale entries; returns `None` once only stale entries remain.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if let Some(&current) = self.current_counts.get(&candidate.pair) {
                if current == candidate.count {
                    self.current_counts.remove(&candidate.pair);
                    return Some(candidate);
                }
                // stale entry, keep draining
            }
        }
        None
    }

    /// Get the current count for a pair.
    pub fn get_count(&self, pair: Pair) -> Option<u64> {
        self.current_counts.get(&pair).copied()
    }

    /// Number of (potentially stale) entries in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Clear all entries from the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.current_counts.clear();
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_by_count() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 10));
        queue.push(MergeCandidate::new((1, 2), 20));
        queue.push(MergeCandidate::new((2, 3), 15));

        assert_eq!(queue.pop().unwrap().pair, (1, 2));
        assert_eq!(queue.pop().unwrap().pair, (2, 3));
        assert_eq!(queue.pop().unwrap().pair, (0, 1));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_tie_break_prefers_smaller_pair() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((5, 9), 7));
        queue.push(MergeCandidate::new((4, 6), 7));
        queue.push(MergeCandidate::new((4, 5), 7));

        assert_eq!(queue.pop().unwrap().pair, (4, 5));
        assert_eq!(queue.pop().unwrap().pair, (4, 6));
        assert_eq!(queue.pop().unwrap().pair, (5, 9));
    }

    #[test]
    fn test_stale_entry_detection() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 10));
        queue.push(MergeCandidate::new((1, 2), 20));

        // Drop (1, 2) to 1; the count-20 entry must never pop as valid.
        queue.update((1, 2), 1);

        let first = queue.pop().unwrap();
        assert_eq!(first.pair, (0, 1));
        assert_eq!(first.count, 10);

        let second = queue.pop().unwrap();
        assert_eq!(second.pair, (1, 2));
        assert_eq!(second.count, 1);
    }

    #[test]
    fn test_remove_invalidates_all_entries() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 10));
        queue.remove((0, 1));

        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_get_count_tracks_updates() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 10));
        assert_eq!(queue.get_count((0, 1)), Some(10));

        queue.update((0, 1), 20);
        assert_eq!(queue.get_count((0, 1)), Some(20));
        assert_eq!(queue.get_count((1, 2)), None);
    }
}
