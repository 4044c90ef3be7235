//! Segments: the unit within which merges happen.
//!
//! A segment is one whitespace-delimited run of the corpus, held as a
//! mutable sequence of symbol IDs during training and encoding. Merges
//! never cross segment boundaries. Both the trainer and the encoder rewrite
//! segments through [`Segment::merge_pair`], so the scan policy (left to
//! right, non-overlapping) lives in exactly one place.

use crate::core::merges::Pair;

/// A whitespace-delimited run of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    symbols: Vec<u32>,
}

impl Segment {
    /// Create a segment from a sequence of symbol IDs.
    pub fn new(symbols: Vec<u32>) -> Self {
        Self { symbols }
    }

    /// The current symbol IDs.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.symbols
    }

    /// Consume the segment, yielding its symbol IDs.
    pub fn into_symbols(self) -> Vec<u32> {
        self.symbols
    }

    /// Number of symbols currently in the segment.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the segment holds no symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all adjacent symbol pairs.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> + '_ {
        self.symbols.windows(2).map(|w| (w[0], w[1]))
    }

    /// Merge every adjacent occurrence of `pair` into `new_id`.
    ///
    /// Occurrences are found left to right and are non-overlapping: with
    /// rule `a+a -> aa`, the run `aaa` becomes `[aa, a]`, never `[a, aa]`.
    /// Returns the number of merge sites rewritten.
    pub fn merge_pair(&mut self, pair: Pair, new_id: u32) -> usize {
        self.merge_pair_inner(pair, new_id, 0, None)
    }

    /// Like [`merge_pair`](Self::merge_pair), additionally recording the
    /// pair-count deltas caused by each merge site, weighted by this
    /// segment's corpus multiplicity.
    ///
    /// Only pairs touching a merge site change: the old neighbor pairs on
    /// either side lose `weight` occurrences and the new neighbor pairs
    /// (involving `new_id`) gain them. The merged pair itself is consumed
    /// entirely and is not reported.
    pub fn merge_pair_tracked(
        &mut self,
        pair: Pair,
        new_id: u32,
        weight: i64,
        changes: &mut Vec<(Pair, i64)>,
    ) -> usize {
        self.merge_pair_inner(pair, new_id, weight, Some(changes))
    }

    fn merge_pair_inner(
        &mut self,
        pair: Pair,
        new_id: u32,
        weight: i64,
        mut changes: Option<&mut Vec<(Pair, i64)>>,
    ) -> usize {
        let mut sites = 0;
        let mut i = 0;

        while i + 1 < self.symbols.len() {
            if self.symbols[i] == pair.0 && self.symbols[i + 1] == pair.1 {
                if let Some(changes) = changes.as_deref_mut() {
                    if i > 0 {
                        changes.push(((self.symbols[i - 1], self.symbols[i]), -weight));
                        changes.push(((self.symbols[i - 1], new_id), weight));
                    }
                    if i + 2 < self.symbols.len() {
                        changes.push(((self.symbols[i + 1], self.symbols[i + 2]), -weight));
                        changes.push(((new_id, self.symbols[i + 2]), weight));
                    }
                }

                self.symbols[i] = new_id;
                self.symbols.remove(i + 1);
                sites += 1;
            }
            i += 1;
        }

        sites
    }
}

impl From<Vec<u32>> for Segment {
    fn from(symbols: Vec<u32>) -> Self {
        Self::new(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs() {
        let seg = Segment::new(vec![4, 5, 4, 5]);
        let pairs: Vec<_> = seg.pairs().collect();
        assert_eq!(pairs, vec![(4, 5), (5, 4), (4, 5)]);
    }

    #[test]
    fn test_merge_pair_rewrites_all_sites() {
        let mut seg = Segment::new(vec![4, 5, 4, 5, 6]);
        let sites = seg.merge_pair((4, 5), 7);

        assert_eq!(sites, 2);
        assert_eq!(seg.as_slice(), &[7, 7, 6]);
    }

    #[test]
    fn test_merge_pair_is_left_to_right_non_overlapping() {
        // aaa with a+a -> aa must become [aa, a], not [a, aa]
        let mut seg = Segment::new(vec![4, 4, 4]);
        let sites = seg.merge_pair((4, 4), 9);

        assert_eq!(sites, 1);
        assert_eq!(seg.as_slice(), &[9, 4]);
    }

    #[test]
    fn test_merge_pair_even_run_of_identical_symbols() {
        let mut seg = Segment::new(vec![4, 4, 4, 4]);
        let sites = seg.merge_pair((4, 4), 9);

        assert_eq!(sites, 2);
        assert_eq!(seg.as_slice(), &[9, 9]);
    }

    #[test]
    fn test_merge_pair_tracked_reports_neighbor_deltas() {
        // [6, 4, 5, 7]: merging (4,5)->8 removes (6,4) and (5,7),
        // creates (6,8) and (8,7).
        let mut seg = Segment::new(vec![6, 4, 5, 7]);
        let mut changes = Vec::new();
        let sites = seg.merge_pair_tracked((4, 5), 8, 3, &mut changes);

        assert_eq!(sites, 1);
        assert_eq!(seg.as_slice(), &[6, 8, 7]);
        assert!(changes.contains(&((6, 4), -3)));
        assert!(changes.contains(&((6, 8), 3)));
        assert!(changes.contains(&((5, 7), -3)));
        assert!(changes.contains(&((8, 7), 3)));
        assert_eq!(changes.len(), 4);
    }

    #[test]
    fn test_merge_pair_no_occurrence() {
        let mut seg = Segment::new(vec![4, 5]);
        assert_eq!(seg.merge_pair((5, 4), 9), 0);
        assert_eq!(seg.as_slice(), &[4, 5]);
    }
}
