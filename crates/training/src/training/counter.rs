//! Pair frequency counting for BPE training.
//!
//! The counter owns the corpus for the duration of one training run, held
//! as segments of symbol IDs. Identical segments are deduplicated and carry
//! a multiplicity, so "ab ab ab" is stored once with count 3; every pair
//! count and every incremental delta is weighted by that multiplicity,
//! making the results identical to a full recount over the raw corpus.

use ahash::AHashMap;
use akshara_core::{Pair, Segment, Vocabulary};

/// Counter for adjacent-pair frequencies across segments.
pub struct PairCounter {
    /// Deduplicated segments, in first-appearance order
    segments: Vec<Segment>,
    /// Corpus multiplicity of each segment
    seg_counts: Vec<u64>,
    /// Dedup index, only consulted while the corpus is being added
    index: AHashMap<Vec<u32>, usize>,
}

impl PairCounter {
    /// Create a new, empty pair counter.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            seg_counts: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Add a corpus: split on whitespace and intern one base symbol per
    /// code point, in first-appearance order.
    ///
    /// Whitespace itself never becomes a symbol; it only delimits segments.
    pub fn add_text(&mut self, text: &str, vocab: &mut Vocabulary) {
        for word in text.split_whitespace() {
            self.add_segment(word, vocab);
        }
    }

    /// Add a single whitespace-free segment.
    pub fn add_segment(&mut self, word: &str, vocab: &mut Vocabulary) {
        let mut buf = [0u8; 4];
        let symbols: Vec<u32> = word
            .chars()
            .map(|c| vocab.intern(c.encode_utf8(&mut buf)))
            .collect();

        if symbols.is_empty() {
            return;
        }

        match self.index.get(&symbols) {
            Some(&pos) => self.seg_counts[pos] += 1,
            None => {
                self.index.insert(symbols.clone(), self.segments.len());
                self.segments.push(Segment::new(symbols));
                self.seg_counts.push(1);
            }
        }
    }

    /// Count every adjacent pair within each segment, summed across all
    /// segments (weighted by segment multiplicity).
    pub fn count_pairs(&self) -> AHashMap<Pair, u64> {
        let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();

        for (segment, &count) in self.segments.iter().zip(self.seg_counts.iter()) {
            for pair in segment.pairs() {
                *pair_counts.entry(pair).or_insert(0) += count;
            }
        }

        pair_counts
    }

    /// Rewrite every segment, merging `pair` into `new_id` at all its
    /// occurrence sites (left to right, non-overlapping).
    ///
    /// Returns the multiplicity-weighted pair-count deltas for the pairs
    /// touching the merge sites. The merged pair itself is consumed
    /// entirely and is not reported.
    pub fn merge_pair_in_segments(&mut self, pair: Pair, new_id: u32) -> Vec<(Pair, i64)> {
        let mut changes: Vec<(Pair, i64)> = Vec::new();

        for (segment, &count) in self.segments.iter_mut().zip(self.seg_counts.iter()) {
            segment.merge_pair_tracked(pair, new_id, count as i64, &mut changes);
        }

        changes
    }

    /// Number of unique segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total count of all segment occurrences in the corpus.
    pub fn total_occurrences(&self) -> u64 {
        self.seg_counts.iter().sum()
    }

    /// Total number of tokens the corpus currently encodes to, i.e. the
    /// summed segment lengths weighted by multiplicity.
    pub fn token_count(&self) -> u64 {
        self.segments
            .iter()
            .zip(self.seg_counts.iter())
            .map(|(segment, &count)| segment.len() as u64 * count)
            .sum()
    }

    /// The deduplicated segments in first-appearance order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The multiplicity of each segment.
    pub fn seg_counts(&self) -> &[u64] {
        &self.seg_counts
    }
}

impl Default for PairCounter {
    fn default() -> Self {
        Self::new()
    }
}
