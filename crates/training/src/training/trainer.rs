//! The merge learner: iterative BPE training.
//!
//! Starting from the corpus as segments of base symbols, the trainer
//! repeatedly selects the highest-count adjacent pair, merges it into a new
//! symbol everywhere it occurs and records the merge rule, until the target
//! vocabulary size is reached or no pair occurs often enough.
//!
//! Selection goes through a stale-entry-tolerant priority queue; pair
//! counts are updated incrementally (only pairs touching the merge sites
//! change), which is observably identical to a full recount after every
//! step.
//!
//! # Tie-break rule
//!
//! Among equally frequent pairs, the smaller `(left, right)` ID tuple wins.
//! IDs are assigned in first-appearance order (specials, then base symbols
//! as first seen, then merged symbols in creation order), so this prefers
//! the pair whose left symbol, then right symbol, appeared first in the
//! corpus. The rule is fixed; two runs over the same corpus produce
//! byte-identical vocabularies and merge sequences.

use super::counter::PairCounter;
use ahash::AHashMap;
use akshara_core::{
    compression_ratio, MergeCandidate, Pair, PairPriorityQueue, Result, TokenizerError, Vocabulary,
};
use tracing::{debug, info};

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target vocabulary size (specials + base symbols + merges)
    pub vocab_size: usize,
    /// Minimum frequency for a pair to be merged. The default of 2 stops
    /// training as soon as no pair occurs more than once.
    pub min_frequency: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 5_000,
            min_frequency: 2,
        }
    }
}

/// What a training run achieved, reported to the caller rather than
/// swallowed: a corpus too small or uniform to reach the target is a
/// normal outcome, not an error.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// The vocabulary size that was requested
    pub requested_vocab_size: usize,
    /// The vocabulary size actually achieved
    pub vocab_size: usize,
    /// Number of merge rules learned
    pub merges_learned: usize,
    /// Length of the (normalized) training corpus in code points
    pub corpus_chars: usize,
    /// Number of tokens the corpus encodes to with the final vocabulary
    pub corpus_tokens: u64,
    /// Compression ratio over the training corpus; `f64::INFINITY` when the
    /// corpus produced no tokens
    pub compression_ratio: f64,
}

impl TrainingReport {
    /// Whether the requested vocabulary size was reached.
    pub fn reached_target(&self) -> bool {
        self.vocab_size >= self.requested_vocab_size
    }
}

/// BPE trainer.
///
/// Trains a vocabulary from text by iteratively merging the most frequent
/// adjacent symbol pairs. The input is expected to be normalized already;
/// the high-level tokenizer API applies the normalizer before training.
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new trainer with default configuration except vocab size.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Train a vocabulary on the given (normalized) corpus.
    ///
    /// Returns the vocabulary together with a report of achieved vs.
    /// requested size and the compression ratio over the corpus.
    pub fn train(&self, corpus: &str) -> Result<(Vocabulary, TrainingReport)> {
        if self.config.vocab_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "target vocabulary size must be positive".to_string(),
            ));
        }

        let corpus_chars = corpus.chars().count();

        let mut vocab = Vocabulary::with_capacity(self.config.vocab_size);
        let mut counter = PairCounter::new();
        counter.add_text(corpus, &mut vocab);

        info!(
            segments = counter.segment_count(),
            base_symbols = vocab.len(),
            target = self.config.vocab_size,
            "starting BPE training"
        );

        let mut pair_counts = counter.count_pairs();
        let mut queue = PairPriorityQueue::with_capacity(pair_counts.len());
        for (&pair, &count) in &pair_counts {
            if count >= self.config.min_frequency {
                queue.push(MergeCandidate::new(pair, count));
            }
        }

        while vocab.len() < self.config.vocab_size {
            let candidate = match queue.pop() {
                Some(c) => c,
                None => break,
            };

            // The queue yields the current maximum; below the threshold
            // means no pair qualifies any more.
            if candidate.count < self.config.min_frequency {
                break;
            }

            let rule = vocab.add_merge(candidate.pair.0, candidate.pair.1)?;
            debug!(
                rank = vocab.merges().len() - 1,
                merged = vocab.get_symbol(rule.new_id),
                count = candidate.count,
                "learned merge"
            );

            let changes = counter.merge_pair_in_segments(candidate.pair, rule.new_id);
            pair_counts.remove(&candidate.pair);
            self.apply_changes(candidate.pair, changes, &mut pair_counts, &mut queue);
        }

        let corpus_tokens = counter.token_count();
        let report = TrainingReport {
            requested_vocab_size: self.config.vocab_size,
            vocab_size: vocab.len(),
            merges_learned: vocab.merges().len(),
            corpus_chars,
            corpus_tokens,
            compression_ratio: compression_ratio(corpus_chars, corpus_tokens as usize),
        };

        info!(
            vocab_size = report.vocab_size,
            requested = report.requested_vocab_size,
            merges = report.merges_learned,
            "training finished"
        );

        Ok((vocab, report))
    }

    /// Fold the incremental deltas from one merge step into the pair counts
    /// and the queue.
    ///
    /// Every changed pair is pushed to the queue, including drops to zero;
    /// the queue needs the current value to recognize its older entries as
    /// stale.
    fn apply_changes(
        &self,
        merged_pair: Pair,
        changes: Vec<(Pair, i64)>,
        pair_counts: &mut AHashMap<Pair, u64>,
        queue: &mut PairPriorityQueue,
    ) {
        let mut aggregated: AHashMap<Pair, i64> = AHashMap::new();
        for (pair, delta) in changes {
            *aggregated.entry(pair).or_insert(0) += delta;
        }

        for (pair, delta) in aggregated {
            // A run of identical symbols can report the merged pair as its
            // own neighbor; it has been consumed wholesale already.
            if pair == merged_pair {
                continue;
            }

            let current = pair_counts.get(&pair).copied().unwrap_or(0);
            let new_count = (current as i64 + delta).max(0) as u64;

            if new_count > 0 {
                pair_counts.insert(pair, new_count);
            } else {
                pair_counts.remove(&pair);
            }
            queue.update(pair, new_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario_first_merge() {
        // "ab ab ab ba", target = 4 specials + 3: (a,b) has count 3 and
        // must be merged first, reaching the target after one step.
        let trainer = BpeTrainer::with_vocab_size(7);
        let (vocab, report) = trainer.train("ab ab ab ba").unwrap();

        assert_eq!(vocab.len(), 7);
        assert_eq!(report.merges_learned, 1);
        assert!(report.reached_target());

        let rule = *vocab.merges().get(0).unwrap();
        assert_eq!(rule.left, vocab.get_id("a").unwrap());
        assert_eq!(rule.right, vocab.get_id("b").unwrap());
        assert_eq!(vocab.get_symbol(rule.new_id), Some("ab"));
    }

    #[test]
    fn test_early_stop_is_reported_not_swallowed() {
        // After (a,b) only (b,a) with count 1 remains: training must halt
        // early and say so.
        let trainer = BpeTrainer::with_vocab_size(20);
        let (vocab, report) = trainer.train("ab ab ab ba").unwrap();

        assert_eq!(vocab.len(), 7);
        assert_eq!(report.requested_vocab_size, 20);
        assert_eq!(report.vocab_size, 7);
        assert!(!report.reached_target());
    }

    #[test]
    fn test_target_below_base_alphabet_learns_no_merges() {
        let trainer = BpeTrainer::with_vocab_size(4);
        let (vocab, report) = trainer.train("ab ab").unwrap();

        // specials + a + b already exceed the target; no merges, no error
        assert_eq!(vocab.len(), 6);
        assert_eq!(report.merges_learned, 0);
    }

    #[test]
    fn test_empty_corpus_yields_specials_only() {
        let trainer = BpeTrainer::with_vocab_size(100);
        let (vocab, report) = trainer.train("").unwrap();

        assert_eq!(vocab.len(), 4);
        assert_eq!(report.merges_learned, 0);
        assert_eq!(report.corpus_tokens, 0);
        assert!(report.compression_ratio.is_infinite());
    }

    #[test]
    fn test_zero_vocab_size_is_rejected() {
        let trainer = BpeTrainer::with_vocab_size(0);
        assert!(matches!(
            trainer.train("ab"),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tie_break_prefers_first_appearance() {
        // (a,b) and (c,d) both occur twice; a appeared before c, so (a,b)
        // must be learned first.
        let trainer = BpeTrainer::with_vocab_size(8);
        let (vocab, _) = trainer.train("ab ab cd cd").unwrap();

        assert_eq!(vocab.merges().len(), 2);
        assert_eq!(
            vocab.get_symbol(vocab.merges().get(0).unwrap().new_id),
            Some("ab")
        );
        assert_eq!(
            vocab.get_symbol(vocab.merges().get(1).unwrap().new_id),
            Some("cd")
        );
    }

    #[test]
    fn test_training_is_deterministic() {
        let corpus = "the quick brown fox jumps over the lazy dog \
                      the quick brown fox jumps over the lazy dog \
                      pack my box with five dozen liquor jugs";
        let trainer = BpeTrainer::with_vocab_size(60);

        let (vocab_a, report_a) = trainer.train(corpus).unwrap();
        let (vocab_b, report_b) = trainer.train(corpus).unwrap();

        assert_eq!(vocab_a.len(), vocab_b.len());
        assert_eq!(report_a.merges_learned, report_b.merges_learned);
        assert_eq!(report_a.corpus_tokens, report_b.corpus_tokens);

        for id in 0..vocab_a.len() as u32 {
            assert_eq!(vocab_a.get_symbol(id), vocab_b.get_symbol(id));
        }
        assert_eq!(
            vocab_a.merges().as_slice(),
            vocab_b.merges().as_slice()
        );
    }

    #[test]
    fn test_vocabulary_grows_by_one_per_merge() {
        let trainer = BpeTrainer::with_vocab_size(40);
        let (vocab, report) = trainer.train("abab abab abab cdcd cdcd").unwrap();

        // strict growth: specials + base symbols + one per merge step
        let base = "abcd".chars().count();
        assert_eq!(vocab.len(), 4 + base + report.merges_learned);
    }

    #[test]
    fn test_merge_operands_exist_before_rule() {
        let trainer = BpeTrainer::with_vocab_size(50);
        let (vocab, _) = trainer.train("abc abc abc ababab").unwrap();

        for (rank, rule) in vocab.merges().iter().enumerate() {
            // every operand must have an ID below the rule's own symbol,
            // i.e. it existed before the rule was learned
            assert!(rule.left < rule.new_id, "rank {}", rank);
            assert!(rule.right < rule.new_id, "rank {}", rank);
            assert!(vocab.get_symbol(rule.left).is_some());
            assert!(vocab.get_symbol(rule.right).is_some());
        }
    }
}
