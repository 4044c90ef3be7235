//! Core BPE data model.
//!
//! Fundamental data structures for byte-pair encoding: the vocabulary,
//! merge rules, segments and the merge-candidate priority queue.

pub mod merges;
pub mod priority;
pub mod segment;
pub mod vocab;

pub use merges::{MergeRule, MergeSequence, Pair};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use segment::Segment;
pub use vocab::{SpecialSymbols, Vocab, VocabR, Vocabulary, SPECIAL_SYMBOLS};
