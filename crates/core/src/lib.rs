//! akshara-core - Core BPE data model
//!
//! This crate provides the fundamental data structures for byte-pair
//! encoding: interned symbol vocabularies with dense IDs, ordered merge
//! rules, segments (the unit within which merges happen) and compression
//! metrics.
//!
//! # Example
//!
//! ```rust
//! use akshara_core::Vocabulary;
//!
//! let mut vocab = Vocabulary::new();
//! let a = vocab.intern("a");
//! let b = vocab.intern("b");
//! let rule = vocab.add_merge(a, b).unwrap();
//! assert_eq!(vocab.get_symbol(rule.new_id), Some("ab"));
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use core::{
    MergeCandidate, MergeRule, MergeSequence, Pair, PairPriorityQueue, Segment, SpecialSymbols,
    Vocab, VocabR, Vocabulary, SPECIAL_SYMBOLS,
};

pub mod metrics;
pub use metrics::compression_ratio;
