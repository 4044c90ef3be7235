//! akshara-training - BPE training infrastructure
//!
//! This crate learns BPE merge rules from text: it counts adjacent symbol
//! pair frequencies across whitespace-delimited segments and iteratively
//! merges the most frequent pair until a target vocabulary size is reached
//! or no pair occurs often enough.
//!
//! Training is single-threaded and synchronous; the corpus is fully
//! materialized before the loop starts and each loop iteration is a
//! discrete unit of work.
//!
//! # Example
//!
//! ```rust
//! use akshara_training::BpeTrainer;
//!
//! let trainer = BpeTrainer::with_vocab_size(50);
//! let (vocab, report) = trainer.train("ab ab ab ba")?;
//! assert!(report.vocab_size <= 50);
//! # Ok::<(), akshara_core::TokenizerError>(())
//! ```

pub use akshara_core::{Result, TokenizerError};

pub mod training;
pub use training::{BpeTrainer, PairCounter, TrainingConfig, TrainingReport};
