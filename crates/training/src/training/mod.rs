//! Training infrastructure: pair counting and the merge learner.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::{BpeTrainer, TrainingConfig, TrainingReport};
