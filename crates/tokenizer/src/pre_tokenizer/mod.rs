//! Pre-tokenization pipeline: normalization and whitespace splitting,
//! applied before both training and encoding.

pub mod normalize;
pub mod split;

pub use normalize::Normalizer;
pub use split::Splitter;
