//! Subword tokenization built on learned byte-pair merges.
//!
//! The [`Tokenizer`] ties the pipeline together: Unicode normalization,
//! whitespace splitting, merge-based segment encoding, and model
//! persistence. A trained model round-trips through a `vocabulary.json`
//! on disk. The [`session`] module carries a separate per-character
//! fallback tokenizer with its own persistent state.
//!
//! ```no_run
//! use akshara_tokenizer::Tokenizer;
//!
//! # fn main() -> akshara_core::Result<()> {
//! let mut tokenizer = Tokenizer::builder().vocab_size(300).build();
//! tokenizer.train("some training corpus")?;
//! let encoding = tokenizer.encode("some text")?;
//! println!("{} tokens, ratio {:.2}", encoding.len(), encoding.compression_ratio());
//! # Ok(())
//! # }
//! ```

pub mod io;
pub mod pre_tokenizer;
pub mod session;
pub mod tokenizer;
pub mod utils;

pub use akshara_core::{Result, TokenizerError};
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig};
