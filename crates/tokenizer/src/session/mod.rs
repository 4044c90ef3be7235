//! Per-character session tokenizer with persistent state and terminal
//! color output. A lightweight fallback that needs no training corpus.

mod display;
mod store;

pub use display::TokenPalette;
pub use store::SessionModel;
