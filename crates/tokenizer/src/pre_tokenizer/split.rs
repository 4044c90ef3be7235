//! Whitespace splitting into segments.
//!
//! Segments are the unit within which BPE merges happen; the whitespace
//! between them is discarded and never becomes a symbol, and no merge ever
//! crosses a segment boundary.

/// Whitespace splitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter;

impl Splitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split text on runs of whitespace, dropping the whitespace and any
    /// empty segments.
    pub fn split<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split_whitespace()
    }
}
