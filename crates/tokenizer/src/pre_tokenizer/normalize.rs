//! Unicode normalization applied before training and encoding.
//!
//! Text is canonically decomposed (NFD) so that base characters and
//! combining diacritics become separate code points; for scripts with
//! extensive diacritic use this maximizes merge opportunities. Newlines are
//! folded to single spaces so that segment boundaries are driven solely by
//! the whitespace splitter.

use unicode_normalization::UnicodeNormalization;

/// NFD normalizer with newline folding.
///
/// `normalize` is a pure function: deterministic, side-effect free and
/// idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Canonically decompose the text and fold newline characters to
    /// spaces.
    pub fn normalize(&self, text: &str) -> String {
        text.nfd()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposes_to_nfd() {
        let normalizer = Normalizer::new();
        // é as a single code point decomposes to e + combining acute
        assert_eq!(normalizer.normalize("\u{00e9}"), "e\u{0301}");
    }

    #[test]
    fn test_folds_newlines_to_spaces() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("a\nb\rc"), "a b c");
        assert_eq!(normalizer.normalize("a\r\nb"), "a  b");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = Normalizer::new();
        for text in ["\u{00e9}t\u{00e9}\nno\u{00eb}l", "plain ascii", "ಕನ್ನಡ\n"] {
            let once = normalizer.normalize(text);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_plain_text_unchanged() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("hello world"), "hello world");
    }
}
