//! Compression diagnostics over a text/token-sequence pair.

/// Compression ratio: original length in code points divided by the number
/// of tokens produced.
///
/// A token count of zero (empty or fully unknown input) yields
/// `f64::INFINITY` as the defined "undefined" sentinel rather than a
/// division fault; callers must check `is_finite()` before doing further
/// arithmetic with the result.
pub fn compression_ratio(original_len: usize, token_count: usize) -> f64 {
    if token_count == 0 {
        return f64::INFINITY;
    }
    original_len as f64 / token_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(compression_ratio(10, 4), 2.5);
        assert_eq!(compression_ratio(7, 7), 1.0);
    }

    #[test]
    fn test_zero_tokens_yields_sentinel_not_fault() {
        let ratio = compression_ratio(10, 0);
        assert!(ratio.is_infinite());
        assert!(!ratio.is_finite());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compression_ratio(0, 0), f64::INFINITY);
    }
}
