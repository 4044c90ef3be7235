//! Terminal color rendering for session tokens.
//!
//! Each distinct token name gets a random color from the 256-color cube
//! (codes 16..=231, skipping the base 16 and the grayscale ramp) and keeps
//! it for the lifetime of the palette. Randomness comes in through a
//! caller-supplied `Rng` so tests can seed it.

use ahash::AHashMap;
use rand::Rng;

/// Picks and remembers a terminal color per token name.
#[derive(Debug, Clone, Default)]
pub struct TokenPalette {
    colors: AHashMap<String, u8>,
}

impl TokenPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The color assigned to a token, drawing a fresh one on first sight.
    pub fn color_for<R: Rng>(&mut self, token: &str, rng: &mut R) -> u8 {
        if let Some(&color) = self.colors.get(token) {
            return color;
        }
        let color = rng.gen_range(16..=231);
        self.colors.insert(token.to_string(), color);
        color
    }

    /// Wrap a piece of text in the ANSI escape for a token's color.
    pub fn paint<R: Rng>(&mut self, token: &str, text: &str, rng: &mut R) -> String {
        let color = self.color_for(token, rng);
        format!("\x1b[38;5;{}m{}\x1b[0m", color, text)
    }

    /// Render a token stream as space-separated colored token names.
    pub fn colorize_tokens<R: Rng>(&mut self, tokens: &[String], rng: &mut R) -> String {
        tokens
            .iter()
            .map(|t| self.paint(t, t, rng))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Repaint the original text, coloring each character by its token.
    /// `tokens` must be the per-character token stream for `text`.
    pub fn colorize_text<R: Rng>(&mut self, text: &str, tokens: &[String], rng: &mut R) -> String {
        text.chars()
            .zip(tokens.iter())
            .map(|(c, token)| self.paint(token, &c.to_string(), rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_color_is_stable_per_token() {
        let mut palette = TokenPalette::new();
        let mut rng = StdRng::seed_from_u64(7);

        let first = palette.color_for("tok_1", &mut rng);
        let again = palette.color_for("tok_1", &mut rng);
        assert_eq!(first, again);
    }

    #[test]
    fn test_color_stays_in_cube_range() {
        let mut palette = TokenPalette::new();
        let mut rng = StdRng::seed_from_u64(42);

        for i in 0..500 {
            let color = palette.color_for(&format!("tok_{}", i), &mut rng);
            assert!((16..=231).contains(&color));
        }
    }

    #[test]
    fn test_paint_wraps_in_ansi_escape() {
        let mut palette = TokenPalette::new();
        let mut rng = StdRng::seed_from_u64(1);

        let painted = palette.paint("tok_1", "a", &mut rng);
        let color = palette.color_for("tok_1", &mut rng);
        assert_eq!(painted, format!("\x1b[38;5;{}m{}\x1b[0m", color, "a"));
    }

    #[test]
    fn test_colorize_text_reuses_token_colors() {
        let mut palette = TokenPalette::new();
        let mut rng = StdRng::seed_from_u64(3);

        let tokens = vec!["tok_1".to_string(), "tok_2".to_string(), "tok_1".to_string()];
        let rendered = palette.colorize_text("aba", &tokens, &mut rng);

        let c1 = palette.color_for("tok_1", &mut rng);
        let c2 = palette.color_for("tok_2", &mut rng);
        let expected = format!(
            "\x1b[38;5;{c1}ma\x1b[0m\x1b[38;5;{c2}mb\x1b[0m\x1b[38;5;{c1}ma\x1b[0m"
        );
        assert_eq!(rendered, expected);
    }
}
