//! Persistent per-character session model.
//!
//! The fallback tokenizer assigns one opaque token name per distinct
//! character it has ever seen and keeps that mapping across runs: load at
//! start, grow while tokenizing, save at the end. The persistence boundary
//! is explicit (a path handed to `load`/`save`) rather than ambient global
//! state. There is no merge logic and no frequency analysis here, and the
//! file format is independent of the BPE model format.

use ahash::AHashMap;
use akshara_core::{Result, TokenizerError};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A growing character-to-token-name table.
#[derive(Debug, Clone, Default)]
pub struct SessionModel {
    entries: AHashMap<char, String>,
}

impl SessionModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a model from a JSON file; a missing file yields an empty
    /// model, any other failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(TokenizerError::Io {
                    path: path.to_path_buf(),
                    err: e,
                })
            }
        };

        let reader = BufReader::new(file);
        let entries: AHashMap<char, String> = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("failed to parse session model: {}", e)))?;

        Ok(Self { entries })
    }

    /// Save the model back to its JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| TokenizerError::Io {
            path: path.to_path_buf(),
            err: e,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.entries)
            .map_err(|e| TokenizerError::Save(format!("failed to write session model: {}", e)))?;

        Ok(())
    }

    /// Tokenize a text character by character, minting a fresh `tok_{n}`
    /// name for any character not seen before. The table only ever grows.
    pub fn tokenize(&mut self, text: &str) -> Vec<String> {
        text.chars()
            .map(|c| {
                if let Some(token) = self.entries.get(&c) {
                    return token.clone();
                }
                let token = format!("tok_{}", self.entries.len() + 1);
                self.entries.insert(c, token.clone());
                token
            })
            .collect()
    }

    /// The token name assigned to a character, if it has been seen.
    pub fn token_for(&self, c: char) -> Option<&str> {
        self.entries.get(&c).map(|s| s.as_str())
    }

    /// Number of distinct characters seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no characters have been seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_characters_mint_fresh_tokens() {
        let mut model = SessionModel::new();
        let tokens = model.tokenize("aba");

        assert_eq!(tokens, vec!["tok_1", "tok_2", "tok_1"]);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_table_grows_across_calls() {
        let mut model = SessionModel::new();
        model.tokenize("ab");
        let tokens = model.tokenize("bc");

        assert_eq!(tokens, vec!["tok_2", "tok_3"]);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut model = SessionModel::new();
        model.tokenize("ಕನ್ನಡ");
        model.save(&path).unwrap();

        let mut reloaded = SessionModel::load(&path).unwrap();
        assert_eq!(reloaded.len(), model.len());
        // known characters keep their names, new ones continue the count
        assert_eq!(reloaded.token_for('ಕ'), model.token_for('ಕ'));
        let tokens = reloaded.tokenize("ಕx");
        assert_eq!(tokens[0], model.token_for('ಕ').unwrap());
        assert_eq!(tokens[1], format!("tok_{}", model.len() + 1));
    }

    #[test]
    fn test_missing_file_yields_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = SessionModel::load(&dir.path().join("nope.json")).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            SessionModel::load(&path),
            Err(TokenizerError::Load(_))
        ));
    }
}
