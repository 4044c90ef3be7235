//! Saving trained models.

use super::format::{SerializedConfig, SerializedMerge, SerializedVocabulary, MODEL_FILE};
use akshara_core::{Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Vocabulary saver - writes a trained model into a directory.
pub struct VocabularySaver<'a> {
    vocab: &'a Vocabulary,
    requested_vocab_size: usize,
}

impl<'a> VocabularySaver<'a> {
    /// Create a new saver.
    pub fn new(vocab: &'a Vocabulary, requested_vocab_size: usize) -> Self {
        Self {
            vocab,
            requested_vocab_size,
        }
    }

    /// Write `vocabulary.json` into the given directory, creating it if
    /// needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| {
            TokenizerError::Save(format!(
                "failed to create directory {}: {}",
                path.display(),
                e
            ))
        })?;

        let file_path = path.join(MODEL_FILE);
        let file = File::create(&file_path).map_err(|e| {
            TokenizerError::Save(format!("failed to create {}: {}", file_path.display(), e))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("failed to serialize model: {}", e)))?;

        debug!(path = %file_path.display(), symbols = self.vocab.len(), "model saved");
        Ok(())
    }

    /// Serialize the vocabulary to its on-disk structure.
    pub(crate) fn serialize(&self) -> SerializedVocabulary {
        let vocab: std::collections::HashMap<String, u32> = self
            .vocab
            .symbols()
            .map(|(text, id)| (text.to_string(), id))
            .collect();

        // merges are written in learned order; symbol text lookups cannot
        // fail because the rules were validated on insertion
        let merges: Vec<SerializedMerge> = self
            .vocab
            .merges()
            .iter()
            .enumerate()
            .map(|(rank, rule)| SerializedMerge {
                left: self.vocab.get_symbol(rule.left).unwrap_or("").to_string(),
                right: self.vocab.get_symbol(rule.right).unwrap_or("").to_string(),
                new_id: rule.new_id,
                rank: rank as u32,
            })
            .collect();

        SerializedVocabulary {
            version: env!("CARGO_PKG_VERSION").to_string(),
            vocab,
            merges,
            config: SerializedConfig {
                requested_vocab_size: self.requested_vocab_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_preserves_rule_order() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern("a");
        let b = vocab.intern("b");
        let ab = vocab.add_merge(a, b).unwrap().new_id;
        vocab.add_merge(ab, b).unwrap();

        let serialized = VocabularySaver::new(&vocab, 50).serialize();

        assert_eq!(serialized.merges.len(), 2);
        assert_eq!(serialized.merges[0].left, "a");
        assert_eq!(serialized.merges[0].rank, 0);
        assert_eq!(serialized.merges[1].left, "ab");
        assert_eq!(serialized.merges[1].rank, 1);
        assert_eq!(serialized.config.requested_vocab_size, 50);
        assert_eq!(serialized.vocab.len(), vocab.len());
    }
}
