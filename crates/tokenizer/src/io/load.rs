//! Loading persisted models.
//!
//! Every vocabulary invariant is validated before a loaded model can be
//! used for encoding: dangling merge rules, duplicate or non-dense IDs and
//! out-of-order rule indices all fail fast with a distinct
//! corrupt-vocabulary error rather than silently proceeding with partial
//! state.

use super::format::{SerializedVocabulary, MODEL_FILE};
use akshara_core::{MergeRule, Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Vocabulary loader - reads and validates a saved model.
pub struct VocabularyLoader;

impl VocabularyLoader {
    /// Load `vocabulary.json` from the given directory.
    ///
    /// Returns the validated vocabulary and the vocabulary size that was
    /// requested when the model was trained.
    pub fn load(path: &Path) -> Result<(Vocabulary, usize)> {
        let file_path = path.join(MODEL_FILE);
        let file = File::open(&file_path).map_err(|e| {
            TokenizerError::Load(format!("failed to open {}: {}", file_path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedVocabulary = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("failed to parse model: {}", e)))?;

        let model = Self::deserialize(serialized)?;
        debug!(path = %file_path.display(), symbols = model.0.len(), "model loaded");
        Ok(model)
    }

    /// Validate and rebuild a vocabulary from its serialized form.
    pub(crate) fn deserialize(data: SerializedVocabulary) -> Result<(Vocabulary, usize)> {
        let mut rules = Vec::with_capacity(data.merges.len());

        for (index, merge) in data.merges.iter().enumerate() {
            if merge.rank as usize != index {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "merge rule at index {} carries rank {}",
                    index, merge.rank
                )));
            }

            let left = data.vocab.get(&merge.left).copied().ok_or_else(|| {
                TokenizerError::CorruptVocabulary(format!(
                    "merge rule {} references unknown symbol {:?}",
                    index, merge.left
                ))
            })?;
            let right = data.vocab.get(&merge.right).copied().ok_or_else(|| {
                TokenizerError::CorruptVocabulary(format!(
                    "merge rule {} references unknown symbol {:?}",
                    index, merge.right
                ))
            })?;

            rules.push(MergeRule {
                left,
                right,
                new_id: merge.new_id,
            });
        }

        // remaining invariants (dense unique IDs, specials present, merged
        // text matching its operands) are checked by the vocabulary itself
        let vocab = Vocabulary::from_parts(data.vocab, rules)?;
        Ok((vocab, data.config.requested_vocab_size))
    }
}
