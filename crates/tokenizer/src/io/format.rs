//! On-disk model format.
//!
//! A trained model is one JSON document: the symbol-to-ID mapping plus the
//! ordered merge rule list. Rule order and ID assignment must survive a
//! round trip exactly; reordering either changes encoding behavior.

use serde::{Deserialize, Serialize};

/// File name of the model document inside a model directory.
pub const MODEL_FILE: &str = "vocabulary.json";

/// One merge rule in serialized form. Operands are written as symbol text
/// so the file is inspectable; `rank` must equal the rule's index in the
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// Left operand symbol text
    pub left: String,
    /// Right operand symbol text
    pub right: String,
    /// ID of the merged symbol
    pub new_id: u32,
    /// Learning step; must equal the list index
    pub rank: u32,
}

/// Persisted training configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedConfig {
    /// The vocabulary size that was requested at training time
    pub requested_vocab_size: usize,
}

/// Complete serialized model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedVocabulary {
    /// Library version that wrote the file
    pub version: String,
    /// Symbol text -> ID mapping
    pub vocab: std::collections::HashMap<String, u32>,
    /// Ordered merge rules
    pub merges: Vec<SerializedMerge>,
    /// Training configuration
    pub config: SerializedConfig,
}
