//! Vocabulary storage and lookup.
//!
//! Symbols are interned: identical text content maps to exactly one ID.
//! IDs are dense, assigned in insertion order and never reused: the fixed
//! special tokens come first, then base symbols in first-appearance order,
//! then merged symbols in the order their rules were learned. This makes
//! ID order coincide with first-appearance order, which the trainer relies
//! on for its tie-break rule.
//!
//! Storage uses `AHashMap` for fast lookups and `CompactString` for
//! memory-efficient symbol text.

use crate::core::merges::{MergeRule, MergeSequence};
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// The fixed special symbol set, inserted first (IDs 0..4).
pub const SPECIAL_SYMBOLS: [&str; 4] = ["<pad>", "<unk>", "<s>", "</s>"];

/// Forward mapping: symbol text -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> symbol text
pub type VocabR = AHashMap<u32, CompactString>;

/// IDs of the fixed special symbols, cached for fast access.
#[derive(Debug, Clone, Copy)]
pub struct SpecialSymbols {
    /// Padding symbol ID
    pub pad: u32,
    /// Unknown symbol ID
    pub unk: u32,
    /// Beginning-of-sequence symbol ID
    pub bos: u32,
    /// End-of-sequence symbol ID
    pub eos: u32,
}

impl SpecialSymbols {
    /// Check if an ID is one of the special symbols.
    #[inline]
    pub fn is_special(&self, id: u32) -> bool {
        id == self.pad || id == self.unk || id == self.bos || id == self.eos
    }
}

/// The full trained model: interned symbols with dense IDs plus the ordered
/// merge rule sequence.
///
/// A vocabulary only ever grows during training; once training completes
/// (or a model is loaded) it is treated as immutable.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    vocab: Vocab,
    vocab_r: VocabR,
    special: SpecialSymbols,
    merges: MergeSequence,
}

impl Vocabulary {
    /// Create a new vocabulary holding only the special symbols.
    pub fn new() -> Self {
        Self::with_capacity(SPECIAL_SYMBOLS.len())
    }

    /// Create a new vocabulary with capacity, holding only the specials.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(SPECIAL_SYMBOLS.len());
        let mut vocab = Vocab::with_capacity(capacity);
        let mut vocab_r = VocabR::with_capacity(capacity);

        for (id, text) in SPECIAL_SYMBOLS.iter().enumerate() {
            vocab.insert(CompactString::new(text), id as u32);
            vocab_r.insert(id as u32, CompactString::new(text));
        }

        Self {
            vocab,
            vocab_r,
            special: SpecialSymbols {
                pad: 0,
                unk: 1,
                bos: 2,
                eos: 3,
            },
            merges: MergeSequence::new(),
        }
    }

    /// Intern a symbol, returning its ID.
    ///
    /// If the text is already present its existing ID is returned; otherwise
    /// the symbol is added with the next dense ID.
    pub fn intern(&mut self, text: &str) -> u32 {
        if let Some(&id) = self.vocab.get(text) {
            return id;
        }

        let id = self.vocab.len() as u32;
        let text = CompactString::new(text);
        self.vocab_r.insert(id, text.clone());
        self.vocab.insert(text, id);
        id
    }

    /// Get the ID for a symbol's text.
    #[inline]
    pub fn get_id(&self, text: &str) -> Option<u32> {
        self.vocab.get(text).copied()
    }

    /// Get the text for a symbol ID.
    #[inline]
    pub fn get_symbol(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Number of symbols (specials + base + merged).
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// A vocabulary is never empty: it always holds the specials.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// The cached special symbol IDs.
    #[inline]
    pub fn special(&self) -> &SpecialSymbols {
        &self.special
    }

    /// The ordered merge rule sequence.
    #[inline]
    pub fn merges(&self) -> &MergeSequence {
        &self.merges
    }

    /// Iterate over all symbols as `(text, id)` pairs (arbitrary order).
    pub fn symbols(&self) -> impl Iterator<Item = (&str, u32)> {
        self.vocab.iter().map(|(text, &id)| (text.as_str(), id))
    }

    /// Learn a merge: intern the concatenation of the operands' text and
    /// append the rule at the next rank.
    ///
    /// Both operands must already be present, per the vocabulary invariant.
    pub fn add_merge(&mut self, left: u32, right: u32) -> Result<MergeRule> {
        let left_text = self
            .get_symbol(left)
            .ok_or(TokenizerError::UnknownSymbolId(left))?;
        let right_text = self
            .get_symbol(right)
            .ok_or(TokenizerError::UnknownSymbolId(right))?;

        let merged = format!("{}{}", left_text, right_text);
        let new_id = self.intern(&merged);

        let rule = MergeRule {
            left,
            right,
            new_id,
        };
        self.merges.push(rule);
        Ok(rule)
    }

    /// Map a sequence of IDs back to their symbol texts.
    pub fn symbols_of(&self, ids: &[u32]) -> Result<Vec<&str>> {
        ids.iter()
            .map(|&id| {
                self.get_symbol(id)
                    .ok_or(TokenizerError::UnknownSymbolId(id))
            })
            .collect()
    }

    /// Rebuild a vocabulary from persisted parts, validating every model
    /// invariant.
    ///
    /// Fails with [`TokenizerError::CorruptVocabulary`] on duplicate or
    /// non-dense IDs, missing special symbols, rules referencing unknown
    /// IDs, a merged symbol whose text is not the concatenation of its
    /// operands, or rule/ID orders that contradict each other: every
    /// operand must carry an ID below its rule's `new_id`, and `new_id`
    /// must strictly increase across the rule list, since IDs are assigned
    /// in learning order.
    pub fn from_parts(
        symbols: impl IntoIterator<Item = (String, u32)>,
        rules: Vec<MergeRule>,
    ) -> Result<Self> {
        let mut vocab = Vocab::new();
        let mut vocab_r = VocabR::new();

        for (text, id) in symbols {
            let text = CompactString::new(&text);
            if vocab_r.insert(id, text.clone()).is_some() {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "duplicate symbol ID {}",
                    id
                )));
            }
            if vocab.insert(text.clone(), id).is_some() {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "duplicate symbol text {:?}",
                    text
                )));
            }
        }

        for id in 0..vocab.len() as u32 {
            if !vocab_r.contains_key(&id) {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "symbol IDs are not dense: missing ID {}",
                    id
                )));
            }
        }

        let mut special_ids = [0u32; 4];
        for (slot, text) in special_ids.iter_mut().zip(SPECIAL_SYMBOLS.iter()) {
            *slot = vocab.get(*text).copied().ok_or_else(|| {
                TokenizerError::CorruptVocabulary(format!("missing special symbol {}", text))
            })?;
        }

        let mut merges = MergeSequence::with_capacity(rules.len());
        let mut prev_new_id = None;
        for (rank, rule) in rules.into_iter().enumerate() {
            for id in [rule.left, rule.right, rule.new_id] {
                if !vocab_r.contains_key(&id) {
                    return Err(TokenizerError::CorruptVocabulary(format!(
                        "merge rule {} references unknown symbol ID {}",
                        rank, id
                    )));
                }
            }

            if rule.left >= rule.new_id || rule.right >= rule.new_id {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "merge rule {} operand does not precede its merged symbol {}",
                    rank, rule.new_id
                )));
            }
            if let Some(prev) = prev_new_id {
                if rule.new_id <= prev {
                    return Err(TokenizerError::CorruptVocabulary(format!(
                        "merge rule {} breaks the learning order: symbol {} follows {}",
                        rank, rule.new_id, prev
                    )));
                }
            }
            prev_new_id = Some(rule.new_id);

            let expected = format!("{}{}", &vocab_r[&rule.left], &vocab_r[&rule.right]);
            if vocab_r[&rule.new_id] != expected {
                return Err(TokenizerError::CorruptVocabulary(format!(
                    "merge rule {} produces {:?} but symbol {} is {:?}",
                    rank, expected, rule.new_id, vocab_r[&rule.new_id]
                )));
            }

            merges.push(rule);
        }

        Ok(Self {
            vocab,
            vocab_r,
            special: SpecialSymbols {
                pad: special_ids[0],
                unk: special_ids[1],
                bos: special_ids[2],
                eos: special_ids[3],
            },
            merges,
        })
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
