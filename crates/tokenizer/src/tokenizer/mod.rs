//! Main tokenizer implementation.
//!
//! The `Tokenizer` ties the pipeline together: normalization, whitespace
//! splitting, training (delegated to `akshara-training`) and encoding.
//!
//! Encoding is a pure function of (text, vocabulary): the normalized text
//! is split into segments of base symbols (one per code point, unknown
//! code points degrade to `<unk>`), then every merge rule is applied in
//! learned order with the same left-to-right non-overlapping scan the
//! trainer used. Whitespace is not reconstructed in the output.

use crate::pre_tokenizer::{Normalizer, Splitter};
use crate::utils::SegmentCache;
use akshara_core::{compression_ratio, Result, Segment, Vocabulary};
use akshara_training::{BpeTrainer, TrainingConfig, TrainingReport};
use std::path::Path;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Target vocabulary size for training
    pub vocab_size: usize,
    /// Minimum pair frequency for merges during training
    pub min_frequency: u64,
    /// Capacity of the per-call segment encoding cache
    pub cache_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 5_000,
            min_frequency: 2,
            cache_capacity: 1_000,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the minimum pair frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Set the segment cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build the (untrained) tokenizer.
    pub fn build(self) -> Tokenizer {
        Tokenizer::new(self.config)
    }
}

/// BPE tokenizer: vocabulary plus the normalization/splitting pipeline.
pub struct Tokenizer {
    vocab: Vocabulary,
    config: TokenizerConfig,
    normalizer: Normalizer,
    splitter: Splitter,
}

impl Tokenizer {
    /// Create a new untrained tokenizer; its vocabulary holds only the
    /// special symbols until `train` runs or a model is loaded.
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            vocab: Vocabulary::new(),
            config,
            normalizer: Normalizer::new(),
            splitter: Splitter::new(),
        }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Wrap an already-trained (or loaded) vocabulary.
    pub fn from_vocabulary(vocab: Vocabulary, config: TokenizerConfig) -> Self {
        Self {
            vocab,
            config,
            normalizer: Normalizer::new(),
            splitter: Splitter::new(),
        }
    }

    /// Train on the given corpus, replacing the current vocabulary.
    ///
    /// Returns the training report (achieved vs. requested vocabulary size
    /// and the corpus compression ratio); reaching a smaller size than
    /// requested is a normal outcome, reported rather than raised.
    pub fn train(&mut self, corpus: &str) -> Result<TrainingReport> {
        let normalized = self.normalizer.normalize(corpus);

        let trainer = BpeTrainer::new(TrainingConfig {
            vocab_size: self.config.vocab_size,
            min_frequency: self.config.min_frequency,
        });
        let (vocab, report) = trainer.train(&normalized)?;

        self.vocab = vocab;
        Ok(report)
    }

    /// Encode text into a token sequence.
    ///
    /// Identical inputs always yield identical outputs for the same
    /// vocabulary; unknown code points degrade to `<unk>` and never abort
    /// the rest of the input.
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        let normalized = self.normalizer.normalize(text);
        let char_count = normalized.chars().count();

        let mut cache = SegmentCache::with_capacity(self.config.cache_capacity);
        let mut ids = Vec::new();
        for word in self.splitter.split(&normalized) {
            let encoded = cache.get_or_encode(word, |w| self.encode_segment(w))?;
            ids.extend(encoded);
        }

        Ok(Encoding { ids, char_count })
    }

    /// Encode one whitespace-free segment: base symbols, then every merge
    /// rule in learned order.
    fn encode_segment(&self, word: &str) -> Result<Vec<u32>> {
        let unk = self.vocab.special().unk;
        let mut buf = [0u8; 4];
        let base: Vec<u32> = word
            .chars()
            .map(|c| {
                self.vocab
                    .get_id(c.encode_utf8(&mut buf))
                    .unwrap_or(unk)
            })
            .collect();

        let mut segment = Segment::new(base);
        for rule in self.vocab.merges() {
            if segment.len() < 2 {
                break;
            }
            segment.merge_pair(rule.pair(), rule.new_id);
        }

        Ok(segment.into_symbols())
    }

    /// Map an encoding's IDs back to symbol texts.
    pub fn tokens<'a>(&'a self, encoding: &Encoding) -> Result<Vec<&'a str>> {
        self.vocab.symbols_of(&encoding.ids)
    }

    /// The current vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// A reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Save the model into a directory as `vocabulary.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        use crate::io::save::VocabularySaver;

        VocabularySaver::new(&self.vocab, self.config.vocab_size).save(path)
    }

    /// Load a model saved with [`save`](Self::save), validating every
    /// vocabulary invariant before any encoding is attempted.
    pub fn load(path: &Path) -> Result<Self> {
        use crate::io::load::VocabularyLoader;

        let (vocab, requested_vocab_size) = VocabularyLoader::load(path)?;
        let config = TokenizerConfig {
            vocab_size: requested_vocab_size,
            ..Default::default()
        };
        Ok(Self::from_vocabulary(vocab, config))
    }
}

/// Result of encoding a text: the token sequence, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs, concatenated across segments in original order
    pub ids: Vec<u32>,
    /// Length of the normalized input in code points
    pub char_count: usize,
}

impl Encoding {
    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no tokens were produced.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Compression ratio for this input: code points over tokens.
    ///
    /// `f64::INFINITY` when the encoding is empty; check `is_finite()`
    /// before further arithmetic.
    pub fn compression_ratio(&self) -> f64 {
        compression_ratio(self.char_count, self.ids.len())
    }
}
