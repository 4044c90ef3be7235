//! Error types for the akshara tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A persisted vocabulary failed validation at load time
    #[error("Corrupt vocabulary: {0}")]
    CorruptVocabulary(String),

    /// Error loading a model file
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a model file
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown symbol ID
    #[error("Unknown symbol ID: {0}")]
    UnknownSymbolId(u32),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
