//! Error types for simple-tokenizer
//!
//! The hot tokenization paths are total and never produce these errors.
//! They surface while building an engine: loading dictionaries, reading
//! configuration or preparing the dictionary segmenter.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;

/// Main error type for simple-tokenizer
#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dictionary parse failed at line {line}: {reason}")]
    DictionaryParse { line: usize, reason: String },

    #[error("Dictionary file not found: {0}")]
    DictionaryNotFound(PathBuf),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Segmenter error: {reason}")]
    Segmenter { reason: String },
}

impl TokenizerError {
    /// Create a dictionary parse error for a 1-based line number
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        TokenizerError::DictionaryParse {
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        TokenizerError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if the engine can still be built without the failing resource.
    ///
    /// A broken or missing dictionary only disables pinyin features, while
    /// an invalid configuration or an I/O failure should abort startup.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TokenizerError::DictionaryParse { .. }
                | TokenizerError::DictionaryNotFound(_)
                | TokenizerError::Segmenter { .. }
        )
    }
}
