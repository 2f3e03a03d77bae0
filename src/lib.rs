//! simple-tokenizer - category-run tokenizer for full-text search
//!
//! This crate provides:
//! - Byte-level segmentation into digit, space, Latin and character runs
//! - FTS5 boolean query rendering with pinyin expansion of Latin words
//! - Index token emission with co-located pinyin spellings for Chinese text
//! - A dictionary-backed pinyin romanizer
//! - Dictionary-based word breaking via jieba (feature `jieba`)
//! - Tantivy tokenizer integration

pub mod core;
pub mod index;
pub mod logging;
pub mod pinyin;
pub mod query;
pub mod segment;
pub mod tokenizer;

// Re-export commonly used items
pub use crate::core::config::{CutMode, JiebaConfig, TokenizerConfig};
pub use crate::core::error::{Result, TokenizerError};
pub use crate::core::types::{LexicalCategory, Token, TokenKind, TokenizeFlags};
pub use index::tantivy::{register_tokenizers, PinyinTokenizer};
pub use index::{EmittedToken, IndexEmitter, IndexTokens};
pub use logging::{init_logging, LoggingConfig, LoggingGuard};
pub use pinyin::{PinyinDictionary, Romanizer};
pub use query::QueryBuilder;
pub use segment::{classify, segment, Segments};
pub use tokenizer::SimpleTokenizer;

#[cfg(feature = "jieba")]
pub use segment::JiebaSegmenter;
