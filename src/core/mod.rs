//! Core module for simple-tokenizer
//!
//! This module contains:
//! - Configuration management
//! - Error types
//! - Token and flag types shared by every component

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::{CutMode, JiebaConfig, TokenizerConfig};
pub use error::{Result, TokenizerError};
pub use types::{LexicalCategory, Token, TokenKind, TokenizeFlags};
