//! Configuration module for simple-tokenizer
//!
//! Handles engine configuration including:
//! - Pinyin tagging at index time
//! - Pinyin dictionary location
//! - Query expansion limits
//! - Dictionary segmenter settings
//!
//! Stored as JSON. Saves go through a temp file and a rename.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{Result, TokenizerError};

/// Longest query word handed to pinyin expansion
pub const DEFAULT_MAX_EXPANSION_LEN: usize = 20;

/// Number of memoised expansions kept by the pinyin dictionary
pub const DEFAULT_EXPANSION_CACHE_CAPACITY: usize = 4096;

/// Main tokenizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Emit co-located pinyin tokens for Chinese characters at index time
    #[serde(default = "default_true")]
    pub enable_pinyin: bool,

    /// Path to a `pinyin.txt` style dictionary (`U+4E2D: zhōng,zhòng  # 中`)
    #[serde(default)]
    pub pinyin_dictionary: Option<PathBuf>,

    /// Also emit the initial letter of every reading
    #[serde(default = "default_true")]
    pub include_initials: bool,

    /// Words longer than this are not split into syllables
    #[serde(default = "default_max_expansion_len")]
    pub max_expansion_len: usize,

    /// Capacity of the expansion memo cache, 0 disables it
    #[serde(default = "default_cache_capacity")]
    pub expansion_cache_capacity: usize,

    /// Dictionary segmenter settings
    #[serde(default)]
    pub jieba: JiebaConfig,
}

fn default_true() -> bool {
    true
}

fn default_max_expansion_len() -> usize {
    DEFAULT_MAX_EXPANSION_LEN
}

fn default_cache_capacity() -> usize {
    DEFAULT_EXPANSION_CACHE_CAPACITY
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            enable_pinyin: default_true(),
            pinyin_dictionary: None,
            include_initials: default_true(),
            max_expansion_len: default_max_expansion_len(),
            expansion_cache_capacity: default_cache_capacity(),
            jieba: JiebaConfig::default(),
        }
    }
}

/// Segmentation mode of the dictionary segmenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutMode {
    /// Dictionary cut, unknown words recognised with the HMM
    WithHmm,
    /// Dictionary cut only
    #[default]
    WithoutHmm,
    /// Every dictionary word found in the text, overlapping
    All,
    /// Dictionary cut plus the shorter words inside long ones
    ForSearch,
}

/// Dictionary segmenter configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JiebaConfig {
    /// Extra words in jieba's `word [freq] [tag]` line format
    #[serde(default)]
    pub user_dictionary: Option<PathBuf>,

    /// Default segmentation mode
    #[serde(default)]
    pub mode: CutMode,
}

impl TokenizerConfig {
    /// Build a configuration from FTS5 tokenizer arguments.
    ///
    /// `tokenize = 'simple 0'` disables pinyin tagging. The first argument is
    /// read like C `atoi`: leading digits count, anything else reads as zero.
    pub fn from_tokenizer_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut config = Self::default();
        if let Some(first) = args.first() {
            config.enable_pinyin = parse_leading_int(first.as_ref()) != 0;
        }
        config
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: TokenizerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file with an atomic write
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_expansion_len < 2 {
            return Err(TokenizerError::invalid_config(format!(
                "max_expansion_len must be at least 2, got {}",
                self.max_expansion_len
            )));
        }
        if self.max_expansion_len > 64 {
            return Err(TokenizerError::invalid_config(format!(
                "max_expansion_len must be at most 64, got {}",
                self.max_expansion_len
            )));
        }
        Ok(())
    }

    pub fn with_pinyin(mut self, enable: bool) -> Self {
        self.enable_pinyin = enable;
        self
    }

    pub fn with_pinyin_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.pinyin_dictionary = Some(path.into());
        self
    }

    pub fn with_initials(mut self, include: bool) -> Self {
        self.include_initials = include;
        self
    }

    pub fn with_max_expansion_len(mut self, len: usize) -> Self {
        self.max_expansion_len = len;
        self
    }

    pub fn with_cut_mode(mut self, mode: CutMode) -> Self {
        self.jieba.mode = mode;
        self
    }
}

fn parse_leading_int(arg: &str) -> i64 {
    let trimmed = arg.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative {
        -value
    } else {
        value
    }
}
