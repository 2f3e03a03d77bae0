//! Dictionary-based segmentation using jieba-rs
//!
//! Produces the same [`Token`] stream as the category-run segmenter, so the
//! query builder and index emitter accept it unchanged. The category of a
//! word is the category of its first byte.

use parking_lot::RwLock;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use super::classify;
use crate::core::config::{CutMode, JiebaConfig};
use crate::core::error::{Result, TokenizerError};
use crate::core::types::Token;

/// Chinese word segmenter using jieba-rs
#[derive(Clone)]
pub struct JiebaSegmenter {
    jieba: Arc<RwLock<jieba_rs::Jieba>>,
    mode: CutMode,
}

impl JiebaSegmenter {
    /// Create a segmenter with the bundled dictionary
    pub fn new() -> Self {
        Self {
            jieba: Arc::new(RwLock::new(jieba_rs::Jieba::new())),
            mode: CutMode::default(),
        }
    }

    /// Create a segmenter from configuration, loading the user dictionary
    /// when one is configured
    pub fn from_config(config: &JiebaConfig) -> Result<Self> {
        let segmenter = Self::new().with_mode(config.mode);
        if let Some(path) = &config.user_dictionary {
            segmenter.load_user_dictionary(path)?;
        }
        Ok(segmenter)
    }

    pub fn with_mode(mut self, mode: CutMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> CutMode {
        self.mode
    }

    /// Merge a `word [freq] [tag]` dictionary file into the loaded dictionary
    pub fn load_user_dictionary(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TokenizerError::DictionaryNotFound(path.to_path_buf()));
        }
        let mut reader = BufReader::new(File::open(path)?);
        self.jieba
            .write()
            .load_dict(&mut reader)
            .map_err(|e| TokenizerError::Segmenter {
                reason: format!("failed to load {:?}: {}", path, e),
            })?;
        tracing::debug!("Loaded jieba user dictionary {:?}", path);
        Ok(())
    }

    /// Add a custom word to the dictionary, returning its frequency
    pub fn add_word(&self, word: &str, freq: Option<usize>, tag: Option<&str>) -> usize {
        self.jieba.write().add_word(word, freq, tag)
    }

    /// Segment with the configured mode
    pub fn segment(&self, text: &str) -> std::vec::IntoIter<Token> {
        self.segment_with_mode(text, self.mode)
    }

    /// Segment with an explicit mode.
    ///
    /// `All` and `ForSearch` yield overlapping tokens; `WithHmm` and
    /// `WithoutHmm` tile the input like the category-run segmenter.
    pub fn segment_with_mode(&self, text: &str, mode: CutMode) -> std::vec::IntoIter<Token> {
        let jieba = self.jieba.read();
        let words = match mode {
            CutMode::WithHmm => jieba.cut(text, true),
            CutMode::WithoutHmm => jieba.cut(text, false),
            CutMode::All => jieba.cut_all(text),
            CutMode::ForSearch => jieba.cut_for_search(text, true),
        };

        let base = text.as_ptr() as usize;
        let bytes = text.as_bytes();
        let tokens: Vec<Token> = words
            .into_iter()
            .filter(|word| !word.is_empty())
            .map(|word| {
                // every word is a subslice of `text`
                let start = word.as_ptr() as usize - base;
                let end = start + word.len();
                Token::new(start, end, classify(bytes[start]))
            })
            .collect();

        tracing::trace!("jieba {:?} produced {} tokens", mode, tokens.len());
        tokens.into_iter()
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiebaSegmenter")
            .field("mode", &self.mode)
            .finish()
    }
}
