//! Tokenizer engine
//!
//! [`SimpleTokenizer`] owns the romanizer and the per-engine settings and
//! exposes both output paths over one segmenter:
//! - [`SimpleTokenizer::tokenize_query`] renders a boolean query string
//! - [`SimpleTokenizer::tokenize`] pushes index tokens into a callback
//!
//! With the `jieba` feature the same two paths are available over
//! dictionary-based word breaking.


use std::sync::Arc;

#[cfg(feature = "jieba")]
use std::sync::OnceLock;

use crate::core::config::TokenizerConfig;
use crate::core::error::Result;
use crate::core::types::{Token, TokenKind, TokenizeFlags};
use crate::index::{IndexEmitter, IndexTokens};
use crate::pinyin::{PinyinDictionary, Romanizer};
use crate::query::QueryBuilder;
use crate::segment::{segment, Segments};

#[cfg(feature = "jieba")]
use crate::core::config::CutMode;
#[cfg(feature = "jieba")]
use crate::segment::JiebaSegmenter;

/// Category-run tokenizer with pinyin query expansion and index tagging
pub struct SimpleTokenizer {
    romanizer: Arc<dyn Romanizer>,
    enable_pinyin: bool,
    #[cfg(feature = "jieba")]
    jieba: OnceLock<JiebaSegmenter>,
    #[cfg(feature = "jieba")]
    cut_mode: CutMode,
}

impl SimpleTokenizer {
    /// Create an engine with an empty pinyin dictionary and tagging enabled
    pub fn new() -> Self {
        Self::with_romanizer(Arc::new(PinyinDictionary::new()), &TokenizerConfig::default())
    }

    /// Create an engine from configuration.
    ///
    /// Loads the pinyin dictionary and, when one is configured, the jieba
    /// user dictionary. Without a user dictionary jieba is loaded on first use.
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        config.validate()?;
        let dictionary = PinyinDictionary::from_config(config)?;
        tracing::debug!(
            enable_pinyin = config.enable_pinyin,
            characters = dictionary.len(),
            "Creating tokenizer"
        );
        let engine = Self::with_romanizer(Arc::new(dictionary), config);
        engine.preload_segmenter(config)?;
        Ok(engine)
    }

    /// Create an engine from FTS5-style tokenizer arguments (`simple 0`)
    pub fn from_tokenizer_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        Self::from_config(&TokenizerConfig::from_tokenizer_args(args))
    }

    /// Create an engine around an existing romanizer.
    ///
    /// Only `enable_pinyin` and the jieba mode are read from `config`; the
    /// romanizer is used as given.
    pub fn with_romanizer(romanizer: Arc<dyn Romanizer>, config: &TokenizerConfig) -> Self {
        Self {
            romanizer,
            enable_pinyin: config.enable_pinyin,
            #[cfg(feature = "jieba")]
            jieba: OnceLock::new(),
            #[cfg(feature = "jieba")]
            cut_mode: config.jieba.mode,
        }
    }

    pub fn romanizer(&self) -> Arc<dyn Romanizer> {
        Arc::clone(&self.romanizer)
    }

    pub fn pinyin_enabled(&self) -> bool {
        self.enable_pinyin
    }

    /// Category-run tokens of `text`
    pub fn segment<'a>(&'a self, text: &'a str) -> Segments<'a> {
        segment(text.as_bytes(), &*self.romanizer)
    }

    /// Render `text` as a boolean query
    pub fn tokenize_query(&self, text: &str, flags: TokenizeFlags) -> String {
        self.query_builder().build(text, flags)
    }

    /// Push the index tokens of `text` into `callback`, returning the last
    /// callback error
    pub fn tokenize<F, E>(&self, text: &str, flags: TokenizeFlags, callback: F) -> std::result::Result<(), E>
    where
        F: FnMut(TokenKind, &str, usize, usize) -> std::result::Result<(), E>,
    {
        self.emitter().emit(text, flags, callback)
    }

    /// Pull-based variant of [`tokenize`](Self::tokenize)
    pub fn index_tokens<'a>(&'a self, text: &'a str, flags: TokenizeFlags) -> IndexTokens<'a, Segments<'a>> {
        self.emitter().tokens(text, flags)
    }

    /// Render tokens from any segmenter as a boolean query
    pub fn render_query<I>(&self, text: &str, tokens: I, flags: TokenizeFlags) -> String
    where
        I: IntoIterator<Item = Token>,
    {
        self.query_builder().render(text, tokens, flags)
    }

    fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(&*self.romanizer)
    }

    fn emitter(&self) -> IndexEmitter<'_> {
        IndexEmitter::new(&*self.romanizer, self.enable_pinyin)
    }

    #[cfg(not(feature = "jieba"))]
    fn preload_segmenter(&self, _config: &TokenizerConfig) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "jieba")]
impl SimpleTokenizer {
    /// Load jieba eagerly when a user dictionary is configured so that a bad
    /// dictionary fails construction
    fn preload_segmenter(&self, config: &TokenizerConfig) -> Result<()> {
        if config.jieba.user_dictionary.is_some() {
            let segmenter = JiebaSegmenter::from_config(&config.jieba)?;
            // engine was just built, the cell is empty
            let _ = self.jieba.set(segmenter);
        }
        Ok(())
    }

    /// The dictionary segmenter, loading the bundled dictionary on first use
    pub fn jieba(&self) -> &JiebaSegmenter {
        self.jieba.get_or_init(|| {
            tracing::debug!("Loading jieba dictionary");
            JiebaSegmenter::new().with_mode(self.cut_mode)
        })
    }

    /// Render `text` as a boolean query using jieba word breaking
    pub fn tokenize_jieba_query(&self, text: &str, flags: TokenizeFlags) -> String {
        self.render_query(text, self.jieba().segment(text), flags)
    }

    /// Like [`tokenize_jieba_query`](Self::tokenize_jieba_query) with an
    /// explicit cut mode
    pub fn tokenize_jieba_query_with_mode(&self, text: &str, flags: TokenizeFlags, mode: CutMode) -> String {
        self.render_query(text, self.jieba().segment_with_mode(text, mode), flags)
    }

    /// Push index tokens produced by jieba word breaking into `callback`
    pub fn tokenize_jieba<F, E>(&self, text: &str, flags: TokenizeFlags, callback: F) -> std::result::Result<(), E>
    where
        F: FnMut(TokenKind, &str, usize, usize) -> std::result::Result<(), E>,
    {
        self.emitter()
            .emit_tokens(text, self.jieba().segment(text), flags, callback)
    }
}

impl Default for SimpleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimpleTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleTokenizer")
            .field("enable_pinyin", &self.enable_pinyin)
            .finish()
    }
}
