//! Tantivy integration
//!
//! Exposes the index emitter as a tantivy tokenizer. Primary tokens advance
//! the position; co-located pinyin tokens keep the position of the primary
//! token they follow, so phrase queries over either form line up.

use std::sync::Arc;

use ::tantivy::tokenizer::{
    LowerCaser, RemoveLongFilter, TextAnalyzer, Token, TokenStream, Tokenizer as TantivyTokenizer,
    TokenizerManager,
};

use super::{IndexEmitter, IndexTokens};
use crate::core::types::{TokenKind, TokenizeFlags};
use crate::pinyin::Romanizer;
use crate::segment::Segments;
use crate::tokenizer::SimpleTokenizer;

/// Analyzer name for category-run tokens only
pub const SIMPLE: &str = "simple";

/// Analyzer name for category-run tokens plus co-located pinyin
pub const SIMPLE_PINYIN: &str = "simple_pinyin";

/// Tokens longer than this are dropped by the registered analyzers
const MAX_TOKEN_LEN: usize = 40;

/// Tantivy tokenizer over the category-run segmenter
#[derive(Clone)]
pub struct PinyinTokenizer {
    romanizer: Arc<dyn Romanizer>,
    enable_pinyin: bool,
}

impl PinyinTokenizer {
    pub fn new(romanizer: Arc<dyn Romanizer>) -> Self {
        Self {
            romanizer,
            enable_pinyin: false,
        }
    }

    /// Emit co-located pinyin tokens for non-Latin characters
    pub fn with_pinyin(mut self, enable: bool) -> Self {
        self.enable_pinyin = enable;
        self
    }
}

impl std::fmt::Debug for PinyinTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinyinTokenizer")
            .field("enable_pinyin", &self.enable_pinyin)
            .finish()
    }
}

/// Token stream for [`PinyinTokenizer`]
pub struct PinyinTokenStream<'a> {
    tokens: IndexTokens<'a, Segments<'a>>,
    token: Token,
}

impl TokenStream for PinyinTokenStream<'_> {
    fn advance(&mut self) -> bool {
        let Some(emitted) = self.tokens.next() else {
            return false;
        };
        if emitted.kind == TokenKind::Primary {
            // position starts at usize::MAX
            self.token.position = self.token.position.wrapping_add(1);
        }
        self.token.offset_from = emitted.start;
        self.token.offset_to = emitted.end;
        self.token.text = emitted.text;
        self.token.position_length = 1;
        true
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

impl TantivyTokenizer for PinyinTokenizer {
    type TokenStream<'a> = PinyinTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let emitter = IndexEmitter::new(&*self.romanizer, self.enable_pinyin);
        PinyinTokenStream {
            tokens: emitter.tokens(text, TokenizeFlags::DOCUMENT),
            token: Token::default(),
        }
    }
}

fn analyzer(tokenizer: PinyinTokenizer) -> TextAnalyzer {
    TextAnalyzer::builder(tokenizer)
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .build()
}

/// Register the `simple` and `simple_pinyin` analyzers.
///
/// `simple_pinyin` only adds pinyin tokens when the engine has pinyin
/// enabled.
pub fn register_tokenizers(tokenizer_manager: &TokenizerManager, engine: &SimpleTokenizer) {
    let base = PinyinTokenizer::new(engine.romanizer());

    tokenizer_manager.register(SIMPLE, analyzer(base.clone()));
    tokenizer_manager.register(
        SIMPLE_PINYIN,
        analyzer(base.with_pinyin(engine.pinyin_enabled())),
    );

    tracing::debug!(
        pinyin = engine.pinyin_enabled(),
        "Registered {} and {} tokenizers",
        SIMPLE,
        SIMPLE_PINYIN
    );
}
