//! Index-time token emission
//!
//! Turns a token stream into the sequence a full-text index stores: one
//! primary token per non-space token, followed by co-located pinyin spellings
//! for `Other` tokens when document tagging is on. Co-located tokens share the
//! offsets of the primary token they follow.
//!
//! Two entry points deliver the same sequence:
//! - [`IndexEmitter::emit`] pushes every token into a callback
//! - [`IndexEmitter::tokens`] returns a pull-based [`IndexTokens`] iterator

pub mod tantivy;


use crate::core::types::{LexicalCategory, Token, TokenKind, TokenizeFlags};
use crate::pinyin::Romanizer;
use crate::segment::{normalized_text, segment, Segments};

/// One token as written to the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedToken {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl EmittedToken {
    pub fn is_colocated(&self) -> bool {
        self.kind == TokenKind::Colocated
    }
}

/// Emits primary and co-located tokens for indexing
#[derive(Clone, Copy)]
pub struct IndexEmitter<'a> {
    romanizer: &'a dyn Romanizer,
    enable_pinyin: bool,
}

impl<'a> IndexEmitter<'a> {
    pub fn new(romanizer: &'a dyn Romanizer, enable_pinyin: bool) -> Self {
        Self {
            romanizer,
            enable_pinyin,
        }
    }

    /// Pull-based emission over the category-run segmentation of `text`
    pub fn tokens(&self, text: &'a str, flags: TokenizeFlags) -> IndexTokens<'a, Segments<'a>> {
        self.tokens_from(text, segment(text.as_bytes(), self.romanizer), flags)
    }

    /// Pull-based emission over tokens of `text` produced by any segmenter
    pub fn tokens_from<I>(&self, text: &'a str, tokens: I, flags: TokenizeFlags) -> IndexTokens<'a, I::IntoIter>
    where
        I: IntoIterator<Item = Token>,
    {
        IndexTokens {
            text,
            tokens: tokens.into_iter(),
            romanizer: self.romanizer,
            colocate: self.enable_pinyin && flags.contains(TokenizeFlags::DOCUMENT),
            pending: Vec::new().into_iter(),
            pending_span: (0, 0),
        }
    }

    /// Push every token of `text` into `callback`.
    ///
    /// A callback error does not stop the scan; the last error seen is
    /// returned once all tokens have been delivered.
    pub fn emit<F, E>(&self, text: &str, flags: TokenizeFlags, callback: F) -> Result<(), E>
    where
        F: FnMut(TokenKind, &str, usize, usize) -> Result<(), E>,
    {
        self.emit_tokens(text, segment(text.as_bytes(), self.romanizer), flags, callback)
    }

    /// Like [`emit`](Self::emit) over tokens produced by any segmenter
    pub fn emit_tokens<I, F, E>(
        &self,
        text: &str,
        tokens: I,
        flags: TokenizeFlags,
        mut callback: F,
    ) -> Result<(), E>
    where
        I: IntoIterator<Item = Token>,
        F: FnMut(TokenKind, &str, usize, usize) -> Result<(), E>,
    {
        let mut last_error = None;
        let mut emitted = 0usize;
        let emitter: IndexEmitter<'_> = *self;
        for token in emitter.tokens_from(text, tokens, flags) {
            emitted += 1;
            if let Err(e) = callback(token.kind, &token.text, token.start, token.end) {
                last_error = Some(e);
            }
        }
        tracing::trace!(emitted, failed = last_error.is_some(), "emitted index tokens");
        match last_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for IndexEmitter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexEmitter")
            .field("enable_pinyin", &self.enable_pinyin)
            .finish()
    }
}

/// Iterator over the tokens written to the index for one input
pub struct IndexTokens<'a, I> {
    text: &'a str,
    tokens: I,
    romanizer: &'a dyn Romanizer,
    colocate: bool,
    pending: std::vec::IntoIter<String>,
    pending_span: (usize, usize),
}

impl<'a, I> Iterator for IndexTokens<'a, I>
where
    I: Iterator<Item = Token>,
{
    type Item = EmittedToken;

    fn next(&mut self) -> Option<EmittedToken> {
        if let Some(spelling) = self.pending.next() {
            let (start, end) = self.pending_span;
            return Some(EmittedToken {
                kind: TokenKind::Colocated,
                text: spelling,
                start,
                end,
            });
        }

        let token = self.tokens.find(|t| t.category != LexicalCategory::Space)?;
        let text = normalized_text(self.text, &token).into_owned();
        if self.colocate && token.category == LexicalCategory::Other {
            self.pending = self.romanizer.transliterate(&text).into_iter();
            self.pending_span = (token.start, token.end);
        }
        Some(EmittedToken {
            kind: TokenKind::Primary,
            text,
            start: token.start,
            end: token.end,
        })
    }
}

impl<I> std::fmt::Debug for IndexTokens<'_, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexTokens")
            .field("colocate", &self.colocate)
            .field("pending", &self.pending.len())
            .finish()
    }
}
