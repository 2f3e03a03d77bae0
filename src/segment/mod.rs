//! Text segmentation
//!
//! Splits a byte string into maximal runs of one lexical category. Runs of
//! `Other` bytes are cut per character, with the character width supplied by
//! the [`Romanizer`]. Token boundaries are decided here and nowhere else.
//!
//! With the `jieba` feature, [`JiebaSegmenter`] produces the same [`Token`]
//! stream from dictionary-based word breaking.

#[cfg(feature = "jieba")]
pub mod jieba;


#[cfg(feature = "jieba")]
pub use jieba::JiebaSegmenter;

use std::borrow::Cow;

use crate::core::types::{LexicalCategory, Token};
use crate::pinyin::Romanizer;

/// Classify one byte.
///
/// Checked in order: ASCII digit, ASCII whitespace or control, ASCII letter.
/// Everything else, including every byte of a multi-byte character, is
/// [`LexicalCategory::Other`].
pub fn classify(byte: u8) -> LexicalCategory {
    if byte.is_ascii_digit() {
        LexicalCategory::Digit
    } else if byte.is_ascii_whitespace() || byte.is_ascii_control() {
        LexicalCategory::Space
    } else if byte.is_ascii_alphabetic() {
        LexicalCategory::AsciiAlphabetic
    } else {
        LexicalCategory::Other
    }
}

/// Segment `text` into category runs
pub fn segment<'a>(text: &'a [u8], romanizer: &'a dyn Romanizer) -> Segments<'a> {
    Segments::new(text, romanizer)
}

/// Lazy iterator over the category runs of a byte string.
///
/// Yields tokens in increasing order that exactly tile `[0, text.len())`.
#[derive(Clone)]
pub struct Segments<'a> {
    text: &'a [u8],
    romanizer: &'a dyn Romanizer,
    index: usize,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a [u8], romanizer: &'a dyn Romanizer) -> Self {
        Self {
            text,
            romanizer,
            index: 0,
        }
    }

    /// Byte offset the next token starts at
    pub fn offset(&self) -> usize {
        self.index
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let len = self.text.len();
        let start = self.index;
        if start >= len {
            return None;
        }

        let category = classify(self.text[start]);
        let end = match category {
            LexicalCategory::Other => {
                let width = self.romanizer.run_length(self.text[start]).max(1);
                if width > len - start {
                    tracing::warn!(
                        "Character at byte {} claims {} bytes but only {} remain, clamping",
                        start,
                        width,
                        len - start
                    );
                    len
                } else {
                    start + width
                }
            }
            _ => {
                let mut end = start + 1;
                while end < len && classify(self.text[end]) == category {
                    end += 1;
                }
                end
            }
        };

        self.index = end;
        Some(Token::new(start, end, category))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len().saturating_sub(self.index);
        ((remaining > 0) as usize, Some(remaining))
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

impl std::fmt::Debug for Segments<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segments")
            .field("len", &self.text.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Text of `token` within `text`.
///
/// Spans that do not fall on UTF-8 boundaries, which only a misbehaving
/// romanizer can produce, are recovered lossily.
pub fn token_text<'t>(text: &'t str, token: &Token) -> Cow<'t, str> {
    match text.get(token.range()) {
        Some(s) => Cow::Borrowed(s),
        None => String::from_utf8_lossy(&text.as_bytes()[token.range()]),
    }
}

/// Token text in the form both output paths use: ASCII letters are lowercased
pub fn normalized_text<'t>(text: &'t str, token: &Token) -> Cow<'t, str> {
    let raw = token_text(text, token);
    if token.category == LexicalCategory::AsciiAlphabetic {
        Cow::Owned(raw.to_ascii_lowercase())
    } else {
        raw
    }
}
