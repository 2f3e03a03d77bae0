//! Token types shared by the segmenter, query builder and index emitter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Lexical category of a byte, and of every token that starts on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexicalCategory {
    /// ASCII `0-9`
    Digit,
    /// ASCII whitespace and control characters
    Space,
    /// ASCII `a-z` and `A-Z`
    AsciiAlphabetic,
    /// Punctuation and every byte of a multi-byte character
    Other,
}

impl fmt::Display for LexicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalCategory::Digit => write!(f, "digit"),
            LexicalCategory::Space => write!(f, "space"),
            LexicalCategory::AsciiAlphabetic => write!(f, "ascii_alphabetic"),
            LexicalCategory::Other => write!(f, "other"),
        }
    }
}

/// A half-open byte span `[start, end)` of the input and its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub category: LexicalCategory,
}

impl Token {
    pub fn new(start: usize, end: usize, category: LexicalCategory) -> Self {
        Self {
            start,
            end,
            category,
        }
    }

    /// Byte range covered by this token
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.start, self.end, self.category)
    }
}

/// Per-call flag bits, laid out like the SQLite FTS5 tokenizer ABI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TokenizeFlags(u32);

impl TokenizeFlags {
    /// Text is a query string
    pub const QUERY: TokenizeFlags = TokenizeFlags(0x0001);
    /// Query token is followed by a prefix marker
    pub const PREFIX: TokenizeFlags = TokenizeFlags(0x0002);
    /// Text is a document being inserted into the index
    pub const DOCUMENT: TokenizeFlags = TokenizeFlags(0x0004);
    /// Text is being tokenized for an auxiliary function
    pub const AUX: TokenizeFlags = TokenizeFlags(0x0008);

    pub const fn empty() -> Self {
        TokenizeFlags(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        TokenizeFlags(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: TokenizeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for TokenizeFlags {
    type Output = TokenizeFlags;

    fn bitor(self, rhs: TokenizeFlags) -> TokenizeFlags {
        TokenizeFlags(self.0 | rhs.0)
    }
}

impl From<u32> for TokenizeFlags {
    fn from(bits: u32) -> Self {
        TokenizeFlags(bits)
    }
}

/// Whether an emitted token advances the position or shares the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// The surface form found in the text
    Primary,
    /// An alternate form recorded at the same offsets as the preceding primary
    Colocated,
}

impl TokenKind {
    /// `FTS5_TOKEN_COLOCATED`
    pub const COLOCATED_BIT: u32 = 0x0001;

    /// Flag bits handed to an FTS5-style callback
    pub fn bits(&self) -> u32 {
        match self {
            TokenKind::Primary => 0,
            TokenKind::Colocated => Self::COLOCATED_BIT,
        }
    }
}
