//! Query string construction
//!
//! Renders a token stream as an FTS5 boolean query:
//!
//! ```text
//! ( zhong+guo* OR zhongguo* ) AND "2024"* AND "人"
//! ```
//!
//! Latin words can be expanded into pinyin syllable splits so they match the
//! co-located pinyin tokens written at index time. Everything else becomes a
//! literal term. Operators, quoting and `*` placement are a wire format for
//! the downstream query parser and must not change.

#[cfg(test)]
mod tests;

use crate::core::types::{LexicalCategory, Token, TokenizeFlags};
use crate::pinyin::Romanizer;
use crate::segment::{normalized_text, segment};

/// Builds boolean query strings from token streams
pub struct QueryBuilder<'a> {
    romanizer: &'a dyn Romanizer,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(romanizer: &'a dyn Romanizer) -> Self {
        Self { romanizer }
    }

    /// Segment `text` and render it as a query.
    ///
    /// Any non-empty `flags` turns on pinyin expansion of Latin words.
    pub fn build(&self, text: &str, flags: TokenizeFlags) -> String {
        self.render(text, segment(text.as_bytes(), self.romanizer), flags)
    }

    /// Render tokens of `text` produced by any segmenter
    pub fn render<I>(&self, text: &str, tokens: I, flags: TokenizeFlags) -> String
    where
        I: IntoIterator<Item = Token>,
    {
        let mut query = QueryString::default();
        for token in tokens {
            if token.category == LexicalCategory::Space {
                continue;
            }
            let term = normalized_text(text, &token);
            if !flags.is_empty()
                && token.category == LexicalCategory::AsciiAlphabetic
                && term.len() > 1
            {
                query.push_expansion(&self.romanizer.expand(&term));
            } else {
                query.push_literal(&term, token.category);
            }
        }
        tracing::trace!(terms = query.terms, "built query of {} bytes", query.buf.len());
        query.buf
    }
}

impl std::fmt::Debug for QueryBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder").finish()
    }
}

/// Output buffer that tracks how many terms were written
#[derive(Debug, Default)]
struct QueryString {
    buf: String,
    terms: usize,
}

impl QueryString {
    /// `( a* OR b* )`, joined to earlier terms with `AND`
    fn push_expansion<'s>(&mut self, candidates: impl IntoIterator<Item = &'s String>) {
        self.buf.push_str(if self.terms == 0 { "( " } else { " AND ( " });
        for (i, candidate) in candidates.into_iter().enumerate() {
            if i > 0 {
                self.buf.push_str(" OR ");
            }
            self.buf.push_str(candidate);
            self.buf.push('*');
        }
        self.buf.push_str(" )");
        self.terms += 1;
    }

    /// Letters bare, everything else quoted; `*` on all but `Other`
    fn push_literal(&mut self, term: &str, category: LexicalCategory) {
        if self.terms > 0 {
            self.buf.push_str(" AND ");
        }
        let term = if term == "\"" { "\"\"" } else { term };
        if category == LexicalCategory::AsciiAlphabetic {
            self.buf.push_str(term);
        } else {
            self.buf.push('"');
            self.buf.push_str(term);
            self.buf.push('"');
        }
        if category != LexicalCategory::Other {
            self.buf.push('*');
        }
        self.terms += 1;
    }
}
