//! Pinyin romanization for Chinese text
//!
//! The segmenter, query builder and index emitter only see the
//! [`Romanizer`] trait. [`PinyinDictionary`] is the dictionary-backed
//! implementation shipped with the crate.

mod dictionary;
mod syllables;
mod tone;

#[cfg(test)]
mod tests;

pub use dictionary::PinyinDictionary;
pub use syllables::{is_initial, is_syllable, is_syllable_prefix, MAX_SYLLABLE_LEN};
pub use tone::strip_tones;

use std::collections::BTreeSet;

/// Phonetic spelling service consumed by the tokenizer.
///
/// Implementations are shared between threads behind an `Arc` and must not
/// mutate observable state after construction. Internal caches have to be
/// synchronized by the implementation.
pub trait Romanizer: Send + Sync {
    /// Number of bytes taken by the character starting with `lead`.
    ///
    /// Only consulted for bytes classified as `Other`. A return value of 0 is
    /// treated as 1, and widths running past the end of the text are clamped.
    fn run_length(&self, lead: u8) -> usize;

    /// Candidate pinyin spellings for a lowercase Latin query word.
    fn expand(&self, word: &str) -> BTreeSet<String>;

    /// Pinyin spellings of a Chinese word, in a stable order.
    fn transliterate(&self, word: &str) -> Vec<String>;
}

/// Length of the UTF-8 sequence introduced by `lead`; 1 for ASCII,
/// continuation and invalid bytes.
pub fn utf8_sequence_len(lead: u8) -> usize {
    if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}
