//! Tests for the query module

use proptest::prelude::*;
use std::collections::BTreeSet;

use super::QueryBuilder;
use crate::core::types::{LexicalCategory, Token, TokenizeFlags};
use crate::pinyin::{utf8_sequence_len, PinyinDictionary, Romanizer};

/// Expands every word to itself plus the word with an `e` appended
struct Suffixing;

impl Romanizer for Suffixing {
    fn run_length(&self, lead: u8) -> usize {
        utf8_sequence_len(lead)
    }

    fn expand(&self, word: &str) -> BTreeSet<String> {
        BTreeSet::from([word.to_string(), format!("{word}e")])
    }

    fn transliterate(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

const PLAIN: TokenizeFlags = TokenizeFlags::empty();
const EXPAND: TokenizeFlags = TokenizeFlags::QUERY;

fn build(text: &str, flags: TokenizeFlags) -> String {
    QueryBuilder::new(&Suffixing).build(text, flags)
}

#[test]
fn test_empty_input() {
    assert_eq!(build("", PLAIN), "");
    assert_eq!(build("", EXPAND), "");
    assert_eq!(build("   \t\n", PLAIN), "");
}

#[test]
fn test_single_word() {
    assert_eq!(build("hello", PLAIN), "hello*");
}

#[test]
fn test_word_is_lowercased() {
    assert_eq!(build("HeLLo", PLAIN), "hello*");
}

#[test]
fn test_two_words() {
    assert_eq!(build("hello world", PLAIN), "hello* AND world*");
}

#[test]
fn test_leading_space_does_not_add_separator() {
    assert_eq!(build("  hello", PLAIN), "hello*");
    assert_eq!(build("  ni", EXPAND), "( ni* OR nie* )");
}

#[test]
fn test_digits_are_quoted_with_prefix_marker() {
    assert_eq!(build("42", PLAIN), "\"42\"*");
    assert_eq!(build("abc123", PLAIN), "abc* AND \"123\"*");
}

#[test]
fn test_other_is_quoted_without_prefix_marker() {
    assert_eq!(build("中国", PLAIN), "\"中\" AND \"国\"");
    assert_eq!(build("a,b", PLAIN), "a* AND \",\" AND b*");
}

#[test]
fn test_bare_double_quote_is_doubled() {
    assert_eq!(build("\"", PLAIN), "\"\"\"\"");
    assert_eq!(build("a\"b", PLAIN), "a* AND \"\"\"\" AND b*");
}

#[test]
fn test_expansion() {
    assert_eq!(build("ni", EXPAND), "( ni* OR nie* )");
    assert_eq!(build("ni ni", EXPAND), "( ni* OR nie* ) AND ( ni* OR nie* )");
}

#[test]
fn test_expansion_uses_lowercased_word() {
    assert_eq!(build("NI", EXPAND), "( ni* OR nie* )");
}

#[test]
fn test_single_letter_is_not_expanded() {
    assert_eq!(build("a", EXPAND), "a*");
    assert_eq!(build("ni a", EXPAND), "( ni* OR nie* ) AND a*");
}

#[test]
fn test_expansion_only_for_letters() {
    assert_eq!(
        build("ni 42 中", EXPAND),
        "( ni* OR nie* ) AND \"42\"* AND \"中\""
    );
    assert_eq!(build("42 ni", EXPAND), "\"42\"* AND ( ni* OR nie* )");
}

#[test]
fn test_any_nonzero_flag_expands() {
    for bits in [1u32, 2, 4, 8, 0x10] {
        assert_eq!(
            build("ni", TokenizeFlags::from_bits(bits)),
            "( ni* OR nie* )",
            "flags {bits:#x}"
        );
    }
}

#[test]
fn test_render_custom_tokens() {
    let builder = QueryBuilder::new(&Suffixing);
    let text = "ni hao";
    let tokens = vec![
        Token::new(0, 2, LexicalCategory::AsciiAlphabetic),
        Token::new(2, 3, LexicalCategory::Space),
        Token::new(3, 6, LexicalCategory::AsciiAlphabetic),
    ];
    assert_eq!(builder.render(text, tokens, PLAIN), "ni* AND hao*");
}

#[test]
fn test_pinyin_dictionary_expansion() {
    let dictionary = PinyinDictionary::new();
    let builder = QueryBuilder::new(&dictionary);
    assert_eq!(
        builder.build("zjl", EXPAND),
        "( z+j+l* OR zjl* )"
    );
    assert_eq!(
        builder.build("nihao 2", EXPAND),
        "( ni+h+a+o* OR ni+h+ao* OR ni+ha+o* OR ni+hao* OR nihao* ) AND \"2\"*"
    );
}

proptest! {
    /// Space-only input renders nothing
    #[test]
    fn prop_spaces_render_empty(text in "[ \t\r\n]{0,32}", bits in 0u32..16) {
        prop_assert_eq!(build(&text, TokenizeFlags::from_bits(bits)), "");
    }

    /// One `AND` between every pair of written terms
    #[test]
    fn prop_terms_joined_by_and(words in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        let text = words.join(" ");
        let query = build(&text, PLAIN);
        prop_assert_eq!(query.matches(" AND ").count(), words.len() - 1);
        prop_assert!(!query.starts_with(" AND"));
    }
}
