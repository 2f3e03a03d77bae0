//! Tests for the pinyin module

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::io::Write;

use super::{utf8_sequence_len, PinyinDictionary, Romanizer};
use crate::core::config::TokenizerConfig;
use crate::core::error::TokenizerError;

const SAMPLE: &str = "\
# pinyin-data sample
U+4E2D: zhōng,zhòng  # 中
U+56FD: guó  # 国
U+4EBA: rén  # 人

U+91CD: zhòng,chóng  # 重
U+5E86: qìng  # 庆
";

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_utf8_sequence_len() {
    assert_eq!(utf8_sequence_len(b'a'), 1);
    assert_eq!(utf8_sequence_len(b','), 1);
    assert_eq!("é".as_bytes()[0], 0xC3);
    assert_eq!(utf8_sequence_len(0xC3), 2);
    assert_eq!(utf8_sequence_len("中".as_bytes()[0]), 3);
    assert_eq!(utf8_sequence_len("😀".as_bytes()[0]), 4);
    // continuation and invalid lead bytes
    assert_eq!(utf8_sequence_len(0x80), 1);
    assert_eq!(utf8_sequence_len(0xFF), 1);
}

#[test]
fn test_parse_str() {
    let dictionary = PinyinDictionary::parse_str(SAMPLE).unwrap();
    assert_eq!(dictionary.len(), 5);
    assert_eq!(
        dictionary.readings('中').unwrap(),
        &["zhong".to_string()][..]
    );
    assert_eq!(
        dictionary.readings('重').unwrap(),
        &["chong".to_string(), "zhong".to_string()][..]
    );
    assert!(dictionary.readings('x').is_none());
}

#[test]
fn test_parse_errors() {
    let err = PinyinDictionary::parse_str("U+4E2D zhong").unwrap_err();
    assert!(matches!(err, TokenizerError::DictionaryParse { line: 1, .. }));

    let err = PinyinDictionary::parse_str("# ok\n4E2D: zhong").unwrap_err();
    assert!(matches!(err, TokenizerError::DictionaryParse { line: 2, .. }));

    let err = PinyinDictionary::parse_str("U+ZZZZ: zhong").unwrap_err();
    assert!(matches!(err, TokenizerError::DictionaryParse { .. }));

    let err = PinyinDictionary::parse_str("U+D800: zhong").unwrap_err();
    assert!(matches!(err, TokenizerError::DictionaryParse { .. }));
}

#[test]
fn test_entry_without_readings_is_skipped() {
    let dictionary = PinyinDictionary::parse_str("U+4E2D:   # 中").unwrap();
    assert!(dictionary.is_empty());
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let dictionary = PinyinDictionary::from_path(file.path()).unwrap();
    assert_eq!(dictionary.len(), 5);
}

#[test]
fn test_from_path_missing() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = PinyinDictionary::from_path(dir.path().join("pinyin.txt")).unwrap_err();
    assert!(matches!(err, TokenizerError::DictionaryNotFound(_)));
    assert!(err.is_recoverable());
}

#[test]
fn test_from_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let config = TokenizerConfig::default()
        .with_pinyin_dictionary(file.path())
        .with_initials(false);
    let dictionary = PinyinDictionary::from_config(&config).unwrap();
    assert_eq!(dictionary.transliterate("中"), vec!["zhong"]);
}

#[test]
fn test_transliterate_single_char() {
    let dictionary = PinyinDictionary::parse_str(SAMPLE).unwrap();
    assert_eq!(dictionary.transliterate("中"), vec!["zhong", "z"]);
    assert_eq!(
        dictionary.transliterate("重"),
        vec!["chong", "zhong", "c", "z"]
    );
    assert!(dictionary.transliterate("好").is_empty());
    assert!(dictionary.transliterate("").is_empty());
}

#[test]
fn test_transliterate_without_initials() {
    let dictionary = PinyinDictionary::parse_str(SAMPLE)
        .unwrap()
        .with_initials(false);
    assert_eq!(dictionary.transliterate("重"), vec!["chong", "zhong"]);
}

#[test]
fn test_transliterate_word() {
    let dictionary = PinyinDictionary::parse_str(SAMPLE).unwrap();
    assert_eq!(dictionary.transliterate("中国"), vec!["zhongguo", "zg"]);
    assert_eq!(
        dictionary.transliterate("重庆"),
        vec!["chongqing", "zhongqing", "cq", "zq"]
    );
    // one unknown character drops the whole word
    assert!(dictionary.transliterate("中好").is_empty());
}

#[test]
fn test_split_short_and_long_words() {
    let dictionary = PinyinDictionary::new();
    assert_eq!(dictionary.expand("a"), set(&["a"]));
    assert_eq!(dictionary.expand(""), set(&[""]));

    let long = "zhongguozhongguozhong";
    assert_eq!(long.len(), 21);
    assert_eq!(dictionary.expand(long), set(&[long]));
}

#[test]
fn test_split_syllables() {
    let dictionary = PinyinDictionary::new();

    let expanded = dictionary.expand("zhongguo");
    assert!(expanded.contains("zhongguo"));
    assert!(expanded.contains("zhong+guo"));
    assert!(expanded.contains("zhong+gu+o"));
    assert!(expanded.contains("z+h+o+n+g+guo"), "initials: {expanded:?}");
    assert_eq!(expanded.len(), 9);
    for candidate in &expanded {
        assert!(!candidate.starts_with('+') && !candidate.ends_with('+'));
    }
}

#[test]
fn test_split_initials() {
    let dictionary = PinyinDictionary::new();
    let expanded = dictionary.expand("zjl");
    assert_eq!(expanded, set(&["z+j+l", "zjl"]));
}

#[test]
fn test_split_unsplittable_word() {
    let dictionary = PinyinDictionary::new();
    // 'v' and 'i' never start a syllable
    assert_eq!(dictionary.expand("vi"), set(&["vi"]));
}

#[test]
fn test_split_lowercases_input() {
    let dictionary = PinyinDictionary::new();
    assert_eq!(dictionary.split_syllables("ZJL"), set(&["z+j+l", "zjl"]));
}

#[test]
fn test_expand_is_cached() {
    let dictionary = PinyinDictionary::new();
    assert_eq!(dictionary.cached_expansions(), 0);
    let first = dictionary.expand("zhongguo");
    let second = dictionary.expand("zhongguo");
    assert_eq!(first, second);
    assert_eq!(dictionary.cached_expansions(), 1);

    let uncached = PinyinDictionary::new().with_cache_capacity(0);
    uncached.expand("zhongguo");
    assert_eq!(uncached.cached_expansions(), 0);
}

#[test]
fn test_max_expansion_len() {
    let dictionary = PinyinDictionary::new().with_max_expansion_len(4);
    assert_eq!(dictionary.expand("zhong"), set(&["zhong"]));
    assert!(dictionary.expand("zhon").len() > 1);
}

proptest! {
    /// Every candidate is made of syllable pieces of the original word
    #[test]
    fn prop_split_preserves_letters(word in "[a-z]{2,12}") {
        let dictionary = PinyinDictionary::new();
        let expanded = dictionary.expand(&word);

        prop_assert!(expanded.contains(&word));
        for candidate in &expanded {
            prop_assert_eq!(candidate.replace('+', ""), word.clone());
        }
    }

    /// Expansion is deterministic
    #[test]
    fn prop_expand_deterministic(word in "[a-z]{1,16}") {
        let first = PinyinDictionary::new().expand(&word);
        let second = PinyinDictionary::new().expand(&word);
        prop_assert_eq!(first, second);
    }
}
