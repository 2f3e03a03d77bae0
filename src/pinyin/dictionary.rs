//! Dictionary-backed pinyin romanizer
//!
//! Reads the `pinyin.txt` format of the pinyin-data project:
//!
//! ```text
//! # comment
//! U+4E2D: zhōng,zhòng  # 中
//! ```

use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::syllables::{is_initial, is_syllable, is_syllable_prefix};
use super::tone::strip_tones;
use super::{utf8_sequence_len, Romanizer};
use crate::core::config::{
    TokenizerConfig, DEFAULT_EXPANSION_CACHE_CAPACITY, DEFAULT_MAX_EXPANSION_LEN,
};
use crate::core::error::{Result, TokenizerError};

/// Upper bound on syllable splits returned for one query word
const MAX_EXPANSIONS: usize = 128;

/// Upper bound on readings generated for one multi-character word
const MAX_COMBINATIONS: usize = 32;

/// Pinyin readings per character plus the syllable splitter
pub struct PinyinDictionary {
    /// Tone-stripped readings, deduplicated and sorted
    readings: HashMap<char, Vec<String>>,
    include_initials: bool,
    max_expansion_len: usize,
    cache: DashMap<String, BTreeSet<String>>,
    cache_capacity: usize,
}

impl PinyinDictionary {
    /// Create an empty dictionary.
    ///
    /// Query expansion works without any character data; transliteration
    /// returns nothing until readings are loaded or inserted.
    pub fn new() -> Self {
        Self {
            readings: HashMap::new(),
            include_initials: true,
            max_expansion_len: DEFAULT_MAX_EXPANSION_LEN,
            cache: DashMap::new(),
            cache_capacity: DEFAULT_EXPANSION_CACHE_CAPACITY,
        }
    }

    /// Create a dictionary from tokenizer configuration, loading the
    /// configured dictionary file when there is one.
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        let mut dictionary = match &config.pinyin_dictionary {
            Some(path) => Self::from_path(path)?,
            None => Self::new(),
        };
        dictionary.include_initials = config.include_initials;
        dictionary.max_expansion_len = config.max_expansion_len;
        dictionary.cache_capacity = config.expansion_cache_capacity;
        Ok(dictionary)
    }

    /// Load a dictionary file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TokenizerError::DictionaryNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let dictionary = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            "Loaded pinyin dictionary {:?} with {} characters",
            path,
            dictionary.len()
        );
        Ok(dictionary)
    }

    /// Load dictionary lines from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dictionary = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            dictionary.parse_line(index + 1, &line)?;
        }
        Ok(dictionary)
    }

    /// Load dictionary lines from a string
    pub fn parse_str(content: &str) -> Result<Self> {
        let mut dictionary = Self::new();
        for (index, line) in content.lines().enumerate() {
            dictionary.parse_line(index + 1, line)?;
        }
        Ok(dictionary)
    }

    fn parse_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let content = content.trim();
        if content.is_empty() {
            return Ok(());
        }

        let (code, readings) = content
            .split_once(':')
            .ok_or_else(|| TokenizerError::parse(line_no, "missing ':' separator"))?;
        let hex = code
            .trim()
            .strip_prefix("U+")
            .ok_or_else(|| TokenizerError::parse(line_no, "code point must start with U+"))?;
        let value = u32::from_str_radix(hex, 16)
            .map_err(|e| TokenizerError::parse(line_no, format!("invalid code point: {e}")))?;
        let ch = char::from_u32(value).ok_or_else(|| {
            TokenizerError::parse(line_no, format!("U+{hex} is not a scalar value"))
        })?;

        let readings: Vec<&str> = readings
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        if readings.is_empty() {
            tracing::warn!("Skipping pinyin entry without readings at line {}", line_no);
            return Ok(());
        }
        self.insert(ch, &readings);
        Ok(())
    }

    /// Add readings for a character. Tone marks may be present.
    pub fn insert(&mut self, ch: char, readings: &[&str]) {
        let entry = self.readings.entry(ch).or_default();
        entry.extend(
            readings
                .iter()
                .map(|r| strip_tones(r))
                .filter(|r| !r.is_empty()),
        );
        entry.sort();
        entry.dedup();
    }

    pub fn with_initials(mut self, include: bool) -> Self {
        self.include_initials = include;
        self
    }

    pub fn with_max_expansion_len(mut self, len: usize) -> Self {
        self.max_expansion_len = len;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Number of characters with readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Plain readings of one character
    pub fn readings(&self, ch: char) -> Option<&[String]> {
        self.readings.get(&ch).map(Vec::as_slice)
    }

    /// Number of memoised expansions
    pub fn cached_expansions(&self) -> usize {
        self.cache.len()
    }

    /// Split a Latin word into pinyin syllables.
    ///
    /// Every non-final segment is a full syllable or a single initial, the
    /// final segment is any syllable prefix. Segments are joined with `+`.
    /// The unsplit word is always part of the result.
    pub fn split_syllables(&self, word: &str) -> BTreeSet<String> {
        let word = word.to_ascii_lowercase();
        let mut results = BTreeSet::new();
        if word.len() <= 1 || word.len() > self.max_expansion_len || !word.is_ascii() {
            results.insert(word);
            return results;
        }

        let mut parts = Vec::new();
        collect_splits(&word, 0, &mut parts, &mut results);
        results.insert(word);
        results
    }

    fn transliterate_char(&self, ch: char) -> Vec<String> {
        let Some(readings) = self.readings.get(&ch) else {
            return Vec::new();
        };
        let mut out = readings.clone();
        if self.include_initials {
            let initials: BTreeSet<String> = readings
                .iter()
                .filter_map(|r| r.chars().next())
                .map(String::from)
                .collect();
            for initial in initials {
                if !out.contains(&initial) {
                    out.push(initial);
                }
            }
        }
        out
    }

    fn transliterate_word(&self, chars: &[char]) -> Vec<String> {
        let mut per_char = Vec::with_capacity(chars.len());
        for ch in chars {
            match self.readings.get(ch) {
                Some(readings) if !readings.is_empty() => per_char.push(readings.as_slice()),
                _ => return Vec::new(),
            }
        }

        let mut out = cartesian_join(&per_char, MAX_COMBINATIONS);
        if self.include_initials {
            let initials: Vec<Vec<String>> = per_char
                .iter()
                .map(|readings| {
                    let set: BTreeSet<String> = readings
                        .iter()
                        .filter_map(|r| r.chars().next())
                        .map(String::from)
                        .collect();
                    set.into_iter().collect()
                })
                .collect();
            let initials: Vec<&[String]> = initials.iter().map(Vec::as_slice).collect();
            for combined in cartesian_join(&initials, MAX_COMBINATIONS) {
                if !out.contains(&combined) {
                    out.push(combined);
                }
            }
        }
        out
    }
}

impl Default for PinyinDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PinyinDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinyinDictionary")
            .field("characters", &self.readings.len())
            .field("include_initials", &self.include_initials)
            .field("max_expansion_len", &self.max_expansion_len)
            .finish()
    }
}

impl Romanizer for PinyinDictionary {
    fn run_length(&self, lead: u8) -> usize {
        utf8_sequence_len(lead)
    }

    fn expand(&self, word: &str) -> BTreeSet<String> {
        if let Some(cached) = self.cache.get(word) {
            return cached.clone();
        }
        let expanded = self.split_syllables(word);
        if self.cache.len() < self.cache_capacity {
            self.cache.insert(word.to_string(), expanded.clone());
        }
        expanded
    }

    fn transliterate(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        match chars.as_slice() {
            [] => Vec::new(),
            [ch] => self.transliterate_char(*ch),
            many => self.transliterate_word(many),
        }
    }
}

fn collect_splits<'a>(
    word: &'a str,
    pos: usize,
    parts: &mut Vec<&'a str>,
    results: &mut BTreeSet<String>,
) {
    if results.len() >= MAX_EXPANSIONS {
        return;
    }

    let rest = &word[pos..];
    if !parts.is_empty() && is_syllable_prefix(rest) {
        let mut joined = parts.join("+");
        joined.push('+');
        joined.push_str(rest);
        results.insert(joined);
    }

    for end in pos + 1..word.len() {
        let segment = &word[pos..end];
        if !is_syllable_prefix(segment) {
            break;
        }
        if is_syllable(segment) || is_initial(segment) {
            parts.push(segment);
            collect_splits(word, end, parts, results);
            parts.pop();
        }
    }
}

fn cartesian_join(choices: &[&[String]], limit: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    for options in choices {
        let mut next = Vec::with_capacity(out.len() * options.len());
        'outer: for prefix in &out {
            for option in options.iter() {
                if next.len() >= limit {
                    break 'outer;
                }
                next.push(format!("{prefix}{option}"));
            }
        }
        out = next;
    }
    out
}
