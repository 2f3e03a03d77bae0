//! Tone mark removal for pinyin readings

/// Strip tone marks from a reading and spell `ü` as `v`.
///
/// `zhōng` -> `zhong`, `lǜ` -> `lv`, `ê̄` -> `e`. Combining diacritics are
/// dropped and ASCII letters are lowercased.
pub fn strip_tones(reading: &str) -> String {
    let mut plain = String::with_capacity(reading.len());
    for ch in reading.chars() {
        let mapped = match ch {
            'ā' | 'á' | 'ǎ' | 'à' => 'a',
            'ē' | 'é' | 'ě' | 'è' | 'ê' | 'ế' | 'ề' => 'e',
            'ī' | 'í' | 'ǐ' | 'ì' => 'i',
            'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
            'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
            'ü' | 'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' => 'v',
            'ń' | 'ň' | 'ǹ' => 'n',
            'ḿ' => 'm',
            // combining grave, acute, macron, caron
            '\u{0300}' | '\u{0301}' | '\u{0304}' | '\u{030C}' => continue,
            c if c.is_ascii_alphabetic() => c.to_ascii_lowercase(),
            c if c.is_ascii_digit() => continue,
            c => c,
        };
        plain.push(mapped);
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tones() {
        assert_eq!(strip_tones("zhōng"), "zhong");
        assert_eq!(strip_tones("zhòng"), "zhong");
        assert_eq!(strip_tones("lǜ"), "lv");
        assert_eq!(strip_tones("nüè"), "nve");
        assert_eq!(strip_tones("ń"), "n");
        assert_eq!(strip_tones("m\u{0300}"), "m");
        assert_eq!(strip_tones("ê\u{0304}"), "e");
    }

    #[test]
    fn test_numbered_and_plain() {
        assert_eq!(strip_tones("zhong1"), "zhong");
        assert_eq!(strip_tones("Guo"), "guo");
        assert_eq!(strip_tones("de"), "de");
    }
}
