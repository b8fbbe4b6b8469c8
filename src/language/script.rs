//! Script classification and tokenization.
//!
//! Classification is per code point: Hiragana, Katakana, or the CJK unified
//! ideograph block marks content as Japanese; any ASCII letter marks it as
//! Latin. Tokenization splits on ASCII whitespace plus the full-width
//! punctuation marks that delimit phrases in unsegmented Japanese text.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Primary language of a piece of text.
///
/// Text containing neither script (digits, punctuation only) also reports
/// `Mixed`. That mirrors the behavior callers already depend on, so it stays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Japanese,
    English,
    Mixed,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Japanese => "japanese",
            Self::English => "english",
            Self::Mixed => "mixed",
        }
    }
}

pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn is_japanese_char(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_kanji(c)
}

/// True if any code point is Japanese.
pub fn has_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}

/// True if any code point is an ASCII letter.
pub fn has_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// True if the token contains at least one CJK ideograph.
pub fn has_kanji(text: &str) -> bool {
    text.chars().any(is_kanji)
}

/// True if the token is non-empty and entirely Katakana.
pub fn is_all_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_katakana)
}

/// Classify the primary language of `text`.
pub fn detect_language(text: &str) -> Language {
    let japanese = has_japanese(text);
    let latin = has_latin(text);
    match (japanese, latin) {
        (true, false) => Language::Japanese,
        (false, true) => Language::English,
        _ => Language::Mixed,
    }
}

/// Strip markup that carries no topical signal: `<...>` mention/link markup,
/// `:emoji_code:` shortcodes, bare URLs. Collapses runs of whitespace.
pub fn clean_text(text: &str) -> String {
    let re_markup = Regex::new(r"<[^>]*>").unwrap();
    let re_emoji = Regex::new(r":[a-zA-Z0-9_+\-]+:").unwrap();
    let re_url = Regex::new(r"https?://\S+").unwrap();
    let re_space = Regex::new(r"\s+").unwrap();

    let stripped = re_markup.replace_all(text, " ");
    let stripped = re_emoji.replace_all(&stripped, " ");
    let stripped = re_url.replace_all(&stripped, " ");
    re_space.replace_all(&stripped, " ").trim().to_string()
}

/// Full-width punctuation that separates tokens in Japanese text.
const JP_SEPARATORS: &[char] = &[
    '、', '。', '「', '」', '『', '』', '（', '）', '【', '】', '〜', '～', '？', '！', '・',
];

/// Split text into tokens on ASCII whitespace and full-width punctuation.
/// Empty tokens are dropped.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_ascii_whitespace() || JP_SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_japanese_only() {
        assert_eq!(detect_language("こんにちは世界"), Language::Japanese);
    }

    #[test]
    fn test_detect_english_only() {
        assert_eq!(detect_language("hello world"), Language::English);
    }

    #[test]
    fn test_detect_mixed() {
        assert_eq!(detect_language("deploy を確認"), Language::Mixed);
    }

    #[test]
    fn test_detect_neither_script_is_mixed() {
        // Digits/punctuation only: neither flag set, reported as mixed.
        assert_eq!(detect_language("12345 !!"), Language::Mixed);
    }

    #[test]
    fn test_clean_text_strips_markup() {
        assert_eq!(clean_text("ping <@U123> :tada: see https://example.com/x now"), "ping see now");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a \t b\n\nc "), "a b c");
    }

    #[test]
    fn test_tokenize_splits_fullwidth_punctuation() {
        assert_eq!(
            tokenize_text("進捗を確認、明日まで。よろしく！"),
            vec!["進捗を確認", "明日まで", "よろしく"]
        );
    }

    #[test]
    fn test_tokenize_drops_empty_tokens() {
        assert_eq!(tokenize_text("a  b 、、 c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_katakana_classification() {
        assert!(is_all_katakana("サーバー"));
        assert!(!is_all_katakana("サーバ1"));
        assert!(!is_all_katakana(""));
    }
}
