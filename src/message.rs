//! Thread message records — the engine's only input shape.
//!
//! A thread is the root message plus its ordered replies. Timestamps arrive
//! as decimal-seconds text and may be unparseable; both `user` and `text`
//! are optional. Nothing here ever fails: bad timestamps become `None`.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One message of a conversation thread, as handed over by the fetch layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadMessage {
    /// Decimal-seconds timestamp as text (e.g. "1700000000.123456").
    pub ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ThreadMessage {
    pub fn new(ts: impl Into<String>, user: Option<&str>, text: Option<&str>) -> Self {
        Self {
            ts: ts.into(),
            user: user.map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    /// Message text, or "" when absent.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Permissive decimal-seconds parse. Unparseable input is `None`, never an error.
pub fn parse_timestamp(ts: &str) -> Option<f64> {
    let parsed: f64 = ts.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Extract mentioned user ids from `<@U123>`-style markup, in order of
/// appearance, duplicates preserved.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let re = Regex::new(r"<@([A-Za-z0-9]+)>").unwrap();
    re.captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_fractional() {
        assert_eq!(parse_timestamp("123.456"), Some(123.456));
    }

    #[test]
    fn test_parse_timestamp_whole_seconds() {
        assert_eq!(parse_timestamp("1700000000"), Some(1_700_000_000.0));
    }

    #[test]
    fn test_parse_timestamp_garbage_is_none() {
        assert_eq!(parse_timestamp("not-a-number"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("NaN"), None);
    }

    #[test]
    fn test_parse_timestamp_trims_whitespace() {
        assert_eq!(parse_timestamp("  42.5 "), Some(42.5));
    }

    #[test]
    fn test_extract_mentions() {
        assert_eq!(
            extract_mentions("<@U123> and <@U456>"),
            vec!["U123".to_string(), "U456".to_string()]
        );
    }

    #[test]
    fn test_extract_mentions_none() {
        assert!(extract_mentions("no mentions here").is_empty());
    }
}
