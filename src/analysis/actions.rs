//! Action item extraction — task-like statements pulled from message lines.
//!
//! A line qualifies when it contains at least one configured indicator
//! phrase. Latin indicators are matched with word boundaries plus a
//! substring fallback for compound terms ("TODOs"); Japanese indicators are
//! matched as plain substrings since unsegmented text has no word
//! boundaries. Priority and status come from bilingual keyword sets, with a
//! match-count confidence for status.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ActionConfig;
use crate::constants::*;
use crate::language::clean_text;
use crate::message::{extract_mentions, ThreadMessage};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// Cleaned line text: markup removed, whitespace collapsed, leading
    /// bullet/ordinal stripped, capped at 500 chars.
    pub text: String,
    /// User ids mentioned on the line.
    pub mentions: Vec<String>,
    pub priority: Priority,
    pub status: Status,
    pub status_confidence: f64,
    /// Timestamp of the message the line came from.
    pub source_ts: String,
}

/// Indicator matchers compiled once from an [`ActionConfig`].
pub struct ActionItemExtractor {
    indicators_en: Vec<(Regex, String)>,
    indicators_ja: Vec<String>,
    priority_high: Vec<String>,
    priority_medium: Vec<String>,
    status_completed: Vec<String>,
    status_in_progress: Vec<String>,
}

impl ActionItemExtractor {
    pub fn new(cfg: &ActionConfig) -> Self {
        let indicators_en = cfg
            .indicators_en
            .iter()
            .map(|phrase| {
                let escaped = regex::escape(phrase);
                // escaped phrases are always valid patterns
                let re = Regex::new(&format!(r"(?i)\b{escaped}\b")).unwrap();
                (re, phrase.to_lowercase())
            })
            .collect();
        Self {
            indicators_en,
            indicators_ja: cfg.indicators_ja.clone(),
            priority_high: lowercase_all(&cfg.priority_high),
            priority_medium: lowercase_all(&cfg.priority_medium),
            status_completed: lowercase_all(&cfg.status_completed),
            status_in_progress: lowercase_all(&cfg.status_in_progress),
        }
    }

    /// Scan every line of every message for action items.
    pub fn extract(&self, messages: &[ThreadMessage]) -> Vec<ActionItem> {
        let mut items = Vec::new();
        for message in messages {
            for line in message.text_or_empty().split('\n') {
                let line = line.trim();
                if line.is_empty() || !self.line_has_indicator(line) {
                    continue;
                }
                if let Some(item) = self.build_item(line, &message.ts) {
                    items.push(item);
                }
            }
        }
        tracing::debug!(items = items.len(), messages = messages.len(), "Action item scan complete");
        items
    }

    fn line_has_indicator(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.indicators_en
            .iter()
            .any(|(re, phrase)| re.is_match(line) || lower.contains(phrase))
            || self.indicators_ja.iter().any(|p| line.contains(p.as_str()))
    }

    fn build_item(&self, line: &str, source_ts: &str) -> Option<ActionItem> {
        let text = clean_action_text(line);
        if text.chars().count() <= MIN_ACTION_TEXT_CHARS {
            return None;
        }
        let lower = line.to_lowercase();
        let (status, status_confidence) = self.classify_status(&lower);
        Some(ActionItem {
            mentions: extract_mentions(line),
            priority: self.classify_priority(&lower),
            status,
            status_confidence,
            text,
            source_ts: source_ts.to_string(),
        })
    }

    fn classify_priority(&self, lower: &str) -> Priority {
        if self.priority_high.iter().any(|k| lower.contains(k.as_str())) {
            Priority::High
        } else if self.priority_medium.iter().any(|k| lower.contains(k.as_str())) {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    fn classify_status(&self, lower: &str) -> (Status, f64) {
        let completed = count_matches(&self.status_completed, lower);
        if completed > 0 {
            let confidence = (STATUS_COMPLETED_BASE_CONFIDENCE
                + STATUS_CONFIDENCE_STEP * completed as f64)
                .min(1.0);
            return (Status::Completed, confidence);
        }
        let in_progress = count_matches(&self.status_in_progress, lower);
        if in_progress > 0 {
            let confidence = (STATUS_IN_PROGRESS_BASE_CONFIDENCE
                + STATUS_CONFIDENCE_STEP * in_progress as f64)
                .min(1.0);
            return (Status::InProgress, confidence);
        }
        (Status::Open, STATUS_OPEN_CONFIDENCE)
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn count_matches(keywords: &[String], lower: &str) -> usize {
    keywords.iter().filter(|k| lower.contains(k.as_str())).count()
}

/// Strip a leading bullet/ordinal marker, remove markup, collapse
/// whitespace, and cap the result at 500 characters.
fn clean_action_text(line: &str) -> String {
    let re_bullet = Regex::new(r"^(?:[-*•・]+|\d+[.)])\s*").unwrap();
    let stripped = re_bullet.replace(line.trim(), "");
    let cleaned = clean_text(&stripped);
    cleaned.chars().take(MAX_ACTION_TEXT_CHARS).collect::<String>().trim().to_string()
}
