//! Analysis configuration — every tunable the engine consumes.
//!
//! The bilingual indicator/keyword/stopword tables ship as immutable default
//! data and are injected into each entry point, so the engine stays pure and
//! each table can be replaced wholesale from an override file. Every field
//! carries a serde default; a partial JSON override file is enough.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::constants::*;
use crate::error::{AnalysisError, AnalysisResult};

const DEFAULT_ENGLISH_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "about", "into", "through", "during", "before", "after", "above", "below", "over",
    "under", "again", "then", "once", "here", "there", "when", "where", "why", "how", "what",
    "which", "who", "whom", "this", "that", "these", "those", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "will",
    "would", "could", "should", "shall", "might", "must", "can", "just", "very", "really",
    "also", "than", "too", "only", "same", "such", "some", "more", "most", "other", "each",
    "every", "all", "both", "because", "while", "between", "against", "please", "thanks",
    "thank", "yeah", "okay", "going", "gonna", "want", "like", "know", "think", "make", "made",
    "take", "getting", "still", "well", "even", "much", "many", "anyone", "someone",
];

const DEFAULT_JAPANESE_STOPWORDS: &[&str] = &[
    "する", "なる", "ある", "いる", "できる", "です", "ます", "ました", "だ", "この",
    "その", "あの", "どの", "これ", "それ", "あれ", "どれ", "こと", "もの", "ため", "よう",
    "とき", "ところ", "ここ", "そこ", "あそこ", "わたし", "あなた", "さん", "くん", "ちゃん",
    "など", "まで", "から", "より", "だけ", "ほど", "くらい", "について", "として", "そして",
    "しかし", "また", "でも", "けど", "ので", "のに", "たち", "いう", "思う", "言う",
    "お願い", "よろしく", "はい", "いいえ",
];

const DEFAULT_ACTION_INDICATORS_EN: &[&str] = &[
    "todo", "to do", "action item", "need to", "needs to", "should", "must", "please", "task",
    "assign", "assigned", "deadline", "due", "follow up", "follow-up", "fix", "review",
    "remember to", "don't forget", "make sure",
];

const DEFAULT_ACTION_INDICATORS_JA: &[&str] = &[
    "してください", "して下さい", "お願いします", "お願いいたします", "必要があります",
    "必要です", "タスク", "対応して", "対応をお願い", "確認してください", "確認をお願い",
    "締め切り", "締切", "期限", "やること", "忘れずに", "宿題",
];

const DEFAULT_PRIORITY_HIGH: &[&str] = &[
    "urgent", "asap", "critical", "immediately", "emergency", "blocker", "緊急", "至急",
    "大至急", "今すぐ", "即対応",
];

const DEFAULT_PRIORITY_MEDIUM: &[&str] = &[
    "soon", "important", "priority", "this week", "重要", "早め", "なるべく早く", "今週中",
    "優先",
];

const DEFAULT_STATUS_COMPLETED: &[&str] = &[
    "done", "completed", "finished", "fixed", "resolved", "closed", "shipped", "完了", "済み",
    "解決", "対応済み", "終わりました", "できました",
];

const DEFAULT_STATUS_IN_PROGRESS: &[&str] = &[
    "in progress", "working on", "started", "ongoing", "underway", "対応中", "進行中",
    "作業中", "着手", "確認中",
];

const DEFAULT_URGENCY_KEYWORDS: &[&str] = &[
    "urgent", "asap", "emergency", "critical", "immediately", "right away", "緊急", "至急",
    "大至急", "今すぐ",
];

fn to_string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_string_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// KEYWORDS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Upper bound on the returned keyword list.
    pub max_topics: usize,
    /// Tokens shorter than this never reach normalization.
    pub min_word_length: usize,
    /// Weight bonus for terms containing a CJK ideograph.
    pub prefer_kanji: bool,
    /// Weight bonus for pure-Katakana terms (loanwords, product names).
    pub prefer_katakana: bool,
    pub english_stopwords: HashSet<String>,
    pub japanese_stopwords: HashSet<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_topics: MAX_TOPICS,
            min_word_length: MIN_WORD_LENGTH,
            prefer_kanji: true,
            prefer_katakana: true,
            english_stopwords: to_string_set(DEFAULT_ENGLISH_STOPWORDS),
            japanese_stopwords: to_string_set(DEFAULT_JAPANESE_STOPWORDS),
        }
    }
}

// ============================================================================
// ACTION ITEMS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Latin-script indicator phrases, matched with word boundaries.
    pub indicators_en: Vec<String>,
    /// Japanese indicator phrases, matched as substrings.
    pub indicators_ja: Vec<String>,
    pub priority_high: Vec<String>,
    pub priority_medium: Vec<String>,
    pub status_completed: Vec<String>,
    pub status_in_progress: Vec<String>,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            indicators_en: to_string_vec(DEFAULT_ACTION_INDICATORS_EN),
            indicators_ja: to_string_vec(DEFAULT_ACTION_INDICATORS_JA),
            priority_high: to_string_vec(DEFAULT_PRIORITY_HIGH),
            priority_medium: to_string_vec(DEFAULT_PRIORITY_MEDIUM),
            status_completed: to_string_vec(DEFAULT_STATUS_COMPLETED),
            status_in_progress: to_string_vec(DEFAULT_STATUS_IN_PROGRESS),
        }
    }
}

// ============================================================================
// TIMELINE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Burst-detection window size, minutes.
    pub window_minutes: f64,
    /// Minimum events inside one window to count as a burst.
    pub min_messages: usize,
    /// Minimum silence, minutes, to report a conversation gap.
    pub min_gap_minutes: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            window_minutes: WINDOW_MINUTES,
            min_messages: MIN_BURST_MESSAGES,
            min_gap_minutes: MIN_GAP_MINUTES,
        }
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// One opt-in criterion of the importance sum. The sum of enabled criteria is
/// deliberately not renormalized; enabling everything can exceed 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceCriterion {
    ParticipantCount,
    MessageCount,
    UrgencyKeywords,
    MentionFrequency,
    /// Requires a scoring context (query terms).
    TfIdfRelevance,
    /// Requires a scoring context (reference time).
    TimeDecay,
    Engagement,
}

/// Independently toggleable relatedness signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatednessSignals {
    pub keywords: bool,
    pub participants: bool,
    pub temporal: bool,
    pub topic: bool,
}

impl Default for RelatednessSignals {
    fn default() -> Self {
        Self { keywords: true, participants: true, temporal: true, topic: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub urgency_keywords: Vec<String>,
    pub criteria: Vec<ImportanceCriterion>,
    pub related_signals: RelatednessSignals,
    /// Minimum relatedness score for a candidate to be reported.
    pub similarity_threshold: f64,
    /// Importance at or above which a thread counts as important.
    pub importance_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            urgency_keywords: to_string_vec(DEFAULT_URGENCY_KEYWORDS),
            criteria: vec![
                ImportanceCriterion::ParticipantCount,
                ImportanceCriterion::MessageCount,
                ImportanceCriterion::UrgencyKeywords,
                ImportanceCriterion::MentionFrequency,
            ],
            related_signals: RelatednessSignals::default(),
            similarity_threshold: SIMILARITY_THRESHOLD,
            importance_threshold: IMPORTANCE_THRESHOLD,
        }
    }
}

// ============================================================================
// TOP LEVEL
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub keywords: KeywordConfig,
    pub actions: ActionConfig,
    pub timeline: TimelineConfig,
    pub scoring: ScoringConfig,
}

impl AnalysisConfig {
    /// Load overrides from a JSON file on top of the defaults. Sections and
    /// fields absent from the file keep their default values.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Loaded analysis config overrides");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.keywords.max_topics, 20);
        assert_eq!(cfg.keywords.min_word_length, 2);
        assert_eq!(cfg.timeline.window_minutes, 30.0);
        assert_eq!(cfg.timeline.min_messages, 3);
        assert_eq!(cfg.timeline.min_gap_minutes, 60.0);
        assert!((cfg.scoring.similarity_threshold - 0.3).abs() < f64::EPSILON);
        assert!((cfg.scoring.importance_threshold - 0.7).abs() < f64::EPSILON);
        assert!(cfg.keywords.english_stopwords.contains("should"));
        assert!(cfg.keywords.japanese_stopwords.contains("する"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"keywords": {{"max_topics": 5}}}}"#).unwrap();
        let cfg = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(cfg.keywords.max_topics, 5);
        // untouched sections keep defaults
        assert_eq!(cfg.keywords.min_word_length, 2);
        assert_eq!(cfg.timeline.min_messages, 3);
        assert!(!cfg.actions.indicators_en.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = AnalysisConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
