//! Composite scores: urgency, importance, and cross-thread relatedness.
//!
//! Urgency is clamped to [0,1]. Importance is an opt-in weighted sum and is
//! deliberately NOT renormalized: enabling the optional context-dependent
//! criteria can push it past 1.0, and callers compare it against
//! `importance_threshold` as-is. Flagged as an open product question; do not
//! quietly clamp it here.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::analysis::keywords::KeywordAnalysis;
use crate::config::{ImportanceCriterion, RelatednessSignals, ScoringConfig};
use crate::constants::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Critical
        } else if score >= 0.5 {
            Self::High
        } else if score >= 0.25 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Contribution of the urgency criterion to the importance sum.
    fn importance_tier(&self) -> f64 {
        match self {
            Self::Low => 0.1,
            Self::Medium => 0.2,
            Self::High => 0.3,
            Self::Critical => 0.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Raw counts a thread exposes to the scoring formulas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadStats {
    pub message_count: usize,
    pub participant_count: usize,
    pub mention_count: usize,
    /// Urgency score of the thread, [0,1].
    pub urgency: f64,
    /// Epoch seconds of the newest parseable timestamp.
    pub last_activity: Option<f64>,
}

/// Search/reference context enabling the optional importance criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringContext {
    pub query_terms: Vec<String>,
    /// Epoch seconds to measure time decay against.
    pub reference_ts: f64,
}

/// Urgency of the concatenated thread text: 0.2 per keyword match (every
/// occurrence counts, keywords are not deduplicated), volume bumps at >10
/// and >20 messages, clamped to [0,1].
pub fn urgency_score(text: &str, message_count: usize, urgency_keywords: &[String]) -> f64 {
    let mut score = 0.0;
    for keyword in urgency_keywords {
        let escaped = regex::escape(keyword);
        let re = Regex::new(&format!("(?i){escaped}")).unwrap();
        score += re.find_iter(text).count() as f64 * URGENCY_MATCH_WEIGHT;
    }
    if message_count > URGENCY_VOLUME_FIRST {
        score += URGENCY_VOLUME_BUMP;
    }
    if message_count > URGENCY_VOLUME_SECOND {
        score += URGENCY_VOLUME_BUMP;
    }
    score.clamp(0.0, 1.0)
}

/// Opt-in weighted importance sum. The context-dependent criteria (tf-idf
/// relevance, time decay, engagement) contribute only when `context` is
/// supplied.
pub fn importance_score(
    stats: &ThreadStats,
    keywords: &KeywordAnalysis,
    context: Option<&ScoringContext>,
    cfg: &ScoringConfig,
) -> f64 {
    let mut score = 0.0;
    for criterion in &cfg.criteria {
        score += match criterion {
            ImportanceCriterion::ParticipantCount => {
                (stats.participant_count as f64 / IMPORTANCE_PARTICIPANT_SCALE).min(1.0)
                    * IMPORTANCE_PARTICIPANT_WEIGHT
            }
            ImportanceCriterion::MessageCount => {
                (stats.message_count as f64 / IMPORTANCE_MESSAGE_SCALE).min(1.0)
                    * IMPORTANCE_MESSAGE_WEIGHT
            }
            ImportanceCriterion::UrgencyKeywords => {
                UrgencyLevel::from_score(stats.urgency).importance_tier()
            }
            ImportanceCriterion::MentionFrequency => {
                (stats.mention_count as f64 / IMPORTANCE_MENTION_SCALE).min(1.0)
                    * IMPORTANCE_MENTION_WEIGHT
            }
            ImportanceCriterion::TfIdfRelevance => match context {
                Some(ctx) => {
                    query_relevance(keywords, &ctx.query_terms) * IMPORTANCE_TFIDF_WEIGHT
                }
                None => 0.0,
            },
            ImportanceCriterion::TimeDecay => match context {
                Some(ctx) => {
                    time_decay(stats.last_activity, ctx.reference_ts) * IMPORTANCE_TIME_DECAY_WEIGHT
                }
                None => 0.0,
            },
            ImportanceCriterion::Engagement => match context {
                Some(_) => engagement(stats) * IMPORTANCE_ENGAGEMENT_WEIGHT,
                None => 0.0,
            },
        };
    }
    tracing::debug!(score, criteria = cfg.criteria.len(), "Importance computed");
    score
}

/// Share of query terms present in the keyword table, weighted by each
/// term's relevance.
fn query_relevance(keywords: &KeywordAnalysis, query_terms: &[String]) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let hit: f64 = query_terms
        .iter()
        .map(|t| keywords.relevance(&t.to_lowercase()))
        .sum();
    hit / query_terms.len() as f64
}

/// Exponential decay of thread freshness over a one-week window.
fn time_decay(last_activity: Option<f64>, reference_ts: f64) -> f64 {
    match last_activity {
        Some(last) => {
            let age_hours = (reference_ts - last).max(0.0) / 3600.0;
            (-age_hours / TIME_DECAY_WINDOW_HOURS).exp()
        }
        None => 0.0,
    }
}

/// Messages per participant, scaled into [0,1].
fn engagement(stats: &ThreadStats) -> f64 {
    if stats.participant_count == 0 {
        return 0.0;
    }
    let per_participant = stats.message_count as f64 / stats.participant_count as f64;
    (per_participant / ENGAGEMENT_SCALE).min(1.0)
}

// ============================================================================
// RELATEDNESS
// ============================================================================

/// Everything relatedness needs to know about one thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadProfile {
    pub id: String,
    pub keywords: Vec<String>,
    pub participants: Vec<String>,
    /// Epoch seconds of the newest parseable timestamp.
    pub last_activity: Option<f64>,
    pub urgency_level: UrgencyLevel,
    pub message_count: usize,
    pub has_action_items: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedThread {
    pub id: String,
    pub score: f64,
}

/// Weighted sum of the enabled relatedness signals, roughly [0,1].
pub fn relatedness_score(
    a: &ThreadProfile,
    b: &ThreadProfile,
    signals: &RelatednessSignals,
) -> f64 {
    let mut score = 0.0;
    if signals.keywords {
        score += keyword_jaccard(a, b) * RELATED_KEYWORD_WEIGHT;
    }
    if signals.participants {
        score += jaccard(
            &a.participants.iter().map(String::as_str).collect(),
            &b.participants.iter().map(String::as_str).collect(),
        ) * RELATED_PARTICIPANT_WEIGHT;
    }
    if signals.temporal {
        score += temporal_proximity(a.last_activity, b.last_activity) * RELATED_TEMPORAL_WEIGHT;
    }
    if signals.topic {
        score += topic_similarity(a, b) * RELATED_TOPIC_WEIGHT;
    }
    score
}

/// Relatedness of `target` against each candidate, filtered by `threshold`
/// and sorted descending (ties keep candidate order).
pub fn find_related_threads(
    target: &ThreadProfile,
    candidates: &[ThreadProfile],
    threshold: f64,
    signals: &RelatednessSignals,
) -> Vec<RelatedThread> {
    let mut related: Vec<RelatedThread> = candidates
        .iter()
        .filter(|c| c.id != target.id)
        .map(|c| RelatedThread { id: c.id.clone(), score: relatedness_score(target, c, signals) })
        .filter(|r| r.score >= threshold)
        .collect();
    related.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    related
}

fn keyword_jaccard(a: &ThreadProfile, b: &ThreadProfile) -> f64 {
    fn long_words(p: &ThreadProfile) -> HashSet<&str> {
        p.keywords
            .iter()
            .filter(|k| k.chars().count() > RELATED_MIN_WORD_CHARS)
            .map(String::as_str)
            .collect()
    }
    jaccard(&long_words(a), &long_words(b))
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Exponential decay over the distance between last activities; 0 at or
/// beyond seven days, or when either side has no timestamp.
fn temporal_proximity(a: Option<f64>, b: Option<f64>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    let delta_minutes = (a - b).abs() / 60.0;
    if delta_minutes >= TEMPORAL_HORIZON_MINUTES {
        return 0.0;
    }
    (-delta_minutes / (TEMPORAL_HORIZON_MINUTES / 3.0)).exp()
}

/// Composite topic signal: urgency-level equality (0.5), message-count
/// similarity (0.3), matching action-item presence (0.2).
fn topic_similarity(a: &ThreadProfile, b: &ThreadProfile) -> f64 {
    let mut score = 0.0;
    if a.urgency_level == b.urgency_level {
        score += 0.5;
    }
    let max = a.message_count.max(b.message_count);
    let count_similarity = if max == 0 {
        1.0
    } else {
        1.0 - (a.message_count as f64 - b.message_count as f64).abs() / max as f64
    };
    score += count_similarity * 0.3;
    if a.has_action_items == b.has_action_items {
        score += 0.2;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn profile(id: &str) -> ThreadProfile {
        ThreadProfile {
            id: id.to_string(),
            keywords: vec!["deploy".into(), "rollback".into(), "incident".into()],
            participants: vec!["U1".into(), "U2".into()],
            last_activity: Some(1_000_000.0),
            urgency_level: UrgencyLevel::Low,
            message_count: 8,
            has_action_items: true,
        }
    }

    fn empty_keywords() -> KeywordAnalysis {
        crate::analysis::keywords::extract_keywords("", &crate::config::KeywordConfig::default())
    }

    // ── Urgency ──

    #[test]
    fn test_urgency_counts_every_match() {
        let cfg = ScoringConfig::default();
        let score = urgency_score("urgent urgent", 1, &cfg.urgency_keywords);
        assert!((score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_urgency_case_insensitive() {
        let cfg = ScoringConfig::default();
        let score = urgency_score("URGENT!", 1, &cfg.urgency_keywords);
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_urgency_volume_bumps() {
        let cfg = ScoringConfig::default();
        assert!((urgency_score("", 11, &cfg.urgency_keywords) - 0.3).abs() < 1e-9);
        assert!((urgency_score("", 21, &cfg.urgency_keywords) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_urgency_clamped() {
        let cfg = ScoringConfig::default();
        let text = "urgent ".repeat(10);
        assert_eq!(urgency_score(&text, 25, &cfg.urgency_keywords), 1.0);
    }

    #[test]
    fn test_urgency_japanese_keyword() {
        let cfg = ScoringConfig::default();
        let score = urgency_score("至急確認してください", 1, &cfg.urgency_keywords);
        assert!((score - 0.2).abs() < 1e-9);
    }

    // ── Importance ──

    #[test]
    fn test_importance_default_criteria() {
        let stats = ThreadStats {
            message_count: 10,
            participant_count: 5,
            mention_count: 0,
            urgency: 0.0,
            last_activity: None,
        };
        let score = importance_score(&stats, &empty_keywords(), None, &ScoringConfig::default());
        // 0.5*0.2 + 0.5*0.3 + low tier 0.1 + 0.0
        assert!((score - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_importance_optional_criteria_need_context() {
        let cfg = ScoringConfig {
            criteria: vec![
                ImportanceCriterion::TfIdfRelevance,
                ImportanceCriterion::TimeDecay,
                ImportanceCriterion::Engagement,
            ],
            ..ScoringConfig::default()
        };
        let stats = ThreadStats {
            message_count: 10,
            participant_count: 2,
            mention_count: 0,
            urgency: 0.0,
            last_activity: Some(1000.0),
        };
        let score = importance_score(&stats, &empty_keywords(), None, &cfg);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_importance_can_exceed_one_with_all_criteria() {
        let mut cfg = ScoringConfig::default();
        cfg.criteria.extend([
            ImportanceCriterion::TfIdfRelevance,
            ImportanceCriterion::TimeDecay,
            ImportanceCriterion::Engagement,
        ]);
        let stats = ThreadStats {
            message_count: 20,
            participant_count: 10,
            mention_count: 5,
            urgency: 0.9,
            last_activity: Some(5000.0),
        };
        let keywords = crate::analysis::keywords::extract_keywords(
            "incident incident",
            &crate::config::KeywordConfig::default(),
        );
        let ctx = ScoringContext { query_terms: vec!["incident".into()], reference_ts: 5000.0 };
        let score = importance_score(&stats, &keywords, Some(&ctx), &cfg);
        // 0.2 + 0.3 + 0.4 + 0.1 + 0.2 + 0.15 + engagement 2/5/5*0.25=0.1 = 1.45
        assert!(score > 1.0, "importance stays unclamped, got {score}");
    }

    // ── Relatedness ──

    #[test]
    fn test_identical_threads_full_score() {
        let a = profile("a");
        let b = profile("b");
        let score = relatedness_score(&a, &b, &RelatednessSignals::default());
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_temporal_beyond_horizon_is_zero() {
        let a = profile("a");
        let mut b = profile("b");
        b.last_activity = Some(1_000_000.0 + 8.0 * 24.0 * 3600.0);
        let signals = RelatednessSignals {
            keywords: false,
            participants: false,
            temporal: true,
            topic: false,
        };
        assert_eq!(relatedness_score(&a, &b, &signals), 0.0);
    }

    #[test]
    fn test_all_signals_disabled() {
        let signals = RelatednessSignals {
            keywords: false,
            participants: false,
            temporal: false,
            topic: false,
        };
        assert_eq!(relatedness_score(&profile("a"), &profile("b"), &signals), 0.0);
    }

    #[test]
    fn test_find_related_filters_and_sorts() {
        let target = profile("t");
        let twin = profile("twin");
        let mut distant = profile("distant");
        distant.keywords = vec!["unrelated-topic".into()];
        distant.participants = vec!["U9".into()];
        distant.last_activity = Some(1_000_000.0 + 10.0 * 24.0 * 3600.0);
        distant.urgency_level = UrgencyLevel::Critical;
        distant.message_count = 100;
        distant.has_action_items = false;

        let related = find_related_threads(
            &target,
            &[distant, twin],
            0.3,
            &RelatednessSignals::default(),
        );
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "twin");
        assert!((related[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_keywords_excluded_from_jaccard() {
        let mut a = profile("a");
        let mut b = profile("b");
        a.keywords = vec!["api".into()];
        b.keywords = vec!["api".into()];
        let signals = RelatednessSignals {
            keywords: true,
            participants: false,
            temporal: false,
            topic: false,
        };
        // "api" is only 3 chars: both sets are empty, overlap contributes 0
        assert_eq!(relatedness_score(&a, &b, &signals), 0.0);
    }
}
