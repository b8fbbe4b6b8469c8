//! Whole-thread analysis facade.
//!
//! Runs the four extractors over one message sequence and bundles their
//! outputs plus the composite scores into a single serializable record.
//! `rank_threads` fans the same pure call out over many threads with rayon;
//! no state is shared between calls.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::analysis::actions::{ActionItem, ActionItemExtractor};
use crate::analysis::keywords::{extract_keywords, KeywordAnalysis};
use crate::analysis::scoring::{
    importance_score, urgency_score, ScoringContext, ThreadProfile, ThreadStats, UrgencyLevel,
};
use crate::analysis::timeline::{
    average_response_time, build_timeline_events, find_conversation_gaps,
    find_high_activity_periods, message_velocity, most_active_user, response_times,
    total_duration_minutes, user_activity, ActivityPeriod, ConversationGap, TimelineEvent,
    UserActivity,
};
use crate::config::AnalysisConfig;
use crate::message::{extract_mentions, ThreadMessage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub events: Vec<TimelineEvent>,
    pub total_duration_minutes: f64,
    pub average_response_minutes: f64,
    /// Messages per hour.
    pub message_velocity: f64,
    pub high_activity_periods: Vec<ActivityPeriod>,
    pub gaps: Vec<ConversationGap>,
    pub user_activity: Vec<UserActivity>,
    pub most_active_user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadAnalysis {
    pub message_count: usize,
    /// Distinct message authors, first-seen order.
    pub participants: Vec<String>,
    pub mention_count: usize,
    pub keywords: KeywordAnalysis,
    pub action_items: Vec<ActionItem>,
    pub timeline: TimelineSummary,
    pub urgency: f64,
    pub urgency_level: UrgencyLevel,
    pub importance: f64,
}

/// Analyze one thread with the default (context-free) importance criteria.
pub fn analyze_thread(messages: &[ThreadMessage], cfg: &AnalysisConfig) -> ThreadAnalysis {
    analyze_thread_with_context(messages, cfg, None)
}

/// Analyze one thread; a scoring context activates the optional importance
/// criteria (tf-idf relevance, time decay, engagement).
pub fn analyze_thread_with_context(
    messages: &[ThreadMessage],
    cfg: &AnalysisConfig,
    context: Option<&ScoringContext>,
) -> ThreadAnalysis {
    let full_text = messages
        .iter()
        .map(ThreadMessage::text_or_empty)
        .collect::<Vec<_>>()
        .join("\n");

    let keywords = extract_keywords(&full_text, &cfg.keywords);
    let action_items = ActionItemExtractor::new(&cfg.actions).extract(messages);

    let events = build_timeline_events(messages);
    let times = response_times(&events);
    let duration = total_duration_minutes(&events);
    let rollup = user_activity(&events);
    let timeline = TimelineSummary {
        total_duration_minutes: duration,
        average_response_minutes: average_response_time(&times),
        message_velocity: message_velocity(events.len(), duration),
        high_activity_periods: find_high_activity_periods(
            &events,
            cfg.timeline.window_minutes,
            cfg.timeline.min_messages,
        ),
        gaps: find_conversation_gaps(&events, cfg.timeline.min_gap_minutes),
        most_active_user: most_active_user(&rollup),
        user_activity: rollup,
        events,
    };

    let participants = distinct_participants(messages);
    let mention_count = messages
        .iter()
        .map(|m| extract_mentions(m.text_or_empty()).len())
        .sum();

    let urgency = urgency_score(&full_text, messages.len(), &cfg.scoring.urgency_keywords);
    let stats = ThreadStats {
        message_count: messages.len(),
        participant_count: participants.len(),
        mention_count,
        urgency,
        last_activity: timeline.events.last().map(|e| e.timestamp),
    };
    let importance = importance_score(&stats, &keywords, context, &cfg.scoring);

    tracing::info!(
        messages = messages.len(),
        keywords = keywords.keywords.len(),
        action_items = action_items.len(),
        urgency,
        importance,
        "Thread analysis complete"
    );

    ThreadAnalysis {
        message_count: messages.len(),
        participants,
        mention_count,
        keywords,
        action_items,
        timeline,
        urgency,
        urgency_level: UrgencyLevel::from_score(urgency),
        importance,
    }
}

/// Reduce an analysis to the profile relatedness scoring consumes.
pub fn thread_profile(id: &str, analysis: &ThreadAnalysis) -> ThreadProfile {
    ThreadProfile {
        id: id.to_string(),
        keywords: analysis.keywords.keywords.clone(),
        participants: analysis.participants.clone(),
        last_activity: analysis.timeline.events.last().map(|e| e.timestamp),
        urgency_level: analysis.urgency_level,
        message_count: analysis.message_count,
        has_action_items: !analysis.action_items.is_empty(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedThread {
    pub id: String,
    pub importance: f64,
    pub urgency: f64,
    pub message_count: usize,
}

/// Analyze many threads in parallel and order them by importance. Each
/// thread is an independent pure call; rayon only fans them out.
pub fn rank_threads(
    threads: &[(String, Vec<ThreadMessage>)],
    cfg: &AnalysisConfig,
) -> Vec<RankedThread> {
    let mut ranked: Vec<RankedThread> = threads
        .par_iter()
        .map(|(id, messages)| {
            let analysis = analyze_thread(messages, cfg);
            RankedThread {
                id: id.clone(),
                importance: analysis.importance,
                urgency: analysis.urgency,
                message_count: analysis.message_count,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.partial_cmp(&a.importance).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

fn distinct_participants(messages: &[ThreadMessage]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut users = Vec::new();
    for message in messages {
        if let Some(user) = &message.user {
            if seen.insert(user.clone()) {
                users.push(user.clone());
            }
        }
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{fixture_thread, message_at};

    fn cfg() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn test_analyze_fixture_thread() {
        let analysis = analyze_thread(&fixture_thread(), &cfg());
        assert_eq!(analysis.message_count, 5);
        assert_eq!(analysis.participants, vec!["U1", "U2", "U3"]);
        assert!(analysis.keywords.keywords.iter().any(|k| k == "deploy"));
        // "urgent: rollback first..." (fix) and "<@U2> please review..." qualify
        assert_eq!(analysis.action_items.len(), 2);
        assert_eq!(analysis.mention_count, 1);
        assert!(analysis.urgency > 0.0);
        assert!(analysis.importance > 0.0);
        assert!(analysis.timeline.total_duration_minutes > 0.0);
    }

    #[test]
    fn test_empty_thread_is_total() {
        let analysis = analyze_thread(&[], &cfg());
        assert_eq!(analysis.message_count, 0);
        assert!(analysis.participants.is_empty());
        assert!(analysis.keywords.keywords.is_empty());
        assert!(analysis.action_items.is_empty());
        assert!(analysis.timeline.events.is_empty());
        assert_eq!(analysis.timeline.average_response_minutes, 0.0);
        assert_eq!(analysis.urgency, 0.0);
    }

    #[test]
    fn test_profile_mirrors_analysis() {
        let analysis = analyze_thread(&fixture_thread(), &cfg());
        let profile = thread_profile("t1", &analysis);
        assert_eq!(profile.id, "t1");
        assert_eq!(profile.message_count, 5);
        assert!(profile.has_action_items);
        assert_eq!(profile.participants, analysis.participants);
    }

    #[test]
    fn test_rank_threads_orders_by_importance() {
        let quiet = vec![message_at(0.0, "U1", "lunch plans anyone")];
        let busy: Vec<_> = (0..25)
            .map(|i| message_at(i as f64 * 60.0, &format!("U{}", i % 6), "urgent: fix the deploy"))
            .collect();
        let threads = vec![("quiet".to_string(), quiet), ("busy".to_string(), busy)];
        let ranked = rank_threads(&threads, &cfg());
        assert_eq!(ranked[0].id, "busy");
        assert!(ranked[0].importance > ranked[1].importance);
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = analyze_thread(&fixture_thread(), &cfg());
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"keywords\""));
        assert!(json.contains("\"urgency_level\""));
    }
}
