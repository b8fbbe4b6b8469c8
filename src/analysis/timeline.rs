//! Timeline construction and activity statistics.
//!
//! Messages with unparseable timestamps are silently excluded here (they
//! still feed keyword and action extraction). Burst detection slides a
//! window from every event and resolves overlapping candidates with a
//! single left-to-right sweep: an overlapping candidate replaces the last
//! kept period only when it has strictly more messages. The sweep is
//! order-dependent on purpose; callers depend on its output shape.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::UNKNOWN_USER;
use crate::message::{parse_timestamp, ThreadMessage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Epoch seconds.
    pub timestamp: f64,
    pub user: String,
    pub text: String,
    /// Ordinal position in the source message sequence.
    pub index: usize,
    /// Minutes elapsed since the first valid event.
    pub minutes_from_start: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPeriod {
    /// Epoch seconds of the first event in the period.
    pub start: f64,
    /// Epoch seconds of the last event in the period.
    pub end: f64,
    pub message_count: usize,
    /// Distinct participants, first-seen order.
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationGap {
    pub start: f64,
    pub end: f64,
    pub duration_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    pub user: String,
    pub message_count: usize,
    /// Minutes between each of this user's messages and the message before it.
    pub response_times: Vec<f64>,
}

/// Convert a message sequence into time-ordered events. The anchor (t=0) is
/// the first parseable timestamp.
pub fn build_timeline_events(messages: &[ThreadMessage]) -> Vec<TimelineEvent> {
    let Some(anchor) = messages.iter().find_map(|m| parse_timestamp(&m.ts)) else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for (index, message) in messages.iter().enumerate() {
        let Some(timestamp) = parse_timestamp(&message.ts) else {
            continue;
        };
        events.push(TimelineEvent {
            timestamp,
            user: message.user.clone().unwrap_or_else(|| UNKNOWN_USER.to_string()),
            text: message.text_or_empty().to_string(),
            index,
            minutes_from_start: (timestamp - anchor) / 60.0,
        });
    }
    events
}

/// Minutes between each consecutive pair of events.
pub fn response_times(events: &[TimelineEvent]) -> Vec<f64> {
    events
        .windows(2)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp) / 60.0)
        .collect()
}

/// Arithmetic mean of `times`, 0 for an empty slice (never NaN).
pub fn average_response_time(times: &[f64]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    times.iter().sum::<f64>() / times.len() as f64
}

/// Minutes between first and last event, 0 for fewer than two events.
pub fn total_duration_minutes(events: &[TimelineEvent]) -> f64 {
    match (events.first(), events.last()) {
        (Some(first), Some(last)) if events.len() >= 2 => {
            (last.timestamp - first.timestamp) / 60.0
        }
        _ => 0.0,
    }
}

/// Messages per hour over the thread's duration, 0 when the duration is not
/// positive.
pub fn message_velocity(event_count: usize, duration_minutes: f64) -> f64 {
    let hours = duration_minutes / 60.0;
    if hours <= 0.0 {
        return 0.0;
    }
    event_count as f64 / hours
}

/// Detect activity bursts: for every event taken as a window start, gather
/// the events within `window_minutes` after it; a window holding at least
/// `min_messages` becomes a candidate period. Overlapping candidates are
/// resolved greedily left to right.
pub fn find_high_activity_periods(
    events: &[TimelineEvent],
    window_minutes: f64,
    min_messages: usize,
) -> Vec<ActivityPeriod> {
    let mut candidates = Vec::new();
    for (i, start_event) in events.iter().enumerate() {
        let window_end = start_event.timestamp + window_minutes * 60.0;
        let in_window: Vec<&TimelineEvent> = events[i..]
            .iter()
            .take_while(|e| e.timestamp <= window_end)
            .collect();
        if in_window.len() >= min_messages {
            candidates.push(ActivityPeriod {
                start: start_event.timestamp,
                end: in_window.last().map(|e| e.timestamp).unwrap_or(start_event.timestamp),
                message_count: in_window.len(),
                participants: distinct_users(&in_window),
            });
        }
    }

    candidates.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));

    // Greedy sweep with local replacement; not a globally optimal interval
    // schedule, and deliberately so.
    let mut kept: Vec<ActivityPeriod> = Vec::new();
    for candidate in candidates {
        match kept.last_mut() {
            Some(last) if candidate.start <= last.end => {
                if candidate.message_count > last.message_count {
                    *last = candidate;
                }
            }
            _ => kept.push(candidate),
        }
    }
    kept
}

/// Silences of at least `min_gap_minutes` between consecutive events.
pub fn find_conversation_gaps(
    events: &[TimelineEvent],
    min_gap_minutes: f64,
) -> Vec<ConversationGap> {
    events
        .windows(2)
        .filter_map(|pair| {
            let duration_minutes = (pair[1].timestamp - pair[0].timestamp) / 60.0;
            (duration_minutes >= min_gap_minutes).then(|| ConversationGap {
                start: pair[0].timestamp,
                end: pair[1].timestamp,
                duration_minutes,
            })
        })
        .collect()
}

/// Per-user message counts and response times, ordered by first post.
/// A user's response time is the delay behind the immediately preceding
/// event, whoever wrote it.
pub fn user_activity(events: &[TimelineEvent]) -> Vec<UserActivity> {
    let mut rollup: Vec<UserActivity> = Vec::new();
    for (i, event) in events.iter().enumerate() {
        let pos = match rollup.iter().position(|u| u.user == event.user) {
            Some(pos) => pos,
            None => {
                rollup.push(UserActivity {
                    user: event.user.clone(),
                    message_count: 0,
                    response_times: Vec::new(),
                });
                rollup.len() - 1
            }
        };
        let entry = &mut rollup[pos];
        entry.message_count += 1;
        if i > 0 {
            entry.response_times.push((event.timestamp - events[i - 1].timestamp) / 60.0);
        }
    }
    rollup
}

/// User with the strictly greatest message count; first seen wins ties.
pub fn most_active_user(activity: &[UserActivity]) -> Option<String> {
    let mut best: Option<&UserActivity> = None;
    for entry in activity {
        match best {
            Some(current) if entry.message_count <= current.message_count => {}
            _ => best = Some(entry),
        }
    }
    best.map(|u| u.user.clone())
}

fn distinct_users(events: &[&TimelineEvent]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut users = Vec::new();
    for event in events {
        if seen.insert(event.user.clone()) {
            users.push(event.user.clone());
        }
    }
    users
}
