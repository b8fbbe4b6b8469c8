//! Shared test utilities — message builders and fixture threads.
//!
//! Available only under `#[cfg(test)]`.

use crate::message::ThreadMessage;

/// Message from a raw timestamp string.
pub fn message(ts: &str, user: &str, text: &str) -> ThreadMessage {
    ThreadMessage::new(ts, Some(user), Some(text))
}

/// Message from epoch seconds.
pub fn message_at(ts: f64, user: &str, text: &str) -> ThreadMessage {
    ThreadMessage::new(format!("{ts}"), Some(user), Some(text))
}

/// Small bilingual thread: three participants, one mention, a couple of
/// action lines, one urgency keyword, timestamps a few minutes apart.
pub fn fixture_thread() -> Vec<ThreadMessage> {
    vec![
        message_at(1000.0, "U1", "the deploy to staging failed again"),
        message_at(1120.0, "U2", "urgent: rollback first, deploy after the fix"),
        message_at(1240.0, "U3", "サーバーのログを確認しました"),
        message_at(1400.0, "U1", "<@U2> please review the rollback checklist"),
        message_at(1520.0, "U2", "working on it"),
    ]
}
