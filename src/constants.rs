// === Keyword extraction ===
pub const MAX_TOPICS: usize = 20;
pub const MIN_WORD_LENGTH: usize = 2;
/// Minimum length for a hiragana-only particle segment to count as a keyword.
pub const MIN_KANA_SEGMENT_LENGTH: usize = 3;
pub const MAX_IDENTIFIER_LENGTH: usize = 20;

pub const WEIGHT_NORMALIZED: f64 = 2.0;
pub const WEIGHT_UNCHANGED: f64 = 1.5;
pub const WEIGHT_SEGMENT: f64 = 1.0;
pub const WEIGHT_LATIN: f64 = 1.0;
pub const WEIGHT_PATTERN: f64 = 0.5;
pub const KANJI_BONUS: f64 = 0.5;
pub const KATAKANA_BONUS: f64 = 0.5;

// === Action items ===
pub const MAX_ACTION_TEXT_CHARS: usize = 500;
pub const MIN_ACTION_TEXT_CHARS: usize = 5;
pub const STATUS_COMPLETED_BASE_CONFIDENCE: f64 = 0.7;
pub const STATUS_IN_PROGRESS_BASE_CONFIDENCE: f64 = 0.6;
pub const STATUS_OPEN_CONFIDENCE: f64 = 0.5;
pub const STATUS_CONFIDENCE_STEP: f64 = 0.1;

// === Timeline ===
pub const WINDOW_MINUTES: f64 = 30.0;
pub const MIN_BURST_MESSAGES: usize = 3;
pub const MIN_GAP_MINUTES: f64 = 60.0;
pub const UNKNOWN_USER: &str = "unknown";

// === Scoring ===
pub const URGENCY_MATCH_WEIGHT: f64 = 0.2;
pub const URGENCY_VOLUME_BUMP: f64 = 0.3;
pub const URGENCY_VOLUME_FIRST: usize = 10;
pub const URGENCY_VOLUME_SECOND: usize = 20;

pub const IMPORTANCE_PARTICIPANT_WEIGHT: f64 = 0.2;
pub const IMPORTANCE_PARTICIPANT_SCALE: f64 = 10.0;
pub const IMPORTANCE_MESSAGE_WEIGHT: f64 = 0.3;
pub const IMPORTANCE_MESSAGE_SCALE: f64 = 20.0;
pub const IMPORTANCE_MENTION_WEIGHT: f64 = 0.1;
pub const IMPORTANCE_MENTION_SCALE: f64 = 5.0;
pub const IMPORTANCE_TFIDF_WEIGHT: f64 = 0.2;
pub const IMPORTANCE_TIME_DECAY_WEIGHT: f64 = 0.15;
pub const IMPORTANCE_ENGAGEMENT_WEIGHT: f64 = 0.25;
pub const ENGAGEMENT_SCALE: f64 = 5.0;
/// Time-decay window for the optional importance criterion (one week, hours).
pub const TIME_DECAY_WINDOW_HOURS: f64 = 168.0;

pub const RELATED_KEYWORD_WEIGHT: f64 = 0.4;
pub const RELATED_PARTICIPANT_WEIGHT: f64 = 0.3;
pub const RELATED_TEMPORAL_WEIGHT: f64 = 0.2;
pub const RELATED_TOPIC_WEIGHT: f64 = 0.1;
/// Keyword Jaccard only considers words longer than this.
pub const RELATED_MIN_WORD_CHARS: usize = 3;
pub const TEMPORAL_HORIZON_MINUTES: f64 = 7.0 * 24.0 * 60.0;

pub const SIMILARITY_THRESHOLD: f64 = 0.3;
pub const IMPORTANCE_THRESHOLD: f64 = 0.7;
