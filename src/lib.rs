//! Threadlens — deterministic conversation-thread intelligence.
//!
//! Single-crate library that turns an ordered message thread into structured
//! intelligence: bilingual keywords, action items, a timeline with activity
//! statistics, and composite urgency/importance/relatedness scores.
//!
//! Every entry point is a pure function over immutable input. Fetching
//! messages, resolving user ids, and formatting results for a wire protocol
//! are the caller's problem.

// Core types
pub mod config;
pub mod constants;
pub mod error;
pub mod message;

// Sub-systems
pub mod analysis;
pub mod language;

#[cfg(test)]
pub mod test_helpers;

// Re-exports for convenience
pub use analysis::report::{analyze_thread, rank_threads, ThreadAnalysis};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use message::ThreadMessage;
