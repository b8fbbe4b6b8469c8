use anyhow::Result;
use chrono::DateTime;
use std::path::Path;

use threadlens::{analyze_thread, AnalysisConfig};

pub fn run(file: &Path, pretty: bool, config: &AnalysisConfig) -> Result<()> {
    let messages = super::read_thread(file)?;
    let analysis = analyze_thread(&messages, config);

    if let Some(first) = analysis.timeline.events.first() {
        if let Some(started) = DateTime::from_timestamp(first.timestamp as i64, 0) {
            tracing::info!(
                thread = %super::thread_id(file),
                started = %started.to_rfc3339(),
                duration_minutes = analysis.timeline.total_duration_minutes,
                "Analyzed thread"
            );
        }
    }

    let json = if pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{json}");
    Ok(())
}
