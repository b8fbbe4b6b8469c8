pub mod analyze;
pub mod rank;
pub mod related;

use anyhow::{Context, Result};
use std::path::Path;

use threadlens::{AnalysisConfig, ThreadMessage};

/// Load configuration overrides, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Read a thread file: a JSON array of `{ts, user?, text?}` records.
pub fn read_thread(path: &Path) -> Result<Vec<ThreadMessage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let messages: Vec<ThreadMessage> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON message array", path.display()))?;
    Ok(messages)
}

/// Thread id derived from the file name.
pub fn thread_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("thread")
        .to_string()
}
