use anyhow::Result;
use std::path::{Path, PathBuf};

use threadlens::analysis::report::thread_profile;
use threadlens::analysis::scoring::find_related_threads;
use threadlens::{analyze_thread, AnalysisConfig};

pub fn run(
    target: &Path,
    candidates: &[PathBuf],
    threshold: Option<f64>,
    config: &AnalysisConfig,
) -> Result<()> {
    let target_analysis = analyze_thread(&super::read_thread(target)?, config);
    let target_profile = thread_profile(&super::thread_id(target), &target_analysis);

    let mut profiles = Vec::new();
    for file in candidates {
        let analysis = analyze_thread(&super::read_thread(file)?, config);
        profiles.push(thread_profile(&super::thread_id(file), &analysis));
    }

    let threshold = threshold.unwrap_or(config.scoring.similarity_threshold);
    let related = find_related_threads(
        &target_profile,
        &profiles,
        threshold,
        &config.scoring.related_signals,
    );

    tracing::info!(
        target = %target_profile.id,
        candidates = profiles.len(),
        related = related.len(),
        threshold,
        "Relatedness scan complete"
    );
    println!("{}", serde_json::to_string_pretty(&related)?);
    Ok(())
}
