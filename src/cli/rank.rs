use anyhow::Result;
use std::path::PathBuf;

use threadlens::analysis::report::rank_threads;
use threadlens::AnalysisConfig;

pub fn run(files: &[PathBuf], config: &AnalysisConfig) -> Result<()> {
    let mut threads = Vec::new();
    for file in files {
        threads.push((super::thread_id(file), super::read_thread(file)?));
    }

    let ranked = rank_threads(&threads, config);

    println!("{:<28} {:>10} {:>8} {:>9}", "thread", "importance", "urgency", "messages");
    for entry in &ranked {
        let marker = if entry.importance >= config.scoring.importance_threshold { "*" } else { " " };
        println!(
            "{marker}{:<27} {:>10.3} {:>8.3} {:>9}",
            entry.id, entry.importance, entry.urgency, entry.message_count
        );
    }
    Ok(())
}
