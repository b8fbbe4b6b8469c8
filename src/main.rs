mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "threadlens", version, about = "Threadlens — conversation-thread intelligence")]
struct App {
    /// JSON file with configuration overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one thread file and print the full report as JSON
    Analyze {
        /// JSON array of {ts, user?, text?} records
        file: PathBuf,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Analyze thread files in parallel and rank them by importance
    Rank {
        files: Vec<PathBuf>,
    },
    /// Score candidate threads' relatedness to a target thread
    Related {
        target: PathBuf,
        candidates: Vec<PathBuf>,
        /// Minimum relatedness score to report (default from config)
        #[arg(long)]
        threshold: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = App::parse();
    let config = cli::load_config(app.config.as_deref())?;

    match app.command {
        Commands::Analyze { file, pretty } => cli::analyze::run(&file, pretty, &config),
        Commands::Rank { files } => cli::rank::run(&files, &config),
        Commands::Related { target, candidates, threshold } => {
            cli::related::run(&target, &candidates, threshold, &config)
        }
    }
}

/// Structured logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
