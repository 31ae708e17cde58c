use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sentinelfuse::{detect_anomalies, orchestrate_fusion, run_pipeline, Anomaly, Event, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "sentinelfuse",
    about = "Multi-domain anomaly detection and Bayesian correlation fusion",
    version,
    long_about = None
)]
struct Cli {
    /// Pipeline configuration (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score events against statistical and lexical baselines
    Detect {
        /// JSON file containing an array of normalized events
        #[arg(long)]
        events: PathBuf,
    },

    /// Fuse pre-computed anomalies into windowed correlation bundles
    Fuse {
        /// JSON file containing an array of normalized events
        #[arg(long)]
        events: PathBuf,

        /// JSON file containing an array of anomalies
        #[arg(long)]
        anomalies: PathBuf,
    },

    /// Run detection and fusion end to end
    Pipeline {
        /// JSON file containing an array of normalized events
        #[arg(long)]
        events: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::load_or_default(cli.config.as_deref());

    match cli.command {
        Commands::Detect { events } => {
            let events = load_events(&events)?;
            let anomalies = detect_anomalies(&events, &config.detection);
            println!("{}", serde_json::to_string_pretty(&anomalies)?);
        }
        Commands::Fuse { events, anomalies } => {
            let events = load_events(&events)?;
            let anomalies = load_anomalies(&anomalies)?;
            let bundles = orchestrate_fusion(&events, &anomalies, &config.fusion)?;
            println!("{}", serde_json::to_string_pretty(&bundles)?);
        }
        Commands::Pipeline { events } => {
            let events = load_events(&events)?;
            let bundles = run_pipeline(&events, &config)?;
            println!("{}", serde_json::to_string_pretty(&bundles)?);
        }
    }

    Ok(())
}

fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse events file: {}", path.display()))
}

fn load_anomalies(path: &Path) -> Result<Vec<Anomaly>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read anomalies file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse anomalies file: {}", path.display()))
}
