use anyhow::{Context, Result};
use bubbletea_rs::Program;
use clap::Parser;
use countdown_ring::{Config, Countdown};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "countdown-ring")]
#[command(about = "Countdown timer with an animated progress ring")]
struct Cli {
    /// Countdown length in seconds (overrides the config file)
    #[arg(long)]
    duration: Option<u64>,

    /// Tick interval in milliseconds (overrides the config file)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file; logging is off otherwise since the terminal
    /// belongs to the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(secs) = cli.duration {
        config.timer.default_duration_secs = secs;
    }
    if let Some(ms) = cli.tick_ms {
        config.timer.tick_interval_ms = ms;
    }
    config.install().context("invalid configuration")?;

    tracing::info!(
        duration_secs = Config::current().timer.default_duration_secs,
        tick_ms = Config::current().timer.tick_interval_ms,
        "starting countdown"
    );

    let program = Program::<Countdown>::builder()
        .alt_screen(true)
        .build()
        .context("building terminal program")?;
    program.run().await.context("running terminal program")?;

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
