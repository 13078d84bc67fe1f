//! Podrace terminal entry point.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use podrace_client::{DEFAULT_BASE_URL, HttpRaceService, ServiceConfig, SystemEnv};
use podrace_core::{RaceConfig, RaceService};
use podrace_harness::SimRaceService;
use podrace_tui::{Runtime, TerminalDriver, logging};

/// Podrace terminal client
#[derive(Parser, Debug)]
#[command(name = "podrace")]
#[command(about = "Pick a driver and a track, then race against the simulation service")]
#[command(version)]
struct Args {
    /// Race service base URL (for example http://localhost:3001)
    ///
    /// If not provided, races run against an in-process simulation.
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_BASE_URL)]
    server: Option<String>,

    /// Seed for the in-process simulation. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Countdown length in seconds before the race starts.
    #[arg(long, default_value_t = 3)]
    countdown: u32,

    /// Period between race status fetches, in milliseconds.
    #[arg(long, default_value_t = 500)]
    poll_interval_ms: u64,

    /// Write logs to this file. The terminal is never logged to.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init(path, &args.log_level)?;
    }

    let config = RaceConfig {
        countdown_seconds: args.countdown,
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        ..RaceConfig::default()
    };

    match args.server {
        Some(url) => {
            tracing::info!(%url, "using remote race service");
            let service = HttpRaceService::new(&ServiceConfig::new(url))?;
            run(service, config).await
        },
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            tracing::info!(seed, "using in-process race simulation");
            run(SimRaceService::with_seed(seed), config).await
        },
    }
}

async fn run<S: RaceService>(
    service: S,
    config: RaceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let driver = TerminalDriver::new()?;
    Runtime::new(driver, service, SystemEnv::new(), config).run().await?;
    Ok(())
}
