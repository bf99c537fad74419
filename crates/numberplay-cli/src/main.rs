#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::config::{CliArgs, SearchConfig};
use cli::output::write_report;
use cli::telemetry::init_telemetry;
use std::time::Instant;

// mimalloc keeps allocation cheap while workers churn through big integers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = SearchConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let started = Instant::now();
    let report = cli::run(&config)?;
    tracing::info!("Search finished in {:?}", started.elapsed());

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &report, config.format)
}

fn log_startup_info(config: &SearchConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting search with full config: {:#?}", config);
    } else {
        tracing::info!("Starting {:?} with {} workers", config.search, config.num_workers);
    }
}
