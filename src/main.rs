//! Chart Enricher - adds Spotify track metadata and artist genres to chart data.
//!
//! Reads the unique track URIs from a chart table, resolves them through the
//! Spotify Web API in rate-limited batches, and writes one enriched row per URI.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(format!("chart_enricher={level}").parse()?))
        .init();

    cli::run_command(&args)
}
