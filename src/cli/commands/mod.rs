//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `enrich`: The enrichment run and credential check
//! - `setup`: Config file scaffolding

mod enrich;
mod setup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};

pub use enrich::{EnrichArgs, cmd_check_credentials, cmd_enrich};
pub use setup::cmd_init_config;

/// Chart Enricher CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (default: OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch track metadata and artist genres for every URI in a chart file
    Enrich {
        /// Chart CSV to read (default from config: spotify_charts_master.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to write enriched tracks (default from config: spotify_enriched_tracks.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Column holding track URIs
        #[arg(long)]
        column: Option<String>,
        /// Spotify client ID (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,
        /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
        client_secret: Option<String>,
        /// IDs per API call (1-50)
        #[arg(long)]
        batch_size: Option<usize>,
        /// Pause between API calls in milliseconds
        #[arg(long)]
        pacing_delay_ms: Option<u64>,
    },
    /// Verify that the Spotify credentials can obtain an access token
    CheckCredentials {
        /// Spotify client ID (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,
        /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
        client_secret: Option<String>,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Enrich {
            input,
            output,
            column,
            client_id,
            client_secret,
            batch_size,
            pacing_delay_ms,
        } => {
            let rt = Runtime::new()?;
            let config = load_config(cli)?;
            let args = EnrichArgs {
                input: input.clone(),
                output: output.clone(),
                column: column.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                batch_size: *batch_size,
                pacing_delay_ms: *pacing_delay_ms,
            };
            cmd_enrich(&rt, config, &args)
        }
        Commands::CheckCredentials {
            client_id,
            client_secret,
        } => {
            let rt = Runtime::new()?;
            let config = load_config(cli)?;
            cmd_check_credentials(&rt, &config, client_id.as_deref(), client_secret.as_deref())
        }
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), *force),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load the config named on the command line, or the default one
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    Ok(config)
}
