//! Chart enrichment and credential check commands.

use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::catalog;
use crate::config::Config;
use crate::enrichment::{self, EnrichmentService, EnrichmentSummary, SpotifyClient};

/// Command-line overrides for an enrichment run
#[derive(Debug, Clone, Default)]
pub struct EnrichArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub column: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub batch_size: Option<usize>,
    pub pacing_delay_ms: Option<u64>,
}

impl EnrichArgs {
    /// Fold the overrides into the loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ref input) = self.input {
            config.files.input = input.clone();
        }
        if let Some(ref output) = self.output {
            config.files.output = output.clone();
        }
        if let Some(ref column) = self.column {
            config.files.uri_column = column.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.enrichment.batch_size = batch_size;
        }
        if let Some(delay) = self.pacing_delay_ms {
            config.enrichment.pacing_delay_ms = delay;
        }
        config
    }
}

/// Enrich every unique track URI in the input file and write the results
pub fn cmd_enrich(rt: &Runtime, config: Config, args: &EnrichArgs) -> anyhow::Result<()> {
    let config = args.apply(config);

    // Everything fatal is checked before the first API call
    let credentials = config
        .credentials
        .resolve(args.client_id.as_deref(), args.client_secret.as_deref())?;
    let options = config.enrichment.lookup_options()?;

    tracing::info!("Loading master dataset...");
    let references = catalog::read_references(&config.files.input, &config.files.uri_column)?;

    let client = SpotifyClient::new(credentials, config.enrichment.request_timeout())?;
    let pacing_delay = config.enrichment.pacing_delay();

    let outcome = rt.block_on(async {
        client.authenticate().await?;
        let service = EnrichmentService::new(client, options, pacing_delay);
        Ok::<_, enrichment::EnrichmentError>(service.run(&references).await)
    })?;

    catalog::write_records(&config.files.output, &outcome.records)?;

    tracing::info!("Enrichment complete.");
    print_summary(&outcome.summary, &config.files.output);
    Ok(())
}

/// Check that the configured credentials can obtain an access token
pub fn cmd_check_credentials(
    rt: &Runtime,
    config: &Config,
    client_id: Option<&str>,
    client_secret: Option<&str>,
) -> anyhow::Result<()> {
    println!("Checking Spotify credentials...\n");

    let credentials = match config.credentials.resolve(client_id, client_secret) {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("✗ {}", e);
            println!("  Create an app at: https://developer.spotify.com/dashboard");
            anyhow::bail!("credentials not configured");
        }
    };

    println!("  Client ID: {}", credentials.client_id);

    let client = SpotifyClient::new(credentials, config.enrichment.request_timeout())?;
    match rt.block_on(client.authenticate()) {
        Ok(()) => {
            println!("✓ Access token obtained");
            Ok(())
        }
        Err(e) => {
            println!("✗ Authentication failed: {}", e);
            Err(e.into())
        }
    }
}

fn print_summary(summary: &EnrichmentSummary, output: &std::path::Path) {
    println!();
    println!("✓ Enriched {} tracks", summary.references);
    println!(
        "  Resolved:    {}/{} track IDs",
        summary.tracks_found, summary.track_keys
    );
    println!(
        "  Artists:     {}/{} with records",
        summary.artists_found, summary.artists
    );
    println!("  With genres: {}", summary.records_with_genres);
    if summary.failed_batches > 0 {
        println!("  ⚠ {} API batches failed (rows kept with empty fields)", summary.failed_batches);
    }
    println!("  Output:      {}", output.display());
}
