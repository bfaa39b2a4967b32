//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\chart-enricher\config.toml
//! - macOS: ~/Library/Application Support/chart-enricher/config.toml
//! - Linux: ~/.config/chart-enricher/config.toml
//!
//! Every setting has a default, so the file is optional. Credentials are
//! usually supplied through `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`
//! instead; the CLI gives those precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::enrichment::{BatchSize, Credentials, LookupOptions, RetryPolicy};
use crate::error::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: CredentialsConfig,

    /// Provider lookup settings
    pub enrichment: EnrichmentSettings,

    /// Input/output locations
    pub files: FilesConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Provider lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentSettings {
    /// IDs per provider call (1-50)
    pub batch_size: usize,

    /// Pause between consecutive batches
    pub pacing_delay_ms: u64,

    /// Upper bound on a single provider request
    pub request_timeout_secs: u64,

    /// Attempts per batch, including the first
    pub max_attempts: u32,

    /// Delay before the first retry; doubles afterwards
    pub retry_backoff_ms: u64,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            batch_size: 50,
            pacing_delay_ms: 200,
            request_timeout_secs: 10,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl EnrichmentSettings {
    /// Validate and convert into pipeline options.
    pub fn lookup_options(&self) -> Result<LookupOptions> {
        let batch_size =
            BatchSize::new(self.batch_size).map_err(|e| Error::config(e.to_string()))?;

        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be at least 1"));
        }

        Ok(LookupOptions {
            batch_size,
            request_timeout: self.request_timeout(),
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_millis(self.retry_backoff_ms),
            ),
        })
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Input/output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Chart table to read references from
    pub input: PathBuf,

    /// Where to write enriched tracks
    pub output: PathBuf,

    /// Column holding track URIs
    pub uri_column: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("spotify_charts_master.csv"),
            output: PathBuf::from("spotify_enriched_tracks.csv"),
            uri_column: "uri".to_string(),
        }
    }
}

impl CredentialsConfig {
    /// Pick the first available ID and secret (overrides first), or fail.
    pub fn resolve(
        &self,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<Credentials> {
        let id = client_id
            .or(self.client_id.as_deref())
            .filter(|s| !s.is_empty());
        let secret = client_secret
            .or(self.client_secret.as_deref())
            .filter(|s| !s.is_empty());

        match (id, secret) {
            (Some(id), Some(secret)) => Ok(Credentials::new(id, secret)),
            _ => Err(Error::config(
                "Spotify credentials not found. \
                 Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET as environment variables.",
            )),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chart-enricher"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if the file doesn't exist.
pub fn load() -> Result<Config> {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    load_from(&path)
}

/// Load configuration from an explicit path
///
/// Unlike [`load`], a missing or malformed file is an error: the user asked for it.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let config = toml::from_str(&contents).map_err(|e| {
        Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
    })?;

    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save(config: &Config, path: &Path) -> std::result::Result<(), ConfigError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
