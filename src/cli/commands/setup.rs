//! Config file scaffolding.

use std::path::Path;

use crate::config::{self, Config, ConfigError};

/// Write a default config file to `path` (or the OS config directory)
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    config::save(&Config::default(), &path)?;

    println!("✓ Wrote default config to {}", path.display());
    println!("  Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET, or fill in [credentials].");
    Ok(())
}
