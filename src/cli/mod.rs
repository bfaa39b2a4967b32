//! Command-line interface for chart-enricher.
//!
//! This module provides CLI commands for enriching chart track references
//! and managing credentials/configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
