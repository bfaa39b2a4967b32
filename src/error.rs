//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`EnrichmentError`](crate::enrichment::EnrichmentError))
//!   for detailed handling
//! - Everything here is fatal; per-track lookup misses never become an `Error`
//!
//! # Example
//!
//! ```ignore
//! use chart_enricher::error::{Error, Result};
//!
//! fn load(path: &Path) -> Result<Vec<TrackReference>> {
//!     let refs = catalog::read_references(path, "uri")?; // CSV errors auto-convert
//!     Ok(refs)
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input or failed CSV write
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Provider error that prevents the run from starting
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] crate::enrichment::EnrichmentError),

    /// Required input column is absent
    #[error("Input file {path} must contain a '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    /// File not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a missing-column error.
    pub fn missing_column(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, csv::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Csv(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/data/charts.csv");
        assert!(err.to_string().contains("/data/charts.csv"));
    }

    #[test]
    fn test_missing_column_error() {
        let err = Error::missing_column("charts.csv", "uri");
        let msg = err.to_string();
        assert!(msg.contains("charts.csv"));
        assert!(msg.contains("'uri'"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config("batch size must be at least 1").context("while loading config");
        let msg = err.to_string();
        assert!(msg.contains("while loading config"));
        assert!(msg.contains("batch size"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::config("test"));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let err = result.with_context("writing output").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
    }
}
