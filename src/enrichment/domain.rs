//! Internal domain models for catalog enrichment.
//!
//! These types are OUR types - they don't change when the Spotify API changes.
//! Provider responses get converted into these types via the adapter.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// A genre label as reported for an artist.
pub type GenreTag = String;

/// The input identifier exactly as supplied (e.g. a `uri` cell from a chart file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackReference(String);

impl TrackReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical provider track ID (22-character base62 string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackKey(String);

impl TrackKey {
    /// Wrap an already-canonical key. Use [`super::identifier::normalize`] for raw input.
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical provider artist ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtistKey(String);

impl ArtistKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Track metadata obtained from the provider.
///
/// Every field is optional. A lookup miss is represented by [`TrackAttributes::empty`],
/// never by an absent entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackAttributes {
    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Duration in seconds (fractional), derived from `duration_ms`
    pub duration_sec: Option<f64>,
    /// Popularity score (0-100)
    pub popularity: Option<u32>,
    /// Explicit lyrics flag
    pub explicit: Option<bool>,
    /// Album release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub album_release_date: Option<String>,
    /// Album type (album, single, compilation)
    pub album_type: Option<String>,
    /// URL of the first (largest) album cover image
    pub album_cover_url: Option<String>,
    /// Owning artists, in the provider's credit order
    pub artist_keys: Vec<ArtistKey>,
}

impl TrackAttributes {
    /// Attributes for a track the provider did not return.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build attributes from a millisecond duration, filling in the seconds field.
    pub fn with_duration_ms(mut self, duration_ms: Option<u64>) -> Self {
        self.duration_ms = duration_ms;
        self.duration_sec = duration_ms.map(|ms| ms as f64 / 1000.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One output row: a track reference plus everything we learned about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub uri: TrackReference,
    pub duration_ms: Option<u64>,
    pub duration_sec: Option<f64>,
    pub popularity: Option<u32>,
    pub explicit: Option<bool>,
    pub album_release_date: Option<String>,
    pub album_type: Option<String>,
    pub album_cover_url: Option<String>,
    /// Deduplicated genres joined with ", ", or `None` when there are none
    pub artist_genres: Option<String>,
}

/// Errors that can occur while talking to the metadata provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("API contract violation: expected {expected}, got {actual}")]
    ContractViolation { expected: String, actual: String },
}

impl EnrichmentError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::RateLimited | Self::Auth(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_uses_fractional_seconds() {
        let attrs = TrackAttributes::empty().with_duration_ms(Some(200_000));
        assert_eq!(attrs.duration_sec, Some(200.0));

        let attrs = TrackAttributes::empty().with_duration_ms(Some(212_345));
        assert_eq!(attrs.duration_sec, Some(212.345));
    }

    #[test]
    fn test_missing_duration_has_no_seconds() {
        let attrs = TrackAttributes::empty().with_duration_ms(None);
        assert!(attrs.duration_sec.is_none());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_empty_attributes() {
        assert!(TrackAttributes::empty().is_empty());

        let attrs = TrackAttributes {
            artist_keys: vec![ArtistKey::new("a1")],
            ..Default::default()
        };
        assert!(!attrs.is_empty());
    }

    #[test]
    fn test_transient_errors() {
        assert!(EnrichmentError::Network("reset".into()).is_transient());
        assert!(EnrichmentError::RateLimited.is_transient());
        assert!(EnrichmentError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(!EnrichmentError::Parse("bad json".into()).is_transient());
        assert!(
            !EnrichmentError::ContractViolation {
                expected: "2 items".into(),
                actual: "1 items".into(),
            }
            .is_transient()
        );
    }
}
