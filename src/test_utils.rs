//! Test utilities and fixtures for chart-enricher tests.
//!
//! Provides deterministic track keys and attribute records so tests
//! don't have to spell out 22-character IDs.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{track_key, mock_attributes};
//!
//! let mock = MockCatalog::empty().with_track(track_key(1), mock_attributes(&["artist-1"]));
//! ```

use crate::enrichment::domain::{ArtistKey, TrackAttributes, TrackKey};
use crate::enrichment::identifier::TRACK_URI_PREFIX;

/// A valid 22-character track key unique to `n`.
pub fn track_key(n: usize) -> TrackKey {
    TrackKey::new(format!("trk{n:019}"))
}

/// `track_key(0..count)`
pub fn track_keys(count: usize) -> Vec<TrackKey> {
    (0..count).map(track_key).collect()
}

/// The URI form of `track_key(n)`.
pub fn track_uri(n: usize) -> String {
    format!("{TRACK_URI_PREFIX}{}", track_key(n))
}

/// Creates attributes with sensible defaults credited to `artists`.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let attrs = TrackAttributes {
///     popularity: Some(90),
///     ..mock_attributes(&["a1"])
/// };
/// ```
pub fn mock_attributes(artists: &[&str]) -> TrackAttributes {
    TrackAttributes {
        popularity: Some(50),
        explicit: Some(false),
        album_release_date: Some("2021-03-05".to_string()),
        album_type: Some("album".to_string()),
        album_cover_url: Some("https://i.scdn.co/image/test-cover".to_string()),
        artist_keys: artists.iter().map(|a| ArtistKey::new(*a)).collect(),
        ..Default::default()
    }
    .with_duration_ms(Some(200_000))
}
