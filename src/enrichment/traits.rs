//! Trait definitions for the provider lookups the pipeline depends on.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`SpotifyClient`](super::spotify::SpotifyClient),
//! while tests substitute an in-memory catalog.
//!
//! Both lookups are positional: the returned vector has one slot per
//! requested key, in the same order, with `None` meaning "not found".

use async_trait::async_trait;

use super::domain::{ArtistKey, EnrichmentError, GenreTag, TrackAttributes, TrackKey};

/// Batch track metadata lookup.
#[async_trait]
pub trait TrackLookup: Send + Sync {
    async fn lookup_tracks(
        &self,
        keys: &[TrackKey],
    ) -> Result<Vec<Option<TrackAttributes>>, EnrichmentError>;
}

/// Batch artist genre lookup.
#[async_trait]
pub trait ArtistLookup: Send + Sync {
    async fn lookup_artists(
        &self,
        keys: &[ArtistKey],
    ) -> Result<Vec<Option<Vec<GenreTag>>>, EnrichmentError>;
}

#[async_trait]
impl TrackLookup for super::spotify::SpotifyClient {
    async fn lookup_tracks(
        &self,
        keys: &[TrackKey],
    ) -> Result<Vec<Option<TrackAttributes>>, EnrichmentError> {
        self.get_tracks(keys).await
    }
}

#[async_trait]
impl ArtistLookup for super::spotify::SpotifyClient {
    async fn lookup_artists(
        &self,
        keys: &[ArtistKey],
    ) -> Result<Vec<Option<Vec<GenreTag>>>, EnrichmentError> {
        self.get_artists(keys).await
    }
}
