//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify Web API returns.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! We use the "several tracks" and "several artists" endpoints, which return
//! one slot per requested ID with `null` for IDs that don't exist.

use serde::{Deserialize, Serialize};

/// Response from `GET /v1/tracks?ids=...`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<Option<Track>>,
}

/// Full track object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Popularity (0-100)
    pub popularity: Option<u32>,
    pub explicit: Option<bool>,
    pub album: Option<Album>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

/// Simplified album object embedded in a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub id: Option<String>,
    pub name: Option<String>,
    /// album, single, or compilation
    pub album_type: Option<String>,
    /// YYYY, YYYY-MM, or YYYY-MM-DD depending on precision
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
    /// Cover art, widest first
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Artist credit on a track (local files have `id: null`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Response from `GET /v1/artists?ids=...`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

/// Full artist object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Genre tags, most relevant first. May be missing or null.
    pub genres: Option<Vec<String>>,
    pub popularity: Option<u32>,
}

/// Response from the client-credentials token endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Error body from the Web API: `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

/// Error body from the accounts service: `{"error": "...", "error_description": "..."}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthError {
    pub error: String,
    pub error_description: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_tracks_response() {
        let json = r#"{
            "tracks": [{
                "id": "4iV5W9uYEdYUVa79Axb7Rh",
                "name": "Test Song",
                "duration_ms": 207959,
                "popularity": 74,
                "explicit": false,
                "album": {
                    "id": "alb123",
                    "name": "Test Album",
                    "album_type": "album",
                    "release_date": "2019-05-17",
                    "release_date_precision": "day",
                    "images": [
                        {"url": "https://i.scdn.co/image/large", "height": 640, "width": 640},
                        {"url": "https://i.scdn.co/image/small", "height": 64, "width": 64}
                    ]
                },
                "artists": [
                    {"id": "art1", "name": "Artist One"},
                    {"id": "art2", "name": "Artist Two"}
                ]
            }]
        }"#;

        let response: TracksResponse =
            serde_json::from_str(json).expect("Should parse tracks response");

        let track = response.tracks[0].as_ref().unwrap();
        assert_eq!(track.duration_ms, Some(207959));
        assert_eq!(track.popularity, Some(74));
        assert_eq!(track.explicit, Some(false));
        let album = track.album.as_ref().unwrap();
        assert_eq!(album.album_type.as_deref(), Some("album"));
        assert_eq!(album.images.len(), 2);
        assert_eq!(track.artists.len(), 2);
    }

    #[test]
    fn test_parse_tracks_response_with_null_slot() {
        let json = r#"{"tracks": [null, {"id": "abc", "artists": []}]}"#;

        let response: TracksResponse =
            serde_json::from_str(json).expect("Should parse null slots");

        assert_eq!(response.tracks.len(), 2);
        assert!(response.tracks[0].is_none());
        assert!(response.tracks[1].as_ref().unwrap().album.is_none());
    }

    #[test]
    fn test_parse_local_artist_without_id() {
        let json = r#"{"tracks": [{"id": null, "artists": [{"id": null, "name": "Local"}]}]}"#;

        let response: TracksResponse = serde_json::from_str(json).expect("Should parse");
        let track = response.tracks[0].as_ref().unwrap();
        assert!(track.artists[0].id.is_none());
    }

    #[test]
    fn test_parse_artists_response() {
        let json = r#"{
            "artists": [
                {"id": "art1", "name": "Artist One", "genres": ["pop", "dance pop"], "popularity": 88},
                {"id": "art2", "name": "Artist Two", "genres": []},
                {"id": "art3", "name": "Artist Three"},
                null
            ]
        }"#;

        let response: ArtistsResponse =
            serde_json::from_str(json).expect("Should parse artists response");

        assert_eq!(response.artists.len(), 4);
        let first = response.artists[0].as_ref().unwrap();
        assert_eq!(first.genres.as_ref().unwrap(), &vec!["pop", "dance pop"]);
        assert!(response.artists[2].as_ref().unwrap().genres.is_none());
        assert!(response.artists[3].is_none());
    }

    #[test]
    fn test_parse_token_response() {
        let json = r#"{"access_token": "NgCXRK...MzYjw", "token_type": "Bearer", "expires_in": 3600}"#;

        let token: TokenResponse = serde_json::from_str(json).expect("Should parse token");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn test_parse_error_responses() {
        let json = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
        let error: ApiError = serde_json::from_str(json).expect("Should parse API error");
        assert_eq!(error.error.status, 401);

        let json = r#"{"error": "invalid_client", "error_description": "Invalid client secret"}"#;
        let error: AuthError = serde_json::from_str(json).expect("Should parse auth error");
        assert_eq!(error.error, "invalid_client");
        assert!(error.error_description.is_some());
    }
}
