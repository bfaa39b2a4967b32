//! Spotify Web API HTTP client
//!
//! Handles communication with the Spotify Web API.
//! See: https://developer.spotify.com/documentation/web-api
//!
//! The "several tracks" / "several artists" endpoints take at most 50 IDs
//! per call and answer positionally: one slot per ID, `null` if unknown.
//! Callers are responsible for batching and pacing.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::auth::{Credentials, TOKEN_URL, TokenProvider};
use super::{adapter, dto};
use crate::enrichment::domain::{ArtistKey, EnrichmentError, GenreTag, TrackAttributes, TrackKey};

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Spotify API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    auth: TokenProvider,
}

impl SpotifyClient {
    /// Create a new client
    ///
    /// `timeout` bounds every HTTP request, including token requests.
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, EnrichmentError> {
        Self::with_base_urls(credentials, timeout, API_BASE_URL, TOKEN_URL)
    }

    /// Create a client against custom endpoints (tests, proxies)
    pub fn with_base_urls(
        credentials: Credentials,
        timeout: Duration,
        base_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            auth: TokenProvider::new(credentials, token_url),
        })
    }

    /// Fetch a token to verify the credentials work
    pub async fn authenticate(&self) -> Result<(), EnrichmentError> {
        self.auth.bearer(&self.http_client).await.map(|_| ())
    }

    /// Look up up to 50 tracks; one slot per key, `None` if unknown
    pub async fn get_tracks(
        &self,
        keys: &[TrackKey],
    ) -> Result<Vec<Option<TrackAttributes>>, EnrichmentError> {
        let url = self.several_url("tracks", keys.iter().map(TrackKey::as_str));
        let response: dto::TracksResponse = self.get_json(&url).await?;
        Ok(adapter::to_track_slots(response))
    }

    /// Look up up to 50 artists; one slot per key, `None` if unknown
    pub async fn get_artists(
        &self,
        keys: &[ArtistKey],
    ) -> Result<Vec<Option<Vec<GenreTag>>>, EnrichmentError> {
        let url = self.several_url("artists", keys.iter().map(ArtistKey::as_str));
        let response: dto::ArtistsResponse = self.get_json(&url).await?;
        Ok(adapter::to_genre_slots(response))
    }

    fn several_url<'a>(&self, endpoint: &str, ids: impl Iterator<Item = &'a str>) -> String {
        let ids: Vec<&str> = ids.collect();
        format!(
            "{}/{}?ids={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&ids.join(","))
        )
    }

    /// Send an authenticated GET and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, EnrichmentError> {
        let token = self.auth.bearer(&self.http_client).await?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            // Expired or revoked; the next attempt fetches a fresh one
            self.auth.invalidate().await;
            return Err(EnrichmentError::Auth("access token rejected".to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(EnrichmentError::ApiError(error.error.message));
            }
            return Err(EnrichmentError::ApiError(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
