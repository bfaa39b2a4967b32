//! Client-credentials authentication.
//!
//! Exchanges the app's client ID/secret for a bearer token and caches it
//! until shortly before it expires.
//! See: https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use tokio::sync::Mutex;

use super::dto;
use crate::enrichment::domain::EnrichmentError;

pub(super) const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens are refreshed this long before their stated expiry
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// App credentials for the client-credentials flow
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keep the secret out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn from_response(response: dto::TokenResponse, now: Instant) -> Self {
        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(EXPIRY_MARGIN);
        Self {
            access_token: response.access_token,
            expires_at: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Hands out bearer tokens, fetching a new one when needed.
pub(super) struct TokenProvider {
    credentials: Credentials,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub(super) fn new(credentials: Credentials, token_url: impl Into<String>) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            cached: Mutex::new(None),
        }
    }

    /// A valid access token, requesting a new one if the cached one is stale.
    pub(super) async fn bearer(&self, http: &reqwest::Client) -> Result<String, EnrichmentError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.access_token.clone());
        }

        let token = self.request_token(http).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    /// Drop the cached token (e.g. after the API rejected it).
    pub(super) async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn request_token(&self, http: &reqwest::Client) -> Result<CachedToken, EnrichmentError> {
        tracing::debug!("Requesting access token from {}", self.token_url);

        let response = http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::AuthError>().await {
                let detail = error.error_description.unwrap_or(error.error);
                return Err(EnrichmentError::Auth(detail));
            }
            return Err(EnrichmentError::Auth(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let token = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))?;

        Ok(CachedToken::from_response(token, Instant::now()))
    }
}
