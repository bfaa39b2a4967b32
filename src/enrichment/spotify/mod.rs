//! Spotify Web API integration
//!
//! Resolves track metadata and artist genres for chart entries.
//! Authentication uses the client-credentials flow (no user login).
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod auth;
mod client;

pub use auth::Credentials;
pub use client::SpotifyClient;
