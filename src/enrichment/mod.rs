//! Catalog enrichment - resolves chart track references into metadata and genres.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`spotify/dto.rs`) - Exact API response shapes
//! - **Adapter** - Converts DTOs to domain models
//! - **Client** - HTTP client for the provider
//! - **Traits** - Lookup seams the pipeline depends on (mockable)
//! - **Resolvers** - Batched, paced, failure-tolerant lookups
//! - **Aggregate** - Joins tracks to artist genres
//! - **Service** - High-level orchestration of the enrichment run
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{EnrichmentService, LookupOptions, SpotifyClient, Credentials};
//!
//! let client = SpotifyClient::new(Credentials::new(id, secret), Duration::from_secs(10))?;
//! let service = EnrichmentService::new(client, LookupOptions::default(), Duration::from_millis(200));
//!
//! let outcome = service.run(&references).await;
//! assert_eq!(outcome.records.len(), references.len());
//! ```

pub mod aggregate;
pub mod batch;
pub mod domain;
pub mod identifier;
pub mod ordered;
pub mod pacing;
pub mod resolver;
pub mod service;
pub mod spotify;
pub mod traits;

pub use batch::{BatchSize, BatchSizeError};
pub use domain::{EnrichedRecord, EnrichmentError, TrackReference};
pub use pacing::RetryPolicy;
pub use resolver::LookupOptions;
pub use service::{EnrichmentOutcome, EnrichmentService, EnrichmentSummary};
pub use spotify::{Credentials, SpotifyClient};
