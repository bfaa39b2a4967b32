//! Enrichment service - orchestrates the catalog enrichment run
//!
//! This is the high-level API for enriching a list of track references:
//! 1. Normalize references to track keys (unrecognized ones are skipped)
//! 2. Resolve track metadata in batches
//! 3. Resolve genres for every artist those tracks credit
//! 4. Join everything into one record per input reference

use std::time::Duration;

use crate::enrichment::{
    aggregate::aggregate,
    domain::{EnrichedRecord, TrackKey, TrackReference},
    identifier,
    ordered::OrderedSet,
    pacing::{Pacer, SleepPacer},
    resolver::{self, LookupOptions},
    traits::{ArtistLookup, TrackLookup},
};

/// Aggregate counts for one run. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    /// Input references (output records)
    pub references: usize,
    /// Distinct recognizable track keys
    pub track_keys: usize,
    /// Track keys the provider returned metadata for
    pub tracks_found: usize,
    /// Distinct artists credited on resolved tracks
    pub artists: usize,
    /// Artists the provider returned a record for
    pub artists_found: usize,
    /// Output records that have at least one genre
    pub records_with_genres: usize,
    /// Provider batches that failed after retries (tracks + artists)
    pub failed_batches: usize,
}

/// Output of [`EnrichmentService::run`].
#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    pub records: Vec<EnrichedRecord>,
    pub summary: EnrichmentSummary,
}

/// Service for enriching track references from a metadata provider
pub struct EnrichmentService<C> {
    catalog: C,
    options: LookupOptions,
    pacer: Box<dyn Pacer>,
}

impl<C> EnrichmentService<C>
where
    C: TrackLookup + ArtistLookup,
{
    /// Create a service that sleeps `pacing_delay` between batches
    pub fn new(catalog: C, options: LookupOptions, pacing_delay: Duration) -> Self {
        Self::with_pacer(catalog, options, Box::new(SleepPacer::new(pacing_delay)))
    }

    /// Create a service with a custom pacing strategy
    pub fn with_pacer(catalog: C, options: LookupOptions, pacer: Box<dyn Pacer>) -> Self {
        Self {
            catalog,
            options,
            pacer,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Enrich `references`, returning exactly one record per reference in input order.
    pub async fn run(&self, references: &[TrackReference]) -> EnrichmentOutcome {
        let keys = unique_track_keys(references);
        tracing::info!(
            "Found {} unique tracks in {} references",
            keys.len(),
            references.len()
        );

        let tracks = resolver::resolve_tracks(
            &self.catalog,
            &keys,
            &self.options,
            &*self.pacer,
        )
        .await;
        tracing::info!(
            found = tracks.stats.found,
            missed = tracks.stats.missed,
            batches = tracks.stats.batches,
            "Track metadata fetched"
        );

        let artist_keys = resolver::referenced_artists(&keys, &tracks.entries);
        if tracks.stats.batches > 0 && !artist_keys.is_empty() {
            self.pacer.pause().await;
        }
        let genres = resolver::resolve_genres(
            &self.catalog,
            &artist_keys,
            &self.options,
            &*self.pacer,
        )
        .await;
        tracing::info!(
            artists = artist_keys.len(),
            found = genres.stats.found,
            batches = genres.stats.batches,
            "Artist genres fetched"
        );

        let records = aggregate(references, &tracks.entries, &genres.entries);

        let summary = EnrichmentSummary {
            references: references.len(),
            track_keys: keys.len(),
            tracks_found: tracks.stats.found,
            artists: artist_keys.len(),
            artists_found: genres.stats.found,
            records_with_genres: records.iter().filter(|r| r.artist_genres.is_some()).count(),
            failed_batches: tracks.stats.failed_batches + genres.stats.failed_batches,
        };

        if summary.failed_batches > 0 {
            tracing::warn!(
                "{} provider batches failed; their keys were recorded as misses",
                summary.failed_batches
            );
        }

        EnrichmentOutcome { records, summary }
    }
}

/// Recognizable keys in first-seen order, without duplicates.
fn unique_track_keys(references: &[TrackReference]) -> Vec<TrackKey> {
    references
        .iter()
        .filter_map(|r| identifier::normalize(r.as_str()))
        .collect::<OrderedSet<_>>()
        .into_vec()
}
