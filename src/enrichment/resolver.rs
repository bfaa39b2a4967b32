//! Batched resolution of track metadata and artist genres.
//!
//! Both resolvers share one driver: split keys into provider-sized batches,
//! call the provider once per batch (with a timeout and bounded retry), and
//! record a result for every requested key. A failed batch turns into misses
//! for its keys; it never aborts the run.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use super::batch::{self, BatchSize};
use super::domain::{ArtistKey, EnrichmentError, GenreTag, TrackAttributes, TrackKey};
use super::ordered::OrderedSet;
use super::pacing::{Pacer, RetryPolicy};
use super::traits::{ArtistLookup, TrackLookup};

/// Track key -> attributes; total over the keys that were requested.
pub type TrackMap = HashMap<TrackKey, TrackAttributes>;

/// Artist key -> genres (possibly empty); total over the keys that were requested.
pub type GenreMap = HashMap<ArtistKey, Vec<GenreTag>>;

/// How lookups are issued.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Keys per provider call
    pub batch_size: BatchSize,
    /// Upper bound on a single provider call
    pub request_timeout: Duration,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            batch_size: BatchSize::default(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Counters for one resolver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Distinct keys requested
    pub requested: usize,
    /// Keys the provider returned a record for
    pub found: usize,
    /// Keys recorded as misses (not found or in a failed batch)
    pub missed: usize,
    /// Provider batches issued
    pub batches: usize,
    /// Batches that failed after all retries
    pub failed_batches: usize,
}

/// Output of a resolver: a total mapping plus counters.
#[derive(Debug, Clone)]
pub struct Resolution<K, V> {
    pub entries: HashMap<K, V>,
    pub stats: ResolveStats,
}

/// Resolve track metadata for `keys`.
///
/// Every key ends up in the result; misses map to [`TrackAttributes::empty`].
pub async fn resolve_tracks<L>(
    lookup: &L,
    keys: &[TrackKey],
    options: &LookupOptions,
    pacer: &dyn Pacer,
) -> Resolution<TrackKey, TrackAttributes>
where
    L: TrackLookup + ?Sized,
{
    let (found, stats) =
        resolve_in_batches(keys, options, pacer, "track", |batch| lookup.lookup_tracks(batch))
            .await;

    let entries = found
        .into_iter()
        .map(|(key, record)| (key, record.unwrap_or_else(TrackAttributes::empty)))
        .collect();

    Resolution { entries, stats }
}

/// Resolve genre lists for `keys`.
///
/// Every key ends up in the result; misses map to an empty list.
pub async fn resolve_genres<L>(
    lookup: &L,
    keys: &[ArtistKey],
    options: &LookupOptions,
    pacer: &dyn Pacer,
) -> Resolution<ArtistKey, Vec<GenreTag>>
where
    L: ArtistLookup + ?Sized,
{
    let (found, stats) =
        resolve_in_batches(keys, options, pacer, "artist", |batch| lookup.lookup_artists(batch))
            .await;

    let entries = found
        .into_iter()
        .map(|(key, genres)| (key, genres.unwrap_or_default()))
        .collect();

    Resolution { entries, stats }
}

/// Union of artist keys across `track_order`, in first-seen order.
///
/// Iterates the ordered key list rather than the map so the artist batches
/// are the same on every run.
pub fn referenced_artists(track_order: &[TrackKey], tracks: &TrackMap) -> Vec<ArtistKey> {
    let mut artists = OrderedSet::new();
    for key in track_order {
        if let Some(attributes) = tracks.get(key) {
            artists.extend(attributes.artist_keys.iter().cloned());
        }
    }
    artists.into_vec()
}

async fn resolve_in_batches<'k, K, R, F, Fut>(
    keys: &'k [K],
    options: &LookupOptions,
    pacer: &dyn Pacer,
    kind: &'static str,
    mut call: F,
) -> (HashMap<K, Option<R>>, ResolveStats)
where
    K: Clone + Eq + Hash + fmt::Display,
    F: FnMut(&'k [K]) -> Fut,
    Fut: Future<Output = Result<Vec<Option<R>>, EnrichmentError>>,
{
    let mut resolved: HashMap<K, Option<R>> = HashMap::with_capacity(keys.len());
    let mut stats = ResolveStats::default();

    let total = batch::batches(keys, options.batch_size).len();
    for (index, batch) in batch::batches(keys, options.batch_size).enumerate() {
        if index > 0 {
            pacer.pause().await;
        }
        stats.batches += 1;

        match fetch_batch(batch, options, &mut call).await {
            Ok(records) => {
                for (key, record) in batch.iter().zip(records) {
                    resolved.insert(key.clone(), record);
                }
                tracing::debug!(kind, batch = index + 1, total, size = batch.len(), "Batch resolved");
            }
            Err(e) => {
                stats.failed_batches += 1;
                tracing::warn!(
                    kind,
                    batch = index + 1,
                    total,
                    first_key = %batch[0],
                    error = %e,
                    "Batch lookup failed, recording {} misses",
                    batch.len()
                );
                for key in batch {
                    resolved.entry(key.clone()).or_insert(None);
                }
            }
        }
    }

    stats.requested = resolved.len();
    stats.found = resolved.values().filter(|r| r.is_some()).count();
    stats.missed = stats.requested - stats.found;

    (resolved, stats)
}

/// One batch call with timeout, response-shape check and bounded retry.
async fn fetch_batch<'k, K, R, F, Fut>(
    batch: &'k [K],
    options: &LookupOptions,
    call: &mut F,
) -> Result<Vec<Option<R>>, EnrichmentError>
where
    F: FnMut(&'k [K]) -> Fut,
    Fut: Future<Output = Result<Vec<Option<R>>, EnrichmentError>>,
{
    let mut attempt = 1;
    loop {
        let result = match tokio::time::timeout(options.request_timeout, call(batch)).await {
            Ok(result) => result.and_then(|records| check_shape(batch.len(), records)),
            Err(_) => Err(EnrichmentError::Timeout(options.request_timeout)),
        };

        match result {
            Ok(records) => return Ok(records),
            Err(e) if e.is_transient() && attempt < options.retry.max_attempts() => {
                let delay = options.retry.backoff_for(attempt);
                tracing::debug!(attempt, ?delay, error = %e, "Retrying batch");
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Responses are positional; a length mismatch means we can't trust any slot.
fn check_shape<R>(expected: usize, records: Vec<Option<R>>) -> Result<Vec<Option<R>>, EnrichmentError> {
    if records.len() != expected {
        return Err(EnrichmentError::ContractViolation {
            expected: format!("{expected} records"),
            actual: format!("{} records", records.len()),
        });
    }
    Ok(records)
}
