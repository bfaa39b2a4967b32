//! Reading chart references and writing enriched track tables (CSV).

use std::path::Path;

use crate::enrichment::EnrichedRecord;
use crate::enrichment::TrackReference;
use crate::enrichment::ordered::OrderedSet;
use crate::error::{Error, Result, ResultExt};

/// Output columns, in [`EnrichedRecord`] field order
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "uri",
    "duration_ms",
    "duration_sec",
    "popularity",
    "explicit",
    "album_release_date",
    "album_type",
    "album_cover_url",
    "artist_genres",
];

/// Read the distinct, non-empty values of `column` from a CSV file, in first-seen order.
///
/// Fails if the file doesn't exist or has no such column.
pub fn read_references(path: &Path, column: &str) -> Result<Vec<TrackReference>> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(format!("Failed to open {}", path.display()))?;

    let index = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::missing_column(path, column))?;

    let mut references = OrderedSet::new();
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.with_context(format!("Failed to read {}", path.display()))?;
        rows += 1;
        match record.get(index) {
            Some(value) if !value.is_empty() => {
                references.insert(TrackReference::new(value));
            }
            _ => {}
        }
    }

    tracing::info!(
        "Loaded {} rows from {:?}, {} unique references",
        rows,
        path,
        references.len()
    );
    Ok(references.into_vec())
}

/// Write enriched records as CSV with a header row.
pub fn write_records(path: &Path, records: &[EnrichedRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(format!("Failed to create {}", path.display()))?;

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(format!("Failed to write {}", path.display()))?;

    tracing::info!("Output saved to {:?}", path);
    Ok(())
}
