//! Join resolved tracks with their artists' genres into output records.

use super::domain::{EnrichedRecord, GenreTag, TrackAttributes, TrackReference};
use super::identifier;
use super::ordered::OrderedSet;
use super::resolver::{GenreMap, TrackMap};

/// Separator used when rendering a genre list as one cell
pub const GENRE_SEPARATOR: &str = ", ";

/// Build one record per reference, in input order.
///
/// Never fails: unrecognized references and lookup misses produce records
/// with empty fields.
pub fn aggregate(
    references: &[TrackReference],
    tracks: &TrackMap,
    genres: &GenreMap,
) -> Vec<EnrichedRecord> {
    let empty = TrackAttributes::empty();

    references
        .iter()
        .map(|reference| {
            let attributes = identifier::normalize(reference.as_str())
                .and_then(|key| tracks.get(&key))
                .unwrap_or(&empty);
            build_record(reference, attributes, genres)
        })
        .collect()
}

/// Genres of all artists on a track, deduplicated in first-seen order.
pub fn track_genres(attributes: &TrackAttributes, genres: &GenreMap) -> Vec<GenreTag> {
    let mut merged = OrderedSet::new();
    for artist in &attributes.artist_keys {
        if let Some(artist_genres) = genres.get(artist) {
            merged.extend(artist_genres.iter().cloned());
        }
    }
    merged.into_vec()
}

fn build_record(
    reference: &TrackReference,
    attributes: &TrackAttributes,
    genres: &GenreMap,
) -> EnrichedRecord {
    let merged = track_genres(attributes, genres);
    let artist_genres = (!merged.is_empty()).then(|| merged.join(GENRE_SEPARATOR));

    EnrichedRecord {
        uri: reference.clone(),
        duration_ms: attributes.duration_ms,
        duration_sec: attributes.duration_sec,
        popularity: attributes.popularity,
        explicit: attributes.explicit,
        album_release_date: attributes.album_release_date.clone(),
        album_type: attributes.album_type.clone(),
        album_cover_url: attributes.album_cover_url.clone(),
        artist_genres,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::domain::ArtistKey;
    use crate::test_utils::{mock_attributes, track_key, track_uri};

    fn genre_map(entries: &[(&str, &[&str])]) -> GenreMap {
        entries
            .iter()
            .map(|(artist, genres)| {
                (
                    ArtistKey::new(*artist),
                    genres.iter().map(|g| g.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_genres_deduplicated_across_artists() {
        let mut tracks = TrackMap::new();
        tracks.insert(track_key(1), mock_attributes(&["a1", "a2"]));
        let genres = genre_map(&[("a1", &["pop", "rock"]), ("a2", &["rock", "jazz"])]);

        let records = aggregate(&[TrackReference::new(track_uri(1))], &tracks, &genres);

        assert_eq!(records[0].artist_genres.as_deref(), Some("pop, rock, jazz"));
    }

    #[test]
    fn test_repeated_artist_contributes_once() {
        let mut tracks = TrackMap::new();
        tracks.insert(track_key(1), mock_attributes(&["a1", "a1"]));
        let genres = genre_map(&[("a1", &["pop"])]);

        let records = aggregate(&[TrackReference::new(track_uri(1))], &tracks, &genres);

        assert_eq!(records[0].artist_genres.as_deref(), Some("pop"));
    }

    #[test]
    fn test_miss_yields_empty_record() {
        let records = aggregate(
            &[TrackReference::new(track_uri(7))],
            &TrackMap::new(),
            &GenreMap::new(),
        );

        let record = &records[0];
        assert_eq!(record.uri.as_str(), track_uri(7));
        assert!(record.duration_ms.is_none());
        assert!(record.duration_sec.is_none());
        assert!(record.popularity.is_none());
        assert!(record.explicit.is_none());
        assert!(record.album_release_date.is_none());
        assert!(record.album_type.is_none());
        assert!(record.album_cover_url.is_none());
        assert!(record.artist_genres.is_none());
    }

    #[test]
    fn test_unrecognized_reference_still_emitted() {
        let references = vec![
            TrackReference::new("not-a-track"),
            TrackReference::new(track_uri(1)),
        ];
        let mut tracks = TrackMap::new();
        tracks.insert(track_key(1), mock_attributes(&[]));

        let records = aggregate(&references, &tracks, &GenreMap::new());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].uri.as_str(), "not-a-track");
        assert!(records[0].popularity.is_none());
        assert_eq!(records[1].popularity, Some(50));
    }

    #[test]
    fn test_artist_without_genres_gives_null_genre_string() {
        let mut tracks = TrackMap::new();
        tracks.insert(track_key(1), mock_attributes(&["a1"]));
        let genres = genre_map(&[("a1", &[])]);

        let records = aggregate(&[TrackReference::new(track_uri(1))], &tracks, &genres);

        assert!(records[0].artist_genres.is_none());
        assert_eq!(records[0].popularity, Some(50));
    }

    #[test]
    fn test_duplicate_references_each_get_a_record() {
        let references = vec![
            TrackReference::new(track_uri(1)),
            TrackReference::new(track_uri(1)),
        ];
        let mut tracks = TrackMap::new();
        tracks.insert(track_key(1), mock_attributes(&[]));

        let records = aggregate(&references, &tracks, &GenreMap::new());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn test_bare_key_reference_is_joined() {
        let mut tracks = TrackMap::new();
        tracks.insert(track_key(3), mock_attributes(&[]));

        let records = aggregate(
            &[TrackReference::new(track_key(3).as_str())],
            &tracks,
            &GenreMap::new(),
        );

        assert_eq!(records[0].uri.as_str(), track_key(3).as_str());
        assert_eq!(records[0].duration_sec, Some(200.0));
    }
}
