//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If Spotify changes their response format, only this file and dto.rs
//! need to change.

use super::dto;
use crate::enrichment::domain::{ArtistKey, GenreTag, TrackAttributes};

/// Convert a tracks response into positional attribute slots
pub fn to_track_slots(response: dto::TracksResponse) -> Vec<Option<TrackAttributes>> {
    response
        .tracks
        .into_iter()
        .map(|track| track.map(to_attributes))
        .collect()
}

/// Convert an artists response into positional genre slots
pub fn to_genre_slots(response: dto::ArtistsResponse) -> Vec<Option<Vec<GenreTag>>> {
    response
        .artists
        .into_iter()
        .map(|artist| artist.map(to_genres))
        .collect()
}

/// Convert one track object to attributes
pub fn to_attributes(track: dto::Track) -> TrackAttributes {
    let album = track.album;

    // Artists without an ID (local files) can't be looked up
    let artist_keys = track
        .artists
        .into_iter()
        .filter_map(|artist| artist.id)
        .filter(|id| !id.is_empty())
        .map(ArtistKey::new)
        .collect();

    TrackAttributes {
        popularity: track.popularity,
        explicit: track.explicit,
        album_release_date: album.as_ref().and_then(|a| a.release_date.clone()),
        album_type: album.as_ref().and_then(|a| a.album_type.clone()),
        album_cover_url: album.and_then(|a| a.images.into_iter().next().map(|i| i.url)),
        artist_keys,
        ..Default::default()
    }
    .with_duration_ms(track.duration_ms)
}

/// Genre list of an artist; a missing list means no genres
pub fn to_genres(artist: dto::Artist) -> Vec<GenreTag> {
    artist.genres.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(json: &str) -> dto::Track {
        serde_json::from_str(json).expect("valid track json")
    }

    #[test]
    fn test_full_track_conversion() {
        let attrs = to_attributes(track(
            r#"{
                "id": "t1",
                "duration_ms": 200000,
                "popularity": 81,
                "explicit": true,
                "album": {
                    "album_type": "single",
                    "release_date": "2020-01-10",
                    "images": [{"url": "https://img/640"}, {"url": "https://img/300"}]
                },
                "artists": [{"id": "a1"}, {"id": "a2"}]
            }"#,
        ));

        assert_eq!(attrs.duration_ms, Some(200000));
        assert_eq!(attrs.duration_sec, Some(200.0));
        assert_eq!(attrs.popularity, Some(81));
        assert_eq!(attrs.explicit, Some(true));
        assert_eq!(attrs.album_type.as_deref(), Some("single"));
        assert_eq!(attrs.album_release_date.as_deref(), Some("2020-01-10"));
        assert_eq!(attrs.album_cover_url.as_deref(), Some("https://img/640"));
        assert_eq!(attrs.artist_keys, vec![ArtistKey::new("a1"), ArtistKey::new("a2")]);
    }

    #[test]
    fn test_album_without_images_has_no_cover() {
        let attrs = to_attributes(track(r#"{"album": {"images": []}, "artists": []}"#));
        assert!(attrs.album_cover_url.is_none());
    }

    #[test]
    fn test_missing_album_and_duration() {
        let attrs = to_attributes(track(r#"{"popularity": 3}"#));
        assert!(attrs.album_type.is_none());
        assert!(attrs.album_release_date.is_none());
        assert!(attrs.duration_ms.is_none());
        assert!(attrs.duration_sec.is_none());
        assert!(attrs.artist_keys.is_empty());
    }

    #[test]
    fn test_artists_without_ids_are_skipped() {
        let attrs = to_attributes(track(
            r#"{"artists": [{"id": null, "name": "Local"}, {"id": "a9"}, {"name": "No Id"}]}"#,
        ));
        assert_eq!(attrs.artist_keys, vec![ArtistKey::new("a9")]);
    }

    #[test]
    fn test_slots_keep_positions() {
        let response: dto::TracksResponse =
            serde_json::from_str(r#"{"tracks": [null, {"popularity": 10}, null]}"#).unwrap();
        let slots = to_track_slots(response);
        assert_eq!(slots.len(), 3);
        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_ref().unwrap().popularity, Some(10));
        assert!(slots[2].is_none());
    }

    #[test]
    fn test_genre_slots() {
        let response: dto::ArtistsResponse = serde_json::from_str(
            r#"{"artists": [{"genres": ["rock", "indie"]}, {"genres": null}, null]}"#,
        )
        .unwrap();
        let slots = to_genre_slots(response);
        assert_eq!(slots[0].as_deref(), Some(&["rock".to_string(), "indie".to_string()][..]));
        assert_eq!(slots[1], Some(vec![]));
        assert_eq!(slots[2], None);
    }
}
