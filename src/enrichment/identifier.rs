//! Track identifier normalization.
//!
//! Chart files reference tracks either by URI (`spotify:track:<id>`) or by the
//! bare base62 ID. Anything else is not something we can look up.

use super::domain::TrackKey;

/// URI scheme prefix for track references
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

/// Length of a bare provider track ID, in characters
pub const TRACK_KEY_LEN: usize = 22;

/// Convert a raw track reference into a canonical key.
///
/// Returns `None` for unrecognized shapes. That is not an error: the reference
/// is skipped during lookup but still gets an (empty) output row.
pub fn normalize(raw: &str) -> Option<TrackKey> {
    if let Some(key) = raw.strip_prefix(TRACK_URI_PREFIX) {
        return (!key.is_empty()).then(|| TrackKey::new(key));
    }

    if raw.chars().count() == TRACK_KEY_LEN {
        return Some(TrackKey::new(raw));
    }

    None
}
