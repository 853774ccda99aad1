use std::collections::HashMap;

use rand::{Rng, distr::Alphanumeric};

use crate::types::{SavedTrack, Track};

/// Random alphanumeric token for the OAuth `state` parameter.
pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Flattens per-playlist track lists, normalizes them to the nested
/// [`SavedTrack`] shape and appends them after the liked songs.
pub fn merge_track_sources(
    liked: Vec<SavedTrack>,
    playlist_tracks: Vec<Vec<Track>>,
) -> Vec<SavedTrack> {
    let mut merged = liked;
    merged.extend(
        playlist_tracks
            .into_iter()
            .flatten()
            .map(|track| SavedTrack { track }),
    );
    merged
}

/// Deduplicates by track id, keeping the first-seen position and the
/// last-seen entry for each id. A later playlist occurrence replaces an
/// earlier liked-song occurrence of the same id in place; only
/// id-derived fields can differ between the two, so the replacement is
/// observationally a no-op apart from that policy.
pub fn dedup_tracks(items: Vec<SavedTrack>) -> Vec<SavedTrack> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<SavedTrack> = Vec::new();

    for item in items {
        match index.get(&item.track.id) {
            Some(&at) => unique[at] = item,
            None => {
                index.insert(item.track.id.clone(), unique.len());
                unique.push(item);
            }
        }
    }
    unique
}

/// Joins track names for terse one-line logging, capped to avoid flooding
/// the terminal on large libraries.
pub fn preview_track_names(items: &[SavedTrack], cap: usize) -> String {
    let mut names: Vec<&str> = items
        .iter()
        .take(cap)
        .map(|i| i.track.name.as_str())
        .collect();
    if items.len() > cap {
        names.push("...");
    }
    names.join(", ")
}
