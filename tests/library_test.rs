use audioalign::gemini::shape_tracks;
use audioalign::types::{AudioFeatures, LibrarySnapshot, SavedTrack, Track, TrackArtist};
use audioalign::utils::*;

// Helper function to create a test track wrapped in the saved-track shape
fn create_saved_track(id: &str, name: &str, artist: &str) -> SavedTrack {
    SavedTrack {
        track: create_track(id, name, artist),
    }
}

fn create_track(id: &str, name: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![TrackArtist {
            id: Some(format!("{}_artist_id", id)),
            name: artist.to_string(),
            genres: Vec::new(),
        }],
        album: None,
    }
}

fn create_features(id: &str) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        danceability: 0.5,
        energy: 0.5,
        valence: 0.5,
        tempo: 120.0,
    }
}

fn ids(items: &[SavedTrack]) -> Vec<&str> {
    items.iter().map(|i| i.track.id.as_str()).collect()
}

#[test]
fn test_merge_keeps_liked_songs_before_playlist_tracks() {
    let liked = vec![
        create_saved_track("l1", "Liked One", "A"),
        create_saved_track("l2", "Liked Two", "B"),
    ];
    let playlists = vec![
        vec![create_track("p1", "Playlist One", "C")],
        vec![create_track("p2", "Playlist Two", "D")],
    ];

    let merged = merge_track_sources(liked, playlists);
    assert_eq!(ids(&merged), vec!["l1", "l2", "p1", "p2"]);
}

#[test]
fn test_dedup_removes_repeated_ids() {
    let liked = vec![
        create_saved_track("t1", "One", "A"),
        create_saved_track("t2", "Two", "B"),
        create_saved_track("t1", "One", "A"),
    ];
    let playlists = vec![vec![create_track("t2", "Two", "B")]];

    let input_len = 4;
    let unique = dedup_tracks(merge_track_sources(liked, playlists));

    // No repeated id and never longer than the sum of the inputs
    let mut seen = std::collections::HashSet::new();
    assert!(unique.iter().all(|i| seen.insert(i.track.id.clone())));
    assert!(unique.len() <= input_len);
    assert_eq!(unique.len(), 2);
}

#[test]
fn test_dedup_keeps_first_position_and_last_entry() {
    let items = vec![
        create_saved_track("t1", "One", "A"),
        create_saved_track("t2", "liked name", "B"),
        create_saved_track("t2", "playlist name", "B"),
        create_saved_track("t3", "Three", "C"),
    ];

    let unique = dedup_tracks(items);

    // t2 stays at its first-seen position but carries the later entry
    assert_eq!(ids(&unique), vec!["t1", "t2", "t3"]);
    assert_eq!(unique[1].track.name, "playlist name");
}

#[test]
fn test_liked_only_aggregation_yields_liked_set() {
    let liked = vec![
        create_saved_track("t1", "One", "A"),
        create_saved_track("t2", "Two", "B"),
    ];

    // No playlists retrievable: aggregation degrades to liked songs only
    let unique = dedup_tracks(merge_track_sources(liked.clone(), Vec::new()));
    assert_eq!(unique, liked);
}

#[test]
fn test_failed_playlist_fetch_leaves_set_unaffected() {
    let liked = vec![
        create_saved_track("t1", "One", "A"),
        create_saved_track("t2", "Two", "B"),
    ];
    let good_playlist = vec![create_track("t3", "Three", "C")];

    // A failed per-playlist fetch yields an empty list, not an error
    let with_failure = dedup_tracks(merge_track_sources(
        liked.clone(),
        vec![good_playlist.clone(), Vec::new()],
    ));
    let without = dedup_tracks(merge_track_sources(liked, vec![good_playlist]));

    assert_eq!(with_failure, without);
}

#[test]
fn test_merge_and_dedup_end_to_end() {
    // liked songs t1,t2 and one playlist containing t2,t3
    let liked = vec![
        create_saved_track("t1", "One", "A"),
        create_saved_track("t2", "Two", "B"),
    ];
    let playlists = vec![vec![
        create_track("t2", "Two", "B"),
        create_track("t3", "Three", "C"),
    ]];

    let unique = dedup_tracks(merge_track_sources(liked, playlists));
    assert_eq!(ids(&unique), vec!["t1", "t2", "t3"]);
}

#[test]
fn test_empty_snapshot_wire_format() {
    let snapshot = LibrarySnapshot::empty();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "tracks": [],
            "audioFeatures": [],
            "topArtists": []
        })
    );
}

#[test]
fn test_generate_state_token() {
    let token = generate_state_token();

    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let token2 = generate_state_token();
    assert_ne!(token, token2);
}

#[test]
fn test_shape_tracks_caps_at_twenty() {
    let tracks: Vec<SavedTrack> = (0..30)
        .map(|i| create_saved_track(&format!("t{}", i), &format!("Track {}", i), "A"))
        .collect();
    let features: Vec<Option<AudioFeatures>> = (0..30)
        .map(|i| Some(create_features(&format!("t{}", i))))
        .collect();

    let shaped = shape_tracks(&tracks, &features);
    assert_eq!(shaped.len(), 20);
    assert_eq!(shaped[0].name, "Track 0");
}

#[test]
fn test_shape_tracks_missing_features_are_empty() {
    let tracks = vec![
        create_saved_track("t1", "One", "A"),
        create_saved_track("t2", "Two", "B"),
    ];
    // Only the first track has a feature record
    let features = vec![Some(create_features("t1"))];

    let shaped = shape_tracks(&tracks, &features);
    assert_eq!(shaped.len(), 2);
    assert!(shaped[0].audio_features.is_some());
    assert!(shaped[1].audio_features.is_none());
}

#[test]
fn test_shape_tracks_without_artist() {
    let tracks = vec![SavedTrack {
        track: Track {
            id: "t1".to_string(),
            name: "Orphan".to_string(),
            artists: Vec::new(),
            album: None,
        },
    }];

    let shaped = shape_tracks(&tracks, &[]);
    assert_eq!(shaped[0].artist, "Unknown Artist");
    assert!(shaped[0].genres.is_empty());
}
