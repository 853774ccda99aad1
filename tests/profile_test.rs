use chrono::Utc;
use tempfile::tempdir;

use audioalign::management::ProfileCache;
use audioalign::spotify::recommend::{average_targets, derive_seeds};
use audioalign::types::{Artist, AudioFeatures, Profile, Track};

fn create_artist(id: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: Vec::new(),
    }
}

fn create_features(id: &str, energy: f64, danceability: f64, valence: f64) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        danceability,
        energy,
        valence,
        tempo: 120.0,
    }
}

fn create_profile(timestamp: u64) -> Profile {
    Profile {
        analysis: "You lean towards upbeat, high-energy tracks.".to_string(),
        recommendations: vec![Track {
            id: "r1".to_string(),
            name: "Recommended".to_string(),
            artists: Vec::new(),
            album: None,
        }],
        timestamp,
    }
}

#[test]
fn test_seed_derivation() {
    let artists = vec![create_artist("A"), create_artist("B"), create_artist("C")];
    let features = vec![
        create_features("1", 0.5, 0.5, 0.5),
        create_features("2", 0.5, 0.5, 0.5),
        create_features("3", 0.5, 0.5, 0.5),
        create_features("4", 0.5, 0.5, 0.5),
    ];

    let seeds = derive_seeds(&artists, &features);
    assert_eq!(seeds.artist_ids, vec!["A", "B"]);
    assert_eq!(seeds.track_ids, vec!["1", "2", "3"]);
}

#[test]
fn test_seed_derivation_short_inputs() {
    let artists = vec![create_artist("A")];
    let features = vec![create_features("1", 0.5, 0.5, 0.5)];

    let seeds = derive_seeds(&artists, &features);
    assert_eq!(seeds.artist_ids, vec!["A"]);
    assert_eq!(seeds.track_ids, vec!["1"]);
}

#[test]
fn test_average_targets_is_arithmetic_mean() {
    let features = vec![
        create_features("1", 0.2, 0.4, 0.6),
        create_features("2", 0.4, 0.6, 0.8),
    ];

    let targets = average_targets(&features).unwrap();
    assert!((targets.energy - 0.3).abs() < 1e-9);
    assert!((targets.danceability - 0.5).abs() < 1e-9);
    assert!((targets.valence - 0.7).abs() < 1e-9);
}

#[test]
fn test_average_targets_empty_is_none() {
    assert!(average_targets(&[]).is_none());
}

#[test]
fn test_profile_freshness_window() {
    let now: u64 = 1_700_000_000;
    let day = 24 * 60 * 60;

    assert!(create_profile(now).is_fresh(now));
    assert!(create_profile(now - day + 1).is_fresh(now));
    assert!(!create_profile(now - day).is_fresh(now));
    assert!(!create_profile(now - 2 * day).is_fresh(now));
}

#[tokio::test]
async fn test_cache_round_trip_within_24_hours() {
    let dir = tempdir().unwrap();
    let cache = ProfileCache::at(dir.path().join("profile.json"));

    let profile = create_profile(Utc::now().timestamp() as u64);
    cache.store(&profile).await.unwrap();

    let loaded = cache.load().await.unwrap();
    assert_eq!(loaded, Some(profile));
}

#[tokio::test]
async fn test_cache_reads_nothing_after_24_hours() {
    let dir = tempdir().unwrap();
    let cache = ProfileCache::at(dir.path().join("profile.json"));

    let stale = create_profile(Utc::now().timestamp() as u64 - 25 * 60 * 60);
    cache.store(&stale).await.unwrap();

    // Expiry is a read-time filter: the file still exists, load yields nothing
    assert_eq!(cache.load().await.unwrap(), None);
    assert!(dir.path().join("profile.json").is_file());
}

#[tokio::test]
async fn test_cache_clear_removes_profile() {
    let dir = tempdir().unwrap();
    let cache = ProfileCache::at(dir.path().join("profile.json"));

    let profile = create_profile(Utc::now().timestamp() as u64);
    cache.store(&profile).await.unwrap();
    cache.clear().await.unwrap();

    assert_eq!(cache.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_cache_load_missing_file_is_none() {
    let dir = tempdir().unwrap();
    let cache = ProfileCache::at(dir.path().join("profile.json"));

    assert_eq!(cache.load().await.unwrap(), None);
}
