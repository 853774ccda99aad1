use reqwest::Client;
use serde_json::Value;

use crate::{
    config::Config,
    types::{Artist, AudioFeatures, RecommendationsResponse, Track},
};

/// How many seed artists the recommendations request uses.
const SEED_ARTISTS: usize = 2;

/// How many seed tracks the recommendations request uses.
const SEED_TRACKS: usize = 3;

/// Maximum number of recommended tracks to request.
const RECOMMENDATIONS_LIMIT: u32 = 20;

/// Seed parameters derived from the user's top artists and audio features.
#[derive(Debug, Clone, PartialEq)]
pub struct Seeds {
    pub artist_ids: Vec<String>,
    pub track_ids: Vec<String>,
}

/// Averaged feature values, the alternative to seeding by track ids.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTargets {
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
}

/// Derives recommendation seeds: the first two artist ids and the first
/// three feature-record ids.
pub fn derive_seeds(top_artists: &[Artist], audio_features: &[AudioFeatures]) -> Seeds {
    Seeds {
        artist_ids: top_artists
            .iter()
            .take(SEED_ARTISTS)
            .map(|a| a.id.clone())
            .collect(),
        track_ids: audio_features
            .iter()
            .take(SEED_TRACKS)
            .map(|f| f.id.clone())
            .collect(),
    }
}

/// Arithmetic mean of energy, danceability and valence across all supplied
/// feature records. Returns `None` for an empty input.
pub fn average_targets(audio_features: &[AudioFeatures]) -> Option<FeatureTargets> {
    if audio_features.is_empty() {
        return None;
    }

    let n = audio_features.len() as f64;
    Some(FeatureTargets {
        energy: audio_features.iter().map(|f| f.energy).sum::<f64>() / n,
        danceability: audio_features.iter().map(|f| f.danceability).sum::<f64>() / n,
        valence: audio_features.iter().map(|f| f.valence).sum::<f64>() / n,
    })
}

/// Requests up to 20 recommended tracks seeded by the user's top artists
/// and audio features.
///
/// Fails fast with a parameter error before any network call when either
/// input list is empty. With `use_targets` the request carries averaged
/// target feature values instead of seed track ids. Upstream failure is a
/// recommendation error; callers treat it as non-fatal and may render a
/// profile with an empty recommendation list.
pub async fn get_recommendations(
    config: &Config,
    token: &str,
    top_artists: &[Artist],
    audio_features: &[AudioFeatures],
    use_targets: bool,
) -> Result<Vec<Track>, String> {
    if top_artists.is_empty() || audio_features.is_empty() {
        return Err("Missing required parameters".to_string());
    }

    let seeds = derive_seeds(top_artists, audio_features);

    let mut api_url = format!(
        "{uri}/recommendations?limit={limit}&seed_artists={artists}",
        uri = &config.api_url,
        limit = RECOMMENDATIONS_LIMIT,
        artists = seeds.artist_ids.join(",")
    );

    if use_targets {
        // average_targets is Some here, the empty case returned above
        if let Some(targets) = average_targets(audio_features) {
            api_url.push_str(&format!(
                "&target_energy={:.3}&target_danceability={:.3}&target_valence={:.3}",
                targets.energy, targets.danceability, targets.valence
            ));
        }
    } else {
        api_url.push_str(&format!("&seed_tracks={}", seeds.track_ids.join(",")));
    }

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        let json: Value = response.json().await.unwrap_or_default();
        return Err(json["error"]["message"]
            .as_str()
            .unwrap_or("Failed to fetch recommendations")
            .to_string());
    }

    let body = response
        .json::<RecommendationsResponse>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(body.tracks)
}
