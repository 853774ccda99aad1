//! Generative-text (summarizer) client.
//!
//! Sends a capped, shaped subset of the aggregated library to the Gemini
//! `generateContent` endpoint and returns the free-form analysis text
//! verbatim. The response text is never parsed or validated beyond
//! extraction; errors here are summarizer errors, distinct from the
//! aggregation stage.

use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    config::Config,
    types::{AudioFeatures, SavedTrack},
};

/// At most this many shaped track records go into the prompt.
const PROMPT_TRACK_CAP: usize = 20;

/// One track record as presented to the summarizer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapedTrack {
    pub name: String,
    pub artist: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_features: Option<ShapedFeatures>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapedFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub tempo: f64,
}

/// Pairs each track with its feature record by position and reduces both
/// to the subset the summarizer sees, capped at 20 records. An absent
/// feature record is an empty attribute set, not an error.
pub fn shape_tracks(
    tracks: &[SavedTrack],
    audio_features: &[Option<AudioFeatures>],
) -> Vec<ShapedTrack> {
    tracks
        .iter()
        .enumerate()
        .take(PROMPT_TRACK_CAP)
        .map(|(i, item)| {
            let primary = item.track.artists.first();
            ShapedTrack {
                name: item.track.name.clone(),
                artist: primary
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| "Unknown Artist".to_string()),
                // Genres are often not available on track objects, so this
                // is frequently empty.
                genres: primary.map(|a| a.genres.clone()).unwrap_or_default(),
                audio_features: audio_features.get(i).and_then(|f| f.as_ref()).map(|f| {
                    ShapedFeatures {
                        danceability: f.danceability,
                        energy: f.energy,
                        valence: f.valence,
                        tempo: f.tempo,
                    }
                }),
            }
        })
        .collect()
}

fn build_prompt(shaped: &[ShapedTrack]) -> String {
    let music_data = serde_json::to_string_pretty(shaped).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Analyze the following list of songs and their audio features from a user's Spotify library.\n\
         Based on this data, create a concise and friendly musical profile for the user.\n\
         \n\
         Music Data (up to 20 songs):\n\
         {music_data}\n\
         \n\
         Please provide the analysis in the following format, as if you are speaking directly to the user:\n\
         \n\
         **Primary Genres:** Identify the top 2-3 genres that dominate their listening.\n\
         **Vibe Check:** Describe the overall mood and energy of their music in 1-2 sentences.\n\
         **Artist Style:** Briefly describe the type of artists they prefer.\n\
         **Musical Signature:** In 2-3 sentences, provide a summary of their unique musical taste, highlighting what makes it distinct."
    )
}

/// Requests a natural-language taste description for the supplied tracks.
///
/// Returns the generated text verbatim, or a summarizer error message on
/// non-2xx responses and malformed payloads.
pub async fn summarize(
    config: &Config,
    tracks: &[SavedTrack],
    audio_features: &[Option<AudioFeatures>],
) -> Result<String, String> {
    let shaped = shape_tracks(tracks, audio_features);
    let prompt = build_prompt(&shaped);

    let client = Client::new();
    let response = client
        .post(format!(
            "{url}?key={key}",
            url = &config.gemini_url,
            key = &config.gemini_api_key
        ))
        .json(&json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        }))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    let json: Value = response.json().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(format!(
            "Gemini API Error: {}",
            json["error"]["message"].as_str().unwrap_or("unknown error")
        ));
    }

    json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|text| text.to_string())
        .ok_or_else(|| "Malformed summarizer response".to_string())
}
