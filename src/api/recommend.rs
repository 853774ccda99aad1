use std::sync::Arc;

use axum::{Extension, Json};

use crate::{
    api::ApiError,
    config::Config,
    spotify,
    types::{RecommendationsBody, RecommendationsRequest},
    warning,
};

/// POST `/api/get-recommendations` - requests up to 20 recommended tracks
/// seeded by the user's top artists and audio features. Missing inputs
/// fail fast before any network call; upstream failure is non-fatal to
/// the overall flow, the frontend may render a profile without
/// recommendations.
pub async fn get_recommendations(
    Extension(config): Extension<Arc<Config>>,
    Json(body): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsBody>, ApiError> {
    let (Some(access_token), Some(top_artists), Some(audio_features)) =
        (body.access_token, body.top_artists, body.audio_features)
    else {
        return Err(ApiError::MissingParameter("Missing required parameters"));
    };

    let features: Vec<_> = audio_features.into_iter().flatten().collect();

    // Empty seed inputs fail before any network call
    if top_artists.is_empty() || features.is_empty() {
        return Err(ApiError::MissingParameter("Missing required parameters"));
    }

    match spotify::recommend::get_recommendations(&config, &access_token, &top_artists, &features, false)
        .await
    {
        Ok(recommendations) => Ok(Json(RecommendationsBody { recommendations })),
        Err(e) => {
            warning!("Recommendation fetch error: {}", e);
            Err(ApiError::Recommendation(e))
        }
    }
}
