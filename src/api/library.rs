use std::sync::Arc;

use axum::{Extension, Json};

use crate::{
    api::ApiError,
    config::Config,
    spotify,
    types::{FetchMusicRequest, LibrarySnapshot},
    warning,
};

/// POST `/api/fetch-music` - aggregates the user's library into a
/// deduplicated snapshot with audio features and top artists.
pub async fn fetch_music(
    Extension(config): Extension<Arc<Config>>,
    Json(body): Json<FetchMusicRequest>,
) -> Result<Json<LibrarySnapshot>, ApiError> {
    let access_token = body
        .access_token
        .ok_or(ApiError::MissingParameter("Access Token is missing"))?;

    match spotify::library::aggregate(&config, &access_token).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            warning!("Fetch music error: {}", e);
            Err(ApiError::Upstream(
                "Failed to fetch music data from Spotify.".to_string(),
            ))
        }
    }
}
