use std::sync::Arc;

use axum::{Extension, Json};

use crate::{
    api::ApiError,
    config::Config,
    spotify,
    types::{AuthRequest, AuthResponse},
    warning,
};

/// POST `/api/spotify-auth` - exchanges an authorization code for an
/// access token. The upstream error detail is logged; the caller only
/// sees a generic message.
pub async fn spotify_auth(
    Extension(config): Extension<Arc<Config>>,
    Json(body): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let code = body
        .code
        .ok_or(ApiError::MissingParameter("Authorization code is missing"))?;

    match spotify::auth::exchange_code(&config, &code).await {
        Ok(token) => Ok(Json(AuthResponse {
            access_token: token.access_token,
        })),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Err(ApiError::Upstream(
                "Internal Server Error during authentication.".to_string(),
            ))
        }
    }
}
