//! # API Module
//!
//! HTTP endpoints served by the AudioAlign server. Four POST JSON
//! endpoints back the frontend flow - code-for-token exchange, library
//! aggregation, AI analysis, and recommendations - plus a health check and
//! the GET callback used by the CLI auth flow.
//!
//! Each frontend endpoint accepts and returns JSON, answers OPTIONS
//! preflight with permissive cross-origin headers (applied by the CORS
//! middleware in [`crate::server`]), and rejects other methods with 405
//! via axum's method routing.
//!
//! Failures map to one user-visible error message per stage, never a
//! stack trace: missing parameters are 400s raised before any outbound
//! call, upstream/summarizer/recommendation failures are 500s with
//! stage-specific messages.

mod analyze;
mod auth;
mod callback;
mod health;
mod library;
mod recommend;

pub use analyze::analyze_music;
pub use auth::spotify_auth;
pub use callback::callback;
pub use health::health;
pub use library::fetch_music;
pub use recommend::get_recommendations;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Stage-specific errors surfaced to the frontend.
#[derive(Debug)]
pub enum ApiError {
    /// A required request parameter is absent; raised before any call.
    MissingParameter(&'static str),
    /// A mandatory catalog or token-exchange fetch failed.
    Upstream(String),
    /// The generative-text stage failed.
    Summarizer(String),
    /// The recommendations request failed; non-fatal to the overall flow.
    Recommendation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingParameter(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Summarizer(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Recommendation(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
