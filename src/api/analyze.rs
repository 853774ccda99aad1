use std::sync::Arc;

use axum::{Extension, Json};

use crate::{
    api::ApiError,
    config::Config,
    gemini,
    types::{AnalyzeRequest, AnalyzeResponse},
    warning,
};

/// POST `/api/analyze-music` - asks the summarizer for a natural-language
/// taste description of the supplied tracks. The text is passed through
/// verbatim; summarizer failures surface with a message distinct from
/// aggregation errors.
pub async fn analyze_music(
    Extension(config): Extension<Arc<Config>>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    match gemini::summarize(&config, &body.tracks, &body.audio_features).await {
        Ok(analysis) => Ok(Json(AnalyzeResponse { analysis })),
        Err(e) => {
            warning!("AI analysis failed: {}", e);
            Err(ApiError::Summarizer(
                "AI analysis failed. Please try again later.".to_string(),
            ))
        }
    }
}
