use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, instrument};

use crate::{
    api_error::{ApiError, ErrorResponse},
    app_state::AppState,
    extractor::ExtractedText,
    summarizer::SummarizeError,
    summary::dtos::{SummaryRequest, SummaryResponse},
};

/// Shorter extractions are treated as "nothing worth summarizing".
pub const MIN_CONTENT_CHARS: usize = 50;

#[utoipa::path(
    post,
    path = "/summary",
    tag = "summary",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary produced", body = SummaryResponse),
        (status = 400, description = "Invalid request, unreachable page or no usable content", body = ErrorResponse),
        (status = 404, description = "Video has no transcript", body = ErrorResponse),
        (status = 502, description = "Summarization backend failed", body = ErrorResponse),
        (status = 504, description = "Summarization backend timed out", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::BadRequest)?;

    let version = resolve_version(&state, payload.version)?;
    let text = load_article(&state, &payload.url).await?;
    if text.char_count() < MIN_CONTENT_CHARS {
        return Err(ApiError::ContentTooShort);
    }

    let summary = state.models.summarize(text.as_str(), &version).await?;
    info!(%version, url = %payload.url, "summary served");

    Ok(Json(SummaryResponse {
        summary,
        original: text.into_string(),
    }))
}

/// The requested version, or the first registered one. Checked before any I/O.
fn resolve_version(state: &AppState, requested: Option<String>) -> Result<String, ApiError> {
    let version = match requested {
        Some(version) => version,
        None => state
            .models
            .default_version()
            .ok_or_else(|| ApiError::BadRequest("No model version available".to_string()))?
            .to_string(),
    };

    if !state.models.contains(&version) {
        return Err(SummarizeError::UnsupportedVersion(version).into());
    }
    Ok(version)
}

/// Fetch `url` and extract its normalized text.
pub(crate) async fn load_article(state: &AppState, url: &str) -> Result<ExtractedText, ApiError> {
    let page = state.fetcher.fetch(url).await?;
    let text = state.extractor.extract(&page.body_utf8, url).await?;
    Ok(text)
}
