use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, instrument};

use crate::{
    api_error::{ApiError, ErrorResponse},
    app_state::AppState,
    feedback::dtos::FeedbackRequest,
    summarizer::SummarizeError,
    summary::handlers::load_article,
};

#[utoipa::path(
    post,
    path = "/feedback",
    tag = "feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 204, description = "Feedback recorded"),
        (status = 400, description = "Invalid feedback or unreachable page", body = ErrorResponse),
        (status = 404, description = "Video has no transcript", body = ErrorResponse),
        (status = 500, description = "Feedback could not be stored", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::BadRequest)?;

    if !state.models.contains(&payload.version) {
        return Err(SummarizeError::UnsupportedVersion(payload.version).into());
    }

    let article = load_article(&state, &payload.url).await?;
    state
        .feedback
        .record(
            article.as_str(),
            &payload.summary,
            payload.rating,
            &payload.version,
        )
        .await?;

    info!(version = %payload.version, rating = payload.rating, "feedback accepted");
    Ok(StatusCode::NO_CONTENT)
}
