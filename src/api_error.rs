use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::{
    extractor::ExtractionError, feedback::FeedbackError, fetcher::FetchError,
    summarizer::SummarizeError,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything a handler can fail with, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("no relevant content found")]
    ContentTooShort,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Summarize(#[from] SummarizeError),

    #[error(transparent)]
    Feedback(#[from] FeedbackError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ContentTooShort | ApiError::Fetch(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Extraction(err) => match err {
                ExtractionError::NoTranscript { .. } => StatusCode::NOT_FOUND,
                ExtractionError::Transcript(_) => StatusCode::BAD_GATEWAY,
                ExtractionError::MissingContainer
                | ExtractionError::MissingVideoId(_)
                | ExtractionError::Empty => StatusCode::BAD_REQUEST,
            },
            ApiError::Summarize(err) => match err {
                SummarizeError::UnsupportedVersion(_) => StatusCode::BAD_REQUEST,
                SummarizeError::Backend { .. } => StatusCode::BAD_GATEWAY,
                SummarizeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            },
            ApiError::Feedback(err) => match err {
                FeedbackError::InvalidRating(_) => StatusCode::BAD_REQUEST,
                FeedbackError::Io { .. } | FeedbackError::Csv(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message shown to the caller. Server-side details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Feedback(FeedbackError::Io { .. } | FeedbackError::Csv(_)) => {
                "Failed to store feedback".to_string()
            }
            ApiError::Summarize(SummarizeError::Backend { .. }) => {
                "Summarization backend failed".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
