use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("article container not found in page")]
    MissingContainer,

    #[error("no video id in url: {0}")]
    MissingVideoId(String),

    #[error("no transcript found for video {video_id}")]
    NoTranscript { video_id: String },

    #[error("transcript service failed: {0}")]
    Transcript(#[source] TranscriptError),

    #[error("no text content found")]
    Empty,
}

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("no transcript available")]
    NotFound,

    #[error("transcript request timed out")]
    Timeout,

    #[error("transcript service responded with http {status}")]
    Http { status: reqwest::StatusCode },

    #[error("transcript request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            Self::Request(err.to_string())
        }
    }
}
