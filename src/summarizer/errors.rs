use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("unsupported model version: {0}")]
    UnsupportedVersion(String),

    #[error("model backend for {version} failed: {source}")]
    Backend {
        version: String,
        #[source]
        source: BackendError,
    },

    #[error("model backend for {version} timed out")]
    Timeout { version: String },
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("inference request failed: {0}")]
    Request(String),

    #[error("inference service responded with http {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("inference service returned no summary")]
    EmptyOutput,

    #[error("unexpected inference response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
