use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("feedback store {path} is unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feedback row could not be encoded: {0}")]
    Csv(#[from] csv::Error),
}

impl FeedbackError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
