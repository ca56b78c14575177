use serde::{Deserialize, Serialize};

use crate::feedback::errors::FeedbackError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Column order of the feedback store.
pub const HEADER: [&str; 4] = ["article", "abstract", "rating", "version"];

/// One user rating of a produced summary, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub article: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub rating: u8,
    pub version: String,
}

impl FeedbackRecord {
    /// Validate the rating and strip NUL bytes from the article text.
    pub fn new(
        article: &str,
        summary: impl Into<String>,
        rating: i64,
        version: impl Into<String>,
    ) -> Result<Self, FeedbackError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }

        Ok(Self {
            article: article.replace('\0', ""),
            summary: summary.into(),
            rating: rating as u8,
            version: version.into(),
        })
    }
}
