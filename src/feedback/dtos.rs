use serde::Deserialize;
use utoipa::ToSchema;

use crate::feedback::record::{MAX_RATING, MIN_RATING};
use crate::summary::dtos::validate_url;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    /// Page the summary was produced from; it is fetched again to store the article.
    pub url: String,
    pub summary: String,
    /// 1 (poor) to 5 (excellent).
    pub rating: i64,
    pub version: String,
}

impl FeedbackRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_url(&self.url)?;

        if self.summary.trim().is_empty() {
            return Err("Summary cannot be empty".to_string());
        }

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            ));
        }

        if self.version.trim().is_empty() {
            return Err("Version cannot be empty".to_string());
        }

        Ok(())
    }
}
