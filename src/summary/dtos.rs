use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummaryRequest {
    pub url: String,
    /// Model version; the first registered model when omitted.
    pub version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
    pub original: String,
}

impl SummaryRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_url(&self.url)
    }
}

/// Absolute http(s) URL of reasonable length.
pub fn validate_url(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Err("URL cannot be empty".to_string());
    }
    if raw.len() > MAX_URL_LENGTH {
        return Err("URL too long".to_string());
    }
    let parsed = url::Url::parse(raw).map_err(|e| format!("Invalid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("URL must start with http:// or https://".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> SummaryRequest {
        SummaryRequest {
            url: url.to_string(),
            version: None,
        }
    }

    #[test]
    fn test_summary_request_valid() {
        assert!(request("https://en.wikipedia.org/wiki/Rust").validate().is_ok());
        assert!(request("http://example.com").validate().is_ok());
    }

    #[test]
    fn test_summary_request_empty_url() {
        assert!(request("").validate().is_err());
    }

    #[test]
    fn test_summary_request_url_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(request(&url).validate(), Err("URL too long".to_string()));
    }

    #[test]
    fn test_summary_request_rejects_other_schemes() {
        assert!(request("ftp://example.com/file").validate().is_err());
        assert!(request("example.com").validate().is_err());
    }
}
