use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// A fetched page decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub content_type: String,
    pub body_utf8: String,
    pub encoding: &'static Encoding,
    pub fetched_at: DateTime<Utc>,
}

impl PageResponse {
    /// Build a response for an already-decoded HTML body.
    pub fn from_html(url_final: Url, body_utf8: impl Into<String>) -> Self {
        Self {
            url_final,
            status: StatusCode::OK,
            content_type: "text/html; charset=utf-8".to_string(),
            body_utf8: body_utf8.into(),
            encoding: encoding_rs::UTF_8,
            fetched_at: Utc::now(),
        }
    }
}
