use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::extractor::errors::TranscriptError;

static SEGMENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("text").expect("valid segment selector"));

/// One timed caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Supplies transcripts for videos.
///
/// `languages` is tried in order; the first language with captions wins.
/// Implementations return [`TranscriptError::NotFound`] when none match.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}

/// Client for the YouTube `timedtext` endpoint.
///
/// `GET {base}?v=<id>&lang=<code>` answers with an XML document of
/// `<text start=".." dur="..">` elements, or an empty body when no captions
/// exist for that language.
#[derive(Clone)]
pub struct TimedTextClient {
    client: Client,
    base_url: String,
}

impl TimedTextClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch_language(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("v", video_id), ("lang", language)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(TranscriptError::Http { status });
        }

        let body = response.text().await?;
        Ok(parse_timed_text(&body))
    }
}

#[async_trait]
impl TranscriptSource for TimedTextClient {
    #[instrument(skip_all, fields(video_id = %video_id, languages = ?languages))]
    async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        for language in languages {
            let segments = self.fetch_language(video_id, language).await?;
            if !segments.is_empty() {
                debug!(%language, segments = segments.len(), "transcript found");
                return Ok(segments);
            }
            debug!(%language, "no captions in language");
        }
        Err(TranscriptError::NotFound)
    }
}

/// Parse a `timedtext` XML document. Blank captions are dropped.
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    if xml.trim().is_empty() {
        return Vec::new();
    }

    let document = Html::parse_fragment(xml);
    document
        .select(&SEGMENT)
        .filter_map(|node| {
            let text = unescape_entities(&node.text().collect::<String>());
            if text.trim().is_empty() {
                return None;
            }
            let attr = |name: &str| {
                node.value()
                    .attr(name)
                    .and_then(|value| value.parse::<f64>().ok())
                    .unwrap_or(0.0)
            };
            Some(TranscriptSegment::new(text, attr("start"), attr("dur")))
        })
        .collect()
}

// Captions arrive double-escaped; the parser undoes one level.
fn unescape_entities(text: &str) -> String {
    text.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
