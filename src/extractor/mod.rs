pub mod errors;
pub mod normalize;
pub mod reader;
pub mod source;
pub mod transcript;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{info, instrument};

pub use errors::{ExtractionError, TranscriptError};
pub use normalize::normalize;
pub use source::{SourceKind, classify};
pub use transcript::{TimedTextClient, TranscriptSegment, TranscriptSource};

#[cfg(test)]
pub use transcript::MockTranscriptSource;

/// Normalized plain text ready for summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
}

impl ExtractedText {
    /// Normalize `raw` into a single clean line.
    pub fn new(raw: &str) -> Self {
        Self {
            text: normalize(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Turns a fetched page into summarizable text, picking the strategy from the URL.
pub struct ContentExtractor {
    transcripts: Arc<dyn TranscriptSource>,
    languages: Vec<String>,
}

impl ContentExtractor {
    pub fn new(transcripts: Arc<dyn TranscriptSource>, languages: Vec<String>) -> Self {
        Self {
            transcripts,
            languages,
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn extract(&self, markup: &str, url: &str) -> Result<ExtractedText, ExtractionError> {
        let kind = classify(url);
        let raw = match kind {
            SourceKind::Wikipedia => reader::wikipedia_text(markup)?,
            SourceKind::YouTube => self.transcript_text(url).await?,
            SourceKind::Generic => reader::visible_text(markup),
        };

        let text = ExtractedText::new(&raw);
        if text.as_str().is_empty() {
            return Err(ExtractionError::Empty);
        }

        info!(source = ?kind, chars = text.char_count(), "content extracted");
        Ok(text)
    }

    async fn transcript_text(&self, url: &str) -> Result<String, ExtractionError> {
        let video_id =
            source::video_id(url).ok_or_else(|| ExtractionError::MissingVideoId(url.to_string()))?;

        let segments = self
            .transcripts
            .fetch_transcript(video_id, &self.languages)
            .await
            .map_err(|err| match err {
                TranscriptError::NotFound => ExtractionError::NoTranscript {
                    video_id: video_id.to_string(),
                },
                other => ExtractionError::Transcript(other),
            })?;

        if segments.is_empty() {
            return Err(ExtractionError::NoTranscript {
                video_id: video_id.to_string(),
            });
        }

        Ok(segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
