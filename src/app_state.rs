use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::Config,
    extractor::{ContentExtractor, TimedTextClient},
    feedback::FeedbackStore,
    fetcher::{HttpFetcher, PageFetcher},
    summarizer::{InferenceClient, ModelRegistry},
};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub extractor: Arc<ContentExtractor>,
    pub models: Arc<ModelRegistry>,
    pub feedback: Arc<FeedbackStore>,
}

impl AppState {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: ContentExtractor,
        models: ModelRegistry,
        feedback: FeedbackStore,
    ) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
            models: Arc::new(models),
            feedback: Arc::new(feedback),
        }
    }

    /// Wire the production clients from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fetcher =
            HttpFetcher::new(config.fetch_timeout()).context("Failed to build page fetcher")?;

        let transcripts =
            TimedTextClient::new(config.transcript_base_url(), config.transcript_timeout())
                .context("Failed to build transcript client")?;
        let extractor = ContentExtractor::new(
            Arc::new(transcripts),
            config.transcript_languages().to_vec(),
        );

        let inference = InferenceClient::new(
            config.inference_base_url(),
            config.inference_api_token().map(str::to_string),
            config.inference_timeout(),
        )
        .context("Failed to build inference client")?;
        let models = ModelRegistry::with_defaults(
            Arc::new(inference),
            config.summary_min_length(),
            config.summary_max_length(),
            config.inference_timeout(),
        );

        let feedback = FeedbackStore::new(config.feedback_store_path());

        Ok(Self::new(Arc::new(fetcher), extractor, models, feedback))
    }
}

#[cfg(test)]
impl AppState {
    /// State over in-memory doubles, default model registry, store at `store_path`.
    pub(crate) fn for_tests(
        fetcher: crate::fetcher::MockPageFetcher,
        transcripts: crate::extractor::MockTranscriptSource,
        backend: crate::summarizer::MockSummarizerBackend,
        store_path: impl Into<std::path::PathBuf>,
    ) -> Self {
        use crate::config::{DEFAULT_SUMMARY_MAX_LENGTH, DEFAULT_SUMMARY_MIN_LENGTH};
        use std::time::Duration;

        Self::new(
            Arc::new(fetcher),
            ContentExtractor::new(Arc::new(transcripts), vec!["en".to_string()]),
            ModelRegistry::with_defaults(
                Arc::new(backend),
                DEFAULT_SUMMARY_MIN_LENGTH,
                DEFAULT_SUMMARY_MAX_LENGTH,
                Duration::from_secs(5),
            ),
            FeedbackStore::new(store_path),
        )
    }
}
