use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use link_explorer::{
    app_state::AppState,
    config::{DEFAULT_SUMMARY_MAX_LENGTH, DEFAULT_SUMMARY_MIN_LENGTH},
    extractor::{ContentExtractor, TimedTextClient},
    feedback::FeedbackStore,
    fetcher::HttpFetcher,
    router::build_router,
    summarizer::{InferenceClient, ModelRegistry},
};

/// Full router with real clients pointed at `upstream` and the store at `store`.
pub fn test_app(upstream: &str, store: &Path) -> Router {
    let timeout = Duration::from_secs(5);

    let fetcher = HttpFetcher::new(timeout).expect("Failed to build fetcher");
    let transcripts = TimedTextClient::new(format!("{upstream}/api/timedtext"), timeout)
        .expect("Failed to build transcript client");
    let inference = InferenceClient::new(format!("{upstream}/models"), None, timeout)
        .expect("Failed to build inference client");

    let state = AppState::new(
        Arc::new(fetcher),
        ContentExtractor::new(Arc::new(transcripts), vec!["en".to_string()]),
        ModelRegistry::with_defaults(
            Arc::new(inference),
            DEFAULT_SUMMARY_MIN_LENGTH,
            DEFAULT_SUMMARY_MAX_LENGTH,
            timeout,
        ),
        FeedbackStore::new(store),
    );
    build_router(state)
}
