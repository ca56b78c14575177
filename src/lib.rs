pub mod api_error;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod feedback;
pub mod fetcher;
pub mod health;
pub mod logging;
pub mod router;
pub mod summarizer;
pub mod summary;
