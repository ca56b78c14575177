//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so a bare `cargo run --bin api` serves on localhost and writes feedback
//! under `data/`.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so tests and tooling can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_FEEDBACK_STORE_PATH: &str = "FEEDBACK_STORE_PATH";
pub const ENV_TRANSCRIPT_LANGUAGES: &str = "TRANSCRIPT_LANGUAGES";
pub const ENV_TRANSCRIPT_BASE_URL: &str = "TRANSCRIPT_BASE_URL";
pub const ENV_INFERENCE_BASE_URL: &str = "INFERENCE_BASE_URL";
pub const ENV_INFERENCE_API_TOKEN: &str = "INFERENCE_API_TOKEN";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_TRANSCRIPT_TIMEOUT_SECS: &str = "TRANSCRIPT_TIMEOUT_SECS";
pub const ENV_INFERENCE_TIMEOUT_SECS: &str = "INFERENCE_TIMEOUT_SECS";
pub const ENV_SUMMARY_MIN_LENGTH: &str = "SUMMARY_MIN_LENGTH";
pub const ENV_SUMMARY_MAX_LENGTH: &str = "SUMMARY_MAX_LENGTH";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_FEEDBACK_STORE_PATH: &str = "data/prod_data.csv";
const DEFAULT_TRANSCRIPT_LANGUAGES: &str = "en";
const DEFAULT_TRANSCRIPT_BASE_URL: &str = "https://www.youtube.com/api/timedtext";
const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TRANSCRIPT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SUMMARY_MIN_LENGTH: u32 = 30;
pub const DEFAULT_SUMMARY_MAX_LENGTH: u32 = 500;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    feedback_store_path: PathBuf,
    transcript_languages: Vec<String>,
    transcript_base_url: String,
    inference_base_url: String,
    inference_api_token: Option<String>,
    fetch_timeout: Duration,
    transcript_timeout: Duration,
    inference_timeout: Duration,
    summary_min_length: u32,
    summary_max_length: u32,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let feedback_store_path = env::var(ENV_FEEDBACK_STORE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FEEDBACK_STORE_PATH));
        let transcript_languages = parse_languages(
            &env::var(ENV_TRANSCRIPT_LANGUAGES)
                .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_LANGUAGES.to_string()),
        )?;
        let transcript_base_url = env::var(ENV_TRANSCRIPT_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_BASE_URL.to_string());
        let inference_base_url = env::var(ENV_INFERENCE_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_INFERENCE_BASE_URL.to_string());
        let inference_api_token = env::var(ENV_INFERENCE_API_TOKEN)
            .ok()
            .filter(|token| !token.trim().is_empty());

        let fetch_timeout = Duration::from_secs(parse_number(
            ENV_FETCH_TIMEOUT_SECS,
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?);
        let transcript_timeout = Duration::from_secs(parse_number(
            ENV_TRANSCRIPT_TIMEOUT_SECS,
            DEFAULT_TRANSCRIPT_TIMEOUT_SECS,
        )?);
        let inference_timeout = Duration::from_secs(parse_number(
            ENV_INFERENCE_TIMEOUT_SECS,
            DEFAULT_INFERENCE_TIMEOUT_SECS,
        )?);
        let summary_min_length = parse_number(ENV_SUMMARY_MIN_LENGTH, DEFAULT_SUMMARY_MIN_LENGTH)?;
        let summary_max_length = parse_number(ENV_SUMMARY_MAX_LENGTH, DEFAULT_SUMMARY_MAX_LENGTH)?;

        if summary_min_length > summary_max_length {
            return Err(ConfigError::InvalidValue {
                field: ENV_SUMMARY_MIN_LENGTH,
                reason: format!(
                    "minimum length {summary_min_length} exceeds maximum length {summary_max_length}"
                ),
            });
        }

        Ok(Self {
            bind_addr,
            feedback_store_path,
            transcript_languages,
            transcript_base_url,
            inference_base_url,
            inference_api_token,
            fetch_timeout,
            transcript_timeout,
            inference_timeout,
            summary_min_length,
            summary_max_length,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// CSV file receiving user feedback rows.
    pub fn feedback_store_path(&self) -> &Path {
        &self.feedback_store_path
    }
    /// Ordered transcript language preference, most preferred first.
    pub fn transcript_languages(&self) -> &[String] {
        &self.transcript_languages
    }
    pub fn transcript_base_url(&self) -> &str {
        &self.transcript_base_url
    }
    pub fn inference_base_url(&self) -> &str {
        &self.inference_base_url
    }
    pub fn inference_api_token(&self) -> Option<&str> {
        self.inference_api_token.as_deref()
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn transcript_timeout(&self) -> Duration {
        self.transcript_timeout
    }
    pub fn inference_timeout(&self) -> Duration {
        self.inference_timeout
    }
    pub fn summary_min_length(&self) -> u32 {
        self.summary_min_length
    }
    pub fn summary_max_length(&self) -> u32 {
        self.summary_max_length
    }

    /// Point the feedback store somewhere else (used by tests and tooling).
    pub fn with_feedback_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.feedback_store_path = path.into();
        self
    }
}

fn parse_languages(raw: &str) -> Result<Vec<String>, ConfigError> {
    let languages: Vec<String> = raw
        .split(',')
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
        .collect();

    if languages.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: ENV_TRANSCRIPT_LANGUAGES,
            reason: "at least one language code is required".to_string(),
        });
    }
    Ok(languages)
}

fn parse_number<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            field: key,
            reason: format!("'{raw}': {e}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
