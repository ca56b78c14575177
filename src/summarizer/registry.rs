use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::summarizer::{
    backend::SummarizerBackend,
    errors::SummarizeError,
    model::{GenerationPolicy, ModelKind},
};

/// A registered model: where to send text and how to decode.
#[derive(Clone)]
pub struct ModelBackend {
    pub version_id: String,
    pub kind: ModelKind,
    pub model_id: String,
    pub policy: GenerationPolicy,
    backend: Arc<dyn SummarizerBackend>,
}

impl ModelBackend {
    pub fn new(
        version_id: impl Into<String>,
        kind: ModelKind,
        model_id: impl Into<String>,
        policy: GenerationPolicy,
        backend: Arc<dyn SummarizerBackend>,
    ) -> Self {
        Self {
            version_id: version_id.into(),
            kind,
            model_id: model_id.into(),
            policy,
            backend,
        }
    }
}

/// Version id -> backend lookup, built once at startup and read-only afterwards.
pub struct ModelRegistry {
    backends: Vec<ModelBackend>,
    by_version: HashMap<String, usize>,
    timeout: Duration,
}

impl ModelRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            backends: Vec::new(),
            by_version: HashMap::new(),
            timeout,
        }
    }

    /// The five default backends (`v1`..`v5`), all served by `backend`.
    pub fn with_defaults(
        backend: Arc<dyn SummarizerBackend>,
        min_length: u32,
        max_length: u32,
        timeout: Duration,
    ) -> Self {
        let mut registry = Self::new(timeout);
        for kind in ModelKind::ALL {
            registry.register(ModelBackend::new(
                kind.default_version(),
                kind,
                kind.default_model_id(),
                GenerationPolicy::for_kind(kind, min_length, max_length),
                backend.clone(),
            ));
        }
        registry
    }

    /// Register a backend. Re-registering a version replaces the earlier entry
    /// but keeps its position.
    pub fn register(&mut self, model: ModelBackend) {
        match self.by_version.get(&model.version_id) {
            Some(&index) => self.backends[index] = model,
            None => {
                self.by_version
                    .insert(model.version_id.clone(), self.backends.len());
                self.backends.push(model);
            }
        }
    }

    pub fn get(&self, version: &str) -> Option<&ModelBackend> {
        self.by_version.get(version).map(|&index| &self.backends[index])
    }

    pub fn contains(&self, version: &str) -> bool {
        self.by_version.contains_key(version)
    }

    /// The first registered version, used when a request names none.
    pub fn default_version(&self) -> Option<&str> {
        self.backends.first().map(|model| model.version_id.as_str())
    }

    /// Registered backends in registration order.
    pub fn backends(&self) -> &[ModelBackend] {
        &self.backends
    }

    pub fn versions(&self) -> Vec<&str> {
        self.backends
            .iter()
            .map(|model| model.version_id.as_str())
            .collect()
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn summarize(&self, text: &str, version: &str) -> Result<String, SummarizeError> {
        let Some(model) = self.get(version) else {
            warn!("unsupported model version requested");
            return Err(SummarizeError::UnsupportedVersion(version.to_string()));
        };

        let call = model.backend.generate(&model.model_id, text, &model.policy);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(summary)) => {
                info!(model = %model.model_id, "summary produced");
                Ok(summary)
            }
            Ok(Err(source)) => {
                error!(model = %model.model_id, error = %source, "model backend failed");
                Err(SummarizeError::Backend {
                    version: version.to_string(),
                    source,
                })
            }
            Err(_) => {
                error!(model = %model.model_id, timeout = ?self.timeout, "model backend timed out");
                Err(SummarizeError::Timeout {
                    version: version.to_string(),
                })
            }
        }
    }
}
