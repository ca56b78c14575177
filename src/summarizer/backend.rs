use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::summarizer::{
    errors::BackendError,
    model::{GenerationPolicy, LengthControl},
};

/// A remote text-to-text model.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SummarizerBackend: Send + Sync {
    async fn generate(
        &self,
        model_id: &str,
        text: &str,
        policy: &GenerationPolicy,
    ) -> Result<String, BackendError>;
}

/// Client for hosted models speaking the Hugging Face inference wire format.
///
/// `POST {base}/{model_id}` with `{"inputs": .., "parameters": ..}` answers
/// `[{"summary_text": ..}]` for pipeline models and `[{"generated_text": ..}]`
/// for plain generation endpoints.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    do_sample: bool,
    #[serde(flatten)]
    length: LengthControl,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceFailure {
    error: String,
}

impl InferenceClient {
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_token,
        })
    }

    fn endpoint(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), model_id)
    }
}

#[async_trait]
impl SummarizerBackend for InferenceClient {
    #[instrument(skip_all, fields(model = %model_id, chars = text.len()))]
    async fn generate(
        &self,
        model_id: &str,
        text: &str,
        policy: &GenerationPolicy,
    ) -> Result<String, BackendError> {
        let inputs = policy.truncate(text);
        let payload = InferenceRequest {
            inputs: &inputs,
            parameters: InferenceParameters {
                do_sample: policy.do_sample,
                length: policy.length,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(self.endpoint(model_id)).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<InferenceFailure>(&body)
                .map(|failure| failure.error)
                .unwrap_or(body);
            return Err(BackendError::Status { status, message });
        }

        let outputs: Vec<InferenceOutput> = response.json().await?;
        let summary = outputs
            .into_iter()
            .next()
            .map(|output| output.summary_text.trim().to_string())
            .filter(|summary| !summary.is_empty())
            .ok_or(BackendError::EmptyOutput)?;

        debug!(summary_chars = summary.len(), "summary generated");
        Ok(summary)
    }
}
