//! Completion service REST client.
//!
//! # Responsibilities
//! - Submit prompts to the generateContent endpoint
//! - Collapse the candidate reply parts into one text
//! - Handle timeouts and auth/quota errors gracefully
//!
//! # Constraints
//! - The credential is sent as a header, never embedded in URLs, and is
//!   redacted from Debug output

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::model::types::{ModelConfig, ModelError, ModelResult};

/// Free-text completion against a configured model.
///
/// Same seam rationale as `LedgerApi`: dispatchers take any implementation
/// so tests can script replies and count calls.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Whether a credential is configured. Dispatchers skip the network
    /// entirely when this is false.
    fn is_configured(&self) -> bool;

    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> ModelResult<String>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ReplyContent>,
}

#[derive(Deserialize, Default)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

/// REST client for the completion service.
#[derive(Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    config: ModelConfig,
    timeout_duration: Duration,
}

impl ModelClient {
    /// Create a new completion client.
    pub fn new(config: ModelConfig) -> Self {
        let timeout_duration = Duration::from_secs(config.request_timeout_secs);
        Self {
            http: reqwest::Client::new(),
            config,
            timeout_duration,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Completion for ModelClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> ModelResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or(ModelError::NotConfigured)?;

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "Requesting completion"
        );

        let request = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send();

        let response = match timeout(self.timeout_duration, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Completion request failed");
                return Err(ModelError::Transport(e.to_string()));
            }
            Err(_) => {
                tracing::warn!("Completion request timed out");
                return Err(ModelError::Timeout(self.config.request_timeout_secs));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Completion service returned error");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelError::EmptyReply);
        }
        Ok(text)
    }
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("api_key", &self.config.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
