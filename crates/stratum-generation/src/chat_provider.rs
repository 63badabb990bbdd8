//! OpenAI-compatible chat completions client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stratum_core::config::{read_secret, GenerationConfig};
use stratum_core::errors::{ConfigError, GenerationError, StratumResult};
use stratum_core::traits::ICompletionProvider;
use tracing::{debug, warn};

use crate::reasoning::strip_reasoning;

pub struct ChatCompletionProvider {
    endpoint: String,
    api_key: String,
    model: String,
    strip_thinking: bool,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionProvider {
    pub fn new(endpoint: String, api_key: String, model: String, timeout_ms: u64) -> Self {
        Self {
            endpoint,
            api_key,
            model,
            strip_thinking: false,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Strip `<think>` sections from every completion.
    pub fn with_reasoning(mut self, enabled: bool) -> Self {
        self.strip_thinking = enabled;
        self
    }

    /// Build from config, reading the API key from the configured env var.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ConfigError> {
        let api_key = read_secret(&config.api_key_env)?;
        Ok(Self::new(
            config.endpoint.clone(),
            api_key,
            config.active_model().to_string(),
            config.timeout_ms,
        )
        .with_reasoning(config.reasoning_model))
    }

    fn send(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GenerationError::RequestFailed {
                reason: format!("runtime error: {e}"),
            })?;

        rt.block_on(async {
            let response = reqwest::Client::new()
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| GenerationError::RequestFailed {
                    reason: if e.is_timeout() {
                        format!("timed out after {}ms", self.timeout.as_millis())
                    } else {
                        format!("HTTP error: {e}")
                    },
                })?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(map_status(status.as_u16(), text, &self.model));
            }

            let parsed: ChatResponse =
                response
                    .json()
                    .await
                    .map_err(|e| GenerationError::RequestFailed {
                        reason: format!("JSON parse error: {e}"),
                    })?;

            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or(GenerationError::EmptyResponse)
        })
    }
}

fn map_status(status: u16, body: String, model: &str) -> GenerationError {
    match status {
        400 => GenerationError::InvalidRequest { reason: body },
        429 => GenerationError::RateLimited {
            model: model.to_string(),
        },
        _ => GenerationError::RequestFailed {
            reason: format!("backend returned {status}: {body}"),
        },
    }
}

impl ICompletionProvider for ChatCompletionProvider {
    fn complete(&self, prompt: &str) -> StratumResult<String> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting completion");
        let raw = self.send(prompt).inspect_err(|e| {
            warn!(model = %self.model, error = %e, "completion failed");
        })?;
        if self.strip_thinking {
            Ok(strip_reasoning(&raw))
        } else {
            Ok(raw.trim().to_string())
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}
