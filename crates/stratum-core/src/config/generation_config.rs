use serde::{Deserialize, Serialize};

use super::defaults;

/// Completion backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// OpenAI-compatible chat completions endpoint.
    pub endpoint: String,
    /// Model used when `reasoning_model` is false.
    pub model: String,
    /// Model used when `reasoning_model` is true.
    pub reasoning_model_name: String,
    /// Use the reasoning model and strip its `<think>` sections.
    pub reasoning_model: bool,
    pub api_key_env: String,
    /// Instructions placed ahead of the question and retrieved context.
    pub context_prompt: String,
    pub timeout_ms: u64,
}

impl GenerationConfig {
    /// The model name actually sent to the backend.
    pub fn active_model(&self) -> &str {
        if self.reasoning_model {
            &self.reasoning_model_name
        } else {
            &self.model
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_COMPLETION_ENDPOINT.to_string(),
            model: defaults::DEFAULT_COMPLETION_MODEL.to_string(),
            reasoning_model_name: defaults::DEFAULT_REASONING_MODEL.to_string(),
            reasoning_model: false,
            api_key_env: defaults::DEFAULT_COMPLETION_API_KEY_ENV.to_string(),
            context_prompt: defaults::DEFAULT_CONTEXT_PROMPT.to_string(),
            timeout_ms: defaults::DEFAULT_COMPLETION_TIMEOUT_MS,
        }
    }
}
