//! Ollama embedding provider.
//!
//! Talks to a local or remote Ollama instance over `/api/embed`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stratum_core::config::EmbeddingConfig;
use stratum_core::errors::{EmbeddingError, StratumResult};
use stratum_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

pub struct OllamaProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    pub fn new(model: String, dimensions: usize, base_url: String, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimensions,
            timeout: Duration::from_millis(timeout_ms),
            available: AtomicBool::new(true),
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(
            config.model.clone(),
            config.dimensions,
            config.base_url.clone(),
            config.timeout_ms,
        )
    }

    /// Last known reachability. Updated by every request.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    /// Check if the Ollama server is reachable.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(_) => return false,
        };

        let result = rt.block_on(async {
            reqwest::Client::new()
                .get(&url)
                .timeout(self.timeout)
                .send()
                .await
        });

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    fn request_embeddings(&self, texts: Vec<String>) -> StratumResult<Vec<Vec<f32>>> {
        let url = format!("{}/api/embed", self.base_url);
        let expected = texts.len();
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("runtime error: {e}"),
            })?;

        let dims = self.dimensions;
        let result: Result<Vec<Vec<f32>>, EmbeddingError> = rt.block_on(async {
            let response = reqwest::Client::new()
                .post(&url)
                .timeout(self.timeout)
                .json(&request)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("Ollama returned {status}: {body}"),
                });
            }

            let resp: OllamaEmbedResponse =
                response.json().await.map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })?;

            Ok(resp
                .embeddings
                .into_iter()
                .map(|mut v| {
                    v.resize(dims, 0.0);
                    v
                })
                .collect())
        });

        self.available.store(
            !matches!(result, Err(EmbeddingError::ProviderUnavailable { .. })),
            Ordering::Relaxed,
        );
        let embeddings = result?;
        if embeddings.len() != expected {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "expected {expected} embeddings, Ollama returned {}",
                    embeddings.len()
                ),
            }
            .into());
        }
        Ok(embeddings)
    }

    fn transport_error(&self, e: reqwest::Error) -> EmbeddingError {
        if e.is_timeout() {
            EmbeddingError::Timeout {
                provider: self.model.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
        } else {
            EmbeddingError::InferenceFailed {
                reason: format!("Ollama HTTP error: {e}"),
            }
        }
    }
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed(&self, text: &str) -> StratumResult<Vec<f32>> {
        let results = self.request_embeddings(vec![text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> StratumResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts.to_vec())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use stratum_core::StratumError;

    #[test]
    fn request_body_matches_ollama_api() {
        let body = OllamaEmbedRequest {
            model: "mxbai-embed-large",
            input: vec!["hello".into()],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "mxbai-embed-large");
        assert_eq!(json["input"][0], "hello");
    }

    #[test]
    fn refused_connection_is_provider_unavailable() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let provider = OllamaProvider::new("m".into(), 4, format!("http://127.0.0.1:{port}"), 500);

        let err = provider.embed("q").unwrap_err();
        assert!(matches!(
            err,
            StratumError::EmbeddingError(EmbeddingError::ProviderUnavailable { .. })
        ));
        assert!(!provider.is_available());
        assert!(!provider.health_check());
    }

    #[test]
    fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let provider = OllamaProvider::new("m".into(), 4, format!("http://{addr}"), 200);

        let err = provider.embed("q").unwrap_err();
        assert!(matches!(
            err,
            StratumError::EmbeddingError(EmbeddingError::Timeout { timeout_ms: 200, .. })
        ));
        drop(listener);
    }

    #[test]
    fn empty_batch_makes_no_request() {
        let provider = OllamaProvider::new("m".into(), 4, "http://127.0.0.1:1".into(), 100);
        assert!(provider.embed_batch(&[]).unwrap().is_empty());
    }
}
