//! HTTP client for a hosted, metadata-filtered vector index.
//!
//! Speaks the Pinecone data-plane API: `POST /query` filtered on
//! `hierarchical_level`, `POST /vectors/upsert` and `GET /vectors/fetch`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use stratum_core::config::{read_secret, IndexConfig};
use stratum_core::constants::TIER_METADATA_KEY;
use stratum_core::errors::{ConfigError, IndexError, StratumResult};
use stratum_core::models::{IndexEntry, Match, PassageMetadata, Tier};
use stratum_core::traits::{IIndexWriter, ISimilarityIndex};
use tracing::{debug, warn};

const API_VERSION: &str = "2024-07";

/// Remote similarity index over HTTP.
pub struct RemoteIndex {
    host: String,
    api_key: String,
    namespace: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    namespace: &'a str,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
    #[serde(rename = "includeValues")]
    include_values: bool,
    filter: Value,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RemoteMatch>,
}

#[derive(Deserialize)]
struct RemoteMatch {
    id: String,
    score: f64,
    #[serde(default)]
    metadata: Map<String, Value>,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<RemoteVector>,
    namespace: &'a str,
}

#[derive(Serialize)]
struct RemoteVector {
    id: String,
    values: Vec<f32>,
    metadata: Map<String, Value>,
}

#[derive(Deserialize)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount", default)]
    upserted_count: usize,
}

#[derive(Deserialize)]
struct FetchResponse {
    #[serde(default)]
    vectors: Map<String, Value>,
}

/// Transport-level failure, mapped to an `IndexError` by each operation.
#[derive(Debug)]
enum Failure {
    Timeout,
    Transport(String),
    Status(u16, String),
    Malformed(String),
}

impl RemoteIndex {
    /// `host` may omit the scheme; `https://` is assumed.
    pub fn new(host: &str, api_key: String, namespace: String, timeout_ms: u64) -> Self {
        Self {
            host: normalize_host(host),
            api_key,
            namespace,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Build from config, reading the API key from the configured env var.
    pub fn from_config(config: &IndexConfig) -> Result<Self, ConfigError> {
        let host = config
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "index.host".to_string(),
                reason: "required for the remote backend".to_string(),
            })?;
        let api_key = read_secret(&config.api_key_env)?;
        Ok(Self::new(
            host,
            api_key,
            config.namespace.clone(),
            config.query_timeout_ms,
        ))
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    fn execute<T: DeserializeOwned>(
        &self,
        build: impl FnOnce(&reqwest::Client) -> reqwest::RequestBuilder,
    ) -> Result<T, Failure> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Failure::Transport(format!("runtime error: {e}")))?;

        let client = reqwest::Client::new();
        let request = build(&client)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .timeout(self.timeout);

        rt.block_on(async {
            let response = request.send().await.map_err(classify)?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Failure::Status(status.as_u16(), body));
            }
            response.json::<T>().await.map_err(|e| {
                if e.is_timeout() {
                    Failure::Timeout
                } else {
                    Failure::Malformed(e.to_string())
                }
            })
        })
    }

    fn write_error(&self, failure: Failure) -> IndexError {
        match failure {
            Failure::Timeout => IndexError::WriteFailed {
                reason: format!("timed out after {}ms", self.timeout_ms()),
            },
            Failure::Transport(reason) => IndexError::WriteFailed { reason },
            Failure::Status(status, body) => IndexError::BackendStatus { status, body },
            Failure::Malformed(reason) => IndexError::MalformedResponse { reason },
        }
    }
}

impl ISimilarityIndex for RemoteIndex {
    fn query(&self, vector: &[f32], tier: Tier, limit: usize) -> StratumResult<Vec<Match>> {
        let url = format!("{}/query", self.host);
        let body = QueryRequest {
            vector,
            top_k: limit,
            namespace: &self.namespace,
            include_metadata: true,
            include_values: false,
            filter: tier_filter(tier),
        };

        let response: QueryResponse = self
            .execute(|client| client.post(&url).json(&body))
            .map_err(|failure| match failure {
                Failure::Timeout => IndexError::Timeout {
                    tier,
                    timeout_ms: self.timeout_ms(),
                },
                Failure::Transport(reason) => IndexError::QueryFailed { tier, reason },
                Failure::Status(status, body) => IndexError::BackendStatus { status, body },
                Failure::Malformed(reason) => IndexError::MalformedResponse { reason },
            })?;

        debug!(%tier, returned = response.matches.len(), "remote index query");
        Ok(response
            .matches
            .into_iter()
            .map(|m| Match::new(m.id, m.score, tier).with_metadata(metadata_from_remote(m.metadata)))
            .collect())
    }

    fn name(&self) -> &str {
        "remote"
    }
}

impl IIndexWriter for RemoteIndex {
    fn contains(&self, id: &str) -> StratumResult<bool> {
        let url = format!("{}/vectors/fetch", self.host);
        let namespace = self.namespace.as_str();
        let response: FetchResponse = self
            .execute(|client| client.get(&url).query(&[("ids", id), ("namespace", namespace)]))
            .map_err(|f| self.write_error(f))?;
        Ok(response.vectors.contains_key(id))
    }

    fn upsert(&self, entries: Vec<IndexEntry>) -> StratumResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }
        let expected = entries.len();
        let url = format!("{}/vectors/upsert", self.host);
        let body = UpsertRequest {
            vectors: entries
                .into_iter()
                .map(|e| RemoteVector {
                    metadata: metadata_to_remote(&e.metadata, e.tier),
                    id: e.id,
                    values: e.vector,
                })
                .collect(),
            namespace: &self.namespace,
        };

        let response: UpsertResponse = self
            .execute(|client| client.post(&url).json(&body))
            .map_err(|f| self.write_error(f))?;
        if response.upserted_count != expected {
            warn!(
                expected,
                upserted = response.upserted_count,
                "remote index upserted fewer vectors than sent"
            );
        }
        Ok(response.upserted_count)
    }
}

fn classify(e: reqwest::Error) -> Failure {
    if e.is_timeout() {
        Failure::Timeout
    } else {
        Failure::Transport(e.to_string())
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

fn tier_filter(tier: Tier) -> Value {
    json!({ TIER_METADATA_KEY: { "$eq": tier.level() } })
}

/// Map stored metadata onto passage fields. Unknown keys land in `extra`.
fn metadata_from_remote(mut map: Map<String, Value>) -> PassageMetadata {
    let text = map
        .remove("chunk_text")
        .or_else(|| map.remove("text"))
        .and_then(value_to_string)
        .unwrap_or_default();
    map.remove(TIER_METADATA_KEY);
    PassageMetadata {
        text,
        title: map.remove("title").and_then(value_to_string),
        link: map.remove("link").and_then(value_to_string),
        year: map.remove("year").and_then(value_to_string),
        topic: map.remove("topic").and_then(value_to_string),
        extra: map.into_iter().collect(),
    }
}

fn metadata_to_remote(meta: &PassageMetadata, tier: Tier) -> Map<String, Value> {
    let mut map: Map<String, Value> = meta.extra.clone().into_iter().collect();
    map.insert("chunk_text".to_string(), Value::String(meta.text.clone()));
    for (key, value) in [
        ("title", &meta.title),
        ("link", &meta.link),
        ("year", &meta.year),
        ("topic", &meta.topic),
    ] {
        if let Some(v) = value {
            map.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    map.insert(TIER_METADATA_KEY.to_string(), json!(tier.level()));
    map
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        // Numeric years come back as floats ("2019.0") from some backends.
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}
