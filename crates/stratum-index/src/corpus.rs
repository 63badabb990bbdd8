//! Chunk corpus records as produced by the chunker.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use stratum_core::errors::{ConfigError, IndexError, StratumResult};
use stratum_core::models::{PassageMetadata, Tier};

/// One chunk of a source document, tagged with its hierarchy level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk_id: String,
    pub chunk_text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Publication year. Accepted as a number or a string.
    #[serde(default, deserialize_with = "year_from_any")]
    pub year: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    pub hierarchical_level: u32,
}

impl ChunkRecord {
    /// Check the record can be indexed and return its tier.
    pub fn validate(&self) -> Result<Tier, IndexError> {
        if self.chunk_id.trim().is_empty() {
            return Err(IndexError::InvalidRecord {
                id: self.chunk_id.clone(),
                reason: "empty chunk_id".to_string(),
            });
        }
        if self.chunk_text.trim().is_empty() {
            return Err(IndexError::InvalidRecord {
                id: self.chunk_id.clone(),
                reason: "empty chunk_text".to_string(),
            });
        }
        Tier::new(self.hierarchical_level).map_err(|e| IndexError::InvalidRecord {
            id: self.chunk_id.clone(),
            reason: e.to_string(),
        })
    }

    pub fn metadata(&self) -> PassageMetadata {
        PassageMetadata {
            text: self.chunk_text.clone(),
            title: self.title.clone(),
            link: self.link.clone(),
            year: self.year.clone(),
            topic: self.topic.clone(),
            ..Default::default()
        }
    }
}

fn year_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Read a JSON array of chunk records.
pub fn load_chunks(path: impl AsRef<Path>) -> StratumResult<Vec<ChunkRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&content)?)
}
