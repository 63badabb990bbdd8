//! Test fixtures for Stratum: golden scenario loader, a scripted similarity
//! index with a call log, and a fixed-vector embedder.

mod embedder;
mod scripted_index;

pub use embedder::FixedEmbedder;
pub use scripted_index::{ScriptedIndex, TierScript};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use stratum_core::models::{Match, PassageMetadata, RetrievalRequest, StopReason, Tier};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

// ---------------------------------------------------------------------------
// Golden tiered-retrieval scenarios
// ---------------------------------------------------------------------------

/// A candidate as written in a scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioCandidate {
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioExpectation {
    pub ids: Vec<String>,
    pub scores: Vec<f64>,
    pub index_calls: usize,
    pub stop_reason: StopReason,
}

/// One golden scenario: a request, canned per-tier batches, and the expected output.
#[derive(Debug, Clone, Deserialize)]
pub struct TieredScenario {
    pub name: String,
    pub request: RetrievalRequest,
    /// Tier level → batch. Levels absent from the map return an empty batch.
    pub tiers: BTreeMap<u32, Vec<ScenarioCandidate>>,
    pub expected: ScenarioExpectation,
}

impl TieredScenario {
    /// Build a scripted index serving this scenario's batches.
    pub fn to_index(&self) -> ScriptedIndex {
        let mut index = ScriptedIndex::new();
        for (level, batch) in &self.tiers {
            let tier = Tier::new(*level).expect("scenario tier levels start at 1");
            let matches = batch
                .iter()
                .map(|c| {
                    Match::new(c.id.clone(), c.score, tier).with_metadata(PassageMetadata::with_text(
                        c.text.clone().unwrap_or_else(|| format!("passage {}", c.id)),
                    ))
                })
                .collect();
            index = index.with_batch(*level, matches);
        }
        index
    }
}

/// Load every golden tiered scenario.
pub fn load_tiered_scenarios() -> Vec<TieredScenario> {
    list_fixtures("golden/tiered")
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
        })
        .collect()
}
