use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Descriptive fields attached to a passage at index-build time.
///
/// Opaque to the aggregation algorithm; only used for display and prompt assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassageMetadata {
    /// The passage text.
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Source link (paper URL, PubMed link, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Any further fields the index carries.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PassageMetadata {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Title for display, falling back to the passage id.
    pub fn display_title<'a>(&'a self, id: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => id,
        }
    }
}
