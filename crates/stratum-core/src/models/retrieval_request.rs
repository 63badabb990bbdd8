use serde::{Deserialize, Serialize};

use crate::config::RetrievalConfig;
use crate::errors::RetrievalError;

/// Caller input for one retrieval call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// Raw query text, embedded once per call.
    pub query: String,
    /// Maximum number of matches returned.
    pub top_k: usize,
    /// Minimum acceptable score. Drives replacement and early stop.
    pub threshold: f64,
    /// Deepest hierarchy level consulted.
    pub max_tier: u32,
}

impl RetrievalRequest {
    /// Build a request using the configured defaults.
    pub fn from_config(query: impl Into<String>, config: &RetrievalConfig) -> Self {
        Self {
            query: query.into(),
            top_k: config.top_k,
            threshold: config.threshold,
            max_tier: config.max_tier,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_tier(mut self, max_tier: u32) -> Self {
        self.max_tier = max_tier;
        self
    }

    /// Reject parameters the retriever cannot honor.
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.top_k < 1 {
            return Err(RetrievalError::InvalidParameters {
                reason: format!("top_k must be at least 1, got {}", self.top_k),
            });
        }
        if self.max_tier < 1 {
            return Err(RetrievalError::InvalidParameters {
                reason: format!("max_tier must be at least 1, got {}", self.max_tier),
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RetrievalError::InvalidParameters {
                reason: format!(
                    "threshold must be a finite non-negative number, got {}",
                    self.threshold
                ),
            });
        }
        Ok(())
    }
}

impl Default for RetrievalRequest {
    fn default() -> Self {
        Self::from_config(String::new(), &RetrievalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_config() {
        let req = RetrievalRequest::from_config("sleep", &RetrievalConfig::default());
        assert_eq!(req.top_k, 3);
        assert_eq!(req.max_tier, 3);
        assert!((req.threshold - 0.5).abs() < f64::EPSILON);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_zero_top_k() {
        let req = RetrievalRequest::default().with_top_k(0);
        assert!(matches!(
            req.validate(),
            Err(RetrievalError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn rejects_zero_max_tier() {
        let req = RetrievalRequest::default().with_max_tier(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_negative_or_nan_threshold() {
        assert!(RetrievalRequest::default()
            .with_threshold(-0.1)
            .validate()
            .is_err());
        assert!(RetrievalRequest::default()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn zero_threshold_is_allowed() {
        assert!(RetrievalRequest::default()
            .with_threshold(0.0)
            .validate()
            .is_ok());
    }
}
