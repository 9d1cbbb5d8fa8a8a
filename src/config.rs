//! Scorer configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{GecError, GecResult};
use crate::score::DEFAULT_BETA;
use crate::weights::WeightTable;

/// Configuration for the reference-selection scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrantConfig {
    /// F-beta weighting.
    #[serde(default = "default_beta")]
    pub beta: f64,
}

impl ErrantConfig {
    pub fn with_beta(beta: f64) -> Self {
        Self { beta }
    }

    /// Parse from RON text, e.g. `(beta: 1.0)`.
    pub fn from_ron_str(s: &str) -> GecResult<Self> {
        ron::from_str(s).map_err(|e| GecError::Config(e.to_string()))
    }
}

impl Default for ErrantConfig {
    fn default() -> Self {
        Self::with_beta(DEFAULT_BETA)
    }
}

/// Configuration for the chunk-alignment scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GotoConfig {
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Index of the single reference set scored against.
    #[serde(default)]
    pub ref_id: usize,
    /// Per-sentence chunk weights; `None` weighs every chunk `1.0`.
    #[serde(default)]
    pub weights: Option<WeightTable>,
}

impl GotoConfig {
    /// Every reference chunk weighs `1.0`.
    pub fn unweighted() -> Self {
        Self {
            beta: DEFAULT_BETA,
            ref_id: 0,
            weights: None,
        }
    }

    pub fn weighted(weights: WeightTable) -> Self {
        Self {
            weights: Some(weights),
            ..Self::unweighted()
        }
    }

    pub fn with_ref_id(mut self, ref_id: usize) -> Self {
        self.ref_id = ref_id;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Parse from RON text, e.g. `(beta: 0.5, ref_id: 1)`.
    pub fn from_ron_str(s: &str) -> GecResult<Self> {
        ron::from_str(s).map_err(|e| GecError::Config(e.to_string()))
    }
}

impl Default for GotoConfig {
    fn default() -> Self {
        Self::unweighted()
    }
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errant_defaults() {
        assert_eq!(ErrantConfig::default().beta, 0.5);
        assert_eq!(ErrantConfig::from_ron_str("()").unwrap(), ErrantConfig::default());
        assert_eq!(ErrantConfig::from_ron_str("(beta: 1.0)").unwrap().beta, 1.0);
    }

    #[test]
    fn test_goto_from_ron() {
        let config = GotoConfig::from_ron_str("(ref_id: 1)").unwrap();
        assert_eq!(config.ref_id, 1);
        assert_eq!(config.beta, 0.5);
        assert!(!config.is_weighted());

        let config =
            GotoConfig::from_ron_str("(beta: 2.0, weights: Some([[1.0, 0.5], [2.0]]))").unwrap();
        assert_eq!(config.beta, 2.0);
        let weights = config.weights.unwrap();
        assert_eq!(weights.sentence(1), Some(&[2.0][..]));
    }

    #[test]
    fn test_invalid_ron() {
        let err = GotoConfig::from_ron_str("(ref_id: \"one\")").unwrap_err();
        assert!(matches!(err, GecError::Config(_)));
    }

    #[test]
    fn test_builders() {
        let config = GotoConfig::weighted(WeightTable::new(vec![vec![1.0]]))
            .with_ref_id(2)
            .with_beta(1.0);
        assert!(config.is_weighted());
        assert_eq!(config.ref_id, 2);
        assert_eq!(config.beta, 1.0);
    }
}
