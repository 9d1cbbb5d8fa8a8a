//! Error types for the scoring engine.
//!
//! Contract violations (bad shapes, weight tables that do not line up with
//! the generated chunks, out-of-range reference indices) and failures
//! bubbling up from the external annotator share one enum.

use thiserror::Error;

/// Boxed error produced by an [`EditAnnotator`](crate::EditAnnotator).
pub type AnnotatorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while scoring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GecError {
    /// Two scores with different beta were added together.
    #[error("cannot add scores with different beta ({left} vs {right})")]
    BetaMismatch { left: f64, right: f64 },

    /// A weight table row does not match the reference chunk sequence.
    #[error("weight table for sentence {sentence} has {found} entries, expected {expected}")]
    WeightLengthMismatch {
        sentence: usize,
        expected: usize,
        found: usize,
    },

    /// The weight table has no row for a sentence.
    #[error("weight table has no entry for sentence {sentence}")]
    MissingWeights { sentence: usize },

    /// The configured reference index does not exist.
    #[error("reference index {index} out of range ({available} references available)")]
    ReferenceIndexOutOfRange { index: usize, available: usize },

    /// Parallel inputs disagree on the number of sentences.
    #[error("{what} has {found} sentences, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// A reference-based scorer was called without references.
    #[error("at least one reference set is required")]
    NoReferences,

    /// An ensemble was built without member metrics.
    #[error("ensemble has no member metrics")]
    EmptyEnsemble,

    /// The annotation engine failed on a sentence.
    #[error("annotation failed for {sentence:?}: {source}")]
    Annotation {
        sentence: String,
        #[source]
        source: AnnotatorError,
    },

    /// Malformed scorer configuration text.
    #[error("invalid config: {0}")]
    Config(String),

    /// Malformed weight table text.
    #[error("invalid weight table: {0}")]
    Weights(String),
}

impl GecError {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, found: usize) -> Self {
        GecError::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    pub(crate) fn annotation<E>(sentence: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GecError::Annotation {
            sentence: sentence.to_string(),
            source: Box::new(source),
        }
    }

    /// Returns true for errors caused by the caller breaking an input contract.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            GecError::Annotation { .. } | GecError::Config(_) | GecError::Weights(_)
        )
    }
}

/// Result type for scoring operations.
pub type GecResult<T> = Result<T, GecError>;
