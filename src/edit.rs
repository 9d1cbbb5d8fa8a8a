//! Edits produced by the annotation engine.

use serde::{Deserialize, Serialize};

/// Error types that carry no correction and never take part in scoring.
pub const IGNORED_ERROR_TYPES: [&str; 2] = ["noop", "UNK"];

/// One correction between a source and a target sentence.
///
/// `start..end` indexes source tokens; `start == end` is a pure insertion
/// before token `start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    /// Text replacing the source span.
    pub correction: String,
    /// Annotator-specific category, e.g. `R:VERB:SVA`.
    pub error_type: String,
}

impl Edit {
    pub fn new(
        start: usize,
        end: usize,
        correction: impl Into<String>,
        error_type: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            correction: correction.into(),
            error_type: error_type.into(),
        }
    }

    /// Key used to match edits across hypothesis and reference.
    ///
    /// Two annotations of the same correction match even if classified
    /// differently.
    pub fn key(&self) -> EditKey<'_> {
        EditKey {
            start: self.start,
            end: self.end,
            correction: &self.correction,
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the edit should be dropped before scoring.
    pub fn is_ignored(&self) -> bool {
        IGNORED_ERROR_TYPES.contains(&self.error_type.as_str())
    }
}

/// Span and correction of an [`Edit`], without its error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditKey<'a> {
    pub start: usize,
    pub end: usize,
    pub correction: &'a str,
}

/// Drop edits whose error type carries no correction.
pub fn filter_edits(edits: &[Edit]) -> Vec<Edit> {
    edits.iter().filter(|e| !e.is_ignored()).cloned().collect()
}
