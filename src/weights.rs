//! Per-chunk importance weights for the chunk-alignment scorer.
//!
//! Weights are produced offline (e.g. from how many systems got a chunk
//! right) and stored one row per sentence, positionally aligned with the
//! reference chunk sequence that [`generate_chunks`](crate::chunk::generate_chunks)
//! builds for that sentence.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::errors::{GecError, GecResult};

/// One weight row per sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    rows: Vec<Vec<f64>>,
}

/// Row shape of the JSON exchange format: `{"weights": [...]}`.
#[derive(Debug, Deserialize)]
struct WeightRecord {
    weights: Vec<f64>,
}

impl WeightTable {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Parse the JSON exchange format `[{"weights": [f64, ...]}, ...]`.
    pub fn from_json_str(s: &str) -> GecResult<Self> {
        let records: Vec<WeightRecord> =
            serde_json::from_str(s).map_err(|e| GecError::Weights(e.to_string()))?;
        Ok(Self::from_records(records))
    }

    /// Like [`WeightTable::from_json_str`], reading from any byte source.
    pub fn from_json_reader<R: Read>(reader: R) -> GecResult<Self> {
        let records: Vec<WeightRecord> =
            serde_json::from_reader(reader).map_err(|e| GecError::Weights(e.to_string()))?;
        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<WeightRecord>) -> Self {
        Self::new(records.into_iter().map(|r| r.weights).collect())
    }

    pub fn sentence(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Weights for sentence `index`, checked against the chunk count.
    pub fn row_for(&self, index: usize, chunk_count: usize) -> GecResult<&[f64]> {
        let row = self
            .sentence(index)
            .ok_or(GecError::MissingWeights { sentence: index })?;
        if row.len() != chunk_count {
            return Err(GecError::WeightLengthMismatch {
                sentence: index,
                expected: chunk_count,
                found: row.len(),
            });
        }
        Ok(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
