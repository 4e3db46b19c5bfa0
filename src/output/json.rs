//! JSON serialization for run summaries and latent states.

use ibp_noisyor_core::{BinaryMatrix, FeatureState};
use serde::{Deserialize, Serialize};

use crate::result::RunSummary;

/// Serialize a run summary to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RunSummary).
pub fn to_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string(summary)
}

/// Serialize a run summary to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RunSummary).
pub fn to_json_pretty(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

/// A binary matrix as nested rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRecord {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major values.
    pub data: Vec<Vec<u8>>,
}

impl From<&BinaryMatrix> for MatrixRecord {
    fn from(m: &BinaryMatrix) -> Self {
        Self {
            rows: m.nrows(),
            cols: m.ncols(),
            data: m.row_iter().map(|row| row.iter().copied().collect()).collect(),
        }
    }
}

impl MatrixRecord {
    /// Rebuild the matrix. Returns `None` if `data` does not match `rows`×`cols`.
    pub fn to_matrix(&self) -> Option<BinaryMatrix> {
        if self.data.len() != self.rows || self.data.iter().any(|r| r.len() != self.cols) {
            return None;
        }
        let flat: Vec<u8> = self.data.iter().flatten().copied().collect();
        Some(BinaryMatrix::from_row_slice(self.rows, self.cols, &flat))
    }
}

/// `Y` and `Z` of one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Feature images (K×D).
    pub y: MatrixRecord,
    /// Feature ownership (N×K).
    pub z: MatrixRecord,
}

impl From<&FeatureState> for StateRecord {
    fn from(state: &FeatureState) -> Self {
        Self {
            y: state.y().into(),
            z: state.z().into(),
        }
    }
}

/// Serialize a latent state to a compact JSON string.
pub fn state_to_json(state: &FeatureState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StateRecord::from(state))
}
