//! Error type for the inference facade.

use crate::data::DataError;

/// Errors returned by configuration, data loading and inference.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Shape, binary-value or parameter error from the sampling engine.
    #[error(transparent)]
    Model(#[from] ibp_noisyor_core::Error),

    /// Observation data could not be loaded.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Inconsistent run configuration.
    #[error("invalid configuration: {0}")]
    Config(&'static str),

    /// The observation matrix has no rows or no columns.
    #[error("observation matrix must be non-empty, got {rows}x{cols}")]
    EmptyObservations {
        /// Observations (N).
        rows: usize,
        /// Dimensions (D).
        cols: usize,
    },

    /// IO error opening or flushing an output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the inference facade.
pub type Result<T> = std::result::Result<T, Error>;
