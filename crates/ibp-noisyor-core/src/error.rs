//! Error types for the sampling engine.

use thiserror::Error;

/// Errors raised by the sampling engine.
///
/// Every variant is an invariant violation: a run that hits one cannot
/// continue. Numerical degeneracies are not errors; they are recovered
/// locally (see [`crate::conditional::CellConditional::PriorFallback`]).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Two matrices disagree on a shared dimension.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Which dimension was being checked.
        context: &'static str,
        /// The size the other operand requires.
        expected: usize,
        /// The size actually supplied.
        found: usize,
    },

    /// A matrix that must be binary holds something other than 0 or 1.
    #[error("{matrix} is not binary: entry ({row}, {col}) is {value}")]
    NonBinary {
        /// Name of the offending matrix.
        matrix: &'static str,
        /// Row of the first offending entry.
        row: usize,
        /// Column of the first offending entry.
        col: usize,
        /// The offending value.
        value: u8,
    },

    /// A model parameter lies outside its domain.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type for the sampling engine.
pub type Result<T> = core::result::Result<T, Error>;
