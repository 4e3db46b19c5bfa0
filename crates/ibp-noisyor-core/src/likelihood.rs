//! Noisy-OR log-likelihood of the observations given `Y` and `Z`.
//!
//! A dimension of an observation is off with probability
//!
//! ```text
//! P(o = 0) = (1-λ)^(z·y) × (1-ε)
//! ```
//!
//! where `z·y` counts the observation's active features covering that
//! dimension. The log-likelihood of a cell is `ln|o − P(o = 0)|`, which is
//! `ln P(o = 0)` for an off cell and `ln(1 − P(o = 0))` for an on cell.
//!
//! All functions are pure and sum cells observation-major, dimension-minor,
//! so the sequential and parallel sweeps accumulate identical terms in the
//! same order.

extern crate alloc;

use alloc::vec;

use crate::error::{Error, Result};
use crate::math;
use crate::matrix::{self, BinaryMatrix, CoverageMatrix};
use crate::params::ModelParams;

/// Log-likelihood of one cell with observed value `observed` and coverage `count`.
#[inline]
pub fn cell_loglik(observed: u8, count: u32, params: &ModelParams) -> f64 {
    math::ln(math::abs(f64::from(observed) - params.off_probability(count)))
}

/// Total log-likelihood of all N×D observation cells.
///
/// # Errors
/// `ShapeMismatch` if `columns(Z) != rows(Y)` or either matrix does not fit `obs`.
pub fn loglik(
    obs: &BinaryMatrix,
    y: &BinaryMatrix,
    z: &BinaryMatrix,
    params: &ModelParams,
) -> Result<f64> {
    ensure_shapes(obs, y, z)?;
    let cov = matrix::coverage(z, y)?;
    Ok(loglik_from_coverage(obs, &cov, params))
}

/// Total log-likelihood given a precomputed coverage matrix `Z·Y`.
pub fn loglik_from_coverage(obs: &BinaryMatrix, cov: &CoverageMatrix, params: &ModelParams) -> f64 {
    let mut total = 0.0;
    for n in 0..obs.nrows() {
        for d in 0..obs.ncols() {
            total += cell_loglik(obs[(n, d)], cov[(n, d)], params);
        }
    }
    total
}

/// Log-likelihood of the D cells of observation `n`.
///
/// # Errors
/// `ShapeMismatch` on inconsistent shapes or if `n` is not a valid row.
pub fn loglik_row(
    obs: &BinaryMatrix,
    y: &BinaryMatrix,
    z: &BinaryMatrix,
    n: usize,
    params: &ModelParams,
) -> Result<f64> {
    loglik_rows(obs, y, z, &[n], params)
}

/// Log-likelihood of the observations listed in `rows`.
///
/// An empty `rows` contributes 0.
///
/// # Errors
/// `ShapeMismatch` on inconsistent shapes or if a row index is out of range.
pub fn loglik_rows(
    obs: &BinaryMatrix,
    y: &BinaryMatrix,
    z: &BinaryMatrix,
    rows: &[usize],
    params: &ModelParams,
) -> Result<f64> {
    ensure_shapes(obs, y, z)?;
    let mut counts = vec![0u32; obs.ncols()];
    let mut total = 0.0;
    for &n in rows {
        if n >= obs.nrows() {
            return Err(Error::ShapeMismatch {
                context: "observation index",
                expected: obs.nrows(),
                found: n,
            });
        }
        matrix::row_coverage(z, y, n, &mut counts);
        for (d, &count) in counts.iter().enumerate() {
            total += cell_loglik(obs[(n, d)], count, params);
        }
    }
    Ok(total)
}

fn ensure_shapes(obs: &BinaryMatrix, y: &BinaryMatrix, z: &BinaryMatrix) -> Result<()> {
    matrix::ensure_feature_counts(y, z)?;
    if z.nrows() != obs.nrows() {
        return Err(Error::ShapeMismatch {
            context: "observation count (rows of Z vs rows of O)",
            expected: obs.nrows(),
            found: z.nrows(),
        });
    }
    if y.ncols() != obs.ncols() {
        return Err(Error::ShapeMismatch {
            context: "dimension count (columns of Y vs columns of O)",
            expected: obs.ncols(),
            found: y.ncols(),
        });
    }
    Ok(())
}
