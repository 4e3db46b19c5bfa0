//! Sequential Gibbs sweep over the feature-image matrix `Y`.
//!
//! Every cell is evaluated against the sweep-start `Y`: the cell is set to 1,
//! then 0, in a scratch copy, the log-likelihood of the observations owning
//! that feature is taken for both, and the cell is restored before the next
//! one. All cells are then drawn independently.

extern crate alloc;

use alloc::vec::Vec;

use nalgebra::DMatrix;
use rand::Rng;

use crate::conditional::{self, CellConditional};
use crate::error::Result;
use crate::likelihood;
use crate::matrix::{self, BinaryMatrix};
use crate::params::ModelParams;
use crate::state::FeatureState;

use super::CellSweep;

/// Conditional on-probability of every `Y` cell (K×D).
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`.
pub fn image_conditionals(
    obs: &BinaryMatrix,
    state: &FeatureState,
    params: &ModelParams,
) -> Result<DMatrix<CellConditional>> {
    state.ensure_fits(obs)?;
    let (k_count, d_count) = state.y().shape();

    let mut scratch = state.y().clone();
    let mut cells = Vec::with_capacity(k_count * d_count);

    for k in 0..k_count {
        // A feature nobody owns gets an empty likelihood and follows the prior
        let affected = matrix::owners(state.z(), k);
        for d in 0..d_count {
            let old_value = scratch[(k, d)];

            scratch[(k, d)] = 1;
            let on_loglik = likelihood::loglik_rows(obs, &scratch, state.z(), &affected, params)?;
            scratch[(k, d)] = 0;
            let off_loglik = likelihood::loglik_rows(obs, &scratch, state.z(), &affected, params)?;
            scratch[(k, d)] = old_value;

            cells.push(conditional::image_on_probability(on_loglik, off_loglik, params));
        }
    }

    Ok(DMatrix::from_row_slice(k_count, d_count, &cells))
}

/// Resample every cell of `Y` holding `Z` fixed.
///
/// Returns a fresh matrix of the same shape; `state` is untouched.
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`.
pub fn sample_image<R: Rng + ?Sized>(
    obs: &BinaryMatrix,
    state: &FeatureState,
    params: &ModelParams,
    rng: &mut R,
) -> Result<CellSweep> {
    let conditionals = image_conditionals(obs, state, params)?;
    let (rows, cols) = conditionals.shape();

    let mut fallbacks = 0;
    let mut y = BinaryMatrix::zeros(rows, cols);
    for k in 0..rows {
        for d in 0..cols {
            let c = conditionals[(k, d)];
            fallbacks += usize::from(c.is_fallback());
            y[(k, d)] = c.draw(rng.random::<f64>());
        }
    }

    Ok(CellSweep { matrix: y, fallbacks })
}
