//! Sequential Gibbs sweep over the feature-ownership matrix `Z`.
//!
//! The IBP prior of a cell uses `m`, the number of *other* observations
//! owning the feature in the sweep-start `Z`. The likelihood is the
//! single-row log-likelihood of that observation with the cell set to 1 and
//! to 0 (restored afterwards). All cells are drawn independently.

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

/// Conditional on-probability of every `Z` cell (N×K).
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`.
pub fn ownership_conditionals(
    obs: &BinaryMatrix,
    state: &FeatureState,
    params: &ModelParams,
) -> Result<DMatrix<CellConditional>> {
    state.ensure_fits(obs)?;
    let (n_count, k_count) = state.z().shape();
    let col_sums = matrix::column_sums(state.z());

    let mut scratch = state.z().clone();
    let mut cells = Vec::with_capacity(n_count * k_count);

    for n in 0..n_count {
        for k in 0..k_count {
            let old_value = scratch[(n, k)];
            let others = col_sums[k] - u32::from(old_value);

            scratch[(n, k)] = 1;
            let on_loglik = likelihood::loglik_row(obs, state.y(), &scratch, n, params)?;
            scratch[(n, k)] = 0;
            let off_loglik = likelihood::loglik_row(obs, state.y(), &scratch, n, params)?;
            scratch[(n, k)] = old_value;

            cells.push(conditional::ownership_on_probability(
                others, n_count, on_loglik, off_loglik,
            ));
        }
    }

    Ok(DMatrix::from_row_slice(n_count, k_count, &cells))
}

/// Resample every cell of `Z` holding `Y` fixed.
///
/// Birth and pruning are not applied here; see [`super::sweep_ownership`].
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`.
pub fn sample_ownership<R: Rng + ?Sized>(
    obs: &BinaryMatrix,
    state: &FeatureState,
    params: &ModelParams,
    rng: &mut R,
) -> Result<CellSweep> {
    let conditionals = ownership_conditionals(obs, state, params)?;
    let (rows, cols) = conditionals.shape();

    let mut fallbacks = 0;
    let mut z = BinaryMatrix::zeros(rows, cols);
    for n in 0..rows {
        for k in 0..cols {
            let c = conditionals[(n, k)];
            fallbacks += usize::from(c.is_fallback());
            z[(n, k)] = c.draw(rng.random::<f64>());
        }
    }

    Ok(CellSweep { matrix: z, fallbacks })
}
