//! Whole-matrix sweeps that evaluate every cell against one snapshot.
//!
//! All conditionals of a sweep are computed from the same `(Y, Z)`, so the
//! cells are independent and can be evaluated concurrently. Coverage counts
//! are derived from the snapshot coverage by adding or removing the
//! contribution of the flipped cell, which yields the same integer counts
//! (and the same log-likelihood sums) as the sequential samplers.
//!
//! Random numbers are supplied by the caller as one uniform per cell in
//! column-major order, so a sweep is a pure function of its inputs.

extern crate alloc;

use alloc::vec::Vec;

use nalgebra::DMatrix;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::conditional::{self, CellConditional};
use crate::error::{Error, Result};
use crate::likelihood::cell_loglik;
use crate::matrix::{self, BinaryMatrix, CoverageMatrix};
use crate::params::ModelParams;
use crate::sampler::CellSweep;
use crate::state::FeatureState;

/// Read-only view of a state with its derived quantities precomputed.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    state: &'a FeatureState,
    coverage: CoverageMatrix,
    column_sums: Vec<u32>,
    owners: Vec<Vec<usize>>,
}

impl<'a> Snapshot<'a> {
    /// Precompute coverage, column sums and feature owners for `state`.
    ///
    /// # Errors
    /// `ShapeMismatch` if `state` does not fit `obs`.
    pub fn new(obs: &BinaryMatrix, state: &'a FeatureState) -> Result<Self> {
        state.ensure_fits(obs)?;
        let coverage = matrix::coverage(state.z(), state.y())?;
        let column_sums = matrix::column_sums(state.z());
        let owners = (0..state.num_features())
            .map(|k| matrix::owners(state.z(), k))
            .collect();
        Ok(Self {
            state,
            coverage,
            column_sums,
            owners,
        })
    }

    /// The snapshotted state.
    pub fn state(&self) -> &FeatureState {
        self.state
    }

    /// Coverage `Z·Y` of the snapshot.
    pub fn coverage(&self) -> &CoverageMatrix {
        &self.coverage
    }

    /// Log-likelihood of the owners of feature `k` with `Y[k, d]` forced to `value`.
    fn image_loglik(&self, obs: &BinaryMatrix, k: usize, d: usize, value: u32, params: &ModelParams) -> f64 {
        let current = u32::from(self.state.y()[(k, d)]);
        let mut total = 0.0;
        for &n in &self.owners[k] {
            for col in 0..obs.ncols() {
                let mut count = self.coverage[(n, col)];
                if col == d {
                    // Z[n, k] = 1 for every owner
                    count = count - current + value;
                }
                total += cell_loglik(obs[(n, col)], count, params);
            }
        }
        total
    }

    /// Log-likelihood of observation `n` with `Z[n, k]` forced to `value`.
    fn ownership_loglik(&self, obs: &BinaryMatrix, n: usize, k: usize, value: u32, params: &ModelParams) -> f64 {
        let current = u32::from(self.state.z()[(n, k)]);
        let y = self.state.y();
        let mut total = 0.0;
        for col in 0..obs.ncols() {
            let image = u32::from(y[(k, col)]);
            let count = self.coverage[(n, col)] - current * image + value * image;
            total += cell_loglik(obs[(n, col)], count, params);
        }
        total
    }
}

/// Apply `f` to every cell index of an `nrows × ncols` matrix.
///
/// Indices are column-major to match nalgebra storage.
fn map_cells<F>(nrows: usize, ncols: usize, f: F) -> DMatrix<CellConditional>
where
    F: Fn(usize, usize) -> CellConditional + Sync + Send,
{
    let len = nrows * ncols;
    let at = |idx: usize| f(idx % nrows, idx / nrows);

    #[cfg(feature = "parallel")]
    let cells: Vec<CellConditional> = (0..len).into_par_iter().map(at).collect();

    #[cfg(not(feature = "parallel"))]
    let cells: Vec<CellConditional> = (0..len).map(at).collect();

    DMatrix::from_vec(nrows, ncols, cells)
}

/// Conditional on-probability of every `Y` cell, evaluated on the snapshot.
pub fn image_conditionals(
    obs: &BinaryMatrix,
    snapshot: &Snapshot<'_>,
    params: &ModelParams,
) -> DMatrix<CellConditional> {
    let (k_count, d_count) = snapshot.state.y().shape();
    map_cells(k_count, d_count, |k, d| {
        let on = snapshot.image_loglik(obs, k, d, 1, params);
        let off = snapshot.image_loglik(obs, k, d, 0, params);
        conditional::image_on_probability(on, off, params)
    })
}

/// Conditional on-probability of every `Z` cell, evaluated on the snapshot.
pub fn ownership_conditionals(
    obs: &BinaryMatrix,
    snapshot: &Snapshot<'_>,
    params: &ModelParams,
) -> DMatrix<CellConditional> {
    let (n_count, k_count) = snapshot.state.z().shape();
    map_cells(n_count, k_count, |n, k| {
        let others = snapshot.column_sums[k] - u32::from(snapshot.state.z()[(n, k)]);
        let on = snapshot.ownership_loglik(obs, n, k, 1, params);
        let off = snapshot.ownership_loglik(obs, n, k, 0, params);
        conditional::ownership_on_probability(others, n_count, on, off)
    })
}

/// Draw one uniform per cell, in the order the sweeps consume them.
pub fn cell_uniforms<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.random::<f64>()).collect()
}

fn draw_cells(conditionals: &DMatrix<CellConditional>, uniforms: &[f64]) -> Result<CellSweep> {
    if uniforms.len() != conditionals.len() {
        return Err(Error::ShapeMismatch {
            context: "uniform draws per cell",
            expected: conditionals.len(),
            found: uniforms.len(),
        });
    }
    let fallbacks = conditionals.iter().filter(|c| c.is_fallback()).count();
    let (rows, cols) = conditionals.shape();
    let values = conditionals
        .iter()
        .zip(uniforms)
        .map(|(c, &u)| c.draw(u))
        .collect();
    Ok(CellSweep {
        matrix: DMatrix::from_vec(rows, cols, values),
        fallbacks,
    })
}

/// Resample every `Y` cell from the snapshot.
///
/// # Errors
/// `ShapeMismatch` if `uniforms` does not hold one value per `Y` cell.
pub fn sample_image(
    obs: &BinaryMatrix,
    snapshot: &Snapshot<'_>,
    params: &ModelParams,
    uniforms: &[f64],
) -> Result<CellSweep> {
    draw_cells(&image_conditionals(obs, snapshot, params), uniforms)
}

/// Resample every `Z` cell from the snapshot.
///
/// Birth and pruning are not applied here.
///
/// # Errors
/// `ShapeMismatch` if `uniforms` does not hold one value per `Z` cell.
pub fn sample_ownership(
    obs: &BinaryMatrix,
    snapshot: &Snapshot<'_>,
    params: &ModelParams,
    uniforms: &[f64],
) -> Result<CellSweep> {
    draw_cells(&ownership_conditionals(obs, snapshot, params), uniforms)
}
