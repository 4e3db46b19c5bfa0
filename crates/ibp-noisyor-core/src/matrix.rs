//! Binary matrix helpers.
//!
//! `Y`, `Z` and the observations are all `DMatrix<u8>` holding 0/1. Products
//! are taken in `u32` so that a coverage count never overflows, whatever the
//! feature count.

extern crate alloc;

use alloc::vec::Vec;

use nalgebra::DMatrix;
use rand::Rng;

use crate::error::{Error, Result};

/// A dense matrix whose entries are exactly 0 or 1.
pub type BinaryMatrix = DMatrix<u8>;

/// Per-observation, per-dimension count of active features covering it (`Z·Y`).
pub type CoverageMatrix = DMatrix<u32>;

/// Check that every entry of `m` is 0 or 1.
pub fn ensure_binary(matrix: &'static str, m: &BinaryMatrix) -> Result<()> {
    for col in 0..m.ncols() {
        for row in 0..m.nrows() {
            let value = m[(row, col)];
            if value > 1 {
                return Err(Error::NonBinary {
                    matrix,
                    row,
                    col,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Check that `Z` has one column per row of `Y`.
#[inline]
pub fn ensure_feature_counts(y: &BinaryMatrix, z: &BinaryMatrix) -> Result<()> {
    if z.ncols() != y.nrows() {
        return Err(Error::ShapeMismatch {
            context: "feature count (columns of Z vs rows of Y)",
            expected: y.nrows(),
            found: z.ncols(),
        });
    }
    Ok(())
}

/// Compute the coverage matrix `Z·Y` (N×D).
///
/// With zero features the product is the N×D zero matrix.
pub fn coverage(z: &BinaryMatrix, y: &BinaryMatrix) -> Result<CoverageMatrix> {
    ensure_feature_counts(y, z)?;
    if z.ncols() == 0 {
        return Ok(CoverageMatrix::zeros(z.nrows(), y.ncols()));
    }
    Ok(z.map(u32::from) * y.map(u32::from))
}

/// Coverage counts for a single observation row, written into `out` (length D).
pub fn row_coverage(z: &BinaryMatrix, y: &BinaryMatrix, row: usize, out: &mut [u32]) {
    out.iter_mut().for_each(|c| *c = 0);
    for k in 0..z.ncols() {
        if z[(row, k)] == 0 {
            continue;
        }
        for (d, c) in out.iter_mut().enumerate() {
            *c += u32::from(y[(k, d)]);
        }
    }
}

/// Number of observations owning each feature (column sums of `Z`).
pub fn column_sums(z: &BinaryMatrix) -> Vec<u32> {
    (0..z.ncols())
        .map(|k| z.column(k).iter().map(|&v| u32::from(v)).sum())
        .collect()
}

/// Indices of the observations owning feature `k`.
pub fn owners(z: &BinaryMatrix, k: usize) -> Vec<usize> {
    z.column(k)
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > 0)
        .map(|(n, _)| n)
        .collect()
}

/// Draw a `rows`×`cols` matrix of independent fair coin flips.
pub fn random_binary<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> BinaryMatrix {
    BinaryMatrix::from_fn(rows, cols, |_, _| u8::from(rng.random::<bool>()))
}

/// Draw a `rows`×`cols` matrix with each entry 1 with probability `p`.
pub fn bernoulli_binary<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    p: f64,
    rng: &mut R,
) -> BinaryMatrix {
    BinaryMatrix::from_fn(rows, cols, |_, _| u8::from(rng.random::<f64>() < p))
}
