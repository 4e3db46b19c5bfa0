//! The latent pair `(Y, Z)` as a single value.
//!
//! `Y` (K×D) and `Z` (N×K) always agree on K. The only ways to build a
//! [`FeatureState`] validate that, and every operation that changes K
//! consumes one state and returns the next.

use rand::Rng;

use crate::error::{Error, Result};
use crate::matrix::{self, BinaryMatrix};

/// Feature images `Y` and feature ownership `Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureState {
    y: BinaryMatrix,
    z: BinaryMatrix,
}

impl FeatureState {
    /// Build a state from caller-supplied matrices.
    ///
    /// # Errors
    /// `ShapeMismatch` if `columns(Z) != rows(Y)`, `NonBinary` if either
    /// matrix holds a value other than 0 or 1.
    pub fn new(y: BinaryMatrix, z: BinaryMatrix) -> Result<Self> {
        matrix::ensure_feature_counts(&y, &z)?;
        matrix::ensure_binary("Y", &y)?;
        matrix::ensure_binary("Z", &z)?;
        Ok(Self { y, z })
    }

    /// Independent uniform binary draws for `Y` (k×d) and `Z` (n×k).
    pub fn random<R: Rng + ?Sized>(n: usize, d: usize, k: usize, rng: &mut R) -> Self {
        let y = matrix::random_binary(k, d, rng);
        let z = matrix::random_binary(n, k, rng);
        Self { y, z }
    }

    /// Assemble a state whose matrices are already known to agree and be binary.
    pub(crate) fn from_parts(y: BinaryMatrix, z: BinaryMatrix) -> Self {
        debug_assert_eq!(y.nrows(), z.ncols());
        Self { y, z }
    }

    /// Replace `Y` with a matrix of the same shape.
    pub(crate) fn with_images(self, y: BinaryMatrix) -> Self {
        debug_assert_eq!(y.shape(), self.y.shape());
        Self { y, z: self.z }
    }

    /// Replace `Z` with a matrix of the same shape.
    pub(crate) fn with_ownership(self, z: BinaryMatrix) -> Self {
        debug_assert_eq!(z.shape(), self.z.shape());
        Self { y: self.y, z }
    }

    /// Check that this state fits an observation matrix (N×D).
    pub fn ensure_fits(&self, obs: &BinaryMatrix) -> Result<()> {
        if self.z.nrows() != obs.nrows() {
            return Err(Error::ShapeMismatch {
                context: "observation count (rows of Z vs rows of O)",
                expected: obs.nrows(),
                found: self.z.nrows(),
            });
        }
        if self.y.ncols() != obs.ncols() {
            return Err(Error::ShapeMismatch {
                context: "dimension count (columns of Y vs columns of O)",
                expected: obs.ncols(),
                found: self.y.ncols(),
            });
        }
        Ok(())
    }

    /// Feature images (K×D).
    #[inline]
    pub fn y(&self) -> &BinaryMatrix {
        &self.y
    }

    /// Feature ownership (N×K).
    #[inline]
    pub fn z(&self) -> &BinaryMatrix {
        &self.z
    }

    /// Number of features K.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.y.nrows()
    }

    /// Number of observations N.
    #[inline]
    pub fn num_observations(&self) -> usize {
        self.z.nrows()
    }

    /// Number of dimensions D.
    #[inline]
    pub fn num_dims(&self) -> usize {
        self.y.ncols()
    }

    /// True when every feature has been pruned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_features() == 0
    }

    /// Split into `(Y, Z)`.
    pub fn into_parts(self) -> (BinaryMatrix, BinaryMatrix) {
        (self.y, self.z)
    }
}
