//! Execution strategies for the two cell sweeps.
//!
//! Birth and pruning are always sequential; only the `Y` and `Z` sweeps
//! differ between strategies.

use rand::RngCore;

use crate::error::Result;
use crate::matrix::BinaryMatrix;
use crate::params::ModelParams;
use crate::parallel::{self, Snapshot};
use crate::sampler::{image, ownership, CellSweep};
use crate::state::FeatureState;

/// A way of resampling every cell of `Y` or `Z`.
pub trait SweepStrategy: Send + Sync {
    /// Short name used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Resample `Y` holding `Z` fixed.
    fn sweep_image(
        &self,
        obs: &BinaryMatrix,
        state: &FeatureState,
        params: &ModelParams,
        rng: &mut dyn RngCore,
    ) -> Result<CellSweep>;

    /// Resample `Z` holding `Y` fixed.
    fn sweep_ownership(
        &self,
        obs: &BinaryMatrix,
        state: &FeatureState,
        params: &ModelParams,
        rng: &mut dyn RngCore,
    ) -> Result<CellSweep>;
}

/// Row-major sweeps with a scratch copy, one uniform per cell as it is visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSweep;

impl SweepStrategy for SequentialSweep {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn sweep_image(
        &self,
        obs: &BinaryMatrix,
        state: &FeatureState,
        params: &ModelParams,
        rng: &mut dyn RngCore,
    ) -> Result<CellSweep> {
        image::sample_image(obs, state, params, rng)
    }

    fn sweep_ownership(
        &self,
        obs: &BinaryMatrix,
        state: &FeatureState,
        params: &ModelParams,
        rng: &mut dyn RngCore,
    ) -> Result<CellSweep> {
        ownership::sample_ownership(obs, state, params, rng)
    }
}

/// Snapshot sweeps with all uniforms drawn up front, cells evaluated on rayon
/// when the `parallel` feature is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelSweep;

impl SweepStrategy for ParallelSweep {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn sweep_image(
        &self,
        obs: &BinaryMatrix,
        state: &FeatureState,
        params: &ModelParams,
        rng: &mut dyn RngCore,
    ) -> Result<CellSweep> {
        let snapshot = Snapshot::new(obs, state)?;
        let uniforms = parallel::cell_uniforms(state.y().len(), rng);
        parallel::sample_image(obs, &snapshot, params, &uniforms)
    }

    fn sweep_ownership(
        &self,
        obs: &BinaryMatrix,
        state: &FeatureState,
        params: &ModelParams,
        rng: &mut dyn RngCore,
    ) -> Result<CellSweep> {
        let snapshot = Snapshot::new(obs, state)?;
        let uniforms = parallel::cell_uniforms(state.z().len(), rng);
        parallel::sample_ownership(obs, &snapshot, params, &uniforms)
    }
}

/// Which sweep implementation an inference run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Strategy {
    /// [`SequentialSweep`].
    #[default]
    Sequential,
    /// [`ParallelSweep`].
    Parallel,
}

impl Strategy {
    /// The sweep implementation for this strategy.
    pub fn sweeper(self) -> &'static dyn SweepStrategy {
        match self {
            Strategy::Sequential => &SequentialSweep,
            Strategy::Parallel => &ParallelSweep,
        }
    }

    /// Short name used in logs and summaries.
    pub fn name(self) -> &'static str {
        self.sweeper().name()
    }
}
