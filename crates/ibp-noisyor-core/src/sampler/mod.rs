//! One Gibbs iteration: image sweep, ownership sweep, birth, prune.
//!
//! ```text
//! Y ← sweep(Y | Z)            (image, strategy-specific)
//! Z ← sweep(Z | Y)            (ownership, strategy-specific)
//! (Y, Z) ← birth(Y, Z)        (sequential, Metropolis batch)
//! (Y, Z) ← prune(Y, Z)        (sequential)
//! ```

pub mod image;
pub mod ownership;

use rand::RngCore;

use crate::birth::{self, BirthReport};
use crate::error::Result;
use crate::matrix::BinaryMatrix;
use crate::params::ModelParams;
use crate::prune::{self, PruneReport};
use crate::state::FeatureState;
use crate::strategy::{Strategy, SweepStrategy};

pub use image::{image_conditionals, sample_image};
pub use ownership::{ownership_conditionals, sample_ownership};

/// A resampled `Y` or `Z` of unchanged shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSweep {
    /// The new matrix.
    pub matrix: BinaryMatrix,
    /// Cells whose conditional fell back to the prior.
    pub fallbacks: usize,
}

/// Result of the ownership phase (cell sweep, then birth, then prune).
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipSweep {
    /// The state after pruning.
    pub state: FeatureState,
    /// Ownership cells whose conditional fell back to the prior.
    pub fallbacks: usize,
    /// Birth step outcome.
    pub birth: BirthReport,
    /// Prune step outcome.
    pub prune: PruneReport,
}

impl OwnershipSweep {
    /// True if pruning removed every feature.
    pub fn emptied(&self) -> bool {
        self.state.is_empty()
    }
}

/// Result of a full Gibbs iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStep {
    /// The new state.
    pub state: FeatureState,
    /// Image cells whose conditional fell back to the prior.
    pub image_fallbacks: usize,
    /// Ownership cells whose conditional fell back to the prior.
    pub ownership_fallbacks: usize,
    /// Birth step outcome.
    pub birth: BirthReport,
    /// Prune step outcome.
    pub prune: PruneReport,
}

impl IterationStep {
    /// Number of features after the iteration.
    pub fn num_features(&self) -> usize {
        self.state.num_features()
    }
}

/// Resample `Z`, then run birth and pruning.
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`.
pub fn sweep_ownership(
    obs: &BinaryMatrix,
    state: FeatureState,
    params: &ModelParams,
    sweeper: &dyn SweepStrategy,
    rng: &mut dyn RngCore,
) -> Result<OwnershipSweep> {
    let cells = sweeper.sweep_ownership(obs, &state, params, rng)?;
    let state = state.with_ownership(cells.matrix);

    let (state, birth) = birth::propose_features(obs, state, params, rng)?;
    let (state, prune) = prune::prune_inactive(state);

    Ok(OwnershipSweep {
        state,
        fallbacks: cells.fallbacks,
        birth,
        prune,
    })
}

/// Run one Gibbs iteration with the chosen execution strategy.
///
/// The image sweep completes before the ownership sweep starts, so `Z` is
/// always conditioned on the updated `Y`.
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`.
pub fn gibbs_iteration<R: RngCore>(
    obs: &BinaryMatrix,
    state: FeatureState,
    params: &ModelParams,
    strategy: Strategy,
    rng: &mut R,
) -> Result<IterationStep> {
    let rng: &mut dyn RngCore = rng;
    let sweeper = strategy.sweeper();

    let image = sweeper.sweep_image(obs, &state, params, rng)?;
    let state = state.with_images(image.matrix);

    let ownership = sweep_ownership(obs, state, params, sweeper, rng)?;

    Ok(IterationStep {
        state: ownership.state,
        image_fallbacks: image.fallbacks,
        ownership_fallbacks: ownership.fallbacks,
        birth: ownership.birth,
        prune: ownership.prune,
    })
}
