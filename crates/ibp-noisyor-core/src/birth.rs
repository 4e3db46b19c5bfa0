//! Feature birth: propose a batch of brand-new features and accept or reject
//! it as a unit with a Metropolis test.
//!
//! The number of new features is `k_new ~ Poisson(α / N)`. The proposal
//! gives every observation all `k_new` features (the current `Z` is treated
//! as a frozen snapshot rather than sampling adoption row by row), and draws
//! each new feature image from the prior, `Bernoulli(θ)` per pixel.

use rand::Rng;
use rand_distr::{Distribution, Poisson};

use crate::conditional::{self, CellConditional};
use crate::error::{Error, Result};
use crate::likelihood;
use crate::matrix::{self, BinaryMatrix};
use crate::params::ModelParams;
use crate::state::FeatureState;

/// What the birth step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BirthOutcome {
    /// `k_new` was 0: nothing was proposed.
    NoProposal,
    /// The proposal was adopted.
    Accepted {
        /// Number of features added.
        added: usize,
    },
    /// The proposal was rejected; the state is unchanged.
    Rejected {
        /// Number of features that were proposed.
        proposed: usize,
    },
}

impl BirthOutcome {
    /// Number of features added to the state.
    pub fn added(&self) -> usize {
        match self {
            Self::Accepted { added } => *added,
            _ => 0,
        }
    }
}

/// Birth outcome with its acceptance probability.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BirthReport {
    /// What happened.
    pub outcome: BirthOutcome,
    /// Acceptance probability, `None` when nothing was proposed.
    pub acceptance: Option<CellConditional>,
}

impl BirthReport {
    fn no_proposal() -> Self {
        Self {
            outcome: BirthOutcome::NoProposal,
            acceptance: None,
        }
    }
}

/// Draw the number of new features, `Poisson(α / N)`.
///
/// `α = 0` (or no observations) always yields 0.
///
/// # Errors
/// `InvalidParameter` if `α / N` is not a valid Poisson rate.
pub fn draw_new_feature_count<R: Rng + ?Sized>(
    alpha: f64,
    n_obs: usize,
    rng: &mut R,
) -> Result<usize> {
    if alpha == 0.0 || n_obs == 0 {
        return Ok(0);
    }
    let rate = alpha / n_obs as f64;
    let poisson = Poisson::new(rate).map_err(|_| Error::InvalidParameter {
        name: "alpha",
        value: alpha,
    })?;
    let draw: f64 = poisson.sample(rng);
    Ok(draw as usize)
}

/// Append `k_new` features: all-ones columns of `Z`, prior-drawn rows of `Y`.
pub fn extend_with_new_features<R: Rng + ?Sized>(
    state: &FeatureState,
    k_new: usize,
    params: &ModelParams,
    rng: &mut R,
) -> FeatureState {
    let k = state.num_features();
    let d = state.num_dims();

    let z = state.z().clone().insert_columns(k, k_new, 1);
    let fresh = matrix::bernoulli_binary(k_new, d, params.theta, rng);
    let y = BinaryMatrix::from_fn(k + k_new, d, |row, col| {
        if row < k {
            state.y()[(row, col)]
        } else {
            fresh[(row - k, col)]
        }
    });

    FeatureState::from_parts(y, z)
}

/// Run the birth step on `state`.
///
/// Returns the candidate state if accepted, the input state otherwise.
///
/// # Errors
/// `ShapeMismatch` if `state` does not fit `obs`; `InvalidParameter` for an
/// unusable `α`.
pub fn propose_features<R: Rng + ?Sized>(
    obs: &BinaryMatrix,
    state: FeatureState,
    params: &ModelParams,
    rng: &mut R,
) -> Result<(FeatureState, BirthReport)> {
    state.ensure_fits(obs)?;

    let k_new = draw_new_feature_count(params.alpha, state.num_observations(), rng)?;
    if k_new == 0 {
        return Ok((state, BirthReport::no_proposal()));
    }

    let old_loglik = likelihood::loglik(obs, state.y(), state.z(), params)?;
    let candidate = extend_with_new_features(&state, k_new, params, rng);
    let new_loglik = likelihood::loglik(obs, candidate.y(), candidate.z(), params)?;

    let acceptance = conditional::birth_acceptance(old_loglik, new_loglik);
    if rng.random::<f64>() < acceptance.probability() {
        let report = BirthReport {
            outcome: BirthOutcome::Accepted { added: k_new },
            acceptance: Some(acceptance),
        };
        Ok((candidate, report))
    } else {
        let report = BirthReport {
            outcome: BirthOutcome::Rejected { proposed: k_new },
            acceptance: Some(acceptance),
        };
        Ok((state, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn obs() -> BinaryMatrix {
        BinaryMatrix::from_row_slice(3, 2, &[1, 0, 0, 1, 1, 1])
    }

    #[test]
    fn test_zero_alpha_never_proposes() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..10_000 {
            assert_eq!(draw_new_feature_count(0.0, 3, &mut rng).unwrap(), 0);
        }

        let p = ModelParams::new(0.0, 0.5, 0.9, 0.05).unwrap();
        let state = FeatureState::random(3, 2, 2, &mut rng);
        for _ in 0..1_000 {
            let (next, report) = propose_features(&obs(), state.clone(), &p, &mut rng).unwrap();
            assert_eq!(report.outcome, BirthOutcome::NoProposal);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_poisson_rate_matches_alpha_over_n() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let trials = 20_000;
        let total: usize = (0..trials)
            .map(|_| draw_new_feature_count(6.0, 3, &mut rng).unwrap())
            .sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean k_new should be near 2, got {}", mean);
    }

    #[test]
    fn test_extension_gives_everyone_the_new_features() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let state = FeatureState::random(3, 2, 2, &mut rng);
        let p = ModelParams::new(1.0, 0.5, 0.9, 0.05).unwrap();

        let grown = extend_with_new_features(&state, 3, &p, &mut rng);
        assert_eq!(grown.num_features(), 5);
        assert_eq!(grown.y().shape(), (5, 2));
        assert_eq!(grown.z().shape(), (3, 5));
        for n in 0..3 {
            for k in 0..2 {
                assert_eq!(grown.z()[(n, k)], state.z()[(n, k)]);
            }
            for k in 2..5 {
                assert_eq!(grown.z()[(n, k)], 1);
            }
        }
        for k in 0..2 {
            for d in 0..2 {
                assert_eq!(grown.y()[(k, d)], state.y()[(k, d)]);
            }
        }
    }

    #[test]
    fn test_birth_from_empty_state() {
        // theta = 1 makes every new image all-on, which explains the data better
        let p = ModelParams::new(30.0, 1.0, 0.9, 0.05).unwrap();
        let obs = BinaryMatrix::from_element(3, 2, 1);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);

        let mut accepted = false;
        for _ in 0..100 {
            let empty = FeatureState::new(BinaryMatrix::zeros(0, 2), BinaryMatrix::zeros(3, 0)).unwrap();
            let (next, report) = propose_features(&obs, empty, &p, &mut rng).unwrap();
            assert_eq!(next.num_features(), report.outcome.added());
            if let BirthOutcome::Accepted { added } = report.outcome {
                assert!(added > 0);
                assert_eq!(next.z().shape(), (3, added));
                accepted = true;
            }
        }
        assert!(accepted, "birth should be able to repopulate an empty state");
    }

    #[test]
    fn test_rejection_returns_input_unchanged() {
        // theta = 1 with all-off data: new all-on features only hurt
        let p = ModelParams::new(30.0, 1.0, 0.99, 0.01).unwrap();
        let obs = BinaryMatrix::zeros(3, 4);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let state = FeatureState::new(BinaryMatrix::zeros(1, 4), BinaryMatrix::zeros(3, 1)).unwrap();

        for _ in 0..50 {
            let (next, report) = propose_features(&obs, state.clone(), &p, &mut rng).unwrap();
            if let BirthOutcome::Rejected { proposed } = report.outcome {
                assert!(proposed > 0);
                assert_eq!(next, state);
                let acceptance = report.acceptance.unwrap().probability();
                assert!(acceptance < 1e-6);
            }
            assert!(!matches!(report.outcome, BirthOutcome::Accepted { .. }));
        }
    }
}
