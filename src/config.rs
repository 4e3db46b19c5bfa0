//! Configuration for an inference run.

use ibp_noisyor_core::constants::DEFAULT_SEED;
use ibp_noisyor_core::{ModelParams, Strategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration options for [`NoisyOrSampler`](crate::NoisyOrSampler).
///
/// Model parameters and sampling schedule are fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Model parameters
    // =========================================================================
    /// IBP concentration: expected rate of new features.
    ///
    /// Larger values propose more features in the birth step. `0` disables
    /// birth entirely. Default: 2.0.
    pub alpha: f64,

    /// Prior probability that a feature-image cell is on. Default: 0.5.
    pub theta: f64,

    /// Probability that one active feature turns an observed cell on.
    /// Default: 0.95.
    pub lambda: f64,

    /// Probability that an observed cell is on with no feature covering it.
    /// Default: 0.01.
    pub epsilon: f64,

    // =========================================================================
    // Sampling schedule
    // =========================================================================
    /// Number of features in the random initial state. Default: 4.
    pub init_k: usize,

    /// Number of Gibbs iterations. Default: 1,000.
    pub iterations: usize,

    /// Iterations to discard before recording samples. Default: 0.
    pub burn_in: usize,

    /// Record every `thinning`-th iteration after burn-in. Default: 1.
    pub thinning: usize,

    /// Seed for the run's random number generator. Default: [`DEFAULT_SEED`].
    pub seed: u64,

    /// Sweep implementation. Default: [`Strategy::Sequential`].
    pub strategy: Strategy,

    /// Track the highest-likelihood sample seen. Default: false.
    ///
    /// Each new best copies the current `Y` and `Z`.
    pub record_best: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: 2.0,
            theta: 0.5,
            lambda: 0.95,
            epsilon: 0.01,

            init_k: 4,
            iterations: 1_000,
            burn_in: 0,
            thinning: 1,
            seed: DEFAULT_SEED,
            strategy: Strategy::Sequential,
            record_best: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A short run for development and smoke tests:
    /// - 100 iterations
    /// - 10 burn-in iterations
    pub fn quick() -> Self {
        Self {
            iterations: 100,
            burn_in: 10,
            ..Default::default()
        }
    }

    /// A long run for real inference:
    /// - 10,000 iterations
    /// - 1,000 burn-in iterations, every 10th sample kept
    /// - best-sample tracking on
    pub fn thorough() -> Self {
        Self {
            iterations: 10_000,
            burn_in: 1_000,
            thinning: 10,
            record_best: true,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the IBP concentration.
    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(alpha.is_finite() && alpha >= 0.0, "alpha must be finite and non-negative");
        self.alpha = alpha;
        self
    }

    /// Set the prior on-probability of an image cell.
    pub fn theta(mut self, theta: f64) -> Self {
        assert!((0.0..=1.0).contains(&theta), "theta must be in [0, 1]");
        self.theta = theta;
        self
    }

    /// Set the per-feature activation probability.
    pub fn lambda(mut self, lambda: f64) -> Self {
        assert!((0.0..=1.0).contains(&lambda), "lambda must be in [0, 1]");
        self.lambda = lambda;
        self
    }

    /// Set the background noise probability.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        assert!((0.0..=1.0).contains(&epsilon), "epsilon must be in [0, 1]");
        self.epsilon = epsilon;
        self
    }

    /// Set the initial number of features.
    pub fn init_k(mut self, k: usize) -> Self {
        self.init_k = k;
        self
    }

    /// Set the number of iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        assert!(iterations > 0, "iterations must be positive");
        self.iterations = iterations;
        self
    }

    /// Set the number of burn-in iterations.
    pub fn burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }

    /// Set the thinning interval.
    pub fn thinning(mut self, thinning: usize) -> Self {
        assert!(thinning > 0, "thinning must be positive");
        self.thinning = thinning;
        self
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the sweep strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable best-sample tracking.
    pub fn record_best(mut self, record: bool) -> Self {
        self.record_best = record;
        self
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Model parameters for the core sampler.
    ///
    /// # Errors
    /// `InvalidParameter` if a probability is outside [0, 1] or `alpha` is
    /// negative or not finite.
    pub fn params(&self) -> Result<ModelParams> {
        Ok(ModelParams::new(self.alpha, self.theta, self.lambda, self.epsilon)?)
    }

    /// Check a configuration built by struct literal or deserialization.
    pub fn validate(&self) -> Result<()> {
        self.params()?;
        if self.iterations == 0 {
            return Err(Error::Config("iterations must be positive"));
        }
        if self.thinning == 0 {
            return Err(Error::Config("thinning must be positive"));
        }
        Ok(())
    }

    /// Whether `iteration` (0-based) is recorded to the sample sink.
    pub fn is_recorded(&self, iteration: usize) -> bool {
        iteration >= self.burn_in && (iteration - self.burn_in) % self.thinning == 0
    }
}
