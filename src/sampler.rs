//! The inference loop.

use std::ops::ControlFlow;
use std::path::Path;
use std::time::{Duration, Instant};

use ibp_noisyor_core::{
    gibbs_iteration, likelihood, matrix, BinaryMatrix, BirthOutcome, FeatureState, ModelParams,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::Config;
use crate::data;
use crate::error::{Error, Result};
use crate::output::{MatrixKind, NullSink, SampleSink};
use crate::result::{BestSample, IterationReport, RunStatus, RunSummary};
use crate::tracking::BestSampleTracker;

/// Gibbs sampler for an IBP latent feature model with a noisy-OR likelihood.
///
/// The sampler owns the observations, the current `(Y, Z)` and a seeded
/// random number generator. Successive runs continue the same chain.
#[derive(Debug, Clone)]
pub struct NoisyOrSampler {
    config: Config,
    params: ModelParams,
    obs: BinaryMatrix,
    state: FeatureState,
    rng: Xoshiro256PlusPlus,
    tracker: Option<BestSampleTracker>,
}

impl NoisyOrSampler {
    /// Create a sampler with a random initial state of `config.init_k` features.
    ///
    /// # Errors
    /// - `InvalidParameter` / `Config` if the configuration is invalid
    /// - `EmptyObservations` if `obs` has no rows or no columns
    /// - `NonBinary` if `obs` holds a value other than 0 or 1
    pub fn new(config: Config, obs: BinaryMatrix) -> Result<Self> {
        config.validate()?;
        let params = config.params()?;
        if obs.nrows() == 0 || obs.ncols() == 0 {
            return Err(Error::EmptyObservations {
                rows: obs.nrows(),
                cols: obs.ncols(),
            });
        }
        matrix::ensure_binary("O", &obs)?;

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
        let state = FeatureState::random(obs.nrows(), obs.ncols(), config.init_k, &mut rng);
        let tracker = config.record_best.then(BestSampleTracker::new);

        Ok(Self {
            config,
            params,
            obs,
            state,
            rng,
            tracker,
        })
    }

    /// Create a sampler from a CSV observation file.
    ///
    /// See [`data::load_observations_csv`] for the format.
    pub fn from_csv(config: Config, path: &Path, has_header: bool) -> Result<Self> {
        let obs = data::load_observations_csv(path, has_header)?;
        Self::new(config, obs)
    }

    /// Replace the initial state with caller-supplied matrices.
    ///
    /// # Errors
    /// `ShapeMismatch` unless `y` is K×D and `z` is N×K for the observations;
    /// `NonBinary` if either holds a value other than 0 or 1.
    pub fn with_initial_state(mut self, y: BinaryMatrix, z: BinaryMatrix) -> Result<Self> {
        let state = FeatureState::new(y, z)?;
        state.ensure_fits(&self.obs)?;
        self.state = state;
        Ok(self)
    }

    /// The run configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The model parameters.
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// The observation matrix.
    pub fn observations(&self) -> &BinaryMatrix {
        &self.obs
    }

    /// The current latent state.
    pub fn state(&self) -> &FeatureState {
        &self.state
    }

    /// Best sample seen so far, if tracking is enabled.
    pub fn best(&self) -> Option<&BestSample> {
        self.tracker.as_ref().and_then(BestSampleTracker::best)
    }

    /// The best-sample tracker, if tracking is enabled.
    pub fn tracker(&self) -> Option<&BestSampleTracker> {
        self.tracker.as_ref()
    }

    /// Log-likelihood of the observations under the current state.
    pub fn loglik(&self) -> Result<f64> {
        Ok(likelihood::loglik(&self.obs, self.state.y(), self.state.z(), &self.params)?)
    }

    /// Run all configured iterations, discarding samples.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.run_with_sink(&mut NullSink)
    }

    /// Run all configured iterations, recording samples to `sink`.
    pub fn run_with_sink(&mut self, sink: &mut dyn SampleSink) -> Result<RunSummary> {
        self.run_with(sink, |_| ControlFlow::Continue(()))
    }

    /// Run the configured iterations, calling `observer` after each one.
    ///
    /// Samples of every recorded iteration (see [`Config::is_recorded`]) go
    /// to `sink`, `Y` first. Sink errors are logged and counted, never
    /// fatal. Returning `ControlFlow::Break` from `observer` stops the run
    /// after the current iteration.
    ///
    /// # Errors
    /// Any error from the sampling engine aborts the run; the sampler keeps
    /// the state of the last completed iteration.
    pub fn run_with<F>(&mut self, sink: &mut dyn SampleSink, mut observer: F) -> Result<RunSummary>
    where
        F: FnMut(&IterationReport) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let strategy = self.config.strategy;
        let initial_loglik = self.loglik()?;

        tracing::info!(
            observations = self.obs.nrows(),
            dims = self.obs.ncols(),
            features = self.state.num_features(),
            strategy = strategy.name(),
            iterations = self.config.iterations,
            loglik = initial_loglik,
            "Starting inference"
        );

        let mut status = RunStatus::Completed;
        let mut sweep_time = Duration::ZERO;
        let mut final_loglik = initial_loglik;
        let mut iterations_run = 0;
        let mut samples_recorded = 0;
        let mut sink_failures = 0;
        let mut births_accepted = 0;
        let mut births_rejected = 0;
        let mut features_pruned = 0;
        let mut empty_iterations = 0;
        let mut total_fallbacks = 0;

        for iteration in 0..self.config.iterations {
            let sweep_start = Instant::now();
            let step = gibbs_iteration(
                &self.obs,
                self.state.clone(),
                &self.params,
                strategy,
                &mut self.rng,
            )?;
            sweep_time += sweep_start.elapsed();

            let birth = step.birth.outcome;
            let pruned = step.prune.removed;
            let fallbacks = step.image_fallbacks + step.ownership_fallbacks;
            self.state = step.state;
            let loglik = self.loglik()?;
            final_loglik = loglik;
            iterations_run += 1;

            match birth {
                BirthOutcome::Accepted { .. } => births_accepted += 1,
                BirthOutcome::Rejected { .. } => births_rejected += 1,
                BirthOutcome::NoProposal => {}
            }
            features_pruned += pruned;
            total_fallbacks += fallbacks;

            if fallbacks > 0 {
                tracing::debug!(iteration, fallbacks, "Conditionals fell back to the prior");
            }
            if self.state.is_empty() {
                empty_iterations += 1;
                tracing::warn!(iteration, "All features pruned, likelihood is background-only");
            }

            let recorded = self.config.is_recorded(iteration);
            if recorded {
                samples_recorded += 1;
                let samples = [
                    (MatrixKind::Images, self.state.y()),
                    (MatrixKind::Ownership, self.state.z()),
                ];
                for (kind, matrix) in samples {
                    if let Err(e) = sink.record(kind, iteration, matrix) {
                        sink_failures += 1;
                        tracing::warn!(iteration, ?kind, "Failed to record sample: {}", e);
                    }
                }
            }

            if let Some(tracker) = self.tracker.as_mut() {
                if tracker.observe(iteration, loglik, &self.state) {
                    tracing::debug!(iteration, loglik, "New best sample");
                }
            }

            tracing::debug!(
                iteration,
                loglik,
                features = self.state.num_features(),
                ?birth,
                pruned,
                "Iteration complete"
            );

            let report = IterationReport {
                iteration,
                num_features: self.state.num_features(),
                loglik,
                birth,
                pruned,
                fallbacks,
                recorded,
            };
            if observer(&report).is_break() {
                status = RunStatus::Stopped {
                    after_iteration: iteration,
                };
                break;
            }
        }

        if let Err(e) = sink.flush() {
            sink_failures += 1;
            tracing::warn!("Failed to flush sample sink: {}", e);
        }

        let elapsed = start.elapsed();
        tracing::info!(
            iterations = iterations_run,
            features = self.state.num_features(),
            loglik = final_loglik,
            elapsed_ms = elapsed.as_millis() as u64,
            sweep_ms = sweep_time.as_millis() as u64,
            "Inference finished"
        );

        Ok(RunSummary {
            status,
            strategy,
            iterations_run,
            samples_recorded,
            sink_failures,
            initial_loglik,
            final_loglik,
            final_features: self.state.num_features(),
            births_accepted,
            births_rejected,
            features_pruned,
            empty_iterations,
            fallbacks: total_fallbacks,
            best: self.best().map(|b| (b.iteration, b.loglik)),
            sweep_time,
            elapsed,
        })
    }
}
