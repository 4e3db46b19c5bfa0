//! Outcomes of an inference run.

use std::time::Duration;

use ibp_noisyor_core::{BinaryMatrix, BirthOutcome, Strategy};
use serde::{Deserialize, Serialize};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// All configured iterations ran.
    Completed,
    /// The observer stopped the run after `after_iteration`.
    Stopped {
        /// Last iteration that ran (0-based).
        after_iteration: usize,
    },
}

impl RunStatus {
    /// True if every configured iteration ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}

/// What happened in one iteration, handed to the run observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// Iteration index (0-based).
    pub iteration: usize,
    /// Features after pruning.
    pub num_features: usize,
    /// Log-likelihood of the observations under the new state.
    pub loglik: f64,
    /// Birth step outcome.
    pub birth: BirthOutcome,
    /// Features removed by pruning.
    pub pruned: usize,
    /// Sweep cells that fell back to their prior.
    pub fallbacks: usize,
    /// Whether this iteration's sample went to the sink.
    pub recorded: bool,
}

/// Highest-likelihood state seen during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSample {
    /// Iteration that produced it (0-based).
    pub iteration: usize,
    /// Log-likelihood of the observations.
    pub loglik: f64,
    /// Feature images.
    pub y: BinaryMatrix,
    /// Feature ownership.
    pub z: BinaryMatrix,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// How the run ended.
    pub status: RunStatus,
    /// Sweep strategy used.
    pub strategy: Strategy,
    /// Iterations that ran.
    pub iterations_run: usize,
    /// Iterations whose samples went to the sink.
    pub samples_recorded: usize,
    /// Sink calls that returned an error.
    pub sink_failures: usize,
    /// Log-likelihood of the initial state.
    pub initial_loglik: f64,
    /// Log-likelihood of the final state.
    pub final_loglik: f64,
    /// Features in the final state.
    pub final_features: usize,
    /// Accepted birth proposals.
    pub births_accepted: usize,
    /// Rejected birth proposals.
    pub births_rejected: usize,
    /// Features removed by pruning over the run.
    pub features_pruned: usize,
    /// Iterations that ended with no features.
    pub empty_iterations: usize,
    /// Sweep cells that fell back to their prior over the run.
    pub fallbacks: usize,
    /// Best log-likelihood and its iteration, if tracking was on.
    pub best: Option<(usize, f64)>,
    /// Time spent in the image and ownership sweeps.
    pub sweep_time: Duration,
    /// Total wall time.
    pub elapsed: Duration,
}
