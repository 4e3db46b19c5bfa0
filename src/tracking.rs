//! Best-sample tracking.

use ibp_noisyor_core::FeatureState;

use crate::result::BestSample;

/// Minimum mean improvement over the recent window.
const MIN_MEAN_IMPROVEMENT: f64 = 1.0;

/// Keeps the highest-likelihood state and how long it has stood.
#[derive(Debug, Clone, Default)]
pub struct BestSampleTracker {
    best: Option<BestSample>,
    /// Iterations since the last improvement.
    stale: usize,
    /// Log-likelihood gains of every improvement, oldest first.
    improvements: Vec<f64>,
}

impl BestSampleTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a state. Returns true if it became the new best.
    ///
    /// The first state offered always becomes the best without counting as
    /// an improvement.
    pub fn observe(&mut self, iteration: usize, loglik: f64, state: &FeatureState) -> bool {
        let gain = match &self.best {
            None => None,
            Some(best) if loglik > best.loglik => Some(loglik - best.loglik),
            Some(_) => {
                self.stale += 1;
                return false;
            }
        };

        if let Some(gain) = gain {
            self.improvements.push(gain);
        }
        self.stale = 0;
        self.best = Some(BestSample {
            iteration,
            loglik,
            y: state.y().clone(),
            z: state.z().clone(),
        });
        true
    }

    /// The best sample so far.
    pub fn best(&self) -> Option<&BestSample> {
        self.best.as_ref()
    }

    /// Consume the tracker, returning the best sample.
    pub fn into_best(self) -> Option<BestSample> {
        self.best
    }

    /// Iterations since the last improvement.
    pub fn stale_iterations(&self) -> usize {
        self.stale
    }

    /// True once the search has stalled.
    ///
    /// Stalled means more than `threshold` iterations without improvement,
    /// or a mean gain below 1 nat over the last `threshold` improvements.
    /// Never true before the first improvement.
    pub fn no_improvement(&self, threshold: usize) -> bool {
        if self.improvements.is_empty() {
            return false;
        }
        let window = &self.improvements[self.improvements.len().saturating_sub(threshold)..];
        if window.is_empty() {
            return self.stale > threshold;
        }
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        self.stale > threshold || mean < MIN_MEAN_IMPROVEMENT
    }
}
