//! Per-cell conditional probabilities shared by every sweep strategy.
//!
//! The sequential and parallel sweeps differ only in how they compute the
//! two log-likelihood branches of a cell. Turning those branches into an
//! on-probability, and recovering when that is numerically impossible,
//! happens here and nowhere else.

use crate::constants::BIRTH_NO_PREFERENCE;
use crate::math;
use crate::params::ModelParams;

/// On-probability of a binary cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellConditional {
    /// Prior combined with likelihood.
    Posterior(f64),
    /// The normalizer was zero or non-finite; the prior alone decides.
    PriorFallback(f64),
}

impl CellConditional {
    /// Probability that the cell is 1.
    #[inline]
    pub fn probability(self) -> f64 {
        match self {
            Self::Posterior(p) | Self::PriorFallback(p) => p,
        }
    }

    /// True if the likelihood had to be discarded.
    #[inline]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::PriorFallback(_))
    }

    /// Bernoulli draw given a uniform `u` in `[0, 1)`.
    #[inline]
    pub fn draw(self, u: f64) -> u8 {
        u8::from(u < self.probability())
    }
}

/// Conditional on-probability of a feature-image cell.
///
/// Log domain: prior `ln θ` / `ln(1-θ)` plus the two likelihood branches,
/// shifted by their maximum before exponentiating.
pub fn image_on_probability(on_loglik: f64, off_loglik: f64, params: &ModelParams) -> CellConditional {
    let on = params.log_theta() + on_loglik;
    let off = params.log_one_minus_theta() + off_loglik;

    let max = on.max(off);
    if !max.is_finite() {
        return CellConditional::PriorFallback(params.theta);
    }
    let on = math::exp(on - max);
    let off = math::exp(off - max);
    let p = on / (on + off);
    if p.is_finite() {
        CellConditional::Posterior(p)
    } else {
        CellConditional::PriorFallback(params.theta)
    }
}

/// IBP prior probability that an observation owns a feature that `others`
/// of the remaining observations own, out of `n_obs` observations.
#[inline]
pub fn ownership_prior(others: u32, n_obs: usize) -> f64 {
    f64::from(others) / n_obs as f64
}

/// Conditional on-probability of a feature-ownership cell.
///
/// Probability domain: `m/N · exp(on)` against `(1 - m/N) · exp(off)`, with
/// both log-likelihoods shifted by their maximum first. When both branches
/// are impossible or the normalizer is not positive and finite, fall back
/// to `m/N`.
pub fn ownership_on_probability(
    others: u32,
    n_obs: usize,
    on_loglik: f64,
    off_loglik: f64,
) -> CellConditional {
    let prior_on = ownership_prior(others, n_obs);
    let max = on_loglik.max(off_loglik);
    if !max.is_finite() {
        return CellConditional::PriorFallback(prior_on);
    }
    let on = prior_on * math::exp(on_loglik - max);
    let off = (1.0 - prior_on) * math::exp(off_loglik - max);

    let denom = on + off;
    if denom > 0.0 && denom.is_finite() {
        CellConditional::Posterior(on / denom)
    } else {
        CellConditional::PriorFallback(prior_on)
    }
}

/// Metropolis acceptance probability of a birth proposal.
///
/// Both log-likelihoods are shifted by their maximum, then
/// `1 / (1 + exp(old − new))`. If neither state has a finite
/// log-likelihood there is no preference.
pub fn birth_acceptance(old_loglik: f64, new_loglik: f64) -> CellConditional {
    let max = old_loglik.max(new_loglik);
    if !max.is_finite() {
        return CellConditional::PriorFallback(BIRTH_NO_PREFERENCE);
    }
    let old = old_loglik - max;
    let new = new_loglik - max;
    let p = 1.0 / (1.0 + math::exp(old - new));
    if p.is_nan() {
        CellConditional::PriorFallback(BIRTH_NO_PREFERENCE)
    } else {
        CellConditional::Posterior(p)
    }
}
