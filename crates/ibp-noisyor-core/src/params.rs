//! Scalar parameters of the IBP noisy-OR model.

use crate::error::{Error, Result};
use crate::math;

/// The four model scalars, fixed for the lifetime of a run.
///
/// Threaded explicitly into every likelihood and sampler call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParams {
    /// IBP concentration: tendency to generate new features (α ≥ 0).
    pub alpha: f64,

    /// Prior probability that a pixel of a feature image is on (θ).
    pub theta: f64,

    /// Efficacy of a feature: probability it turns on a covered pixel (λ).
    pub lambda: f64,

    /// Probability that a pixel is on by chance in an observation (ε).
    pub epsilon: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            alpha: 2.0,
            theta: 0.5,
            lambda: 0.95,
            epsilon: 0.01,
        }
    }
}

impl ModelParams {
    /// Create validated parameters.
    ///
    /// `alpha` must be finite and non-negative; `theta`, `lambda` and
    /// `epsilon` must lie in `[0, 1]`.
    pub fn new(alpha: f64, theta: f64, lambda: f64, epsilon: f64) -> Result<Self> {
        let params = Self {
            alpha,
            theta,
            lambda,
            epsilon,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "alpha",
                value: self.alpha,
            });
        }
        for (name, value) in [
            ("theta", self.theta),
            ("lambda", self.lambda),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Probability that a pixel covered by `count` active features is off.
    ///
    /// `(1-λ)^count × (1-ε)`
    #[inline]
    pub fn off_probability(&self, count: u32) -> f64 {
        math::pow(1.0 - self.lambda, f64::from(count)) * (1.0 - self.epsilon)
    }

    /// Log prior of a feature-image pixel being on.
    #[inline]
    pub fn log_theta(&self) -> f64 {
        math::ln(self.theta)
    }

    /// Log prior of a feature-image pixel being off.
    #[inline]
    pub fn log_one_minus_theta(&self) -> f64 {
        math::ln(1.0 - self.theta)
    }
}
