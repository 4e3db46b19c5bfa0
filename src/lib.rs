//! # ibp-noisyor
//!
//! Bayesian nonparametric latent feature learning for binary data.
//!
//! Each observation is explained by a subset of latent binary features under
//! an Indian Buffet Process prior. An observed cell is on with noisy-OR
//! probability `1 - (1-λ)^count · (1-ε)`, where `count` is the number of the
//! observation's features whose image covers that cell. Inference is Gibbs
//! sampling over the feature images `Y` and ownership `Z`, with a
//! Metropolis birth step and pruning so the number of features can change.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ibp_noisyor::{Config, NoisyOrSampler, Strategy};
//! use std::path::Path;
//!
//! let config = Config::quick().alpha(1.0).strategy(Strategy::Parallel);
//! let mut sampler = NoisyOrSampler::from_csv(config, Path::new("obs.csv"), false)?;
//! let summary = sampler.run()?;
//!
//! println!("K = {}, loglik = {}", summary.final_features, summary.final_loglik);
//! ```
//!
//! ## Recording samples
//!
//! ```ignore
//! use ibp_noisyor::output::RowMajorWriter;
//!
//! let mut sink = RowMajorWriter::create(Path::new("samples.txt"))?;
//! sampler.run_with_sink(&mut sink)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data;
mod error;
pub mod output;
mod result;
mod sampler;
mod tracking;

pub use config::Config;
pub use error::{Error, Result};
pub use result::{BestSample, IterationReport, RunStatus, RunSummary};
pub use sampler::NoisyOrSampler;
pub use tracking::BestSampleTracker;

// Re-export the engine types callers need to drive or inspect a run
pub use ibp_noisyor_core::constants::DEFAULT_SEED;
pub use ibp_noisyor_core::{BinaryMatrix, BirthOutcome, FeatureState, ModelParams, Strategy};

/// The sampling engine.
pub use ibp_noisyor_core as engine;
