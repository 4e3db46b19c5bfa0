//! Sampling engine for Indian Buffet Process latent feature models with a
//! noisy-OR likelihood.
//!
//! This crate holds the algorithms: likelihood evaluation, the Gibbs
//! conditionals for the feature-image matrix `Y` and the feature-ownership
//! matrix `Z`, the feature birth step and the pruning of unused features.
//! It is designed to work in `no_std` environments with only an allocator.
//!
//! # Features
//!
//! - `std` (default): Enable standard library support
//! - `parallel`: Evaluate sweep cells on rayon (requires `std`)
//! - `serde`: Serde derives for parameters and step outcomes
//!
//! # Usage
//!
//! This crate is typically used through the `ibp-noisyor` crate, which owns
//! the inference loop, configuration, data loading and sample output.
//!
//! ```ignore
//! use ibp_noisyor_core::{
//!     gibbs_iteration, FeatureState, ModelParams, Strategy,
//! };
//!
//! let step = gibbs_iteration(&obs, state, &params, Strategy::Sequential, &mut rng)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod birth;
pub mod conditional;
pub mod constants;
pub mod error;
pub mod likelihood;
pub mod math;
pub mod matrix;
pub mod parallel;
pub mod params;
pub mod prune;
pub mod sampler;
pub mod state;
pub mod strategy;

// Re-export commonly used items at crate root
pub use birth::{BirthOutcome, BirthReport};
pub use conditional::CellConditional;
pub use error::{Error, Result};
pub use matrix::{BinaryMatrix, CoverageMatrix};
pub use params::ModelParams;
pub use prune::PruneReport;
pub use sampler::{gibbs_iteration, CellSweep, IterationStep, OwnershipSweep};
pub use state::FeatureState;
pub use strategy::{ParallelSweep, SequentialSweep, Strategy, SweepStrategy};
