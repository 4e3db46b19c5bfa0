//! Constants shared by the samplers.

/// Default deterministic seed for RNG operations.
///
/// Same seed + same observations + same configuration = same chain.
/// The value `0x6E6F6973796F72` is "noisyor" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x6E6F6973796F72;

/// Acceptance probability of a birth proposal when neither the current nor
/// the proposed state has a finite log-likelihood.
pub const BIRTH_NO_PREFERENCE: f64 = 0.5;
