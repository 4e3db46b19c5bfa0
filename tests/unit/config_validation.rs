//! Tests for configuration validation.
//!
//! Builder methods panic on out-of-range values; configurations built by
//! struct literal are checked by `validate()` when a sampler is created.

use ibp_noisyor::{BinaryMatrix, Config, Error, NoisyOrSampler, Strategy, DEFAULT_SEED};

fn obs() -> BinaryMatrix {
    BinaryMatrix::from_row_slice(2, 2, &[1, 0, 0, 1])
}

// =============================================================================
// DEFAULTS AND PRESETS
// =============================================================================

#[test]
fn defaults() {
    let config = Config::default();
    assert!((config.alpha - 2.0).abs() < 1e-12);
    assert!((config.theta - 0.5).abs() < 1e-12);
    assert!((config.lambda - 0.95).abs() < 1e-12);
    assert!((config.epsilon - 0.01).abs() < 1e-12);
    assert_eq!(config.init_k, 4);
    assert_eq!(config.iterations, 1_000);
    assert_eq!(config.burn_in, 0);
    assert_eq!(config.thinning, 1);
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.strategy, Strategy::Sequential);
    assert!(!config.record_best);
}

#[test]
fn presets_are_valid() {
    for config in [Config::new(), Config::quick(), Config::thorough()] {
        config.validate().unwrap();
    }
    assert!(Config::quick().iterations < Config::thorough().iterations);
}

// =============================================================================
// BUILDER PANICS
// =============================================================================

#[test]
#[should_panic(expected = "alpha must be finite and non-negative")]
fn alpha_negative_panics() {
    let _ = Config::new().alpha(-0.5);
}

#[test]
#[should_panic(expected = "alpha must be finite and non-negative")]
fn alpha_infinite_panics() {
    let _ = Config::new().alpha(f64::INFINITY);
}

#[test]
fn alpha_zero_valid() {
    assert_eq!(Config::new().alpha(0.0).alpha, 0.0);
}

#[test]
#[should_panic(expected = "theta must be in [0, 1]")]
fn theta_above_one_panics() {
    let _ = Config::new().theta(1.5);
}

#[test]
#[should_panic(expected = "lambda must be in [0, 1]")]
fn lambda_negative_panics() {
    let _ = Config::new().lambda(-0.1);
}

#[test]
#[should_panic(expected = "epsilon must be in [0, 1]")]
fn epsilon_nan_panics() {
    let _ = Config::new().epsilon(f64::NAN);
}

#[test]
#[should_panic(expected = "iterations must be positive")]
fn iterations_zero_panics() {
    let _ = Config::new().iterations(0);
}

#[test]
#[should_panic(expected = "thinning must be positive")]
fn thinning_zero_panics() {
    let _ = Config::new().thinning(0);
}

#[test]
fn probability_bounds_valid() {
    let config = Config::new().theta(0.0).lambda(1.0).epsilon(0.0);
    config.validate().unwrap();
}

// =============================================================================
// VALIDATION OF LITERAL CONFIGS
// =============================================================================

#[test]
fn literal_invalid_theta_rejected() {
    let config = Config {
        theta: 2.0,
        ..Config::default()
    };
    let err = NoisyOrSampler::new(config, obs()).unwrap_err();
    assert!(matches!(
        err,
        Error::Model(ibp_noisyor::engine::Error::InvalidParameter { name: "theta", .. })
    ));
}

#[test]
fn literal_zero_iterations_rejected() {
    let config = Config {
        iterations: 0,
        ..Config::default()
    };
    let err = NoisyOrSampler::new(config, obs()).unwrap_err();
    assert!(matches!(err, Error::Config(msg) if msg.contains("iterations")));
}

#[test]
fn config_from_json() {
    let config: Config =
        serde_json::from_str(r#"{"alpha": 1.5, "iterations": 20, "strategy": "parallel"}"#).unwrap();
    assert!((config.alpha - 1.5).abs() < 1e-12);
    assert_eq!(config.iterations, 20);
    assert_eq!(config.strategy, Strategy::Parallel);
    assert_eq!(config.init_k, 4);
}

// =============================================================================
// RECORDING SCHEDULE
// =============================================================================

#[test]
fn burn_in_and_thinning_schedule() {
    let config = Config::new().burn_in(3).thinning(2);
    let recorded: Vec<usize> = (0..10).filter(|&i| config.is_recorded(i)).collect();
    assert_eq!(recorded, vec![3, 5, 7, 9]);
}
