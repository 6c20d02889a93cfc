#![cfg(feature = "dev")]

use isotonic_rs::internals::engine::executor::IsotonicConfig;
use isotonic_rs::internals::engine::validator::Validator;
use isotonic_rs::internals::primitives::errors::IsotonicError;
use isotonic_rs::internals::primitives::norm::Norm;

// ============================================================================
// Input Validation Tests
// ============================================================================

/// Test one-dimensional input validation.
#[test]
fn test_validate_inputs_1d() {
    let xs = [0.0, 1.0, 2.0];
    let vs = [1.0, 2.0, 3.0];

    assert!(Validator::validate_inputs_1d(&xs, &vs, None).is_ok());
    assert!(Validator::validate_inputs_1d(&xs, &vs, Some(&[1.0, 0.0, 2.0])).is_ok());

    assert_eq!(
        Validator::validate_inputs_1d::<f64>(&[], &[], None),
        Err(IsotonicError::EmptyInput)
    );
    assert_eq!(
        Validator::validate_inputs_1d(&xs, &vs[..2], None),
        Err(IsotonicError::MismatchedInputs {
            name: "vs",
            expected: 3,
            got: 2
        })
    );
    assert_eq!(
        Validator::validate_inputs_1d(&xs, &vs, Some(&[1.0])),
        Err(IsotonicError::MismatchedInputs {
            name: "ws",
            expected: 3,
            got: 1
        })
    );
    assert_eq!(
        Validator::validate_inputs_1d(&[0.0, f64::NAN, 2.0], &vs, None),
        Err(IsotonicError::InvalidNumericValue("x[1]=NaN".to_string()))
    );
    assert_eq!(
        Validator::validate_inputs_1d(&xs, &[1.0, 2.0, f64::INFINITY], None),
        Err(IsotonicError::InvalidNumericValue("v[2]=inf".to_string()))
    );
}

/// Test weight validation.
#[test]
fn test_validate_weights() {
    assert!(Validator::validate_weights(&[0.0, 1.0]).is_ok());
    assert_eq!(
        Validator::validate_weights(&[1.0, -0.5]),
        Err(IsotonicError::NegativeWeight { index: 1 })
    );
    assert_eq!(
        Validator::validate_weights(&[0.0, 0.0]),
        Err(IsotonicError::EmptyInput)
    );
    assert_eq!(
        Validator::validate_weights(&[f64::NAN]),
        Err(IsotonicError::InvalidNumericValue("w[0]=NaN".to_string()))
    );
}

/// Test two-dimensional input validation.
#[test]
fn test_validate_inputs_2d() {
    let xs = [0.0, 1.0];
    assert!(Validator::validate_inputs_2d(&xs, &[0.0, 1.0], &[1.0, 2.0], None).is_ok());
    assert_eq!(
        Validator::validate_inputs_2d(&xs, &[0.0], &[1.0, 2.0], None),
        Err(IsotonicError::MismatchedInputs {
            name: "ys",
            expected: 2,
            got: 1
        })
    );
    assert_eq!(
        Validator::validate_inputs_2d(&xs, &[0.0, f64::NEG_INFINITY], &[1.0, 2.0], None),
        Err(IsotonicError::InvalidNumericValue("y[1]=-inf".to_string()))
    );
}

/// Test row-major k-dimensional input validation.
#[test]
fn test_validate_inputs_kd() {
    let x = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    assert!(Validator::validate_inputs_kd(&x, &[1.0, 2.0], None, 3).is_ok());
    assert_eq!(
        Validator::validate_inputs_kd(&x, &[1.0, 2.0], None, 2),
        Err(IsotonicError::MismatchedInputs {
            name: "x",
            expected: 4,
            got: 6
        })
    );
    assert_eq!(
        Validator::validate_inputs_kd(&x, &[1.0, 2.0], None, 0),
        Err(IsotonicError::InvalidDimensions { got: 0, min: 1 })
    );
    assert_eq!(
        Validator::validate_inputs_kd::<f64>(&[], &[], None, 2),
        Err(IsotonicError::EmptyInput)
    );
}

/// Test reducer input validation.
#[test]
fn test_validate_reduction() {
    assert!(Validator::validate_reduction(&[1.0, 2.0], &[1.0, 1.0]).is_ok());
    assert_eq!(
        Validator::validate_reduction::<f64>(&[], &[]),
        Err(IsotonicError::EmptyInput)
    );
    assert_eq!(
        Validator::validate_reduction(&[1.0, 2.0], &[1.0]),
        Err(IsotonicError::MismatchedInputs {
            name: "ws",
            expected: 2,
            got: 1
        })
    );
}

// ============================================================================
// Parameter Validation Tests
// ============================================================================

/// Test scalar parameter checks.
#[test]
fn test_validate_parameters() {
    assert!(Validator::validate_n_values(1).is_ok());
    assert_eq!(
        Validator::validate_n_values(0),
        Err(IsotonicError::InvalidValueBound(0))
    );
    assert!(Validator::validate_optional_n_values(None).is_ok());
    assert_eq!(
        Validator::validate_optional_n_values(Some(0)),
        Err(IsotonicError::InvalidValueBound(0))
    );

    assert!(Validator::validate_stages(3).is_ok());
    assert_eq!(
        Validator::validate_stages(0),
        Err(IsotonicError::InvalidStages(0))
    );

    assert_eq!(
        Validator::validate_scalar(f64::NAN, "a"),
        Err(IsotonicError::InvalidNumericValue("a=NaN".to_string()))
    );
}

/// Test the binary partition level pair.
#[test]
fn test_validate_split_pair() {
    assert!(Validator::validate_split_pair(0.0, 1.0).is_ok());
    assert_eq!(
        Validator::validate_split_pair(1.0, 1.0),
        Err(IsotonicError::InvalidSplitPair)
    );
    assert_eq!(
        Validator::validate_split_pair(2.0, 1.0),
        Err(IsotonicError::InvalidSplitPair)
    );
    assert_eq!(
        Validator::validate_split_pair(0.0, f64::INFINITY),
        Err(IsotonicError::InvalidNumericValue("b=inf".to_string()))
    );
}

/// Test norm and stage compatibility.
#[test]
fn test_validate_composition() {
    assert!(Validator::validate_composition(Norm::L2, 5).is_ok());
    assert!(Validator::validate_composition(Norm::L1, 1).is_ok());
    assert!(matches!(
        Validator::validate_composition(Norm::L1, 2),
        Err(IsotonicError::UnsupportedFeature { .. })
    ));
}

/// Test duplicate parameter reporting.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("norm")),
        Err(IsotonicError::DuplicateParameter { parameter: "norm" })
    );
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test default stage counts.
#[test]
fn test_config_stage_count() {
    let mut config = IsotonicConfig::default();
    assert_eq!(config.stage_count(), 1);

    config.dimensions = 3;
    assert_eq!(config.stage_count(), 5);

    config.dimensions = 1;
    assert_eq!(config.stage_count(), 1);

    config.dimensions = 4;
    config.stages = Some(2);
    assert_eq!(config.stage_count(), 2);
}

/// Test configuration validation.
#[test]
fn test_config_validate() {
    assert!(IsotonicConfig::default().validate().is_ok());

    let l1_2d = IsotonicConfig {
        norm: Norm::L1,
        ..IsotonicConfig::default()
    };
    assert!(l1_2d.validate().is_ok());

    let l1_3d = IsotonicConfig {
        norm: Norm::L1,
        dimensions: 3,
        ..IsotonicConfig::default()
    };
    assert!(matches!(
        l1_3d.validate(),
        Err(IsotonicError::UnsupportedFeature { .. })
    ));

    let l1_3d_single = IsotonicConfig {
        stages: Some(1),
        ..l1_3d
    };
    assert!(l1_3d_single.validate().is_ok());

    let l1_1d = IsotonicConfig {
        norm: Norm::L1,
        dimensions: 1,
        ..IsotonicConfig::default()
    };
    assert!(matches!(
        l1_1d.validate(),
        Err(IsotonicError::UnsupportedFeature { .. })
    ));

    let zero_stages = IsotonicConfig {
        stages: Some(0),
        ..IsotonicConfig::default()
    };
    assert_eq!(zero_stages.validate(), Err(IsotonicError::InvalidStages(0)));
}
