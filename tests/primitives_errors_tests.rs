#![cfg(feature = "dev")]

use isotonic_rs::internals::primitives::errors::IsotonicError;
use isotonic_rs::internals::primitives::norm::Norm;

#[test]
fn test_isotonic_error_display() {
    // EmptyInput
    let err = IsotonicError::EmptyInput;
    assert_eq!(format!("{}", err), "Input arrays are empty");

    // MismatchedInputs
    let err = IsotonicError::MismatchedInputs {
        name: "vs",
        expected: 10,
        got: 5,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch: vs has 5 entries, expected 10"
    );

    // InvalidNumericValue
    let err = IsotonicError::InvalidNumericValue("x[3]=NaN".to_string());
    assert_eq!(format!("{}", err), "Invalid numeric value: x[3]=NaN");

    // NegativeWeight
    let err = IsotonicError::NegativeWeight { index: 2 };
    assert_eq!(
        format!("{}", err),
        "Invalid weight at index 2 (must be >= 0)"
    );

    // InvalidNorm
    let err = IsotonicError::InvalidNorm(3);
    assert_eq!(
        format!("{}", err),
        "Invalid norm: p=3 (only L1 and L2 norms are supported)"
    );

    // InvalidValueBound
    let err = IsotonicError::InvalidValueBound(0);
    assert_eq!(
        format!("{}", err),
        "Invalid n_values: 0 (must be at least 1)"
    );

    // InvalidSplitPair
    let err = IsotonicError::InvalidSplitPair;
    assert_eq!(format!("{}", err), "Invalid split pair: a < b is required");

    // DuplicateCoordinates
    let err = IsotonicError::DuplicateCoordinates {
        solver: "L1 regression",
    };
    assert_eq!(
        format!("{}", err),
        "Duplicate coordinates are not supported for L1 regression"
    );

    // RangeOutOfBounds
    let err = IsotonicError::RangeOutOfBounds {
        lo: 0,
        hi: 9,
        min: 2,
        max: 7,
    };
    assert_eq!(
        format!("{}", err),
        "Requested range [0, 9] does not fit in current range [2, 7]"
    );

    // DegenerateRange
    let err = IsotonicError::DegenerateRange { lo: 5, hi: 4 };
    assert_eq!(format!("{}", err), "Requested range [5, 4] is degenerate");

    // NonAdjacentRanges
    let err = IsotonicError::NonAdjacentRanges {
        left_max: 3,
        right_min: 5,
    };
    assert_eq!(
        format!("{}", err),
        "Ranges are not adjacent: left ends at 3, right starts at 5"
    );

    // InvalidDimensions
    let err = IsotonicError::InvalidDimensions { got: 0, min: 1 };
    assert_eq!(
        format!("{}", err),
        "Invalid dimensions: 0 (must be at least 1)"
    );

    // InvalidStages
    let err = IsotonicError::InvalidStages(0);
    assert_eq!(format!("{}", err), "Invalid stages: 0 (must be at least 1)");

    // UnsupportedFeature
    let err = IsotonicError::UnsupportedFeature {
        adapter: "Univariate",
        feature: "L1 norm",
    };
    assert_eq!(
        format!("{}", err),
        "Adapter 'Univariate' does not support feature: L1 norm"
    );

    // DuplicateParameter
    let err = IsotonicError::DuplicateParameter {
        parameter: "n_values",
    };
    assert_eq!(
        format!("{}", err),
        "Parameter 'n_values' was set multiple times. Each parameter can only be configured once."
    );

    // InvariantViolation
    let err = IsotonicError::InvariantViolation("empty group");
    assert_eq!(format!("{}", err), "Invariant violated: empty group");
}

#[test]
fn test_invariant_violation_classification() {
    assert!(IsotonicError::InvariantViolation("x").is_invariant_violation());
    assert!(!IsotonicError::EmptyInput.is_invariant_violation());
    assert!(!IsotonicError::InvalidSplitPair.is_invariant_violation());
}

#[test]
fn test_error_clone_and_eq() {
    let err = IsotonicError::NegativeWeight { index: 1 };
    assert_eq!(err.clone(), err);
    assert_ne!(err, IsotonicError::NegativeWeight { index: 2 });
}

// ============================================================================
// Norm Tests
// ============================================================================

/// Test norm selection by exponent.
#[test]
fn test_norm_from_p() {
    assert_eq!(Norm::from_p(1), Ok(Norm::L1));
    assert_eq!(Norm::from_p(2), Ok(Norm::L2));
    assert_eq!(Norm::from_p(0), Err(IsotonicError::InvalidNorm(0)));
    assert_eq!(Norm::from_p(3), Err(IsotonicError::InvalidNorm(3)));
}

/// Test norm exponent, display and default.
#[test]
fn test_norm_accessors() {
    assert_eq!(Norm::L1.p(), 1);
    assert_eq!(Norm::L2.p(), 2);
    assert_eq!(format!("{}", Norm::L1), "L1");
    assert_eq!(format!("{}", Norm::L2), "L2");
    assert_eq!(Norm::default(), Norm::L2);
}
