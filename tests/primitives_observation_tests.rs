#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use core::cmp::Ordering;

use isotonic_rs::internals::primitives::observation::{
    cmp_coords, cmp_scalar, has_duplicate_coordinates, pool_1d, pool_2d, zip_1d, zip_2d,
    Observation1d, Observation2d,
};

// ============================================================================
// Construction Tests
// ============================================================================

/// Test that missing weights default to one.
#[test]
fn test_zip_defaults_to_unit_weights() {
    let obs = zip_1d(&[1.0, 2.0], &[3.0, 4.0], None);
    assert_eq!(
        obs,
        vec![
            Observation1d::new(1.0, 3.0, 1.0),
            Observation1d::new(2.0, 4.0, 1.0)
        ]
    );

    let obs = zip_2d(&[1.0], &[2.0], &[3.0], Some(&[0.5]));
    assert_eq!(obs, vec![Observation2d::new(1.0, 2.0, 3.0, 0.5)]);
    assert_eq!(obs[0].coords(), (1.0, 2.0));
}

/// Test the orderings used for sorting.
#[test]
fn test_orderings() {
    assert_eq!(cmp_scalar(&1.0, &2.0), Ordering::Less);
    assert_eq!(cmp_scalar(&2.0, &2.0), Ordering::Equal);
    assert_eq!(cmp_coords((1.0, 5.0), (2.0, 0.0)), Ordering::Less);
    assert_eq!(cmp_coords((1.0, 5.0), (1.0, 0.0)), Ordering::Greater);
    assert_eq!(cmp_coords((1.0, 0.0), (1.0, 0.0)), Ordering::Equal);
}

// ============================================================================
// Pooling Tests
// ============================================================================

/// Test 1-D pooling: sorting, weighted means and dropping zero weights.
#[test]
fn test_pool_1d() {
    let obs = vec![
        Observation1d::new(2.0, 4.0, 1.0),
        Observation1d::new(1.0, 1.0, 1.0),
        Observation1d::new(2.0, 1.0, 2.0),
        Observation1d::new(3.0, 100.0, 0.0),
    ];

    let pooled = pool_1d(&obs);
    assert_eq!(pooled.len(), 2);
    assert_eq!(pooled[0], Observation1d::new(1.0, 1.0, 1.0));
    assert_relative_eq!(pooled[1].x, 2.0);
    assert_relative_eq!(pooled[1].value, 2.0);
    assert_relative_eq!(pooled[1].weight, 3.0);
}

/// Test that pooling identical values returns the value exactly.
#[test]
fn test_pool_1d_uniform_is_exact() {
    let v = 0.1_f64;
    let obs = vec![
        Observation1d::new(0.0, v, 0.3),
        Observation1d::new(0.0, v, 0.7),
        Observation1d::new(0.0, v, 0.9),
    ];
    let pooled = pool_1d(&obs);
    assert_eq!(pooled.len(), 1);
    assert_eq!(pooled[0].value, v);
}

/// Test that pooling only zero weights yields nothing.
#[test]
fn test_pool_1d_all_zero() {
    let obs = vec![Observation1d::new(0.0, 1.0, 0.0)];
    assert!(pool_1d(&obs).is_empty());
}

/// Test 2-D pooling and the input-to-pool assignment.
#[test]
fn test_pool_2d_assignment() {
    let obs = vec![
        Observation2d::new(1.0, 1.0, 2.0, 1.0),
        Observation2d::new(0.0, 0.0, 1.0, 1.0),
        Observation2d::new(1.0, 1.0, 4.0, 1.0),
        Observation2d::new(0.0, 1.0, 9.0, 0.0),
    ];

    let pooled = pool_2d(&obs);
    assert_eq!(pooled.observations.len(), 2);
    assert_eq!(pooled.observations[0].coords(), (0.0, 0.0));
    assert_eq!(pooled.observations[1].coords(), (1.0, 1.0));
    assert_relative_eq!(pooled.observations[1].value, 3.0);
    assert_relative_eq!(pooled.observations[1].weight, 2.0);
    assert_eq!(pooled.assignment, vec![Some(1), Some(0), Some(1), None]);
}

/// Test duplicate coordinate detection.
#[test]
fn test_has_duplicate_coordinates() {
    let distinct = vec![
        Observation2d::new(0.0, 1.0, 1.0, 1.0),
        Observation2d::new(1.0, 0.0, 1.0, 1.0),
    ];
    assert!(!has_duplicate_coordinates(&distinct));

    let repeated = vec![
        Observation2d::new(1.0, 0.0, 1.0, 1.0),
        Observation2d::new(0.0, 1.0, 1.0, 1.0),
        Observation2d::new(1.0, 0.0, 2.0, 1.0),
    ];
    assert!(has_duplicate_coordinates(&repeated));
}
