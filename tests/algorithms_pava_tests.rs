#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use isotonic_rs::internals::algorithms::pava::{
    buckets_to_interpolant, pool_adjacent_violators, quantize_buckets,
};
use isotonic_rs::internals::primitives::observation::Observation1d;

// ============================================================================
// Helpers
// ============================================================================

fn unit_observations(values: &[f64]) -> Vec<Observation1d<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation1d::new(i as f64, v, 1.0))
        .collect()
}

// ============================================================================
// PAVA Tests
// ============================================================================

/// Test pooling of adjacent violators.
#[test]
fn test_pava_pools_violators() {
    let obs = unit_observations(&[1.0, 3.0, 2.0, 4.0, 3.5]);
    let buckets = pool_adjacent_violators(&obs);

    assert_eq!(buckets.len(), 3);
    assert_eq!((buckets[0].start, buckets[0].end), (0.0, 0.0));
    assert_eq!((buckets[1].start, buckets[1].end), (1.0, 2.0));
    assert_eq!((buckets[2].start, buckets[2].end), (3.0, 4.0));
    assert_relative_eq!(buckets[1].value, 2.5);
    assert_relative_eq!(buckets[2].value, 3.75);
    assert_relative_eq!(buckets[2].weight, 2.0);
}

/// Test that increasing input is left untouched.
#[test]
fn test_pava_increasing_input() {
    let obs = unit_observations(&[1.0, 2.0, 3.0]);
    let buckets = pool_adjacent_violators(&obs);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[2].value, 3.0);
}

/// Test that equal neighbours are pooled into one level.
#[test]
fn test_pava_pools_ties() {
    let obs = unit_observations(&[2.0, 2.0, 2.0]);
    let buckets = pool_adjacent_violators(&obs);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].value, 2.0);
}

/// Test that weights pull the pooled mean.
#[test]
fn test_pava_weighted() {
    let obs = vec![
        Observation1d::new(0.0, 4.0, 3.0),
        Observation1d::new(1.0, 0.0, 1.0),
    ];
    let buckets = pool_adjacent_violators(&obs);
    assert_eq!(buckets.len(), 1);
    assert_relative_eq!(buckets[0].value, 3.0);
}

/// Test that random fits are strictly increasing across buckets and keep the total mass.
#[test]
fn test_pava_random_invariants() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..100 {
        let n = rng.random_range(1..60);
        let obs: Vec<Observation1d<f64>> = (0..n)
            .map(|i| {
                Observation1d::new(
                    i as f64,
                    rng.random_range(-5.0..5.0),
                    rng.random_range(0.1..3.0),
                )
            })
            .collect();

        let buckets = pool_adjacent_violators(&obs);
        assert!(buckets.windows(2).all(|w| w[0].value < w[1].value));

        let mass: f64 = obs.iter().map(|o| o.value * o.weight).sum();
        let pooled: f64 = buckets.iter().map(|b| b.value * b.weight).sum();
        assert_relative_eq!(mass, pooled, epsilon = 1e-9);
    }
}

// ============================================================================
// Interpolant Tests
// ============================================================================

/// Test the fitted step interpolant between and beyond observations.
#[test]
fn test_interpolant_between_buckets() {
    let obs: Vec<Observation1d<f64>> = (1..=4)
        .map(|i| Observation1d::new(i as f64, i as f64 / 10.0 + 1.0, 1.0))
        .collect();
    let buckets = pool_adjacent_violators(&obs);
    let f = buckets_to_interpolant(&buckets).unwrap();

    assert_relative_eq!(f.interpolate(0.5), 1.1, epsilon = 1e-12);
    assert_relative_eq!(f.interpolate(1.5), 1.15, epsilon = 1e-12);
    assert_relative_eq!(f.interpolate(4.5), 1.4, epsilon = 1e-12);
}

/// Test that wide buckets are flat across their span.
#[test]
fn test_interpolant_flat_in_bucket() {
    let obs = unit_observations(&[1.0, 3.0, 2.0, 4.0, 3.5]);
    let buckets = pool_adjacent_violators(&obs);
    let f = buckets_to_interpolant(&buckets).unwrap();

    assert_eq!(f.len(), 5);
    assert_relative_eq!(f.interpolate(1.5), 2.5);
    assert_relative_eq!(f.interpolate(0.5), 1.75);
    assert_relative_eq!(f.interpolate(3.5), 3.75);
}

// ============================================================================
// Quantization Tests
// ============================================================================

/// Test that quantization merges buckets sharing a representative.
#[test]
fn test_quantize_merges_buckets() {
    let obs = unit_observations(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let buckets = quantize_buckets(pool_adjacent_violators(&obs), 2);

    assert_eq!(buckets.len(), 2);
    assert_relative_eq!(buckets[0].value, 2.0);
    assert_relative_eq!(buckets[1].value, 5.0);
    assert_eq!((buckets[0].start, buckets[0].end), (0.0, 2.0));
    assert_eq!((buckets[1].start, buckets[1].end), (3.0, 5.0));
}

/// Test that a generous bound leaves buckets unchanged.
#[test]
fn test_quantize_identity() {
    let obs = unit_observations(&[1.0, 2.0, 3.0]);
    let buckets = pool_adjacent_violators(&obs);
    assert_eq!(quantize_buckets(buckets.clone(), 3), buckets);
}
