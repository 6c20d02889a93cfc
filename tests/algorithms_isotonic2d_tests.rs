#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use isotonic_rs::internals::algorithms::isotonic2d::{build_surface, fit_l1, fit_l2};
use isotonic_rs::internals::primitives::errors::IsotonicError;
use isotonic_rs::internals::primitives::observation::Observation2d;

// ============================================================================
// Helpers
// ============================================================================

fn dominates(a: &Observation2d<f64>, b: &Observation2d<f64>) -> bool {
    a.x <= b.x && a.y <= b.y
}

fn is_monotone(obs: &[Observation2d<f64>], fitted: &[f64]) -> bool {
    (0..obs.len()).all(|i| {
        (0..obs.len()).all(|j| !dominates(&obs[i], &obs[j]) || fitted[i] <= fitted[j] + 1e-9)
    })
}

fn sse(obs: &[Observation2d<f64>], fitted: &[f64]) -> f64 {
    obs.iter()
        .zip(fitted)
        .map(|(o, f)| o.weight * (o.value - f) * (o.value - f))
        .sum()
}

fn sae(obs: &[Observation2d<f64>], fitted: &[f64]) -> f64 {
    obs.iter()
        .zip(fitted)
        .map(|(o, f)| o.weight * (o.value - f).abs())
        .sum()
}

/// Random observations on distinct cells of a `side x side` grid.
fn random_observations(rng: &mut StdRng, n: usize, side: usize) -> Vec<Observation2d<f64>> {
    let mut cells: Vec<(usize, usize)> = (0..side)
        .flat_map(|x| (0..side).map(move |y| (x, y)))
        .collect();
    cells.shuffle(rng);
    cells
        .into_iter()
        .take(n)
        .map(|(x, y)| {
            Observation2d::new(
                x as f64,
                y as f64,
                rng.random_range(0..10) as f64,
                rng.random_range(1..4) as f64,
            )
        })
        .collect()
}

/// Least squared error over every partition into level sets at their means.
fn brute_force_l2(obs: &[Observation2d<f64>]) -> f64 {
    let n = obs.len();
    let mut labels = vec![0usize; n];
    let mut best = f64::INFINITY;

    // Restricted growth strings enumerate set partitions.
    loop {
        let blocks = labels.iter().max().map_or(0, |m| m + 1);
        let mut fitted = vec![0.0; n];
        for b in 0..blocks {
            let (s, w) = (0..n)
                .filter(|&i| labels[i] == b)
                .fold((0.0, 0.0), |(s, w), i| {
                    (s + obs[i].value * obs[i].weight, w + obs[i].weight)
                });
            (0..n)
                .filter(|&i| labels[i] == b)
                .for_each(|i| fitted[i] = s / w);
        }
        if is_monotone(obs, &fitted) {
            best = best.min(sse(obs, &fitted));
        }

        let mut k = n;
        loop {
            if k <= 1 {
                return best;
            }
            k -= 1;
            let limit = labels[..k].iter().max().map_or(0, |m| m + 1);
            if labels[k] < limit {
                labels[k] += 1;
                labels[k + 1..].iter_mut().for_each(|l| *l = 0);
                break;
            }
        }
    }
}

/// Least absolute error over every assignment of input values.
fn brute_force_l1(obs: &[Observation2d<f64>]) -> f64 {
    let mut candidates: Vec<f64> = obs.iter().map(|o| o.value).collect();
    candidates.sort_by(|a, b| a.partial_cmp(b).unwrap());
    candidates.dedup();

    let n = obs.len();
    let k = candidates.len();
    let mut best = f64::INFINITY;
    let mut digits = vec![0usize; n];
    loop {
        let fitted: Vec<f64> = digits.iter().map(|&d| candidates[d]).collect();
        if is_monotone(obs, &fitted) {
            best = best.min(sae(obs, &fitted));
        }

        let mut i = 0;
        while i < n && digits[i] + 1 == k {
            digits[i] = 0;
            i += 1;
        }
        if i == n {
            return best;
        }
        digits[i] += 1;
    }
}

// ============================================================================
// L2 Tests
// ============================================================================

/// Test the 2x2 grid with one violation.
#[test]
fn test_l2_unit_square() {
    let obs = vec![
        Observation2d::new(0.0, 0.0, 1.0, 1.0),
        Observation2d::new(0.0, 1.0, 2.0, 1.0),
        Observation2d::new(1.0, 0.0, 3.0, 1.0),
        Observation2d::new(1.0, 1.0, 2.5, 1.0),
    ];
    let fitted = fit_l2(&obs).unwrap();

    assert_relative_eq!(fitted[0], 1.0);
    assert_relative_eq!(fitted[1], 2.0);
    assert_relative_eq!(fitted[2], 2.75);
    assert_relative_eq!(fitted[3], 2.75);
}

/// Test that monotone input is returned unchanged.
#[test]
fn test_l2_monotone_input_unchanged() {
    let obs: Vec<Observation2d<f64>> = (0..4)
        .flat_map(|x| (0..4).map(move |y| (x, y)))
        .map(|(x, y)| Observation2d::new(x as f64, y as f64, (x + 2 * y) as f64, 1.0))
        .collect();
    let fitted = fit_l2(&obs).unwrap();

    for (o, f) in obs.iter().zip(&fitted) {
        assert_relative_eq!(*f, o.value, epsilon = 1e-12);
    }
}

/// Test that an empty input yields an empty fit.
#[test]
fn test_l2_empty() {
    assert!(fit_l2::<f64>(&[]).unwrap().is_empty());
}

/// Test monotonicity, the level-set mean law and optimality on random input.
#[test]
fn test_l2_random_optimal() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..150 {
        let n = rng.random_range(1..7);
        let obs = random_observations(&mut rng, n, 4);
        let fitted = fit_l2(&obs).unwrap();

        assert!(is_monotone(&obs, &fitted));

        // Every level set's fitted value is its weighted mean.
        for &level in &fitted {
            let (s, w) = obs
                .iter()
                .zip(&fitted)
                .filter(|(_, f)| (**f - level).abs() < 1e-9)
                .fold((0.0, 0.0), |(s, w), (o, _)| {
                    (s + o.value * o.weight, w + o.weight)
                });
            assert_relative_eq!(level, s / w, epsilon = 1e-9);
        }

        let best = brute_force_l2(&obs);
        assert!((sse(&obs, &fitted) - best).abs() <= 1e-6 * (1.0 + best));
    }
}

// ============================================================================
// L1 Tests
// ============================================================================

/// Test that a weighted chain takes the unique optimum.
#[test]
fn test_l1_weighted_chain() {
    let obs = vec![
        Observation2d::new(0.0, 0.0, 1.0, 1.0),
        Observation2d::new(1.0, 1.0, 3.0, 1.0),
        Observation2d::new(2.0, 2.0, 2.0, 2.0),
    ];
    let fitted = fit_l1(&obs).unwrap();
    assert_eq!(fitted, vec![1.0, 2.0, 2.0]);
}

/// Test that L1 levels are always input values.
#[test]
fn test_l1_levels_are_inputs() {
    let obs = vec![
        Observation2d::new(0.0, 0.0, 1.0, 1.0),
        Observation2d::new(0.0, 1.0, 2.0, 1.0),
        Observation2d::new(1.0, 0.0, 3.0, 1.0),
        Observation2d::new(1.0, 1.0, 2.5, 1.0),
    ];
    let fitted = fit_l1(&obs).unwrap();

    assert!(is_monotone(&obs, &fitted));
    for f in &fitted {
        assert!(obs.iter().any(|o| o.value == *f));
    }
    assert_relative_eq!(sae(&obs, &fitted), 0.5);
}

/// Test that candidates a few ulps apart are still separated.
#[test]
fn test_l1_near_tie_split() {
    let eps = f64::EPSILON;
    let obs = vec![
        Observation2d::new(0.0, 0.0, 1.0 + eps, 1.0),
        Observation2d::new(1.0, 1.0, 1.0, 1.0),
        Observation2d::new(2.0, 2.0, 1.0 + 2.0 * eps, 1.0),
    ];
    let fitted = fit_l1(&obs).unwrap();

    assert!(is_monotone(&obs, &fitted));
    assert_eq!(fitted[0], fitted[1]);
    assert_eq!(fitted[2], 1.0 + 2.0 * eps);
    assert_eq!(sae(&obs, &fitted), eps);
}

/// Test that one-sided near-tie partitions narrow to the optimal constant.
#[test]
fn test_l1_near_tie_narrowing() {
    let eps = f64::EPSILON;
    let obs = vec![
        Observation2d::new(0.0, 0.0, 1.0 + 2.0 * eps, 1.0),
        Observation2d::new(1.0, 1.0, 1.0 + eps, 1.0),
        Observation2d::new(2.0, 2.0, 1.0, 1.0),
    ];
    let fitted = fit_l1(&obs).unwrap();

    assert_eq!(fitted, vec![1.0 + eps; 3]);
    assert_eq!(sae(&obs, &fitted), 2.0 * eps);
}

/// Test monotonicity and optimality on random input.
#[test]
fn test_l1_random_optimal() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..150 {
        let n = rng.random_range(1..6);
        let obs = random_observations(&mut rng, n, 4);
        let fitted = fit_l1(&obs).unwrap();

        assert!(is_monotone(&obs, &fitted));
        assert_eq!(sae(&obs, &fitted), brute_force_l1(&obs));
    }
}

// ============================================================================
// Surface Tests
// ============================================================================

/// Test that the surface reproduces fitted values at observed points.
#[test]
fn test_surface_matches_fitted_points() {
    let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)];
    let fitted = [1.0, 2.0, 2.75, 2.75];
    let surface = build_surface(&points, &fitted).unwrap();

    for (p, f) in points.iter().zip(&fitted) {
        assert_relative_eq!(surface.interpolate(p.0, p.1), *f);
    }
    assert_relative_eq!(surface.interpolate(0.5, 0.5), 2.125);
}

/// Test that gaps in a sparse layout take the dominated maximum.
#[test]
fn test_surface_sparse_layout() {
    // (1, 0) is missing from the grid; it inherits (0, 0).
    let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
    let fitted = [1.0, 2.0, 3.0];
    let surface = build_surface(&points, &fitted).unwrap();

    assert_relative_eq!(surface.interpolate(1.0, 0.0), 1.0);
    assert_relative_eq!(surface.interpolate(1.0, 1.0), 3.0);
    assert_relative_eq!(surface.interpolate(5.0, 5.0), 3.0);
    assert_relative_eq!(surface.interpolate(-5.0, -5.0), 1.0);
}

/// Test that the surface is monotone between and beyond observations.
#[test]
fn test_surface_random_monotone() {
    let mut rng = StdRng::seed_from_u64(29);

    for _ in 0..50 {
        let n = rng.random_range(1..12);
        let obs = random_observations(&mut rng, n, 5);
        let fitted = fit_l2(&obs).unwrap();
        let points: Vec<(f64, f64)> = obs.iter().map(|o| o.coords()).collect();
        let surface = build_surface(&points, &fitted).unwrap();

        for (p, f) in points.iter().zip(&fitted) {
            assert_relative_eq!(surface.interpolate(p.0, p.1), *f, epsilon = 1e-9);
        }

        let steps: Vec<f64> = (0..13).map(|i| -1.0 + 0.5 * i as f64).collect();
        for &x in &steps {
            for &y in &steps {
                let here = surface.interpolate(x, y);
                assert!(here <= surface.interpolate(x + 0.5, y) + 1e-9);
                assert!(here <= surface.interpolate(x, y + 0.5) + 1e-9);
            }
        }
    }
}

/// Test that an empty surface is rejected.
#[test]
fn test_surface_empty() {
    assert_eq!(
        build_surface::<f64>(&[], &[]),
        Err(IsotonicError::EmptyInput)
    );
}
