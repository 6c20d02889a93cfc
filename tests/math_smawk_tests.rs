#![cfg(feature = "dev")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use isotonic_rs::internals::math::smawk::smawk_row_minima;

// ============================================================================
// Helpers
// ============================================================================

/// Leftmost minimum of every row by exhaustive scan.
fn brute_row_minima(rows: usize, cols: usize, f: impl Fn(usize, usize) -> i64) -> Vec<usize> {
    (0..rows)
        .map(|i| {
            let mut best = 0;
            for j in 1..cols {
                if f(i, j) < f(i, best) {
                    best = j;
                }
            }
            best
        })
        .collect()
}

// ============================================================================
// SMAWK Tests
// ============================================================================

/// Test a small matrix with a known staircase of minima.
#[test]
fn test_smawk_small() {
    let m = [
        [10, 17, 13, 28, 23],
        [17, 22, 16, 29, 23],
        [24, 28, 22, 34, 24],
        [11, 13, 6, 17, 7],
        [45, 44, 32, 37, 23],
    ];
    // Not Monge everywhere, but rows 0..=2 and 3..=4 are totally monotone separately.
    let top = smawk_row_minima(3, 5, |i, j| m[i][j]);
    assert_eq!(top, vec![0, 2, 2]);
    let bottom = smawk_row_minima(2, 5, |i, j| m[i + 3][j]);
    assert_eq!(bottom, vec![2, 4]);
}

/// Test degenerate shapes.
#[test]
fn test_smawk_degenerate() {
    assert!(smawk_row_minima(0, 3, |_, _| 0).is_empty());
    assert_eq!(smawk_row_minima(2, 0, |_, _| 0), vec![0, 0]);
    assert_eq!(smawk_row_minima(1, 1, |_, _| 5), vec![0]);
    assert_eq!(smawk_row_minima(3, 1, |i, _| i), vec![0, 0, 0]);
}

/// Test that ties resolve to the leftmost column.
#[test]
fn test_smawk_ties_leftmost() {
    let minima = smawk_row_minima(4, 6, |_, _| 1.0);
    assert_eq!(minima, vec![0, 0, 0, 0]);
}

/// Test random Monge matrices against brute force.
#[test]
fn test_smawk_random_monge() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let rows = rng.random_range(1..16);
        let cols = rng.random_range(1..16);
        let a: Vec<i64> = (0..rows).map(|_| rng.random_range(0..6)).collect();
        let b: Vec<i64> = (0..cols).map(|_| rng.random_range(0..6)).collect();
        let scale = rng.random_range(0..3);
        let shift = rng.random_range(-3..4);

        let f = |i: usize, j: usize| {
            let d = i as i64 - j as i64 + shift;
            a[i] + b[j] + scale * d * d
        };

        assert_eq!(
            smawk_row_minima(rows, cols, f),
            brute_row_minima(rows, cols, f)
        );
    }
}

/// Test lexicographic costs that forbid the lower triangle.
#[test]
fn test_smawk_lexicographic_costs() {
    let values: [f64; 5] = [1.0, 2.0, 4.0, 7.0, 11.0];
    let n = values.len();
    let cost = |i: usize, j: usize| -> (usize, f64) {
        if j < i {
            (i - j, 0.0)
        } else {
            (0, (values[j] - values[i]).abs() + (n - j) as f64)
        }
    };

    let minima = smawk_row_minima(n, n, cost);
    for (i, &j) in minima.iter().enumerate() {
        assert!(j >= i);
    }
    assert!(minima.windows(2).all(|w| w[0] <= w[1]));
}
