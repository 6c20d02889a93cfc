//! Weighted observations and their preparation for fitting.
//!
//! ## Purpose
//!
//! This module holds the observation records consumed by every solver and
//! the preparation steps shared between them: pairing parallel input
//! sequences, discarding zero-weight observations, ordering by coordinate
//! and pooling observations that share a coordinate.
//!
//! ## Design notes
//!
//! * **Owned copies**: Preparation always works on owned vectors; caller slices are never mutated.
//! * **Stable ordering**: Sorting is stable so ties keep their input order.
//! * **Exact pooling**: A pooled group whose members share one value keeps that value bit-for-bit.
//!
//! ## Key concepts
//!
//! * **Pooling**: Observations at one coordinate become a single observation
//!   with value `sum(v * w) / sum(w)` and weight `sum(w)`.
//! * **Assignment**: Pooling in two dimensions reports which pooled
//!   observation each input landed in, so fitted values can be mapped back.
//!
//! ## Invariants
//!
//! * Pooled output is sorted by coordinate with no repeated coordinates.
//! * Every pooled weight is strictly positive.
//!
//! ## Non-goals
//!
//! * This module does not validate finiteness or lengths (handled by `validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Observation Records
// ============================================================================

/// A weighted observation over one ordered input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation1d<T> {
    /// Input coordinate.
    pub x: T,
    /// Observed value.
    pub value: T,
    /// Non-negative weight.
    pub weight: T,
}

impl<T: Float> Observation1d<T> {
    /// Create a new observation.
    pub fn new(x: T, value: T, weight: T) -> Self {
        Self { x, value, weight }
    }
}

/// A weighted observation over two ordered inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation2d<T> {
    /// First input coordinate.
    pub x: T,
    /// Second input coordinate.
    pub y: T,
    /// Observed value.
    pub value: T,
    /// Non-negative weight.
    pub weight: T,
}

impl<T: Float> Observation2d<T> {
    /// Create a new observation.
    pub fn new(x: T, y: T, value: T, weight: T) -> Self {
        Self {
            x,
            y,
            value,
            weight,
        }
    }

    /// Coordinate pair of the observation.
    #[inline]
    pub fn coords(&self) -> (T, T) {
        (self.x, self.y)
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Total order on scalars used throughout the crate.
#[inline]
pub fn cmp_scalar<T: Float>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Lexicographic order on coordinate pairs.
#[inline]
pub fn cmp_coords<T: Float>(a: (T, T), b: (T, T)) -> Ordering {
    cmp_scalar(&a.0, &b.0).then_with(|| cmp_scalar(&a.1, &b.1))
}

// ============================================================================
// Construction
// ============================================================================

/// Pair parallel sequences into 1-D observations. Missing weights default to one.
pub fn zip_1d<T: Float>(xs: &[T], vs: &[T], ws: Option<&[T]>) -> Vec<Observation1d<T>> {
    xs.iter()
        .zip(vs.iter())
        .enumerate()
        .map(|(i, (&x, &v))| {
            let w = ws.map_or(T::one(), |ws| ws[i]);
            Observation1d::new(x, v, w)
        })
        .collect()
}

/// Pair parallel sequences into 2-D observations. Missing weights default to one.
pub fn zip_2d<T: Float>(
    xs: &[T],
    ys: &[T],
    vs: &[T],
    ws: Option<&[T]>,
) -> Vec<Observation2d<T>> {
    (0..xs.len())
        .map(|i| {
            let w = ws.map_or(T::one(), |ws| ws[i]);
            Observation2d::new(xs[i], ys[i], vs[i], w)
        })
        .collect()
}

// ============================================================================
// Pooling
// ============================================================================

/// Running weighted sum for one pooled coordinate.
struct Pool<T> {
    sum: T,
    weight: T,
    first_value: T,
    uniform: bool,
}

impl<T: Float> Pool<T> {
    fn start(value: T, weight: T) -> Self {
        Self {
            sum: value * weight,
            weight,
            first_value: value,
            uniform: true,
        }
    }

    fn add(&mut self, value: T, weight: T) {
        self.sum = self.sum + value * weight;
        self.weight = self.weight + weight;
        self.uniform = self.uniform && value == self.first_value;
    }

    fn value(&self) -> T {
        if self.uniform {
            self.first_value
        } else {
            self.sum / self.weight
        }
    }
}

/// Discard zero-weight observations, sort by `x` and pool repeated `x` values.
pub fn pool_1d<T: Float>(observations: &[Observation1d<T>]) -> Vec<Observation1d<T>> {
    let mut kept: Vec<Observation1d<T>> = observations
        .iter()
        .filter(|o| o.weight > T::zero())
        .copied()
        .collect();
    kept.sort_by(|a, b| cmp_scalar(&a.x, &b.x));

    let mut pooled: Vec<Observation1d<T>> = Vec::with_capacity(kept.len());
    let mut iter = kept.into_iter();
    let Some(first) = iter.next() else {
        return pooled;
    };

    let mut x = first.x;
    let mut pool = Pool::start(first.value, first.weight);
    for o in iter {
        if o.x == x {
            pool.add(o.value, o.weight);
        } else {
            pooled.push(Observation1d::new(x, pool.value(), pool.weight));
            x = o.x;
            pool = Pool::start(o.value, o.weight);
        }
    }
    pooled.push(Observation1d::new(x, pool.value(), pool.weight));

    pooled
}

/// Result of pooling 2-D observations.
#[derive(Debug, Clone)]
pub struct Pooled2d<T> {
    /// Pooled observations, sorted lexicographically by `(x, y)`.
    pub observations: Vec<Observation2d<T>>,
    /// For every input observation, the pooled index it contributes to.
    /// Zero-weight inputs contribute to nothing.
    pub assignment: Vec<Option<usize>>,
}

/// Discard zero-weight observations, sort by `(x, y)` and pool repeated coordinates.
pub fn pool_2d<T: Float>(observations: &[Observation2d<T>]) -> Pooled2d<T> {
    let mut order: Vec<usize> = (0..observations.len())
        .filter(|&i| observations[i].weight > T::zero())
        .collect();
    order.sort_by(|&i, &j| cmp_coords(observations[i].coords(), observations[j].coords()));

    let mut pooled: Vec<Observation2d<T>> = Vec::with_capacity(order.len());
    let mut assignment = vec![None; observations.len()];

    let mut current: Option<((T, T), Pool<T>)> = None;
    for &i in &order {
        let o = observations[i];
        let same = matches!(&current, Some((coords, _)) if *coords == o.coords());
        if same {
            if let Some((_, pool)) = current.as_mut() {
                pool.add(o.value, o.weight);
            }
        } else {
            if let Some(((x, y), pool)) = current.take() {
                pooled.push(Observation2d::new(x, y, pool.value(), pool.weight));
            }
            current = Some((o.coords(), Pool::start(o.value, o.weight)));
        }
        assignment[i] = Some(pooled.len());
    }
    if let Some(((x, y), pool)) = current {
        pooled.push(Observation2d::new(x, y, pool.value(), pool.weight));
    }

    Pooled2d {
        observations: pooled,
        assignment,
    }
}

/// Whether any two observations share a coordinate pair.
pub fn has_duplicate_coordinates<T: Float>(observations: &[Observation2d<T>]) -> bool {
    let mut coords: Vec<(T, T)> = observations.iter().map(|o| o.coords()).collect();
    coords.sort_by(|a, b| cmp_coords(*a, *b));
    coords.windows(2).any(|w| w[0] == w[1])
}
