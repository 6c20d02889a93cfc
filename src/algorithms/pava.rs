//! One-dimensional isotonic regression by pool adjacent violators.
//!
//! ## Purpose
//!
//! This module fits a non-decreasing step function to weighted observations
//! over one ordered input, minimizing weighted squared error. The fitted
//! function is returned as a `PiecewiseLinear` built from bucket boundaries.
//!
//! ## Design notes
//!
//! * **Stack of buckets**: Each observation is pushed as a singleton bucket;
//!   adjacent buckets are pooled while they violate monotonicity.
//! * **Quantization**: Bucket values can be reduced to a bounded number of
//!   levels before the interpolant is built.
//!
//! ## Key concepts
//!
//! * **Bucket**: A span `[start, end]` of the x-axis with pooled weighted sum,
//!   weight and mean value.
//! * **Violation**: The previous bucket's value is at least the last bucket's,
//!   or their spans touch.
//!
//! ## Invariants
//!
//! * Input observations are sorted by x with distinct x and positive weights.
//! * Bucket values are strictly increasing once a push completes.
//!
//! ## Non-goals
//!
//! * This module does not sort or pool raw input (handled by `observation`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::interpolation::PiecewiseLinear;
use crate::algorithms::reduce::reduce_values;
use crate::primitives::errors::IsotonicError;
use crate::primitives::observation::Observation1d;

// ============================================================================
// Buckets
// ============================================================================

/// A pooled run of consecutive observations sharing one fitted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket<T> {
    /// First x covered.
    pub start: T,
    /// Last x covered.
    pub end: T,
    /// Weighted sum of member values.
    pub sum: T,
    /// Total member weight.
    pub weight: T,
    /// Fitted value of the bucket.
    pub value: T,
}

impl<T: Float> Bucket<T> {
    fn singleton(o: &Observation1d<T>) -> Self {
        Self {
            start: o.x,
            end: o.x,
            sum: o.value * o.weight,
            weight: o.weight,
            value: o.value,
        }
    }

    fn absorb(&mut self, other: &Bucket<T>) {
        self.end = other.end;
        self.sum = self.sum + other.sum;
        self.weight = self.weight + other.weight;
        if self.weight > T::zero() {
            self.value = self.sum / self.weight;
        }
    }
}

// ============================================================================
// Pool Adjacent Violators
// ============================================================================

/// Run PAVA over sorted, pooled observations.
pub fn pool_adjacent_violators<T: Float>(observations: &[Observation1d<T>]) -> Vec<Bucket<T>> {
    let mut buckets: Vec<Bucket<T>> = Vec::with_capacity(observations.len());

    for o in observations {
        buckets.push(Bucket::singleton(o));

        while buckets.len() > 1 {
            let k = buckets.len();
            let (prev, last) = (buckets[k - 2], buckets[k - 1]);
            if prev.value < last.value && prev.end < last.start {
                break;
            }
            buckets[k - 2].absorb(&last);
            buckets.pop();
        }
    }

    buckets
}

/// Reduce bucket values to at most `n_values` levels, pooling buckets that end up equal.
pub fn quantize_buckets<T: Float>(buckets: Vec<Bucket<T>>, n_values: usize) -> Vec<Bucket<T>> {
    let values: Vec<T> = buckets.iter().map(|b| b.value).collect();
    let weights: Vec<T> = buckets.iter().map(|b| b.weight).collect();
    let reduced = reduce_values(&values, &weights, n_values);
    if reduced.is_identity() {
        return buckets;
    }

    let mut merged: Vec<Bucket<T>> = Vec::with_capacity(reduced.distinct_outputs());
    for mut b in buckets {
        b.value = reduced.get(b.value).unwrap_or(b.value);
        match merged.last_mut() {
            Some(last) if last.value == b.value => {
                last.end = b.end;
                last.sum = last.sum + b.sum;
                last.weight = last.weight + b.weight;
            }
            _ => merged.push(b),
        }
    }
    merged
}

/// Interpolant through each bucket's start point and, for wide buckets, its end point.
pub fn buckets_to_interpolant<T: Float>(
    buckets: &[Bucket<T>],
) -> Result<PiecewiseLinear<T>, IsotonicError> {
    let mut points: Vec<(T, T)> = Vec::with_capacity(buckets.len() * 2);
    for b in buckets {
        points.push((b.start, b.value));
        if b.end != b.start {
            points.push((b.end, b.value));
        }
    }
    PiecewiseLinear::new(points)
}
