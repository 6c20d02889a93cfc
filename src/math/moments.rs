//! Weighted prefix moments for constant-time segment statistics.
//!
//! ## Purpose
//!
//! This module answers weighted mean and weighted squared-error queries for
//! any contiguous segment of a value sequence in O(1) after O(n) setup. The
//! value reducer evaluates its dynamic-programming costs through it.
//!
//! ## Design notes
//!
//! * **Centering**: Values are shifted by their overall weighted mean before
//!   accumulation, which keeps the `sum(w v^2) - sum(w v)^2 / sum(w)` form
//!   well conditioned when values sit far from zero.
//! * **Scaling**: Centered values are divided by their largest magnitude, so
//!   squared deviations stay finite for any finite input. Both steps work on
//!   halved values, which cannot overflow.
//!
//! ## Key concepts
//!
//! * **Scaled cost**: `scaled_sse` is the segment cost in units of the
//!   squared scale. Scaled costs rank segments the same way unscaled costs
//!   do, so the reducer's dynamic program works on them directly.
//!
//! ## Invariants
//!
//! * Segments are half-open `[i, j)`; empty segments have zero cost.
//! * Segment costs are clamped at zero.
//! * Scaled deviations lie in `[-1, 1]`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

/// Prefix sums of `w`, `w * d` and `w * d^2` over centered, scaled values `d`.
#[derive(Debug, Clone)]
pub struct PrefixMoments<T> {
    unit: T,
    center: T,
    weight: Vec<T>,
    first: Vec<T>,
    second: Vec<T>,
}

impl<T: Float> PrefixMoments<T> {
    /// Build prefix moments over parallel values and weights.
    pub fn new(values: &[T], weights: &[T]) -> Self {
        let n = values.len();
        let two = T::one() + T::one();
        let largest = values.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()));

        let total_weight = weights.iter().fold(T::zero(), |acc, &w| acc + w);
        let center = if total_weight > T::zero() && largest > T::zero() {
            let scaled_sum = values
                .iter()
                .zip(weights)
                .fold(T::zero(), |acc, (&v, &w)| acc + (v / largest) * w);
            (scaled_sum / total_weight) * largest
        } else {
            T::zero()
        };

        // half-deviations stay finite even when v and center have opposite signs
        let half = |v: T| v / two - center / two;
        let spread = values.iter().fold(T::zero(), |acc, &v| acc.max(half(v).abs()));
        let unit = if spread > T::zero() { spread } else { T::one() };

        let mut weight = Vec::with_capacity(n + 1);
        let mut first = Vec::with_capacity(n + 1);
        let mut second = Vec::with_capacity(n + 1);
        weight.push(T::zero());
        first.push(T::zero());
        second.push(T::zero());

        for (&v, &w) in values.iter().zip(weights) {
            let d = half(v) / unit;
            let k = weight.len() - 1;
            weight.push(weight[k] + w);
            first.push(first[k] + w * d);
            second.push(second[k] + w * d * d);
        }

        Self {
            unit,
            center,
            weight,
            first,
            second,
        }
    }

    /// Number of values covered.
    pub fn len(&self) -> usize {
        self.weight.len() - 1
    }

    /// Whether no values are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Factor dividing every centered value before accumulation.
    pub fn scale(&self) -> T {
        self.unit + self.unit
    }

    /// Total weight of `[i, j)`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> T {
        self.weight[j] - self.weight[i]
    }

    /// Weighted mean of `[i, j)`, or the overall mean when the segment has no weight.
    #[inline]
    pub fn mean(&self, i: usize, j: usize) -> T {
        let w = self.weight(i, j);
        if w <= T::zero() {
            return self.center;
        }
        let shift = (self.first[j] - self.first[i]) / w * self.unit;
        self.center + shift + shift
    }

    /// Segment cost of `[i, j)` divided by `scale^2`.
    #[inline]
    pub fn scaled_sse(&self, i: usize, j: usize) -> T {
        if j <= i {
            return T::zero();
        }
        let w = self.weight(i, j);
        if w <= T::zero() {
            return T::zero();
        }
        let s1 = self.first[j] - self.first[i];
        let s2 = self.second[j] - self.second[i];
        (s2 - s1 * s1 / w).max(T::zero())
    }

    /// Weighted sum of squared deviations from the segment mean over `[i, j)`.
    ///
    /// Overflows to infinity when the true cost exceeds the float range;
    /// `scaled_sse` stays finite.
    #[inline]
    pub fn sse(&self, i: usize, j: usize) -> T {
        let scale = self.scale();
        self.scaled_sse(i, j) * scale * scale
    }
}
