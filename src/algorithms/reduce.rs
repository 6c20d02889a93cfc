//! Optimal reduced isotonic regression.
//!
//! ## Purpose
//!
//! This module collapses the distinct fitted values of an isotonic
//! regression to at most `n_values` representatives while adding the least
//! possible weighted squared error. Every distinct value maps to the weighted
//! mean of the contiguous group of sorted values it is assigned to.
//!
//! ## Design notes
//!
//! * **Dynamic program**: Round `r` computes, for every suffix start `i`, the
//!   cheapest way to cover the suffix `[i, m)` with at most `r + 1` segments.
//! * **SMAWK**: Each round is a row-minimum search over the split-point matrix
//!   `cost(i, j) = sse(i, j) + E[j]`, which is totally monotone because the
//!   squared error of sorted segments satisfies the quadrangle inequality.
//! * **Infeasible cells**: Split points `j < i` are encoded as the lexicographic
//!   entry `(i - j, 0)`, which keeps the matrix totally monotone without
//!   sentinel magnitudes.
//!
//! ## Key concepts
//!
//! * **Segment cost**: Weighted sum of squared deviations from the segment
//!   mean, kept in scaled units so that huge values cannot overflow it.
//! * **Backtracking**: Stored argmins per round recover the segment boundaries.
//!
//! ## Invariants
//!
//! * At most `n_values` distinct outputs.
//! * Outputs are non-decreasing in input order, so isotonicity is preserved.
//! * With `n_values >= distinct inputs` the mapping is the identity.
//!
//! ## Non-goals
//!
//! * This module does not validate its inputs (handled by `validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::moments::PrefixMoments;
use crate::math::smawk::smawk_row_minima;
use crate::primitives::observation::cmp_scalar;

// ============================================================================
// Reduced Mapping
// ============================================================================

/// Mapping from every distinct input value to its representative.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedValues<T> {
    inputs: Vec<T>,
    outputs: Vec<T>,
}

impl<T: Float> ReducedValues<T> {
    /// Identity mapping over sorted distinct values.
    fn identity(inputs: Vec<T>) -> Self {
        let outputs = inputs.clone();
        Self { inputs, outputs }
    }

    /// Representative of `value`, or `None` if it was not an input value.
    pub fn get(&self, value: T) -> Option<T> {
        self.inputs
            .binary_search_by(|probe| cmp_scalar(probe, &value))
            .ok()
            .map(|i| self.outputs[i])
    }

    /// Number of distinct representatives.
    pub fn distinct_outputs(&self) -> usize {
        let mut count = 0;
        for (i, v) in self.outputs.iter().enumerate() {
            if i == 0 || *v != self.outputs[i - 1] {
                count += 1;
            }
        }
        count
    }

    /// Whether every value maps to itself.
    pub fn is_identity(&self) -> bool {
        self.inputs == self.outputs
    }

    /// Number of distinct input values.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// `(input, representative)` pairs in increasing input order.
    pub fn iter(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.inputs.iter().copied().zip(self.outputs.iter().copied())
    }

    /// Map every value of `values` through the reduction, keeping unknown values.
    pub fn apply(&self, values: &[T]) -> Vec<T> {
        values.iter().map(|&v| self.get(v).unwrap_or(v)).collect()
    }
}

// ============================================================================
// Reduction
// ============================================================================

/// Pool identical values, summing their weights. Output is sorted by value.
fn distinct_weighted<T: Float>(values: &[T], weights: &[T]) -> (Vec<T>, Vec<T>) {
    let mut pairs: Vec<(T, T)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| cmp_scalar(&a.0, &b.0));

    let mut distinct: Vec<T> = Vec::with_capacity(pairs.len());
    let mut totals: Vec<T> = Vec::with_capacity(pairs.len());
    for (v, w) in pairs {
        match distinct.last() {
            Some(&last) if last == v => {
                if let Some(t) = totals.last_mut() {
                    *t = *t + w;
                }
            }
            _ => {
                distinct.push(v);
                totals.push(w);
            }
        }
    }
    (distinct, totals)
}

/// Reduce `values` (with `weights`) to at most `n_values` representatives.
///
/// The slices must have equal length. An `n_values` of zero is treated as one.
pub fn reduce_values<T: Float>(values: &[T], weights: &[T], n_values: usize) -> ReducedValues<T> {
    let n_values = n_values.max(1);
    let (distinct, totals) = distinct_weighted(values, weights);
    let m = distinct.len();
    if m <= n_values {
        return ReducedValues::identity(distinct);
    }

    let moments = PrefixMoments::new(&distinct, &totals);

    // errs[i]: best scaled cost of covering [i, m) with the segments allowed so far
    let mut errs: Vec<T> = (0..=m).map(|i| moments.scaled_sse(i, m)).collect();
    let mut splits: Vec<Vec<usize>> = Vec::with_capacity(n_values - 1);

    for _ in 1..n_values {
        let (argmins, next) = {
            let prev = &errs;
            let cost = |i: usize, j: usize| -> (usize, T) {
                if j < i {
                    (i - j, T::zero())
                } else {
                    (0, moments.scaled_sse(i, j) + prev[j])
                }
            };
            let argmins = smawk_row_minima(m + 1, m + 1, cost);
            let next: Vec<T> = (0..=m).map(|i| cost(i, argmins[i]).1).collect();
            (argmins, next)
        };
        splits.push(argmins);
        errs = next;
    }

    log::trace!(
        "reduced {} distinct values to at most {}: cost {:?}",
        m,
        n_values,
        (errs[0] * moments.scale() * moments.scale()).to_f64()
    );

    let segment_mean = |i: usize, j: usize| -> T {
        if moments.weight(i, j) > T::zero() {
            moments.mean(i, j)
        } else {
            let sum = distinct[i..j].iter().fold(T::zero(), |acc, &v| acc + v);
            sum / T::from(j - i).unwrap()
        }
    };

    let mut outputs = vec![T::zero(); m];
    let mut start = 0;
    for round in splits.iter().rev() {
        let end = round[start].max(start);
        if end > start {
            let mean = segment_mean(start, end);
            outputs[start..end].iter_mut().for_each(|o| *o = mean);
        }
        start = end;
    }
    if start < m {
        let mean = segment_mean(start, m);
        outputs[start..m].iter_mut().for_each(|o| *o = mean);
    }

    ReducedValues {
        inputs: distinct,
        outputs,
    }
}
