//! Weighted median for robust level selection.
//!
//! ## Purpose
//!
//! This module computes the lower weighted median of a set of weighted
//! values. It is the fallback level of the L1 solver when a group cannot be
//! split any further without comparing numerically indistinguishable values.
//!
//! ## Design notes
//!
//! * **Algorithm**: Sorts a scratch copy, then walks the cumulative weight.
//! * **Unweighted case**: `median_inplace` uses Quickselect in O(n).
//!
//! ## Invariants
//!
//! * The result is always one of the input values.
//! * At least half of the total weight lies at or below the result.
//!
//! ## Non-goals
//!
//! * This module does not handle non-finite values (NaN/Inf).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Weighted Median
// ============================================================================

/// Lower weighted median of `(value, weight)` pairs.
///
/// Returns the smallest value `m` such that the weight at or below `m` is at
/// least half the total. Returns `None` for empty input or non-positive total
/// weight.
pub fn weighted_lower_median<T: Float>(pairs: &[(T, T)]) -> Option<T> {
    let total = pairs.iter().fold(T::zero(), |acc, &(_, w)| acc + w);
    if pairs.is_empty() || total <= T::zero() {
        return None;
    }

    let mut sorted: Vec<(T, T)> = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Equal));

    let half = total / T::from(2.0).unwrap();
    let mut cumulative = T::zero();
    for &(v, w) in &sorted {
        cumulative = cumulative + w;
        if cumulative >= half {
            return Some(v);
        }
    }

    sorted.last().map(|&(v, _)| v)
}

/// Median of the values in place, using Quickselect. Reorders `vals`.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 0 {
        let lower = vals[..mid].iter().copied().fold(T::neg_infinity(), T::max);
        (lower + upper) / T::from(2.0).unwrap()
    } else {
        upper
    }
}
