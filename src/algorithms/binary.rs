//! Two-level isotonic partitioning of 2-D observations.
//!
//! ## Purpose
//!
//! This module assigns every 2-D observation one of two levels, low or high,
//! so that the assignment is monotone in both coordinates and the total
//! assignment cost is minimal. It is the primitive both 2-D norms reduce to.
//!
//! ## Design notes
//!
//! * **Sweep**: Observations are processed in lexicographic `(x, y)` order,
//!   with `y` replaced by its rank `c` among the distinct y values.
//! * **Error functions**: After each prefix, `E(c)` is the least cost of a
//!   monotone assignment of the prefix whose lowest high-level rank is `c`
//!   (`c = c_max` meaning no high level at all). Each `E` is one version of a
//!   persistent interval-aggregate tree, built from the previous version by
//!   slicing, shifting and concatenating.
//! * **Backtracking**: The argmin trail of the stored versions recovers the
//!   assignment from the last observation backwards.
//!
//! ## Key concepts
//!
//! For an observation at rank `c_i` with costs `(lo, hi)`:
//!
//! * `c < c_i`: it is forced high, `E'(c) = E(c) + hi`.
//! * `c = c_i`: it is the lowest high, `E'(c_i) = min_{c >= c_i} E(c) + hi`.
//! * `c > c_i`: it stays low, `E'(c) = E(c) + lo`.
//!
//! ## Invariants
//!
//! * Coordinates are distinct.
//! * Ties resolve towards the lowest rank for the first use of the high level.
//!
//! ## Non-goals
//!
//! * This module does not pool repeated coordinates.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::IsotonicError;
use crate::primitives::interval_tree::{RangeArena, RangeId};
use crate::primitives::observation::{cmp_coords, cmp_scalar};

// ============================================================================
// Level Costs
// ============================================================================

/// Cost of assigning one observation to the low or the high level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCosts<T> {
    /// Cost when assigned the low level.
    pub low: T,
    /// Cost when assigned the high level.
    pub high: T,
}

impl<T: Float> LevelCosts<T> {
    /// Weighted absolute error against levels `a` and `b`.
    pub fn absolute(value: T, weight: T, a: T, b: T) -> Self {
        Self {
            low: (value - a).abs() * weight,
            high: (value - b).abs() * weight,
        }
    }

    /// Epsilon-partition costs around a split value `m`.
    ///
    /// Values at or below `m` pay `w * (m - v)` for going high; values above
    /// pay `w * (v - m)` for going low.
    pub fn around(value: T, weight: T, m: T) -> Self {
        if value <= m {
            Self {
                low: T::zero(),
                high: weight * (m - value),
            }
        } else {
            Self {
                low: weight * (value - m),
                high: T::zero(),
            }
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Assign every point the low (`false`) or high (`true`) level.
///
/// `points` must have distinct coordinates and be aligned with `costs`. The
/// result is aligned with `points`.
pub fn partition_levels<T: Float>(
    points: &[(T, T)],
    costs: &[LevelCosts<T>],
) -> Result<Vec<bool>, IsotonicError> {
    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| cmp_coords(points[i], points[j]));

    let mut ys: Vec<T> = points.iter().map(|p| p.1).collect();
    ys.sort_by(cmp_scalar);
    ys.dedup();
    let c_max = ys.len();

    let ranks: Vec<usize> = points
        .iter()
        .map(|p| ys.partition_point(|&y| y < p.1))
        .collect();

    let mut arena: RangeArena<T> = RangeArena::with_capacity(n * 16);
    let mut versions: Vec<RangeId> = Vec::with_capacity(n + 1);
    versions.push(arena.leaf(0, c_max, T::zero())?);

    for &idx in &order {
        let c = ranks[idx];
        let prev = versions[versions.len() - 1];
        let LevelCosts { low, high } = costs[idx];

        let first_high = arena.range_min(prev, c, c_max)? + high;
        let first_high = arena.leaf(c, c, first_high)?;
        let stays_low = arena.extract(prev, c + 1, c_max)?;
        let stays_low = arena.offset(stays_low, low)?;

        let next = if c > 0 {
            let forced = arena.extract(prev, 0, c - 1)?;
            let forced = arena.offset(forced, high)?;
            let head = arena.concat(forced, first_high)?;
            arena.concat(head, stays_low)?
        } else {
            arena.concat(first_high, stays_low)?
        };
        versions.push(next);
    }

    let last = versions[n];
    log::trace!(
        "binary partition of {} points over {} ranks: {} nodes, height {}, cost {:?}",
        n,
        c_max,
        arena.len(),
        arena.height(last),
        arena.min_value(last).to_f64()
    );

    let mut high = vec![false; n];
    let mut choice = arena.min_x(last);
    for step in (0..n).rev() {
        let idx = order[step];
        let c = ranks[idx];
        high[idx] = c >= choice;
        if choice == c {
            choice = arena.range_argmin(versions[step], c, c_max)?;
        }
    }

    Ok(high)
}
