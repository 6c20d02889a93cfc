//! Two-dimensional isotonic regression by repeated binary partitioning.
//!
//! ## Purpose
//!
//! This module fits values to 2-D observations so that the fit is
//! non-decreasing in both coordinates and minimizes weighted L1 or L2 error,
//! and turns the fitted points into a bilinear interpolant that stays
//! monotone at arbitrary query points.
//!
//! ## Design notes
//!
//! * **Work stack**: Groups of observations are refined on an explicit stack;
//!   recursion depth never depends on the number of observations.
//! * **L1**: Each group carries a range of candidate levels drawn from the
//!   input values. A binary partition between two adjacent candidates either
//!   splits the group or narrows its candidate range.
//! * **L2**: Each group is probed with an epsilon-partition around its
//!   weighted mean. A uniform probe means the mean is the group's level.
//!
//! ## Key concepts
//!
//! * **Split pair**: Adjacent candidates `(a, b)`, tried from the centre of
//!   the candidate range outwards. Pairs whose gap is within a few ulps are
//!   tried last, since rounding can place observations on the wrong side.
//!   When only near ties remain, each is tried in turn until one splits the
//!   group; one-sided results narrow the candidate range, and the weighted
//!   median is assigned only if those results contradict each other.
//! * **Surface rows**: Every x-breakpoint gets a row over the full y-grid
//!   holding the cumulative maximum of fitted values dominated by it.
//!
//! ## Invariants
//!
//! * Observations have distinct coordinates and positive weights.
//! * L1 levels are always input values; L2 levels are weighted means of their
//!   level sets.
//!
//! ## Non-goals
//!
//! * This module does not validate or pool input (handled by the engine).
//! * This module does not quantize levels (handled by `reduce`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::binary::{partition_levels, LevelCosts};
use crate::algorithms::interpolation::{PiecewiseBilinear, PiecewiseLinear};
use crate::math::median::weighted_lower_median;
use crate::primitives::errors::IsotonicError;
use crate::primitives::observation::{cmp_coords, cmp_scalar, Observation2d};

// ============================================================================
// Shared Helpers
// ============================================================================

/// Split `members` by the binary partition result.
fn split_members(members: &[usize], high: &[bool]) -> (Vec<usize>, Vec<usize>) {
    let mut lower = Vec::new();
    let mut upper = Vec::new();
    for (&m, &h) in members.iter().zip(high) {
        if h {
            upper.push(m);
        } else {
            lower.push(m);
        }
    }
    (lower, upper)
}

fn group_points<T: Float>(observations: &[Observation2d<T>], members: &[usize]) -> Vec<(T, T)> {
    members.iter().map(|&i| observations[i].coords()).collect()
}

// ============================================================================
// L1
// ============================================================================

/// A group of observations and its inclusive range of candidate levels.
struct CandidateGroup {
    members: Vec<usize>,
    lo: usize,
    hi: usize,
}

/// Whether `a < b` are too close to separate reliably.
fn near_tie<T: Float>(a: T, b: T) -> bool {
    let scale = a.abs().max(b.abs());
    b - a <= T::from(16.0).unwrap() * T::epsilon() * scale
}

/// Split pair indices `k` of `(candidates[k], candidates[k + 1])` for a candidate range.
///
/// Pairs are listed from the central one outwards, with near ties moved to
/// the end. The second value counts the pairs that are not near ties.
fn split_pairs<T: Float>(candidates: &[T], lo: usize, hi: usize) -> (Vec<usize>, usize) {
    let count = hi - lo + 1;
    let central = lo + (count + 1) / 2 - 1;

    let mut order = Vec::with_capacity(hi - lo);
    let mut below = Some(central);
    let mut above = central + 1;
    while below.is_some() || above < hi {
        if let Some(k) = below {
            order.push(k);
            below = if k > lo { Some(k - 1) } else { None };
        }
        if above < hi {
            order.push(above);
            above += 1;
        }
    }

    let (mut clear, near): (Vec<usize>, Vec<usize>) = order
        .into_iter()
        .partition(|&k| !near_tie(candidates[k], candidates[k + 1]));
    let separated = clear.len();
    clear.extend(near);
    (clear, separated)
}

/// Binary partition of a group between levels `a < b`, as `(lower, upper)` members.
fn partition_group<T: Float>(
    observations: &[Observation2d<T>],
    members: &[usize],
    a: T,
    b: T,
) -> Result<(Vec<usize>, Vec<usize>), IsotonicError> {
    let points = group_points(observations, members);
    let costs: Vec<LevelCosts<T>> = members
        .iter()
        .map(|&i| LevelCosts::absolute(observations[i].value, observations[i].weight, a, b))
        .collect();
    let high = partition_levels(&points, &costs)?;
    Ok(split_members(members, &high))
}

/// L1 fit. Returns the fitted level of every observation, aligned with the input.
pub fn fit_l1<T: Float>(observations: &[Observation2d<T>]) -> Result<Vec<T>, IsotonicError> {
    let n = observations.len();
    let mut fitted = vec![T::zero(); n];
    if n == 0 {
        return Ok(fitted);
    }

    let mut candidates: Vec<T> = observations.iter().map(|o| o.value).collect();
    candidates.sort_by(cmp_scalar);
    candidates.dedup();

    let mut stack = vec![CandidateGroup {
        members: (0..n).collect(),
        lo: 0,
        hi: candidates.len() - 1,
    }];
    let mut rounds = 0usize;

    while let Some(group) = stack.pop() {
        let (floor, ceiling) = (candidates[group.lo], candidates[group.hi]);

        match group.members.len() {
            0 => return Err(IsotonicError::InvariantViolation("empty L1 partition group")),
            1 => {
                let i = group.members[0];
                fitted[i] = observations[i].value.max(floor).min(ceiling);
                continue;
            }
            _ => {}
        }

        if group.lo == group.hi {
            group.members.iter().for_each(|&i| fitted[i] = floor);
            continue;
        }

        let (pairs, separated) = split_pairs(&candidates, group.lo, group.hi);

        if let Some(&k) = pairs.first().filter(|_| separated > 0) {
            let (lower, upper) =
                partition_group(observations, &group.members, candidates[k], candidates[k + 1])?;
            rounds += 1;

            if !lower.is_empty() {
                stack.push(CandidateGroup {
                    members: lower,
                    lo: group.lo,
                    hi: k,
                });
            }
            if !upper.is_empty() {
                stack.push(CandidateGroup {
                    members: upper,
                    lo: k + 1,
                    hi: group.hi,
                });
            }
            continue;
        }

        // only near ties remain: the first genuine split wins, one-sided
        // results narrow the candidate range
        let (mut lo, mut hi) = (group.lo, group.hi);
        let mut split = None;
        for &k in &pairs {
            let (lower, upper) =
                partition_group(observations, &group.members, candidates[k], candidates[k + 1])?;
            rounds += 1;

            if lower.is_empty() {
                lo = lo.max(k + 1);
            } else if upper.is_empty() {
                hi = hi.min(k);
            } else {
                split = Some((k, lower, upper));
                break;
            }
        }

        if let Some((k, lower, upper)) = split {
            stack.push(CandidateGroup {
                members: lower,
                lo: group.lo,
                hi: k,
            });
            stack.push(CandidateGroup {
                members: upper,
                lo: k + 1,
                hi: group.hi,
            });
        } else if lo <= hi {
            stack.push(CandidateGroup {
                members: group.members,
                lo,
                hi,
            });
        } else {
            // the near-tie partitions contradict each other
            let weighted: Vec<(T, T)> = group
                .members
                .iter()
                .map(|&i| (observations[i].value, observations[i].weight))
                .collect();
            let median = weighted_lower_median(&weighted)
                .ok_or(IsotonicError::InvariantViolation("L1 group without weight"))?;
            let level = median.max(floor).min(ceiling);
            log::trace!(
                "L1 group of {} has inconsistent near-tie partitions, assigning median",
                group.members.len()
            );
            group.members.iter().for_each(|&i| fitted[i] = level);
        }
    }

    log::debug!(
        "L1 fit of {} points over {} candidate levels in {} partition rounds",
        n,
        candidates.len(),
        rounds
    );

    Ok(fitted)
}

// ============================================================================
// L2
// ============================================================================

/// L2 fit. Returns the fitted level of every observation, aligned with the input.
pub fn fit_l2<T: Float>(observations: &[Observation2d<T>]) -> Result<Vec<T>, IsotonicError> {
    let n = observations.len();
    let mut fitted = vec![T::zero(); n];
    if n == 0 {
        return Ok(fitted);
    }

    let mut stack: Vec<Vec<usize>> = vec![(0..n).collect()];
    let mut rounds = 0usize;
    let mut levels = 0usize;

    while let Some(members) = stack.pop() {
        let Some(&first) = members.first() else {
            return Err(IsotonicError::InvariantViolation("empty L2 partition group"));
        };

        let first_value = observations[first].value;
        if members.iter().all(|&i| observations[i].value == first_value) {
            members.iter().for_each(|&i| fitted[i] = first_value);
            levels += 1;
            continue;
        }

        let (sum, weight) = members.iter().fold((T::zero(), T::zero()), |(s, w), &i| {
            let o = &observations[i];
            (s + o.value * o.weight, w + o.weight)
        });
        let mean = sum / weight;

        let points = group_points(observations, &members);
        let costs: Vec<LevelCosts<T>> = members
            .iter()
            .map(|&i| LevelCosts::around(observations[i].value, observations[i].weight, mean))
            .collect();
        let high = partition_levels(&points, &costs)?;
        rounds += 1;

        let (lower, upper) = split_members(&members, &high);
        if lower.is_empty() || upper.is_empty() {
            log::trace!("L2 group of {} settled at mean", members.len());
            members.iter().for_each(|&i| fitted[i] = mean);
            levels += 1;
        } else {
            stack.push(lower);
            stack.push(upper);
        }
    }

    log::debug!(
        "L2 fit of {} points: {} level sets in {} partition rounds",
        n,
        levels,
        rounds
    );

    Ok(fitted)
}

// ============================================================================
// Output Surface
// ============================================================================

/// Build a monotone bilinear interpolant from fitted points with distinct coordinates.
///
/// Every x-breakpoint becomes a row over the shared y-grid whose value at `g`
/// is the largest fitted value among points with `x <= row x` and `y <= g`,
/// or the smallest fitted value where no point qualifies. Flat interior grid
/// points are dropped from each row.
pub fn build_surface<T: Float>(
    points: &[(T, T)],
    fitted: &[T],
) -> Result<PiecewiseBilinear<T>, IsotonicError> {
    if points.is_empty() {
        return Err(IsotonicError::EmptyInput);
    }

    let mut grid: Vec<T> = points.iter().map(|p| p.1).collect();
    grid.sort_by(cmp_scalar);
    grid.dedup();
    let g = grid.len();

    let floor = fitted.iter().copied().fold(T::infinity(), T::min);

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| cmp_coords(points[i], points[j]));

    let mut best = vec![floor; g];
    let mut row = vec![floor; g];
    let mut rows: Vec<(T, PiecewiseLinear<T>)> = Vec::new();

    let mut start = 0;
    while start < order.len() {
        let x = points[order[start]].0;
        let mut end = start;
        while end < order.len() && points[order[end]].0 == x {
            let i = order[end];
            let rank = grid.partition_point(|&y| y < points[i].1);
            best[rank] = best[rank].max(fitted[i]);
            end += 1;
        }

        let mut running = floor;
        for (r, b) in row.iter_mut().zip(&best) {
            running = running.max(*b);
            *r = running;
        }

        let kept: Vec<(T, T)> = (0..g)
            .filter(|&j| j == 0 || j + 1 == g || !(row[j - 1] == row[j] && row[j] == row[j + 1]))
            .map(|j| (grid[j], row[j]))
            .collect();
        rows.push((x, PiecewiseLinear::new(kept)?));

        start = end;
    }

    PiecewiseBilinear::from_rows(rows)
}
