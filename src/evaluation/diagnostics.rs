//! Training-fit diagnostics for isotonic models.
//!
//! ## Purpose
//!
//! This module measures how well a fitted model reproduces its training
//! observations: weighted squared and absolute error, root mean squared
//! error, the median absolute residual and the level sets of the fit.
//!
//! ## Design notes
//!
//! * **Weighted**: Error sums use observation weights; zero-weight
//!   observations contribute nothing and are left out of level sets.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Level set**: The training observations sharing one fitted value. Under
//!   the L2 norm a level equals the weighted mean of its set.
//!
//! ## Invariants
//!
//! * `rmse = sqrt(weighted_sse / total_weight)`.
//! * Level sets are reported in increasing level order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::median::median_inplace;
use crate::primitives::observation::cmp_scalar;

// ============================================================================
// Level Sets
// ============================================================================

/// Training observations sharing one fitted level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelSet<T> {
    /// Fitted level.
    pub level: T,
    /// Number of observations at this level.
    pub count: usize,
    /// Total weight of the observations.
    pub weight: T,
    /// Weighted mean of the observed values.
    pub mean: T,
}

/// Group positive-weight observations by fitted level, in increasing level order.
pub fn level_sets<T: Float>(values: &[T], weights: Option<&[T]>, fitted: &[T]) -> Vec<LevelSet<T>> {
    let mut rows: Vec<(T, T, T)> = fitted
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (&f, &v))| (f, v, weights.map_or(T::one(), |w| w[i])))
        .filter(|&(_, _, w)| w > T::zero())
        .collect();
    rows.sort_by(|a, b| cmp_scalar(&a.0, &b.0));

    let mut sets: Vec<LevelSet<T>> = Vec::new();
    let mut sums: Vec<T> = Vec::new();
    for (f, v, w) in rows {
        match sets.last_mut() {
            Some(last) if last.level == f => {
                last.count += 1;
                last.weight = last.weight + w;
                if let Some(s) = sums.last_mut() {
                    *s = *s + v * w;
                }
            }
            _ => {
                sets.push(LevelSet {
                    level: f,
                    count: 1,
                    weight: w,
                    mean: T::zero(),
                });
                sums.push(v * w);
            }
        }
    }

    for (set, sum) in sets.iter_mut().zip(sums) {
        set.mean = sum / set.weight;
    }
    sets
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Weighted sum of squared residuals.
pub fn weighted_sse<T: Float>(values: &[T], weights: Option<&[T]>, fitted: &[T]) -> T {
    values
        .iter()
        .zip(fitted)
        .enumerate()
        .fold(T::zero(), |acc, (i, (&v, &f))| {
            let w = weights.map_or(T::one(), |ws| ws[i]);
            acc + w * (v - f) * (v - f)
        })
}

/// Goodness-of-fit statistics of a model against its training observations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics<T> {
    /// Number of observations with positive weight.
    pub n: usize,
    /// Total observation weight.
    pub total_weight: T,
    /// Weighted sum of squared residuals.
    pub weighted_sse: T,
    /// Weighted sum of absolute residuals.
    pub weighted_sae: T,
    /// Weighted root mean squared error.
    pub rmse: T,
    /// Median absolute residual (unweighted).
    pub median_abs_residual: T,
    /// Number of distinct fitted levels.
    pub levels: usize,
}

impl<T: Float> Diagnostics<T> {
    /// Compute diagnostics from observed values, optional weights and fitted values.
    pub fn compute(values: &[T], weights: Option<&[T]>, fitted: &[T]) -> Self {
        let mut n = 0;
        let mut total_weight = T::zero();
        let mut weighted_sse = T::zero();
        let mut weighted_sae = T::zero();
        let mut abs_residuals: Vec<T> = Vec::with_capacity(values.len());

        for (i, (&v, &f)) in values.iter().zip(fitted).enumerate() {
            let w = weights.map_or(T::one(), |ws| ws[i]);
            if w <= T::zero() {
                continue;
            }
            let r = v - f;
            n += 1;
            total_weight = total_weight + w;
            weighted_sse = weighted_sse + w * r * r;
            weighted_sae = weighted_sae + w * r.abs();
            abs_residuals.push(r.abs());
        }

        let rmse = if total_weight > T::zero() {
            (weighted_sse / total_weight).sqrt()
        } else {
            T::zero()
        };

        Self {
            n,
            total_weight,
            weighted_sse,
            weighted_sae,
            rmse,
            median_abs_residual: median_inplace(&mut abs_residuals),
            levels: level_sets(values, weights, fitted).len(),
        }
    }
}

impl<T: Float + Display> Display for Diagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Diagnostics:")?;
        writeln!(f, "  Observations: {}", self.n)?;
        writeln!(f, "  Levels:       {}", self.levels)?;
        writeln!(f, "  Weighted SSE: {:.6}", self.weighted_sse)?;
        writeln!(f, "  Weighted SAE: {:.6}", self.weighted_sae)?;
        writeln!(f, "  RMSE:         {:.6}", self.rmse)?;
        write!(f, "  Median |r|:   {:.6}", self.median_abs_residual)
    }
}
