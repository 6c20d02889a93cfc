//! Piecewise-linear and piecewise-bilinear interpolants.
//!
//! ## Purpose
//!
//! This module provides the query structures every fitted model is answered
//! through. A `PiecewiseLinear` interpolates between ordered breakpoints; a
//! `PiecewiseBilinear` holds one `PiecewiseLinear` row per x-breakpoint and
//! interpolates first along y within the two bracketing rows, then along x.
//!
//! ## Design notes
//!
//! * **Lookup**: Binary search for the last breakpoint at or below the query.
//! * **Clamping**: Queries outside the breakpoint range return the nearest end value.
//! * **Immutable**: Built once, then only read.
//!
//! ## Key concepts
//!
//! * **Linear Interpolation**: `v = v_0 + (v_1 - v_0) * (k - k_0) / (k_1 - k_0)`.
//! * **Exact Knots**: A query exactly at a breakpoint returns its stored value.
//!
//! ## Invariants
//!
//! * Breakpoint keys are strictly increasing.
//! * Every structure holds at least one breakpoint.
//!
//! ## Non-goals
//!
//! * This module does not enforce monotonicity of the stored values.
//! * This module does not provide higher-order interpolation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::IsotonicError;
use crate::primitives::observation::{cmp_coords, cmp_scalar};

// ============================================================================
// PiecewiseLinear
// ============================================================================

/// Linear interpolant through ordered `(key, value)` breakpoints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiecewiseLinear<T> {
    keys: Vec<T>,
    values: Vec<T>,
}

impl<T: Float> PiecewiseLinear<T> {
    /// Build from breakpoints in any order. Keys must be distinct.
    pub fn new(mut points: Vec<(T, T)>) -> Result<Self, IsotonicError> {
        if points.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }

        points.sort_by(|a, b| cmp_scalar(&a.0, &b.0));
        if points.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(IsotonicError::DuplicateCoordinates {
                solver: "piecewise linear",
            });
        }

        let (keys, values) = points.into_iter().unzip();
        Ok(Self { keys, values })
    }

    /// Interpolated value at `key`.
    pub fn interpolate(&self, key: T) -> T {
        let i = self.keys.partition_point(|&k| k <= key);
        if i == 0 {
            self.values[0]
        } else if i < self.keys.len() {
            let (k0, k1) = (self.keys[i - 1], self.keys[i]);
            let (v0, v1) = (self.values[i - 1], self.values[i]);
            v0 + (v1 - v0) * (key - k0) / (k1 - k0)
        } else {
            self.values[i - 1]
        }
    }

    /// Breakpoint keys in increasing order.
    pub fn keys(&self) -> &[T] {
        &self.keys
    }

    /// Breakpoint values, aligned with `keys()`.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; an interpolant holds at least one breakpoint.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ============================================================================
// PiecewiseBilinear
// ============================================================================

/// Bilinear interpolant over rows of `PiecewiseLinear` interpolants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiecewiseBilinear<T> {
    xs: Vec<T>,
    rows: Vec<PiecewiseLinear<T>>,
}

impl<T: Float> PiecewiseBilinear<T> {
    /// Build from `(x, y, value)` points in any order. Coordinate pairs must be distinct.
    pub fn new(mut points: Vec<(T, T, T)>) -> Result<Self, IsotonicError> {
        if points.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }

        points.sort_by(|a, b| cmp_coords((a.0, a.1), (b.0, b.1)));
        if points.windows(2).any(|w| (w[0].0, w[0].1) == (w[1].0, w[1].1)) {
            return Err(IsotonicError::DuplicateCoordinates {
                solver: "piecewise bilinear",
            });
        }

        let mut rows: Vec<(T, PiecewiseLinear<T>)> = Vec::new();
        let mut start = 0;
        for end in 1..=points.len() {
            if end == points.len() || points[end].0 != points[start].0 {
                let row = points[start..end].iter().map(|&(_, y, v)| (y, v)).collect();
                rows.push((points[start].0, PiecewiseLinear::new(row)?));
                start = end;
            }
        }

        Self::from_rows(rows)
    }

    /// Build from prepared rows. Row keys must be distinct.
    pub fn from_rows(mut rows: Vec<(T, PiecewiseLinear<T>)>) -> Result<Self, IsotonicError> {
        if rows.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }

        rows.sort_by(|a, b| cmp_scalar(&a.0, &b.0));
        if rows.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(IsotonicError::DuplicateCoordinates {
                solver: "piecewise bilinear",
            });
        }

        let (xs, rows) = rows.into_iter().unzip();
        Ok(Self { xs, rows })
    }

    /// Interpolated value at `(x, y)`.
    pub fn interpolate(&self, x: T, y: T) -> T {
        let i = self.xs.partition_point(|&k| k <= x);
        if i == 0 {
            self.rows[0].interpolate(y)
        } else if i < self.xs.len() {
            let (x0, x1) = (self.xs[i - 1], self.xs[i]);
            let v0 = self.rows[i - 1].interpolate(y);
            let v1 = self.rows[i].interpolate(y);
            v0 + (v1 - v0) * (x - x0) / (x1 - x0)
        } else {
            self.rows[i - 1].interpolate(y)
        }
    }

    /// Row keys in increasing order.
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Row interpolants, aligned with `xs()`.
    pub fn rows(&self) -> &[PiecewiseLinear<T>] {
        &self.rows
    }

    /// Total number of stored breakpoints across all rows.
    pub fn knot_count(&self) -> usize {
        self.rows.iter().map(PiecewiseLinear::len).sum()
    }
}
