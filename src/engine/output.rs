//! Fitted isotonic models.
//!
//! ## Purpose
//!
//! This module defines the models returned by the engine. Each model keeps
//! the interpolant that answers queries at arbitrary points together with
//! the fitted training values, their level sets and fit diagnostics.
//!
//! ## Design notes
//!
//! * **Queries**: Predictions go through piecewise-linear or bilinear
//!   interpolants and are monotone in every coordinate.
//! * **Ownership**: Models own their data and can be cloned, serialized (with
//!   the `serde` feature) and queried from several threads.
//! * **Common interface**: `MonotoneModel` gives all models a single
//!   slice-based query method.
//!
//! ## Invariants
//!
//! * Fitted values are aligned with the training observations.
//! * A k-dimensional model answers only points with exactly k coordinates.

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
use crate::algorithms::interpolation::{PiecewiseBilinear, PiecewiseLinear};
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::{Diagnostics, LevelSet};
use crate::primitives::errors::IsotonicError;
use crate::primitives::norm::Norm;

// ============================================================================
// Model Trait
// ============================================================================

/// A fitted model that is monotone non-decreasing in every coordinate.
pub trait MonotoneModel<T> {
    /// Number of coordinates a query point must have.
    fn dimensions(&self) -> usize;

    /// Evaluate the model at one point.
    fn evaluate(&self, point: &[T]) -> Result<T, IsotonicError>;

    /// Evaluate the model at row-major points with `dimensions()` coordinates each.
    fn evaluate_many(&self, points: &[T]) -> Result<Vec<T>, IsotonicError> {
        let k = self.dimensions().max(1);
        let remainder = points.len() % k;
        if remainder != 0 {
            return Err(IsotonicError::MismatchedInputs {
                name: "points",
                expected: points.len() + k - remainder,
                got: points.len(),
            });
        }
        points.chunks(k).map(|p| self.evaluate(p)).collect()
    }
}

fn check_point<T: Float>(point: &[T], dimensions: usize) -> Result<(), IsotonicError> {
    Validator::validate_length("point", dimensions, point.len())?;
    Validator::validate_finite("point", point)
}

fn write_levels<T: Float + Display>(f: &mut Formatter<'_>, levels: &[LevelSet<T>]) -> FmtResult {
    writeln!(f, "Level Sets:")?;
    writeln!(f, "       Level    Count       Weight")?;
    writeln!(f, "  --------------------------------")?;
    for set in levels {
        writeln!(
            f,
            "  {:>10.5} {:>8} {:>12.4}",
            set.level, set.count, set.weight
        )?;
    }
    Ok(())
}

// ============================================================================
// Univariate Model
// ============================================================================

/// Isotonic fit of one-dimensional observations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnivariateFit<T> {
    interpolant: PiecewiseLinear<T>,
    fitted: Vec<T>,
    level_sets: Vec<LevelSet<T>>,
    diagnostics: Diagnostics<T>,
}

impl<T: Float> UnivariateFit<T> {
    pub(crate) fn new(
        interpolant: PiecewiseLinear<T>,
        fitted: Vec<T>,
        level_sets: Vec<LevelSet<T>>,
        diagnostics: Diagnostics<T>,
    ) -> Self {
        Self {
            interpolant,
            fitted,
            level_sets,
            diagnostics,
        }
    }

    /// Predicted value at `x`.
    ///
    /// Queries outside the training range take the value of the nearest end.
    pub fn predict(&self, x: T) -> T {
        self.interpolant.interpolate(x)
    }

    /// Predicted values at several points.
    pub fn predict_many(&self, xs: &[T]) -> Vec<T> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Fitted values aligned with the training observations.
    pub fn fitted_values(&self) -> &[T] {
        &self.fitted
    }

    /// Distinct fitted levels in increasing order.
    pub fn levels(&self) -> Vec<T> {
        self.level_sets.iter().map(|s| s.level).collect()
    }

    /// Level sets of the training observations.
    pub fn level_sets(&self) -> &[LevelSet<T>] {
        &self.level_sets
    }

    /// Fit diagnostics against the training observations.
    pub fn diagnostics(&self) -> &Diagnostics<T> {
        &self.diagnostics
    }

    /// Piecewise-linear interpolant backing the model.
    pub fn interpolant(&self) -> &PiecewiseLinear<T> {
        &self.interpolant
    }

    pub(crate) fn into_interpolant(self) -> PiecewiseLinear<T> {
        self.interpolant
    }
}

impl<T: Float> MonotoneModel<T> for UnivariateFit<T> {
    fn dimensions(&self) -> usize {
        1
    }

    fn evaluate(&self, point: &[T]) -> Result<T, IsotonicError> {
        check_point(point, 1)?;
        Ok(self.predict(point[0]))
    }
}

impl<T: Float + Display> Display for UnivariateFit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.fitted.len())?;
        writeln!(f, "  Dimensions: 1")?;
        writeln!(f, "  Knots: {}", self.interpolant.len())?;
        writeln!(f)?;
        writeln!(f, "{}", self.diagnostics)?;
        writeln!(f)?;
        write_levels(f, &self.level_sets)
    }
}

// ============================================================================
// Bivariate Model
// ============================================================================

/// Isotonic fit of two-dimensional observations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BivariateFit<T> {
    norm: Norm,
    surface: PiecewiseBilinear<T>,
    fitted: Vec<T>,
    level_sets: Vec<LevelSet<T>>,
    diagnostics: Diagnostics<T>,
}

impl<T: Float> BivariateFit<T> {
    pub(crate) fn new(
        norm: Norm,
        surface: PiecewiseBilinear<T>,
        fitted: Vec<T>,
        level_sets: Vec<LevelSet<T>>,
        diagnostics: Diagnostics<T>,
    ) -> Self {
        Self {
            norm,
            surface,
            fitted,
            level_sets,
            diagnostics,
        }
    }

    /// Predicted value at `(x, y)`.
    pub fn predict(&self, x: T, y: T) -> T {
        self.surface.interpolate(x, y)
    }

    /// Predicted values at paired coordinates.
    pub fn predict_many(&self, xs: &[T], ys: &[T]) -> Result<Vec<T>, IsotonicError> {
        Validator::validate_length("ys", xs.len(), ys.len())?;
        Ok(xs.iter().zip(ys).map(|(&x, &y)| self.predict(x, y)).collect())
    }

    /// Norm the model was fitted under.
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Fitted values aligned with the training observations.
    pub fn fitted_values(&self) -> &[T] {
        &self.fitted
    }

    /// Distinct fitted levels in increasing order.
    pub fn levels(&self) -> Vec<T> {
        self.level_sets.iter().map(|s| s.level).collect()
    }

    /// Level sets of the training observations.
    pub fn level_sets(&self) -> &[LevelSet<T>] {
        &self.level_sets
    }

    /// Fit diagnostics against the training observations.
    pub fn diagnostics(&self) -> &Diagnostics<T> {
        &self.diagnostics
    }

    /// Bilinear interpolant backing the model.
    pub fn surface(&self) -> &PiecewiseBilinear<T> {
        &self.surface
    }

    pub(crate) fn into_surface(self) -> PiecewiseBilinear<T> {
        self.surface
    }
}

impl<T: Float> MonotoneModel<T> for BivariateFit<T> {
    fn dimensions(&self) -> usize {
        2
    }

    fn evaluate(&self, point: &[T]) -> Result<T, IsotonicError> {
        check_point(point, 2)?;
        Ok(self.predict(point[0], point[1]))
    }
}

impl<T: Float + Display> Display for BivariateFit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.fitted.len())?;
        writeln!(f, "  Dimensions: 2")?;
        writeln!(f, "  Norm: {}", self.norm)?;
        writeln!(f, "  Knots: {}", self.surface.knot_count())?;
        writeln!(f)?;
        writeln!(f, "{}", self.diagnostics)?;
        writeln!(f)?;
        write_levels(f, &self.level_sets)
    }
}

// ============================================================================
// Multivariate Model
// ============================================================================

/// One composition stage: a 2-D surface over the running prediction and one coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stage<T> {
    /// Coordinate index used as the surface's second input.
    pub axis: usize,
    /// Fitted surface.
    pub surface: PiecewiseBilinear<T>,
}

/// Internal shape of a multivariate model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Composition<T> {
    /// A single coordinate, fitted in one dimension.
    Univariate(PiecewiseLinear<T>),

    /// Chained 2-D stages. The first stage reads coordinates 0 and 1; each
    /// later stage reads the previous stage's prediction and its own axis.
    Staged(Vec<Stage<T>>),
}

/// Isotonic fit of k-dimensional observations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultivariateFit<T> {
    dimensions: usize,
    norm: Norm,
    composition: Composition<T>,
    fitted: Vec<T>,
    level_sets: Vec<LevelSet<T>>,
    diagnostics: Diagnostics<T>,
}

impl<T: Float> MultivariateFit<T> {
    pub(crate) fn new(
        dimensions: usize,
        norm: Norm,
        composition: Composition<T>,
        fitted: Vec<T>,
        level_sets: Vec<LevelSet<T>>,
        diagnostics: Diagnostics<T>,
    ) -> Self {
        Self {
            dimensions,
            norm,
            composition,
            fitted,
            level_sets,
            diagnostics,
        }
    }

    /// Predicted value at a point with `dimensions()` coordinates.
    pub fn predict(&self, point: &[T]) -> Result<T, IsotonicError> {
        check_point(point, self.dimensions)?;
        match &self.composition {
            Composition::Univariate(line) => Ok(line.interpolate(point[0])),
            Composition::Staged(stages) => {
                let (first, rest) = stages
                    .split_first()
                    .ok_or(IsotonicError::InvariantViolation("composition without stages"))?;
                let mut prediction = first.surface.interpolate(point[0], point[first.axis]);
                for stage in rest {
                    prediction = stage.surface.interpolate(prediction, point[stage.axis]);
                }
                Ok(prediction)
            }
        }
    }

    /// Number of coordinates per point.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Norm the model was fitted under.
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Number of kept composition stages (1 for a univariate model).
    pub fn stage_count(&self) -> usize {
        match &self.composition {
            Composition::Univariate(_) => 1,
            Composition::Staged(stages) => stages.len(),
        }
    }

    /// Internal shape of the model.
    pub fn composition(&self) -> &Composition<T> {
        &self.composition
    }

    /// Fitted values aligned with the training observations.
    pub fn fitted_values(&self) -> &[T] {
        &self.fitted
    }

    /// Distinct fitted levels in increasing order.
    pub fn levels(&self) -> Vec<T> {
        self.level_sets.iter().map(|s| s.level).collect()
    }

    /// Level sets of the training observations.
    pub fn level_sets(&self) -> &[LevelSet<T>] {
        &self.level_sets
    }

    /// Fit diagnostics against the training observations.
    pub fn diagnostics(&self) -> &Diagnostics<T> {
        &self.diagnostics
    }
}

impl<T: Float> MonotoneModel<T> for MultivariateFit<T> {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn evaluate(&self, point: &[T]) -> Result<T, IsotonicError> {
        self.predict(point)
    }
}

impl<T: Float + Display> Display for MultivariateFit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.fitted.len())?;
        writeln!(f, "  Dimensions: {}", self.dimensions)?;
        writeln!(f, "  Norm: {}", self.norm)?;
        writeln!(f, "  Stages: {}", self.stage_count())?;
        writeln!(f)?;
        writeln!(f, "{}", self.diagnostics)?;
        writeln!(f)?;
        write_levels(f, &self.level_sets)
    }
}
