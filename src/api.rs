//! High-level API for isotonic regression.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring a fit and choosing an execution adapter
//! (Univariate, Bivariate, or Multivariate).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`IsotonicBuilder`] via `Isotonic::new()`.
//! 2. Chain configuration methods (`.norm()`, `.n_values()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Bivariate)` to get an execution builder.
//! 4. Call `.build()` and then `.fit(..)` or `.fit_weighted(..)`.

// External dependencies
use core::marker::PhantomData;
use num_traits::Float;

// Internal dependencies
use crate::adapters::bivariate::BivariateIsotonicBuilder;
use crate::adapters::multivariate::MultivariateIsotonicBuilder;
use crate::adapters::univariate::UnivariateIsotonicBuilder;

// Publicly re-exported types
pub use crate::adapters::bivariate::BivariateIsotonic;
pub use crate::adapters::multivariate::MultivariateIsotonic;
pub use crate::adapters::univariate::UnivariateIsotonic;
pub use crate::algorithms::interpolation::{PiecewiseBilinear, PiecewiseLinear};
pub use crate::algorithms::reduce::ReducedValues;
pub use crate::engine::executor::{
    binary_partition, reduce_isotonic, regress_isotonic_1d, regress_isotonic_2d,
    smawk_row_minima,
};
pub use crate::engine::output::{
    BivariateFit, Composition, MonotoneModel, MultivariateFit, Stage, UnivariateFit,
};
pub use crate::evaluation::diagnostics::{Diagnostics, LevelSet};
pub use crate::primitives::errors::IsotonicError;
pub use crate::primitives::norm::Norm;
pub use crate::primitives::observation::{Observation1d, Observation2d};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Bivariate, Multivariate, Univariate};
}

/// Fluent builder for configuring isotonic regression.
#[derive(Debug, Clone)]
pub struct IsotonicBuilder<T> {
    /// Error norm.
    pub norm: Option<Norm>,

    /// Bound on distinct fitted levels.
    pub n_values: Option<usize>,

    /// Number of coordinates per point (Multivariate only).
    pub dimensions: Option<usize>,

    /// Number of composition stages (Multivariate only).
    pub stages: Option<usize>,

    /// Error raised by a setter, reported at `build()`.
    #[doc(hidden)]
    pub deferred_error: Option<IsotonicError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,

    _marker: PhantomData<T>,
}

impl<T: Float> Default for IsotonicBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> IsotonicBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: IsotonicAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            norm: None,
            n_values: None,
            dimensions: None,
            stages: None,
            deferred_error: None,
            duplicate_param: None,
            _marker: PhantomData,
        }
    }

    /// Set the error norm.
    pub fn norm(mut self, norm: Norm) -> Self {
        if self.norm.is_some() {
            self.duplicate_param = Some("norm");
        }
        self.norm = Some(norm);
        self
    }

    /// Set the error norm by exponent (`1` or `2`).
    pub fn p(mut self, p: u32) -> Self {
        match Norm::from_p(p) {
            Ok(norm) => self.norm(norm),
            Err(err) => {
                self.deferred_error.get_or_insert(err);
                self
            }
        }
    }

    /// Bound the number of distinct fitted levels.
    pub fn n_values(mut self, n_values: usize) -> Self {
        if self.n_values.is_some() {
            self.duplicate_param = Some("n_values");
        }
        self.n_values = Some(n_values);
        self
    }

    /// Set the number of coordinates per point.
    pub fn dimensions(mut self, dimensions: usize) -> Self {
        if self.dimensions.is_some() {
            self.duplicate_param = Some("dimensions");
        }
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the number of composition stages.
    pub fn stages(mut self, stages: usize) -> Self {
        if self.stages.is_some() {
            self.duplicate_param = Some("stages");
        }
        self.stages = Some(stages);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait IsotonicAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`IsotonicBuilder`] into a specialized execution builder.
    fn convert(builder: IsotonicBuilder<T>) -> Self::Output;
}

fn unsupported(adapter: &'static str, feature: &'static str) -> IsotonicError {
    IsotonicError::UnsupportedFeature { adapter, feature }
}

/// Marker for one-dimensional fits.
#[derive(Debug, Clone, Copy)]
pub struct Univariate;

impl<T: Float> IsotonicAdapter<T> for Univariate {
    type Output = UnivariateIsotonicBuilder<T>;

    fn convert(builder: IsotonicBuilder<T>) -> Self::Output {
        let mut result = UnivariateIsotonicBuilder::default();

        result.n_values = builder.n_values;
        result.deferred_error = builder.deferred_error;

        if builder.norm == Some(Norm::L1) {
            result
                .deferred_error
                .get_or_insert(unsupported("Univariate", "L1 norm"));
        }
        if matches!(builder.dimensions, Some(d) if d != 1) {
            result
                .deferred_error
                .get_or_insert(unsupported("Univariate", "dimensions"));
        }
        if builder.stages.is_some() {
            result
                .deferred_error
                .get_or_insert(unsupported("Univariate", "stages"));
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for two-dimensional fits.
#[derive(Debug, Clone, Copy)]
pub struct Bivariate;

impl<T: Float> IsotonicAdapter<T> for Bivariate {
    type Output = BivariateIsotonicBuilder<T>;

    fn convert(builder: IsotonicBuilder<T>) -> Self::Output {
        let mut result = BivariateIsotonicBuilder::default();

        if let Some(norm) = builder.norm {
            result.norm = norm;
            result.norm_set = true;
        }
        result.n_values = builder.n_values;
        result.deferred_error = builder.deferred_error;

        if matches!(builder.dimensions, Some(d) if d != 2) {
            result
                .deferred_error
                .get_or_insert(unsupported("Bivariate", "dimensions"));
        }
        if builder.stages.is_some() {
            result
                .deferred_error
                .get_or_insert(unsupported("Bivariate", "stages"));
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for k-dimensional fits composed from 2-D stages.
#[derive(Debug, Clone, Copy)]
pub struct Multivariate;

impl<T: Float> IsotonicAdapter<T> for Multivariate {
    type Output = MultivariateIsotonicBuilder<T>;

    fn convert(builder: IsotonicBuilder<T>) -> Self::Output {
        let mut result = MultivariateIsotonicBuilder::default();

        if let Some(norm) = builder.norm {
            result.norm = norm;
            result.norm_set = true;
        }
        if let Some(dims) = builder.dimensions {
            result.dimensions = dims;
            result.dimensions_set = true;
        }
        result.n_values = builder.n_values;
        result.stages = builder.stages;
        result.deferred_error = builder.deferred_error;

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
