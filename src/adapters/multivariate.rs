//! Multivariate adapter for k-dimensional isotonic regression.
//!
//! ## Purpose
//!
//! This module provides the execution adapter for k-dimensional inputs. The
//! fit is composed from two-dimensional stages: the first pairs coordinates
//! 0 and 1, and each later stage pairs the running prediction with the next
//! coordinate in round-robin order.
//!
//! ## Design notes
//!
//! * **Layout**: Points are passed row-major, `dimensions` coordinates each.
//! * **Stages**: Default stage count is 1 for two dimensions and `2k - 1`
//!   otherwise. A stage that does not lower the weighted training error
//!   ends composition.
//! * **One dimension**: Delegates to the univariate solver.
//!
//! ## Non-goals
//!
//! * L1 composition over more than one stage is not supported.

// External dependencies
use core::marker::PhantomData;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{IsotonicConfig, IsotonicExecutor};
use crate::engine::output::MultivariateFit;
use crate::engine::validator::Validator;
use crate::primitives::errors::IsotonicError;
use crate::primitives::norm::Norm;

// ============================================================================
// Multivariate Builder
// ============================================================================

/// Builder for the multivariate isotonic processor.
#[derive(Debug, Clone)]
pub struct MultivariateIsotonicBuilder<T> {
    /// Error norm (default: L2).
    pub norm: Norm,

    /// Optional bound on distinct fitted levels, applied to every stage.
    pub n_values: Option<usize>,

    /// Number of coordinates per point (default: 2).
    pub dimensions: usize,

    /// Number of composition stages; `None` selects the default.
    pub stages: Option<usize>,

    /// Deferred error from adapter conversion.
    pub deferred_error: Option<IsotonicError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,

    /// Whether the norm was set explicitly.
    pub(crate) norm_set: bool,

    /// Whether the dimension count was set explicitly.
    pub(crate) dimensions_set: bool,

    _marker: PhantomData<T>,
}

impl<T: Float> Default for MultivariateIsotonicBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> MultivariateIsotonicBuilder<T> {
    fn new() -> Self {
        let defaults = IsotonicConfig::default();
        Self {
            norm: defaults.norm,
            n_values: defaults.n_values,
            dimensions: defaults.dimensions,
            stages: defaults.stages,
            deferred_error: None,
            duplicate_param: None,
            norm_set: false,
            dimensions_set: false,
            _marker: PhantomData,
        }
    }

    /// Set the error norm.
    pub fn norm(mut self, norm: Norm) -> Self {
        if self.norm_set {
            self.duplicate_param = Some("norm");
        }
        self.norm = norm;
        self.norm_set = true;
        self
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
        if self.dimensions_set {
            self.duplicate_param = Some("dimensions");
        }
        self.dimensions = dimensions;
        self.dimensions_set = true;
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

    /// Build the multivariate processor.
    pub fn build(self) -> Result<MultivariateIsotonic<T>, IsotonicError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;

        let config = IsotonicConfig {
            norm: self.norm,
            n_values: self.n_values,
            dimensions: self.dimensions,
            stages: self.stages,
        };
        config.validate()?;

        Ok(MultivariateIsotonic {
            config,
            _marker: PhantomData,
        })
    }
}

// ============================================================================
// Multivariate Processor
// ============================================================================

/// Multivariate isotonic processor.
#[derive(Debug, Clone, Copy)]
pub struct MultivariateIsotonic<T> {
    config: IsotonicConfig,
    _marker: PhantomData<T>,
}

impl<T: Float> MultivariateIsotonic<T> {
    /// Fit unit-weight observations. `x` is row-major with `dimensions` columns.
    pub fn fit(&self, x: &[T], vs: &[T]) -> Result<MultivariateFit<T>, IsotonicError> {
        Validator::validate_inputs_kd(x, vs, None, self.config.dimensions)?;
        IsotonicExecutor::run_multivariate(x, vs, None, &self.config)
    }

    /// Fit weighted observations. `x` is row-major with `dimensions` columns.
    pub fn fit_weighted(
        &self,
        x: &[T],
        vs: &[T],
        ws: &[T],
    ) -> Result<MultivariateFit<T>, IsotonicError> {
        Validator::validate_inputs_kd(x, vs, Some(ws), self.config.dimensions)?;
        IsotonicExecutor::run_multivariate(x, vs, Some(ws), &self.config)
    }

    /// Resolved configuration.
    pub fn config(&self) -> &IsotonicConfig {
        &self.config
    }
}
