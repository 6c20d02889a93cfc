//! Univariate adapter for one-dimensional isotonic regression.
//!
//! ## Purpose
//!
//! This module provides the execution adapter for fitting a non-decreasing
//! function of a single variable with pool adjacent violators.
//!
//! ## Design notes
//!
//! * **Processing**: Validates, pools and fits in a single pass.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Reusable**: A built processor can fit any number of datasets.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Input arrays must have the same length.
//! * All values must be finite and weights non-negative.
//! * Fitted values are returned in input order.
//!
//! ## Non-goals
//!
//! * This adapter does not support the L1 norm (least squares only).

// External dependencies
use core::marker::PhantomData;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::IsotonicExecutor;
use crate::engine::output::UnivariateFit;
use crate::engine::validator::Validator;
use crate::primitives::errors::IsotonicError;

// ============================================================================
// Univariate Builder
// ============================================================================

/// Builder for the univariate isotonic processor.
#[derive(Debug, Clone)]
pub struct UnivariateIsotonicBuilder<T> {
    /// Optional bound on distinct fitted levels.
    pub n_values: Option<usize>,

    /// Deferred error from adapter conversion.
    pub deferred_error: Option<IsotonicError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,

    _marker: PhantomData<T>,
}

impl<T: Float> Default for UnivariateIsotonicBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> UnivariateIsotonicBuilder<T> {
    fn new() -> Self {
        Self {
            n_values: None,
            deferred_error: None,
            duplicate_param: None,
            _marker: PhantomData,
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

    /// Build the univariate processor.
    pub fn build(self) -> Result<UnivariateIsotonic<T>, IsotonicError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_optional_n_values(self.n_values)?;

        Ok(UnivariateIsotonic {
            n_values: self.n_values,
            _marker: PhantomData,
        })
    }
}

// ============================================================================
// Univariate Processor
// ============================================================================

/// Univariate isotonic processor.
#[derive(Debug, Clone, Copy)]
pub struct UnivariateIsotonic<T> {
    n_values: Option<usize>,
    _marker: PhantomData<T>,
}

impl<T: Float> UnivariateIsotonic<T> {
    /// Fit unit-weight observations.
    pub fn fit(&self, xs: &[T], vs: &[T]) -> Result<UnivariateFit<T>, IsotonicError> {
        Validator::validate_inputs_1d(xs, vs, None)?;
        IsotonicExecutor::run_univariate(xs, vs, None, self.n_values)
    }

    /// Fit weighted observations.
    pub fn fit_weighted(
        &self,
        xs: &[T],
        vs: &[T],
        ws: &[T],
    ) -> Result<UnivariateFit<T>, IsotonicError> {
        Validator::validate_inputs_1d(xs, vs, Some(ws))?;
        IsotonicExecutor::run_univariate(xs, vs, Some(ws), self.n_values)
    }

    /// Configured bound on distinct fitted levels.
    pub fn n_values(&self) -> Option<usize> {
        self.n_values
    }
}
