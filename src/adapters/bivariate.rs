//! Bivariate adapter for two-dimensional isotonic regression.
//!
//! ## Purpose
//!
//! This module provides the execution adapter for fitting a function of two
//! variables that is non-decreasing in both, under the L1 or L2 norm.
//!
//! ## Design notes
//!
//! * **Norms**: L2 pools repeated coordinates; L1 rejects them.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Input arrays must have the same length.
//! * Fitted values are returned in input order.

// External dependencies
use core::marker::PhantomData;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::IsotonicExecutor;
use crate::engine::output::BivariateFit;
use crate::engine::validator::Validator;
use crate::primitives::errors::IsotonicError;
use crate::primitives::norm::Norm;

// ============================================================================
// Bivariate Builder
// ============================================================================

/// Builder for the bivariate isotonic processor.
#[derive(Debug, Clone)]
pub struct BivariateIsotonicBuilder<T> {
    /// Error norm (default: L2).
    pub norm: Norm,

    /// Optional bound on distinct fitted levels.
    pub n_values: Option<usize>,

    /// Deferred error from adapter conversion.
    pub deferred_error: Option<IsotonicError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,

    /// Whether the norm was set explicitly.
    pub(crate) norm_set: bool,

    _marker: PhantomData<T>,
}

impl<T: Float> Default for BivariateIsotonicBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BivariateIsotonicBuilder<T> {
    fn new() -> Self {
        Self {
            norm: Norm::default(),
            n_values: None,
            deferred_error: None,
            duplicate_param: None,
            norm_set: false,
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

    /// Build the bivariate processor.
    pub fn build(self) -> Result<BivariateIsotonic<T>, IsotonicError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_optional_n_values(self.n_values)?;

        Ok(BivariateIsotonic {
            norm: self.norm,
            n_values: self.n_values,
            _marker: PhantomData,
        })
    }
}

// ============================================================================
// Bivariate Processor
// ============================================================================

/// Bivariate isotonic processor.
#[derive(Debug, Clone, Copy)]
pub struct BivariateIsotonic<T> {
    norm: Norm,
    n_values: Option<usize>,
    _marker: PhantomData<T>,
}

impl<T: Float> BivariateIsotonic<T> {
    /// Fit unit-weight observations at `(xs[i], ys[i])`.
    pub fn fit(&self, xs: &[T], ys: &[T], vs: &[T]) -> Result<BivariateFit<T>, IsotonicError> {
        Validator::validate_inputs_2d(xs, ys, vs, None)?;
        IsotonicExecutor::run_bivariate(xs, ys, vs, None, self.n_values, self.norm)
    }

    /// Fit weighted observations at `(xs[i], ys[i])`.
    pub fn fit_weighted(
        &self,
        xs: &[T],
        ys: &[T],
        vs: &[T],
        ws: &[T],
    ) -> Result<BivariateFit<T>, IsotonicError> {
        Validator::validate_inputs_2d(xs, ys, vs, Some(ws))?;
        IsotonicExecutor::run_bivariate(xs, ys, vs, Some(ws), self.n_values, self.norm)
    }

    /// Configured norm.
    pub fn norm(&self) -> Norm {
        self.norm
    }
}
