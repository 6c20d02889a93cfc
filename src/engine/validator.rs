//! Input validation for isotonic regression configuration and data.
//!
//! ## Purpose
//!
//! This module validates observation arrays and configuration parameters
//! before any solver runs. It checks requirements such as input lengths,
//! finite values, non-negative weights and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Finite Checks**: Coordinates, values and weights must be finite.
//! * **Weights**: Weights must be non-negative and at least one must be
//!   positive; zero-weight observations are accepted and ignored by the fit.
//! * **Flat layout**: k-dimensional inputs are row-major with `k` coordinates
//!   per observation.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, pool, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::IsotonicError;
use crate::primitives::norm::Norm;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for isotonic regression configuration and input data.
///
/// Provides static methods for validating parameters and input data. All
/// methods return `Result<(), IsotonicError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate one-dimensional observations.
    pub fn validate_inputs_1d<T: Float>(
        xs: &[T],
        vs: &[T],
        ws: Option<&[T]>,
    ) -> Result<(), IsotonicError> {
        if xs.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }
        Self::validate_length("vs", xs.len(), vs.len())?;
        if let Some(ws) = ws {
            Self::validate_length("ws", xs.len(), ws.len())?;
        }

        Self::validate_finite("x", xs)?;
        Self::validate_finite("v", vs)?;
        if let Some(ws) = ws {
            Self::validate_weights(ws)?;
        }
        Ok(())
    }

    /// Validate two-dimensional observations.
    pub fn validate_inputs_2d<T: Float>(
        xs: &[T],
        ys: &[T],
        vs: &[T],
        ws: Option<&[T]>,
    ) -> Result<(), IsotonicError> {
        if xs.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }
        Self::validate_length("ys", xs.len(), ys.len())?;
        Self::validate_length("vs", xs.len(), vs.len())?;
        if let Some(ws) = ws {
            Self::validate_length("ws", xs.len(), ws.len())?;
        }

        Self::validate_finite("x", xs)?;
        Self::validate_finite("y", ys)?;
        Self::validate_finite("v", vs)?;
        if let Some(ws) = ws {
            Self::validate_weights(ws)?;
        }
        Ok(())
    }

    /// Validate row-major k-dimensional observations.
    pub fn validate_inputs_kd<T: Float>(
        x: &[T],
        vs: &[T],
        ws: Option<&[T]>,
        dimensions: usize,
    ) -> Result<(), IsotonicError> {
        Self::validate_dimensions(dimensions)?;
        if vs.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }
        Self::validate_length("x", vs.len() * dimensions, x.len())?;
        if let Some(ws) = ws {
            Self::validate_length("ws", vs.len(), ws.len())?;
        }

        Self::validate_finite("x", x)?;
        Self::validate_finite("v", vs)?;
        if let Some(ws) = ws {
            Self::validate_weights(ws)?;
        }
        Ok(())
    }

    /// Validate values and weights handed to the level reducer.
    pub fn validate_reduction<T: Float>(vs: &[T], ws: &[T]) -> Result<(), IsotonicError> {
        if vs.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }
        Self::validate_length("ws", vs.len(), ws.len())?;
        Self::validate_finite("v", vs)?;
        Self::validate_weights(ws)
    }

    /// Validate that an array has the expected number of entries.
    pub fn validate_length(
        name: &'static str,
        expected: usize,
        got: usize,
    ) -> Result<(), IsotonicError> {
        if expected != got {
            return Err(IsotonicError::MismatchedInputs {
                name,
                expected,
                got,
            });
        }
        Ok(())
    }

    /// Validate that every entry of `values` is finite.
    pub fn validate_finite<T: Float>(name: &str, values: &[T]) -> Result<(), IsotonicError> {
        for (i, &val) in values.iter().enumerate() {
            if !val.is_finite() {
                return Err(IsotonicError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    /// Validate weights: finite, non-negative, and not all zero.
    pub fn validate_weights<T: Float>(ws: &[T]) -> Result<(), IsotonicError> {
        Self::validate_finite("w", ws)?;
        if let Some(index) = ws.iter().position(|&w| w < T::zero()) {
            return Err(IsotonicError::NegativeWeight { index });
        }
        if ws.iter().all(|&w| w == T::zero()) {
            return Err(IsotonicError::EmptyInput);
        }
        Ok(())
    }

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), IsotonicError> {
        if !val.is_finite() {
            return Err(IsotonicError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the bound on distinct fitted levels.
    pub fn validate_n_values(n_values: usize) -> Result<(), IsotonicError> {
        if n_values < 1 {
            return Err(IsotonicError::InvalidValueBound(n_values));
        }
        Ok(())
    }

    /// Validate an optional bound on distinct fitted levels.
    pub fn validate_optional_n_values(n_values: Option<usize>) -> Result<(), IsotonicError> {
        match n_values {
            Some(n) => Self::validate_n_values(n),
            None => Ok(()),
        }
    }

    /// Validate the two levels of a binary partition.
    pub fn validate_split_pair<T: Float>(a: T, b: T) -> Result<(), IsotonicError> {
        Self::validate_scalar(a, "a")?;
        Self::validate_scalar(b, "b")?;
        if a >= b {
            return Err(IsotonicError::InvalidSplitPair);
        }
        Ok(())
    }

    /// Validate the number of input dimensions.
    pub fn validate_dimensions(dimensions: usize) -> Result<(), IsotonicError> {
        if dimensions < 1 {
            return Err(IsotonicError::InvalidDimensions {
                got: dimensions,
                min: 1,
            });
        }
        Ok(())
    }

    /// Validate the requested number of composition stages.
    pub fn validate_stages(stages: usize) -> Result<(), IsotonicError> {
        if stages < 1 {
            return Err(IsotonicError::InvalidStages(stages));
        }
        Ok(())
    }

    /// Validate that the norm supports the requested number of stages.
    pub fn validate_composition(norm: Norm, stages: usize) -> Result<(), IsotonicError> {
        if norm == Norm::L1 && stages > 1 {
            return Err(IsotonicError::UnsupportedFeature {
                adapter: "Multivariate",
                feature: "L1 norm with more than one composition stage",
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), IsotonicError> {
        if let Some(param) = duplicate_param {
            return Err(IsotonicError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
