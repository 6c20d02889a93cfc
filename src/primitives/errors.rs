//! Error types for isotonic regression operations.
//!
//! ## Purpose
//!
//! This module defines the single error enum returned by every fallible
//! operation in the crate. Errors fall into two families: validation errors,
//! which describe caller mistakes, and invariant violations, which describe
//! internal states that cannot occur under well-formed use.
//!
//! ## Design notes
//!
//! * **Synchronous**: Errors are surfaced to the caller immediately and are never retried.
//! * **Comparable**: `Clone` and `PartialEq` so tests can match on exact variants.
//! * **no_std**: Derived through `thiserror`, which targets `core::error::Error`.
//!
//! ## Invariants
//!
//! * Every message names the offending quantity.
//! * `InvariantViolation` is only produced by internal consistency checks.
//!
//! ## Non-goals
//!
//! * This module does not attempt recovery or partial results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;

// External dependencies
use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Errors produced while validating inputs or fitting isotonic models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsotonicError {
    /// No observations were supplied, or none remained after discarding zero weights.
    #[error("Input arrays are empty")]
    EmptyInput,

    /// Parallel input sequences have different lengths.
    #[error("Length mismatch: {name} has {got} entries, expected {expected}")]
    MismatchedInputs {
        /// Name of the offending sequence.
        name: &'static str,
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the offending sequence.
        got: usize,
    },

    /// A coordinate, value or weight is NaN or infinite.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A weight is negative.
    #[error("Invalid weight at index {index} (must be >= 0)")]
    NegativeWeight {
        /// Index of the offending weight.
        index: usize,
    },

    /// The norm selector is not 1 or 2.
    #[error("Invalid norm: p={0} (only L1 and L2 norms are supported)")]
    InvalidNorm(u32),

    /// The bound on distinct output values is zero.
    #[error("Invalid n_values: {0} (must be at least 1)")]
    InvalidValueBound(usize),

    /// The binary partition values are not strictly ordered.
    #[error("Invalid split pair: a < b is required")]
    InvalidSplitPair,

    /// Repeated coordinates where the solver defines no merge rule.
    #[error("Duplicate coordinates are not supported for {solver}")]
    DuplicateCoordinates {
        /// Solver rejecting the input.
        solver: &'static str,
    },

    /// A requested index range does not fit inside the covered range.
    #[error("Requested range [{lo}, {hi}] does not fit in current range [{min}, {max}]")]
    RangeOutOfBounds {
        /// Lower end of the requested range.
        lo: usize,
        /// Upper end of the requested range.
        hi: usize,
        /// Lower end of the covered range.
        min: usize,
        /// Upper end of the covered range.
        max: usize,
    },

    /// A requested index range is empty.
    #[error("Requested range [{lo}, {hi}] is degenerate")]
    DegenerateRange {
        /// Lower end of the requested range.
        lo: usize,
        /// Upper end of the requested range.
        hi: usize,
    },

    /// Two ranges were concatenated without being exactly adjacent.
    #[error("Ranges are not adjacent: left ends at {left_max}, right starts at {right_min}")]
    NonAdjacentRanges {
        /// Upper end of the left range.
        left_max: usize,
        /// Lower end of the right range.
        right_min: usize,
    },

    /// The number of predictor dimensions is too small.
    #[error("Invalid dimensions: {got} (must be at least {min})")]
    InvalidDimensions {
        /// Dimensions requested.
        got: usize,
        /// Minimum supported.
        min: usize,
    },

    /// The number of composition stages is zero.
    #[error("Invalid stages: {0} (must be at least 1)")]
    InvalidStages(usize),

    /// The selected adapter cannot honour a configured feature.
    #[error("Adapter '{adapter}' does not support feature: {feature}")]
    UnsupportedFeature {
        /// Adapter name.
        adapter: &'static str,
        /// Feature name.
        feature: &'static str,
    },

    /// A builder parameter was configured more than once.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// An internal consistency check failed.
    #[error("Invariant violated: {0}")]
    InvariantViolation(&'static str),
}

impl IsotonicError {
    /// Whether the error reports a defect rather than a caller mistake.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, IsotonicError::InvariantViolation(_))
    }
}
