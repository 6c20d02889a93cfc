//! Norm selection for two-dimensional regression.
//!
//! ## Purpose
//!
//! This module defines the closed set of error norms the partitioning
//! solvers minimize. Only L1 and L2 are supported; any other exponent is
//! rejected when converting from a numeric selector.
//!
//! ## Invariants
//!
//! * `Norm::from_p(p).p() == p` for every accepted `p`.

// External dependencies
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::IsotonicError;

/// Error norm minimized by the regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Norm {
    /// Weighted absolute error. Fitted values are always drawn from the input values.
    L1,

    /// Weighted squared error. Fitted values are weighted means of level sets.
    #[default]
    L2,
}

impl Norm {
    /// Map a numeric exponent to a norm.
    pub fn from_p(p: u32) -> Result<Self, IsotonicError> {
        match p {
            1 => Ok(Norm::L1),
            2 => Ok(Norm::L2),
            other => Err(IsotonicError::InvalidNorm(other)),
        }
    }

    /// Numeric exponent of the norm.
    pub fn p(self) -> u32 {
        match self {
            Norm::L1 => 1,
            Norm::L2 => 2,
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Norm::L1 => write!(f, "L1"),
            Norm::L2 => write!(f, "L2"),
        }
    }
}
