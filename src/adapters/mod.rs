//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides one execution adapter per input dimensionality:
//! - Univariate: pool adjacent violators on `(x, v)` observations
//! - Bivariate: L1 or L2 regression on `(x, y, v)` observations
//! - Multivariate: staged 2-D composition on k-dimensional observations
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Two-dimensional adapter.
pub mod bivariate;

/// k-dimensional adapter.
pub mod multivariate;

/// One-dimensional adapter.
pub mod univariate;
