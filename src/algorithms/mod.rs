//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer holds the isotonic solvers:
//! - Pool adjacent violators in one dimension
//! - Binary partitioning of 2-D observations into two levels
//! - L1 and L2 regression in two dimensions built on binary partitioning
//! - Optimal reduction of fitted levels
//! - Piecewise interpolants answering queries against fitted models
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Binary partition solver.
pub mod binary;

/// Piecewise-linear and bilinear interpolants.
pub mod interpolation;

/// Two-dimensional L1 and L2 solvers.
pub mod isotonic2d;

/// Pool adjacent violators.
pub mod pava;

/// Optimal reduced isotonic regression.
pub mod reduce;
