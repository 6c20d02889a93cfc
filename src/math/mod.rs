//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks:
//! - Row minima of totally monotone matrices (SMAWK)
//! - Weighted medians
//! - Prefix moments for constant-time segment costs
//!
//! These carry no solver-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Weighted and unweighted medians.
pub mod median;

/// Weighted prefix moments.
pub mod moments;

/// SMAWK row-minimum search.
pub mod smawk;
