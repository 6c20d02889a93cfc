//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer validates inputs, runs the solvers end to end and packages
//! fitted models:
//! - Input and parameter validation
//! - Fit execution for one, two and k dimensions
//! - Fitted models and the `MonotoneModel` query contract
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fit execution and free entry points.
pub mod executor;

/// Fitted models.
pub mod output;

/// Input and parameter validation.
pub mod validator;
