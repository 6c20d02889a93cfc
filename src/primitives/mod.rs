//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures every solver is built on:
//! - The crate error type
//! - Weighted observations with aggregation and ordering helpers
//! - The norm selector
//! - The persistent interval-aggregate tree used by the binary partition solver
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Persistent interval-aggregate tree.
pub mod interval_tree;

/// Norm selector.
pub mod norm;

/// Weighted observations.
pub mod observation;
