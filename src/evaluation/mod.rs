//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer measures fitted models against their training observations.
//! The k-dimensional composer uses these measurements to decide whether a
//! composition stage is kept.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Training-fit diagnostics and level sets.
pub mod diagnostics;
