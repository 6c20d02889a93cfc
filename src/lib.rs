//! # isotonic-rs — Monotone Regression in One, Two and k Dimensions
//!
//! Isotonic regression fits the function closest to a set of observations
//! among all functions that never decrease as any input coordinate grows.
//! This crate provides exact solvers for one and two dimensions, a staged
//! composition for k dimensions, and optimal quantization of fitted levels.
//!
//! ## What is isotonic regression?
//!
//! Given weighted observations `(x, v, w)`, isotonic regression finds fitted
//! values `f` minimizing `Σ w·|v − f|^p` subject to `f(a) ≤ f(b)` whenever
//! every coordinate of `a` is at most the corresponding coordinate of `b`.
//!
//! **Key properties:**
//! - No parametric form is assumed; only the monotone ordering is imposed
//! - The least-squares fit is piecewise constant: each level equals the
//!   weighted mean of the observations it covers
//! - Fitted models answer queries at arbitrary points through monotone
//!   piecewise-linear (1-D) or bilinear (2-D) interpolation
//!
//! **Common applications:**
//! - Probability calibration of classifier scores
//! - Dose-response and survival curve estimation
//! - Monotone feature transforms and lookup tables
//! - Quantized monotone mappings with a bounded number of output levels
//!
//! **Algorithms:**
//!
//! 1. One dimension: pool adjacent violators, `O(n log n)` including sorting
//! 2. Two dimensions: repeated binary partitioning (Stout), where each
//!    partition is a dynamic program over a persistent interval tree
//! 3. Level quantization: optimal k-segment partition of the sorted levels,
//!    with each dynamic-programming round solved by SMAWK
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let v = vec![1.0, 3.0, 2.0, 4.0, 3.5];
//!
//! // Build the model
//! let model = Isotonic::new().adapter(Univariate).build()?;
//!
//! // Fit the model to the data
//! let fit = model.fit(&x, &v)?;
//!
//! assert_eq!(fit.fitted_values(), &[1.0, 2.5, 2.5, 3.75, 3.75]);
//! println!("{}", fit);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Data points: 5
//!   Dimensions: 1
//!   Knots: 5
//!
//! Diagnostics:
//!   Observations: 5
//!   Levels:       3
//!   Weighted SSE: 0.625000
//!   Weighted SAE: 1.500000
//!   RMSE:         0.353553
//!   Median |r|:   0.250000
//!
//! Level Sets:
//!        Level    Count       Weight
//!   --------------------------------
//!      1.00000        1       1.0000
//!      2.50000        2       2.0000
//!      3.75000        2       2.0000
//! ```
//!
//! ### Two Dimensions
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let xs = vec![0.0, 0.0, 1.0, 1.0];
//! let ys = vec![0.0, 1.0, 0.0, 1.0];
//! let vs = vec![1.0, 2.0, 3.0, 2.5];
//!
//! let model = Isotonic::new()
//!     .norm(L2)            // Least squares (default)
//!     .adapter(Bivariate)
//!     .build()?;
//!
//! let fit = model.fit(&xs, &ys, &vs)?;
//!
//! // (1, 0) and (1, 1) violate the ordering and are pooled
//! assert_eq!(fit.fitted_values(), &[1.0, 2.0, 2.75, 2.75]);
//!
//! // Queries between training points interpolate bilinearly
//! let mid = fit.predict(0.5, 0.5);
//! assert!(mid >= 1.0 && mid <= 2.75);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every fit returns `Result<_, IsotonicError>`. Invalid input is reported,
//! never panicked on:
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let result = regress_isotonic_2d(&[0.0], &[0.0, 1.0], &[1.0], None, None, L2);
//!
//! match result {
//!     Ok(fit) => println!("Fitted: {:?}", fit.fitted_values()),
//!     Err(e) => {
//!         // e is IsotonicError::MismatchedInputs
//!         eprintln!("Fitting failed: {}", e);
//!     }
//! }
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! isotonic-rs = { version = "0.3", default-features = false }
//! ```
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! fn calibrate(scores: &[f32], outcomes: &[f32]) -> Result<Vec<f32>, IsotonicError> {
//!     let fit = regress_isotonic_1d(scores, outcomes, None, Some(8))?;
//!     Ok(fit.predict_many(&[0.1, 0.5, 0.9]))
//! }
//!
//! let calibrated = calibrate(&[0.2, 0.4, 0.6, 0.8], &[0.0, 1.0, 0.0, 1.0])?;
//! assert!(calibrated.windows(2).all(|w| w[0] <= w[1]));
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter      | Default   | Range/Options   | Description                                  | Adapter                 |
//! |----------------|-----------|-----------------|----------------------------------------------|-------------------------|
//! | **norm**       | `L2`      | `L1`, `L2`      | Error norm (`p(1)` / `p(2)` also accepted)   | Bivariate, Multivariate |
//! | **n_values**   | None      | [1, ∞)          | Bound on distinct fitted levels              | All                     |
//! | **dimensions** | 2         | [1, ∞)          | Coordinates per point                        | Multivariate            |
//! | **stages**     | 1 or 2k−1 | [1, ∞)          | Composition stages (1 when k = 2)            | Multivariate            |
//!
//! Setting a parameter twice is rejected at `build()` with
//! `IsotonicError::DuplicateParameter`. Setting a parameter the selected
//! adapter does not use is rejected with `IsotonicError::UnsupportedFeature`.
//!
//! ## Builder
//!
//! ### Basic Workflow
//!
//! 1. **Create builder**: `Isotonic::new()`
//! 2. **Configure parameters**: Chain method calls (`.norm()`, `.n_values()`, etc.)
//! 3. **Select adapter**: `.adapter(Univariate)`, `.adapter(Bivariate)` or `.adapter(Multivariate)`
//! 4. **Build model**: Call `.build()` to validate the configuration
//! 5. **Fit data**: Call `.fit(..)` or `.fit_weighted(..)`
//!
//! ### Number of Values
//!
//! `n_values` bounds the number of distinct fitted levels. Levels are merged
//! optimally in the weighted least-squares sense, and neighbouring levels
//! that become equal form one level set.
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//!
//! let fit = Isotonic::new()
//!     .n_values(2)
//!     .adapter(Univariate)
//!     .build()?
//!     .fit(&x, &v)?;
//!
//! assert_eq!(fit.levels(), vec![2.0, 5.0]);
//! assert_eq!(fit.predict(3.5), 3.5);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ### Norm (Two Dimensions)
//!
//! - **L2** minimizes weighted squared error. Repeated coordinates are
//!   pooled into one weighted observation.
//! - **L1** minimizes weighted absolute error; every fitted level is one of
//!   the observed values. Repeated coordinates are rejected with
//!   `IsotonicError::DuplicateCoordinates`.
//!
//! ### Dimensions and Stages (Multivariate)
//!
//! k-dimensional points are passed row-major. The fit is a chain of 2-D
//! stages: stage 0 fits coordinates 0 and 1, and stage `i` fits the previous
//! prediction against coordinate `(i + 1) mod k`. A stage that does not
//! lower the weighted training error is discarded and composition stops.
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let x = vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.0, 1.0, 0.0,
//!     0.0, 0.0, 1.0,
//!     1.0, 1.0, 1.0,
//! ];
//! let v = vec![0.0, 1.0, 1.0, 1.0, 3.0];
//!
//! let fit = Isotonic::new()
//!     .dimensions(3)
//!     .adapter(Multivariate)
//!     .build()?
//!     .fit(&x, &v)?;
//!
//! assert!(fit.diagnostics().weighted_sse < 1e-9);
//! assert!(fit.predict(&[0.0, 0.0, 0.0])? <= fit.predict(&[1.0, 1.0, 1.0])?);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ### Level Reduction
//!
//! `reduce_isotonic` quantizes any weighted value set directly:
//!
//! ```rust
//! use isotonic_rs::prelude::*;
//!
//! let vs = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
//! let reduced = reduce_isotonic(&vs, &[1.0; 6], 2)?;
//!
//! assert_eq!(reduced.get(0.0), Some(2.0));
//! assert_eq!(reduced.get(10.0), Some(8.0));
//! assert_eq!(reduced.distinct_outputs(), 2);
//! # Result::<(), IsotonicError>::Ok(())
//! ```
//!
//! ### Fitted Models
//!
//! All fitted models implement [`MonotoneModel`](prelude::MonotoneModel),
//! a slice-based query contract, and expose their fitted training values,
//! level sets and [`Diagnostics`](prelude::Diagnostics). Models are
//! immutable, `Clone`, and with the `serde` feature serializable.
//!
//! ## Logging
//!
//! Solver progress is reported through the `log` facade at `debug` and
//! `trace` level. No logger is installed by this crate.
//!
//! ## References
//!
//! - Stout, Q. F. (2015). "Isotonic Regression for Multiple Independent Variables"
//! - Stout, Q. F. (2013). "Isotonic Regression via Partitioning"
//! - Hardwick, J. & Stout, Q. F. (2014). "Optimal Reduced Isotonic Regression"
//! - Aggarwal, A., Klawe, M., Moran, S., Shor, P. & Wilber, R. (1987). "Geometric Applications of a Matrix-Searching Algorithm"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error taxonomy, the norm selector, observation pooling and the
// persistent interval-aggregate tree.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains SMAWK row minima, weighted medians and prefix moments.
mod math;

// Layer 3: Algorithms - core isotonic solvers.
//
// Contains pool adjacent violators, binary partitioning, the 2-D L1/L2
// solvers, level reduction and the piecewise interpolants.
mod algorithms;

// Layer 4: Evaluation - post-processing and diagnostics.
//
// Contains training-fit diagnostics and level sets.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains validation, fit execution, k-D composition and fitted models.
mod engine;

// Layer 6: Adapters - execution mode adapters.
//
// Contains one adapter per input dimensionality.
mod adapters;

// High-level fluent API for isotonic regression.
//
// Provides the `Isotonic` builder and adapter markers.
mod api;

pub use api::{
    binary_partition, reduce_isotonic, regress_isotonic_1d, regress_isotonic_2d,
    smawk_row_minima, BivariateFit, IsotonicError, MonotoneModel, MultivariateFit, Norm,
    UnivariateFit,
};

// ============================================================================
// Prelude
// ============================================================================

/// Standard isotonic-rs prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use isotonic_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        binary_partition, reduce_isotonic, regress_isotonic_1d, regress_isotonic_2d,
        smawk_row_minima,
        Adapter::{Bivariate, Multivariate, Univariate},
        BivariateFit, Diagnostics, IsotonicBuilder as Isotonic, IsotonicError, LevelSet,
        MonotoneModel, MultivariateFit, Norm,
        Norm::{L1, L2},
        Observation2d, ReducedValues, UnivariateFit,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation and diagnostics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
