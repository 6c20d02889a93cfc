//! Execution engine for isotonic regression.
//!
//! ## Purpose
//!
//! This module runs validated fits end to end: it pools observations, calls
//! the solvers, quantizes levels, builds the query interpolant, and packages
//! the result with its diagnostics. It also hosts the k-dimensional
//! composition loop and the public free entry points.
//!
//! ## Design notes
//!
//! * Provides both configuration-based (`IsotonicExecutor`) and
//!   parameter-based (free function) entry points.
//! * Free functions validate their inputs; executor methods assume
//!   validated inputs.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Pooling**: Zero-weight observations are discarded and repeated
//!   coordinates merged before fitting (L2 and 1-D only).
//! * **Composition**: k-dimensional inputs are fitted as a chain of 2-D
//!   stages, each pairing the previous prediction with one more coordinate.
//! * **Rollback**: A stage that does not strictly lower the weighted
//!   training error is discarded and composition stops.
//!
//! ## Invariants
//!
//! * Fitted values are aligned with the caller's observations.
//! * Zero-weight observations receive the model's prediction at their point.
//!
//! ## Non-goals
//!
//! * This module does not implement solver internals (handled by `algorithms`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::binary::{partition_levels, LevelCosts};
use crate::algorithms::isotonic2d::{build_surface, fit_l1, fit_l2};
use crate::algorithms::pava::{buckets_to_interpolant, pool_adjacent_violators, quantize_buckets};
use crate::algorithms::reduce::{reduce_values, ReducedValues};
use crate::engine::output::{BivariateFit, Composition, MultivariateFit, Stage, UnivariateFit};
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::{level_sets, weighted_sse, Diagnostics};
use crate::primitives::errors::IsotonicError;
use crate::primitives::norm::Norm;
use crate::primitives::observation::{
    has_duplicate_coordinates, pool_1d, pool_2d, zip_1d, zip_2d, Observation2d,
};

pub use crate::math::smawk::smawk_row_minima;

// ============================================================================
// Configuration
// ============================================================================

/// Resolved fit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsotonicConfig {
    /// Error norm.
    pub norm: Norm,
    /// Optional bound on distinct fitted levels.
    pub n_values: Option<usize>,
    /// Number of coordinates per observation.
    pub dimensions: usize,
    /// Requested composition stages; `None` selects the default.
    pub stages: Option<usize>,
}

impl Default for IsotonicConfig {
    fn default() -> Self {
        Self {
            norm: Norm::L2,
            n_values: None,
            dimensions: 2,
            stages: None,
        }
    }
}

impl IsotonicConfig {
    /// Number of composition stages to attempt.
    ///
    /// Defaults to 1 for two dimensions and `2k - 1` otherwise.
    pub fn stage_count(&self) -> usize {
        match (self.stages, self.dimensions) {
            (Some(s), _) => s,
            (None, k) if k <= 2 => 1,
            (None, k) => 2 * k - 1,
        }
    }

    /// Validate parameter bounds and their combination.
    pub fn validate(&self) -> Result<(), IsotonicError> {
        Validator::validate_optional_n_values(self.n_values)?;
        Validator::validate_dimensions(self.dimensions)?;
        if let Some(s) = self.stages {
            Validator::validate_stages(s)?;
        }
        if self.dimensions == 1 && self.norm == Norm::L1 {
            return Err(IsotonicError::UnsupportedFeature {
                adapter: "Multivariate",
                feature: "L1 norm in one dimension",
            });
        }
        if self.dimensions >= 2 {
            Validator::validate_composition(self.norm, self.stage_count())?;
        }
        Ok(())
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs fits on validated inputs.
pub struct IsotonicExecutor;

impl IsotonicExecutor {
    /// Fit one-dimensional observations.
    pub fn run_univariate<T: Float>(
        xs: &[T],
        vs: &[T],
        ws: Option<&[T]>,
        n_values: Option<usize>,
    ) -> Result<UnivariateFit<T>, IsotonicError> {
        let pooled = pool_1d(&zip_1d(xs, vs, ws));
        if pooled.is_empty() {
            return Err(IsotonicError::EmptyInput);
        }

        let mut buckets = pool_adjacent_violators(&pooled);
        let found = buckets.len();
        if let Some(k) = n_values {
            buckets = quantize_buckets(buckets, k);
        }
        let interpolant = buckets_to_interpolant(&buckets)?;

        log::debug!(
            "1-D fit of {} observations ({} distinct x): {} level sets, {} kept",
            xs.len(),
            pooled.len(),
            found,
            buckets.len()
        );

        let fitted: Vec<T> = xs.iter().map(|&x| interpolant.interpolate(x)).collect();
        let diagnostics = Diagnostics::compute(vs, ws, &fitted);
        let sets = level_sets(vs, ws, &fitted);
        Ok(UnivariateFit::new(interpolant, fitted, sets, diagnostics))
    }

    /// Fit two-dimensional observations under `norm`.
    pub fn run_bivariate<T: Float>(
        xs: &[T],
        ys: &[T],
        vs: &[T],
        ws: Option<&[T]>,
        n_values: Option<usize>,
        norm: Norm,
    ) -> Result<BivariateFit<T>, IsotonicError> {
        let observations = zip_2d(xs, ys, vs, ws);

        let (solved, assignment, levels) = match norm {
            Norm::L1 => {
                let mut assignment = Vec::with_capacity(observations.len());
                let mut kept: Vec<Observation2d<T>> = Vec::with_capacity(observations.len());
                for o in &observations {
                    if o.weight > T::zero() {
                        assignment.push(Some(kept.len()));
                        kept.push(*o);
                    } else {
                        assignment.push(None);
                    }
                }
                if kept.is_empty() {
                    return Err(IsotonicError::EmptyInput);
                }
                if has_duplicate_coordinates(&kept) {
                    return Err(IsotonicError::DuplicateCoordinates {
                        solver: "L1 regression",
                    });
                }
                let levels = fit_l1(&kept)?;
                (kept, assignment, levels)
            }
            Norm::L2 => {
                let pooled = pool_2d(&observations);
                if pooled.observations.is_empty() {
                    return Err(IsotonicError::EmptyInput);
                }
                let levels = fit_l2(&pooled.observations)?;
                (pooled.observations, pooled.assignment, levels)
            }
        };

        let levels = match n_values {
            Some(k) => {
                let weights: Vec<T> = solved.iter().map(|o| o.weight).collect();
                reduce_values(&levels, &weights, k).apply(&levels)
            }
            None => levels,
        };

        let points: Vec<(T, T)> = solved.iter().map(|o| o.coords()).collect();
        let surface = build_surface(&points, &levels)?;

        let fitted: Vec<T> = observations
            .iter()
            .zip(&assignment)
            .map(|(o, slot)| match slot {
                Some(j) => levels[*j],
                None => surface.interpolate(o.x, o.y),
            })
            .collect();

        let diagnostics = Diagnostics::compute(vs, ws, &fitted);
        let sets = level_sets(vs, ws, &fitted);

        log::debug!(
            "2-D {} fit of {} observations ({} distinct points): {} level sets, {} surface knots",
            norm,
            observations.len(),
            solved.len(),
            sets.len(),
            surface.knot_count()
        );

        Ok(BivariateFit::new(norm, surface, fitted, sets, diagnostics))
    }

    /// Fit row-major k-dimensional observations.
    pub fn run_multivariate<T: Float>(
        x: &[T],
        vs: &[T],
        ws: Option<&[T]>,
        config: &IsotonicConfig,
    ) -> Result<MultivariateFit<T>, IsotonicError> {
        let k = config.dimensions;
        let n = vs.len();
        let column = |d: usize| -> Vec<T> { (0..n).map(|i| x[i * k + d]).collect() };

        if k == 1 {
            let fit = Self::run_univariate(x, vs, ws, config.n_values)?;
            let fitted = fit.fitted_values().to_vec();
            let diagnostics = *fit.diagnostics();
            let sets = fit.level_sets().to_vec();
            return Ok(MultivariateFit::new(
                1,
                config.norm,
                Composition::Univariate(fit.into_interpolant()),
                fitted,
                sets,
                diagnostics,
            ));
        }

        let stage_count = config.stage_count();
        let first = Self::run_bivariate(&column(0), &column(1), vs, ws, config.n_values, config.norm)?;
        let mut prediction = first.fitted_values().to_vec();
        let mut error = weighted_sse(vs, ws, &prediction);
        let mut stages = vec![Stage {
            axis: 1,
            surface: first.into_surface(),
        }];

        for i in 1..stage_count {
            let axis = (i + 1) % k;
            let coordinate = column(axis);
            let fit = Self::run_bivariate(
                &prediction,
                &coordinate,
                vs,
                ws,
                config.n_values,
                config.norm,
            )?;
            let candidate = fit.fitted_values().to_vec();
            let candidate_error = weighted_sse(vs, ws, &candidate);

            if candidate_error < error {
                log::debug!(
                    "stage {} on axis {} kept: weighted SSE {:?} -> {:?}",
                    i,
                    axis,
                    error.to_f64(),
                    candidate_error.to_f64()
                );
                stages.push(Stage {
                    axis,
                    surface: fit.into_surface(),
                });
                prediction = candidate;
                error = candidate_error;
            } else {
                log::debug!(
                    "stage {} on axis {} rolled back: weighted SSE {:?} not below {:?}",
                    i,
                    axis,
                    candidate_error.to_f64(),
                    error.to_f64()
                );
                break;
            }
        }

        log::debug!(
            "{}-D fit of {} observations: {} of {} stages kept",
            k,
            n,
            stages.len(),
            stage_count
        );

        let diagnostics = Diagnostics::compute(vs, ws, &prediction);
        let sets = level_sets(vs, ws, &prediction);
        Ok(MultivariateFit::new(
            k,
            config.norm,
            Composition::Staged(stages),
            prediction,
            sets,
            diagnostics,
        ))
    }
}

// ============================================================================
// Free Entry Points
// ============================================================================

/// Fit a non-decreasing function of one variable.
///
/// `ws` defaults to unit weights. `n_values` bounds the number of distinct
/// fitted levels.
pub fn regress_isotonic_1d<T: Float>(
    xs: &[T],
    vs: &[T],
    ws: Option<&[T]>,
    n_values: Option<usize>,
) -> Result<UnivariateFit<T>, IsotonicError> {
    Validator::validate_inputs_1d(xs, vs, ws)?;
    Validator::validate_optional_n_values(n_values)?;
    IsotonicExecutor::run_univariate(xs, vs, ws, n_values)
}

/// Fit a function of two variables, non-decreasing in both, under `norm`.
pub fn regress_isotonic_2d<T: Float>(
    xs: &[T],
    ys: &[T],
    vs: &[T],
    ws: Option<&[T]>,
    n_values: Option<usize>,
    norm: Norm,
) -> Result<BivariateFit<T>, IsotonicError> {
    Validator::validate_inputs_2d(xs, ys, vs, ws)?;
    Validator::validate_optional_n_values(n_values)?;
    IsotonicExecutor::run_bivariate(xs, ys, vs, ws, n_values, norm)
}

/// Quantize `vs` (weighted by `ws`) to at most `n_values` representatives.
pub fn reduce_isotonic<T: Float>(
    vs: &[T],
    ws: &[T],
    n_values: usize,
) -> Result<ReducedValues<T>, IsotonicError> {
    Validator::validate_reduction(vs, ws)?;
    Validator::validate_n_values(n_values)?;
    Ok(reduce_values(vs, ws, n_values))
}

/// Assign every observation level `a` or `b`, monotone in both coordinates,
/// minimizing weighted absolute error.
///
/// The result is aligned with `observations`. Coordinates must be distinct.
pub fn binary_partition<T: Float>(
    observations: &[Observation2d<T>],
    a: T,
    b: T,
) -> Result<Vec<T>, IsotonicError> {
    Validator::validate_split_pair(a, b)?;
    if observations.is_empty() {
        return Err(IsotonicError::EmptyInput);
    }
    for o in observations {
        Validator::validate_scalar(o.x, "x")?;
        Validator::validate_scalar(o.y, "y")?;
        Validator::validate_scalar(o.value, "v")?;
        Validator::validate_scalar(o.weight, "w")?;
    }
    if let Some(index) = observations.iter().position(|o| o.weight < T::zero()) {
        return Err(IsotonicError::NegativeWeight { index });
    }
    if has_duplicate_coordinates(observations) {
        return Err(IsotonicError::DuplicateCoordinates {
            solver: "binary partition",
        });
    }

    let points: Vec<(T, T)> = observations.iter().map(|o| o.coords()).collect();
    let costs: Vec<LevelCosts<T>> = observations
        .iter()
        .map(|o| LevelCosts::absolute(o.value, o.weight, a, b))
        .collect();
    let high = partition_levels(&points, &costs)?;
    Ok(high.into_iter().map(|h| if h { b } else { a }).collect())
}
