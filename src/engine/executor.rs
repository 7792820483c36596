//! Execution engine for local regression smoothing.
//!
//! ## Purpose
//!
//! This module orchestrates the batch: for every requested span and every
//! center drawn from the series, it selects the window, weights it, fits the
//! local line, and extracts one prediction. Each (span, center) unit is fully
//! independent of every other.
//!
//! ## Design notes
//!
//! * **Flat iteration**: The batch is an explicit nested loop over
//!   spans x centers; there is no cross-join or rank-filter table.
//! * **Buffer reuse**: One weight buffer is reused across all sequential
//!   fits; the parallel path gives each worker its own.
//! * **Partial failure**: A singular unit becomes a failure record; a
//!   degenerate window aborts the batch as a programming-error signal.
//! * **Parallelism**: With the `parallel` feature, per-center fits fan out
//!   via `rayon` with no ordering requirement beyond result collection.
//!
//! ## Invariants
//!
//! * Input x-values are strictly increasing (validated by the caller).
//! * Window sizes are at least 2 and at most n (validated by the caller).
//! * Sequential and parallel execution produce identical output.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not provide the public-facing builder (see `api`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::{FitError, LinearFit, RegressionContext, WlsSolver};
use crate::engine::output::{FailureReason, FitFailure, Prediction, SmoothResult, WindowTrace};
use crate::math::kernel::WeightFunction;
use crate::primitives::errors::SmoothError;
use crate::primitives::window::Window;

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for local regression smoothing.
#[derive(Debug, Clone, Copy)]
pub struct SmoothExecutor {
    /// Kernel weight function for local fits.
    pub weight_function: WeightFunction,

    /// Whether to collect per-window trace rows.
    pub collect_traces: bool,

    /// Whether to fan per-center fits out across the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub parallel: bool,
}

impl Default for SmoothExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one (span, center) unit.
enum UnitOutcome<T> {
    /// The fit succeeded; trace rows are present when collection is enabled.
    Fitted(T, Vec<WindowTrace<T>>),

    /// The weighted normal equations were singular.
    Singular,

    /// The window radius was zero.
    Degenerate,
}

impl SmoothExecutor {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a new executor with default parameters.
    pub fn new() -> Self {
        Self {
            weight_function: WeightFunction::default(),
            collect_traces: false,
            #[cfg(feature = "parallel")]
            parallel: false,
        }
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        self.weight_function = wf;
        self
    }

    /// Enable or disable per-window trace collection.
    pub fn collect_traces(mut self, enabled: bool) -> Self {
        self.collect_traces = enabled;
        self
    }

    /// Enable or disable parallel execution.
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    // ========================================================================
    // Main Entry Point
    // ========================================================================

    /// Smooth the series at every (span, center) pair.
    ///
    /// Inputs are assumed validated: x strictly increasing, every span in
    /// (0, 1] with an implied window size of at least 2.
    pub fn run<T>(&self, x: &[T], y: &[T], spans: &[T]) -> Result<SmoothResult<T>, SmoothError>
    where
        T: Float + WlsSolver + Send + Sync,
    {
        let n = x.len();
        let window_sizes: Vec<usize> = spans
            .iter()
            .map(|&span| Window::size_for_span(n, span))
            .collect();

        let mut predictions = Vec::with_capacity(spans.len() * n);
        let mut failures = Vec::new();
        let mut traces = if self.collect_traces {
            Some(Vec::new())
        } else {
            None
        };

        for (&span, &window_size) in spans.iter().zip(&window_sizes) {
            debug_assert!(window_size >= 2 && window_size <= n);
            self.span_pass(
                x,
                y,
                span,
                window_size,
                &mut predictions,
                &mut failures,
                &mut traces,
            )?;
        }

        Ok(SmoothResult {
            spans: spans.to_vec(),
            window_sizes,
            n_points: n,
            predictions,
            failures,
            traces,
        })
    }

    // ========================================================================
    // Span Pass
    // ========================================================================

    /// Fit every center of the series for one span.
    #[allow(clippy::too_many_arguments)]
    fn span_pass<T>(
        &self,
        x: &[T],
        y: &[T],
        span: T,
        window_size: usize,
        predictions: &mut Vec<Prediction<T>>,
        failures: &mut Vec<FitFailure<T>>,
        traces: &mut Option<Vec<WindowTrace<T>>>,
    ) -> Result<(), SmoothError>
    where
        T: Float + WlsSolver + Send + Sync,
    {
        let n = x.len();

        #[cfg(feature = "parallel")]
        let outcomes = if self.parallel {
            self.fit_all_parallel(x, y, window_size, span)
        } else {
            self.fit_all_sequential(x, y, window_size, span)
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes = self.fit_all_sequential(x, y, window_size, span);

        debug_assert_eq!(outcomes.len(), n);

        for (i, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                UnitOutcome::Fitted(value, rows) => {
                    predictions.push(Prediction {
                        span,
                        center: x[i],
                        value,
                    });
                    if let Some(trace_rows) = traces {
                        trace_rows.extend(rows);
                    }
                }
                UnitOutcome::Singular => failures.push(FitFailure {
                    span,
                    center: x[i],
                    reason: FailureReason::SingularSystem,
                }),
                UnitOutcome::Degenerate => {
                    return Err(SmoothError::DegenerateWindow { index: i });
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // Fit Passes
    // ========================================================================

    /// Fit every center with a single reused weight buffer.
    fn fit_all_sequential<T>(
        &self,
        x: &[T],
        y: &[T],
        window_size: usize,
        span: T,
    ) -> Vec<UnitOutcome<T>>
    where
        T: Float + WlsSolver,
    {
        let n = x.len();
        let mut weights = vec![T::zero(); n];

        (0..n)
            .map(|i| self.fit_unit(x, y, i, window_size, span, &mut weights))
            .collect()
    }

    /// Fit every center across the rayon pool, one weight buffer per worker.
    #[cfg(feature = "parallel")]
    fn fit_all_parallel<T>(
        &self,
        x: &[T],
        y: &[T],
        window_size: usize,
        span: T,
    ) -> Vec<UnitOutcome<T>>
    where
        T: Float + WlsSolver + Send + Sync,
    {
        let n = x.len();

        (0..n)
            .into_par_iter()
            .map_init(
                || vec![T::zero(); n],
                |weights, i| self.fit_unit(x, y, i, window_size, span, weights),
            )
            .collect()
    }

    // ========================================================================
    // Unit Fit
    // ========================================================================

    /// Select, weight, and fit the window around one center.
    fn fit_unit<T>(
        &self,
        x: &[T],
        y: &[T],
        idx: usize,
        window_size: usize,
        span: T,
        weights: &mut [T],
    ) -> UnitOutcome<T>
    where
        T: Float + WlsSolver,
    {
        let window = Window::around(x, idx, window_size);

        let mut context = RegressionContext {
            x,
            y,
            idx,
            window,
            weights: &mut *weights,
            weight_function: self.weight_function,
        };

        let model: LinearFit<T> = match context.fit() {
            Ok(model) => model,
            Err(FitError::SingularSystem) => return UnitOutcome::Singular,
            Err(FitError::DegenerateWindow) => return UnitOutcome::Degenerate,
        };

        let x_center = x[idx];
        let value = model.predict(x_center);

        let rows = if self.collect_traces {
            let mut rows = Vec::with_capacity(window.len());
            for j in window.left..=window.right {
                rows.push(WindowTrace {
                    span,
                    center: x_center,
                    x: x[j],
                    y: y[j],
                    distance: (x[j] - x_center).abs(),
                    weight: weights[j],
                });
            }
            rows
        } else {
            Vec::new()
        };

        UnitOutcome::Fitted(value, rows)
    }
}
