//! High-level API for local regression smoothing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder for configuring the span set, kernel, and output options, and the
//! model object that runs the batch.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated in `build()`, series data in
//!   `fit()`; both fail fast with a [`SmoothError`].
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: `Smoother::new()` -> setters -> `.build()` ->
//!   `.fit(&x, &y)`.
//! * **Span sweep**: A single span or a whole span set may be requested; the
//!   output tags every record with its span.
//!
//! ## Invariants
//!
//! * A built model always holds a non-empty, validated span set.
//!
//! ## Non-goals
//!
//! * This module does not implement the smoothing itself (see `engine`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::WlsSolver;
use crate::engine::executor::SmoothExecutor;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::output::{
    FailureReason, FitFailure, Prediction, SmoothResult, WindowTrace,
};
pub use crate::math::kernel::WeightFunction;
pub use crate::primitives::errors::SmoothError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a local regression smoother.
#[derive(Debug, Clone)]
pub struct SmootherBuilder<T: Float> {
    /// Single smoothing span (0, 1].
    span: Option<T>,

    /// Span set for a multi-span sweep.
    spans: Option<Vec<T>>,

    /// Kernel weight function.
    weight_function: Option<WeightFunction>,

    /// Whether to collect per-window trace rows.
    collect_traces: Option<bool>,

    /// Whether to run per-center fits in parallel.
    #[cfg(feature = "parallel")]
    parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SmootherBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SmootherBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            span: None,
            spans: None,
            weight_function: None,
            collect_traces: None,
            #[cfg(feature = "parallel")]
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the smoothing span (fraction of points per local window).
    pub fn span(mut self, span: T) -> Self {
        if self.span.is_some() || self.spans.is_some() {
            self.duplicate_param = Some("span");
        }
        self.span = Some(span);
        self
    }

    /// Set a span set; the batch fits every span over the same series.
    pub fn spans(mut self, spans: &[T]) -> Self {
        if self.span.is_some() || self.spans.is_some() {
            self.duplicate_param = Some("spans");
        }
        self.spans = Some(spans.to_vec());
        self
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        if self.weight_function.is_some() {
            self.duplicate_param = Some("weight_function");
        }
        self.weight_function = Some(wf);
        self
    }

    /// Include per-window trace rows (member, distance, weight) in output.
    pub fn return_window_traces(mut self) -> Self {
        self.collect_traces = Some(true);
        self
    }

    /// Fan per-center fits out across the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self, enabled: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(enabled);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<SmoothModel<T>, SmoothError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let spans = match (self.span, self.spans) {
            (Some(span), None) => {
                let mut spans = Vec::with_capacity(1);
                spans.push(span);
                spans
            }
            (None, Some(spans)) => spans,
            (None, None) => {
                let mut spans = Vec::with_capacity(1);
                spans.push(T::from(0.67).unwrap());
                spans
            }
            // Unreachable: setting both marks a duplicate parameter above.
            (Some(_), Some(_)) => {
                return Err(SmoothError::DuplicateParameter { parameter: "span" });
            }
        };

        Validator::validate_spans(&spans)?;

        let executor = SmoothExecutor::new()
            .weight_function(self.weight_function.unwrap_or_default())
            .collect_traces(self.collect_traces.unwrap_or(false));

        #[cfg(feature = "parallel")]
        let executor = executor.parallel(self.parallel.unwrap_or(false));

        Ok(SmoothModel { spans, executor })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A configured smoother, ready to fit series data.
#[derive(Debug, Clone)]
pub struct SmoothModel<T: Float> {
    /// Validated span set.
    spans: Vec<T>,

    /// Execution engine configured from the builder.
    executor: SmoothExecutor,
}

impl<T: Float + WlsSolver + Send + Sync> SmoothModel<T> {
    /// Smooth the series at every (span, center) pair.
    ///
    /// `x` must be strictly increasing; `y` must match its length; all
    /// values must be finite. Produces one [`Prediction`] per (span, center)
    /// pair, with singular units surfaced as [`FitFailure`] records.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<SmoothResult<T>, SmoothError> {
        Validator::validate_series(x, y)?;
        for &span in &self.spans {
            Validator::validate_window_size(x.len(), span)?;
        }

        self.executor.run(x, y, &self.spans)
    }

    /// The span set this model was built with.
    pub fn spans(&self) -> &[T] {
        &self.spans
    }
}
