//! # locreg — Local Regression Smoothing for Rust
//!
//! A windowed local regression (LOESS) smoother for ordered series, built
//! around the classic single-pass, degree-1 formulation: at every point of
//! the series, fit a weighted line through that point's nearest neighbors
//! and keep the fitted value at the point itself.
//!
//! ## How it works
//!
//! 1. For each requested span, compute the window size `k = floor(span * n)`.
//! 2. For each center point, select the `k` nearest neighbors (always a
//!    contiguous range, since the series is ordered by x).
//! 3. Weight the window with the tricube kernel: full weight at the center,
//!    zero at the window's farthest member.
//! 4. Solve the weighted least squares line and evaluate it at the center.
//!
//! Every (span, center) pair is an independent unit of work, so a batch can
//! optionally fan out across a thread pool (see the `parallel` feature).
//!
//! ## Quick Start
//!
//! ```rust
//! use locreg::prelude::*;
//!
//! let x: Vec<f64> = (0..40).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|&xi| 2.0 * xi + 1.0).collect();
//!
//! // Build the model
//! let model = Smoother::new()
//!     .span(0.5)          // Use 50% of the data for each local window
//!     .build()?;
//!
//! // Fit the model to the series
//! let result = model.fit(&x, &y)?;
//!
//! // One prediction per (span, center) pair
//! assert_eq!(result.predictions.len(), 40);
//!
//! // Smoothing a perfect line reproduces the line
//! assert!((result.predictions[0].value - 1.0).abs() < 1e-9);
//! # Result::<(), SmoothError>::Ok(())
//! ```
//!
//! ## Span Sweeps
//!
//! The smoother accepts a whole span set in one call and tags every output
//! record with its span, which is what a visualization layer comparing
//! several bandwidths wants:
//!
//! ```rust
//! use locreg::prelude::*;
//! # let x: Vec<f64> = (0..40).map(|i| i as f64).collect();
//! # let y: Vec<f64> = x.iter().map(|&xi| 2.0 * xi + 1.0).collect();
//!
//! let model = Smoother::new()
//!     .spans(&[0.25, 0.5, 0.75])
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! assert_eq!(result.predictions.len(), 3 * 40);
//!
//! // Window sizes grow with span
//! assert_eq!(result.window_sizes, vec![10, 20, 30]);
//! # Result::<(), SmoothError>::Ok(())
//! ```
//!
//! ## Window Traces
//!
//! Downstream consumers (plots, animations) often need to know *which*
//! points entered a given center's window and with what weight. Enable trace
//! collection to get one row per window member:
//!
//! ```rust
//! use locreg::prelude::*;
//! # let x: Vec<f64> = (0..40).map(|i| i as f64).collect();
//! # let y: Vec<f64> = x.iter().map(|&xi| 2.0 * xi + 1.0).collect();
//!
//! let model = Smoother::new()
//!     .span(0.25)
//!     .return_window_traces()
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! let traces = result.traces.as_ref().unwrap();
//!
//! // k rows per center
//! assert_eq!(traces.len(), 10 * 40);
//!
//! // Weights are normalized per window: 1 at the center, 0 at the radius
//! for row in traces {
//!     assert!(row.weight >= 0.0 && row.weight <= 1.0);
//! }
//! # Result::<(), SmoothError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter                 | Default   | Range/Options        | Description                                      |
//! |---------------------------|-----------|----------------------|--------------------------------------------------|
//! | **span**                  | 0.67      | (0, 1]               | Fraction of points per local window              |
//! | **spans**                 | (none)    | non-empty set        | Span sweep; mutually exclusive with `span`       |
//! | **weight_function**       | `Tricube` | `Tricube`, `Uniform` | Distance weighting kernel                        |
//! | **return_window_traces**  | false     | true/false           | Emit per-window member/distance/weight rows      |
//! | **parallel**              | false     | true/false           | Fan fits across threads (`parallel` feature)     |
//!
//! ## Result and Error Handling
//!
//! `fit` returns `Result<SmoothResult<T>, SmoothError>`. Global problems
//! (empty series, unsorted x, bad spans, windows under 2 points) fail the
//! whole call. A singular local fit does *not*: it becomes a
//! [`FitFailure`](crate::prelude::FitFailure) record in the output and the
//! remaining centers are unaffected, so callers must tolerate holes in the
//! prediction sequence.
//!
//! ```rust
//! use locreg::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0];
//! let y = vec![1.0, 2.0];  // mismatched lengths
//!
//! let model = Smoother::new().span(1.0).build()?;
//! match model.fit(&x, &y) {
//!     Ok(result) => println!("{}", result),
//!     Err(SmoothError::MismatchedInputs { x_len, y_len }) => {
//!         assert_eq!((x_len, y_len), (3, 2));
//!     }
//!     Err(e) => eprintln!("unexpected: {e}"),
//! }
//! # Result::<(), SmoothError>::Ok(())
//! ```
//!
//! ## Choosing a Kernel
//!
//! * **Tricube** (default): Cleveland's original choice. Smooth taper, full
//!   weight at the center, exactly zero at the window's farthest member.
//! * **Uniform**: Every window member counts equally. With `span(1.0)` this
//!   reduces each local fit to ordinary least squares over the whole series,
//!   which is handy as a sanity baseline.
//!
//! ## Minimal Usage (no_std)
//!
//! The crate supports `no_std` environments; disable default features to
//! remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! locreg = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"
//! - Cleveland, W. S. & Devlin, S. J. (1988). "Locally Weighted Regression: An Approach to Regression Analysis by Local Fitting"

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - errors and windowing.
mod primitives;

// Layer 2: Math - kernel weight functions.
mod math;

// Layer 3: Algorithms - weighted linear regression.
mod algorithms;

// Layer 4: Engine - validation, execution, output assembly.
mod engine;

// High-level fluent API.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard smoothing prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use locreg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        FailureReason, FitFailure, Prediction, SmoothError, SmoothModel, SmoothResult,
        SmootherBuilder as Smoother, WeightFunction,
        WeightFunction::{Tricube, Uniform},
        WindowTrace,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing
/// purposes. It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change
/// without notice. Do not use in production code.
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
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
