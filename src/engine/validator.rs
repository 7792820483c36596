//! Input validation for smoother configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation for the series, the span set, and the
//! window sizes they imply. All global inputs are validated up front so that
//! the whole batch fails cleanly instead of silently skipping units.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Series invariants**: Non-empty, matched lengths, finite values,
//!   strictly increasing x (ordered with unique values).
//! * **Span bounds**: Each span lies in (0, 1] and yields a window of at
//!   least 2 points, the minimum for a two-parameter linear fit.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not perform the smoothing itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SmoothError;
use crate::primitives::window::Window;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for smoother configuration and input data.
///
/// Provides static methods that return `Result<(), SmoothError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Series Validation
    // ========================================================================

    /// Validate the input series.
    pub fn validate_series<T: Float>(x: &[T], y: &[T]) -> Result<(), SmoothError> {
        // Check 1: Non-empty arrays
        if x.is_empty() || y.is_empty() {
            return Err(SmoothError::EmptyInput);
        }

        // Check 2: Matching lengths
        let n = x.len();
        if n != y.len() {
            return Err(SmoothError::MismatchedInputs {
                x_len: n,
                y_len: y.len(),
            });
        }

        // Check 3: All values finite (combined loop for cache locality)
        for i in 0..n {
            if !x[i].is_finite() {
                return Err(SmoothError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    x[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !y[i].is_finite() {
                return Err(SmoothError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    y[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        // Check 4: Strictly increasing x (ordered series with unique values)
        for i in 1..n {
            if x[i] <= x[i - 1] {
                return Err(SmoothError::UnsortedX { index: i });
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a single smoothing span.
    pub fn validate_span<T: Float>(span: T) -> Result<(), SmoothError> {
        if !span.is_finite() || span <= T::zero() || span > T::one() {
            return Err(SmoothError::InvalidSpan(span.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate a collection of spans.
    pub fn validate_spans<T: Float>(spans: &[T]) -> Result<(), SmoothError> {
        if spans.is_empty() {
            return Err(SmoothError::EmptySpanSet);
        }

        for &span in spans {
            Self::validate_span(span)?;
        }

        Ok(())
    }

    /// Validate the window size a span implies for a series of length n.
    pub fn validate_window_size<T: Float>(n: usize, span: T) -> Result<(), SmoothError> {
        let window = Window::size_for_span(n, span);
        if window < 2 {
            return Err(SmoothError::WindowTooSmall { window, min: 2 });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), SmoothError> {
        if let Some(param) = duplicate_param {
            return Err(SmoothError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
