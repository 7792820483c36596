//! Error types for local regression smoothing.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! or running the smoother, including input validation, span constraints, and
//! window degeneracies.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g., actual lengths).
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty series, mismatched lengths, non-finite values,
//!    x values that are not strictly increasing.
//! 2. **Parameter validation**: Spans outside (0, 1], empty span sets, windows
//!    too small for a two-parameter linear fit.
//! 3. **Degeneracies**: A window whose radius collapses to zero is a hard
//!    programming-error signal, not a recoverable condition.
//!
//! Singular local fits are deliberately *not* represented here: they are
//! surfaced per (span, center) pair as failure records in the output so that
//! one problematic center cannot invalidate the rest of the batch.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Numeric values in errors use the same types as the public API.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for local regression smoothing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SmoothError {
    /// Input arrays are empty; smoothing requires at least 2 points.
    EmptyInput,

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Series x-values must be strictly increasing (ordered, no duplicates).
    UnsortedX {
        /// Index of the first element that violates the ordering.
        index: usize,
    },

    /// Smoothing span must be in the range (0, 1].
    InvalidSpan(f64),

    /// At least one span is required per call.
    EmptySpanSet,

    /// The window implied by a span holds fewer points than a linear fit needs.
    WindowTooSmall {
        /// Window size computed from the span.
        window: usize,
        /// Minimum required window size.
        min: usize,
    },

    /// A local window collapsed to zero radius.
    ///
    /// Unreachable for strictly increasing x with window size >= 2; if it
    /// fires, it indicates a defect in window selection.
    DegenerateWindow {
        /// Index of the center point whose window degenerated.
        index: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SmoothError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::UnsortedX { index } => {
                write!(
                    f,
                    "x values must be strictly increasing: violation at index {index}"
                )
            }
            Self::InvalidSpan(span) => {
                write!(f, "Invalid span: {span} (must be > 0 and <= 1)")
            }
            Self::EmptySpanSet => write!(f, "Span set is empty: at least one span is required"),
            Self::WindowTooSmall { window, min } => {
                write!(
                    f,
                    "Window too small: {window} points (need at least {min} for a linear fit)"
                )
            }
            Self::DegenerateWindow { index } => {
                write!(f, "Window at center index {index} has zero radius")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for SmoothError {}
