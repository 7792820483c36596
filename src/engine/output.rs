//! Output types and result structures for smoothing operations.
//!
//! ## Purpose
//!
//! This module defines the records produced by a smoothing run: one
//! prediction per (span, center) pair, optional per-window trace rows for a
//! downstream visualization layer, and failure records for units whose local
//! fit could not be solved.
//!
//! ## Design notes
//!
//! * **Holes are data**: A singular local fit becomes a failure record, not
//!   an error; callers must tolerate missing predictions.
//! * **Traces on request**: The trace table can be large (k rows per center
//!   per span) and is only populated when enabled.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `predictions.len() + failures.len() == spans.len() * n_points`.
//! * Predictions are ordered span-major, then by center in series order.
//! * Trace weights are in [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not render or encode anything.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Record Types
// ============================================================================

/// One smoothed value: the local fit at `center` evaluated at `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<T> {
    /// Span that produced this prediction.
    pub span: T,

    /// Center x-value the local fit was anchored at.
    pub center: T,

    /// Fitted value at the center.
    pub value: T,
}

/// One window member's contribution to a local fit.
///
/// These rows let a renderer reconstruct which points entered a given
/// center's window and how much each counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTrace<T> {
    /// Span that produced this row.
    pub span: T,

    /// Center x-value of the window.
    pub center: T,

    /// Member x-value.
    pub x: T,

    /// Member y-value.
    pub y: T,

    /// Distance |x - center|.
    pub distance: T,

    /// Kernel weight assigned to the member.
    pub weight: T,
}

/// Reason a (span, center) unit produced no prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The weighted normal equations had no solvable weight mass.
    SingularSystem,
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::SingularSystem => write!(f, "weighted normal equations are singular"),
        }
    }
}

/// Diagnostic record for a unit whose local fit failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitFailure<T> {
    /// Span of the failed unit.
    pub span: T,

    /// Center x-value of the failed unit.
    pub center: T,

    /// Why the fit produced no prediction.
    pub reason: FailureReason,
}

// ============================================================================
// Result Structure
// ============================================================================

/// Complete output of one smoothing run over a span set.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothResult<T> {
    /// Spans the run was configured with, in request order.
    pub spans: Vec<T>,

    /// Window size used for each span (parallel to `spans`).
    pub window_sizes: Vec<usize>,

    /// Number of points in the input series.
    pub n_points: usize,

    /// Predictions, span-major then center order; failed units are absent.
    pub predictions: Vec<Prediction<T>>,

    /// Failure records for units that produced no prediction.
    pub failures: Vec<FitFailure<T>>,

    /// Per-window trace rows, when trace collection was enabled.
    pub traces: Option<Vec<WindowTrace<T>>>,
}

impl<T: Float> SmoothResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Check that every (span, center) unit produced a prediction.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if trace rows were collected.
    pub fn has_traces(&self) -> bool {
        self.traces.is_some()
    }

    /// Iterate over the predictions belonging to one span.
    pub fn predictions_for(&self, span: T) -> impl Iterator<Item = &Prediction<T>> {
        self.predictions.iter().filter(move |p| p.span == span)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for SmoothResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.n_points)?;
        write!(f, "  Spans:      ")?;
        for (span, k) in self.spans.iter().zip(&self.window_sizes) {
            write!(f, " {span} (k={k})")?;
        }
        writeln!(f)?;
        if !self.failures.is_empty() {
            writeln!(f, "  Failed fits: {}", self.failures.len())?;
        }
        if let Some(traces) = &self.traces {
            writeln!(f, "  Trace rows:  {}", traces.len())?;
        }
        writeln!(f)?;

        writeln!(f, "Smoothed Data:")?;
        writeln!(f, "{:>10} {:>10} {:>12}", "Span", "Center", "Fitted")?;
        writeln!(f, "{:-<34}", "")?;

        // Show first 10 and last 10 rows if more than 20.
        let n = self.predictions.len();
        let show_all = n <= 20;
        let rows: Vec<usize> = if show_all {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>10}", "...")?;
            }
            prev_idx = idx;

            let p = &self.predictions[idx];
            writeln!(f, "{:>10.3} {:>10.2} {:>12.6}", p.span, p.center, p.value)?;
        }

        Ok(())
    }
}
