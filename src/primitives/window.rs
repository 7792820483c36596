//! Windowing primitives for local regression.
//!
//! ## Purpose
//!
//! This module selects the local neighborhood for each fit. Because the
//! series x-values are strictly increasing, the k nearest neighbors of any
//! center are always a contiguous index range, so a window is just a pair of
//! bounds that slides along the series.
//!
//! ## Design notes
//!
//! * **Contiguity**: Nearest-neighbor selection over sorted x never needs a
//!   distance sort; a seed-and-slide search finds the optimal range in O(k).
//! * **Tie-break**: Sliding requires a *strictly* closer outside candidate,
//!   so on exact distance ties the window keeps its current members. This is
//!   the one explicit, documented tie rule; no floating-point rank cutoffs.
//! * **Series order**: Window members are naturally ordered by series index,
//!   not by distance.
//!
//! ## Invariants
//!
//! * `left <= right` and both are valid indices into the series.
//! * A window built by [`Window::around`] contains its center index.
//!
//! ## Non-goals
//!
//! * This module does not compute weights or perform regression.
//! * This module does not validate spans (handled by the engine validator).

// External dependencies
use num_traits::Float;

// ============================================================================
// Window
// ============================================================================

/// Inclusive index bounds `[left, right]` of one local neighborhood.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    /// Left boundary index (inclusive).
    pub left: usize,

    /// Right boundary index (inclusive).
    pub right: usize,
}

impl Window {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Find the k-nearest-neighbor window around `center`.
    ///
    /// Seeds a range centered on the index, then slides it toward whichever
    /// side holds strictly closer points. Ties never cause movement.
    #[inline]
    pub fn around<T: Float>(x: &[T], center: usize, k: usize) -> Self {
        let n = x.len();
        debug_assert!(center < n, "around: center index out of bounds");
        debug_assert!(k >= 1, "around: window size must be at least 1");

        if k >= n {
            return Self {
                left: 0,
                right: n.saturating_sub(1),
            };
        }

        // Seed: centered on the index, clamped into range.
        let mut left = center.saturating_sub(k / 2).min(n - k);
        let mut right = left + k - 1;

        let x_center = x[center];

        // Slide right while the point past the window is strictly closer
        // than the leftmost member.
        while right + 1 < n && x_center - x[left] > x[right + 1] - x_center {
            left += 1;
            right += 1;
        }

        // Slide left while the point before the window is strictly closer
        // than the rightmost member.
        while left > 0 && x_center - x[left - 1] < x[right] - x_center {
            left -= 1;
            right -= 1;
        }

        Self { left, right }
    }

    // ========================================================================
    // Derived Quantities
    // ========================================================================

    /// Maximum distance from `x_center` to any member of the window.
    ///
    /// This is the window radius used to normalize kernel weights. It is
    /// zero only for a single-member window.
    #[inline]
    pub fn radius<T: Float>(&self, x: &[T], x_center: T) -> T {
        T::max(x_center - x[self.left], x[self.right] - x_center)
    }

    /// Number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }

    /// Check if the window is empty.
    #[allow(dead_code)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Sizing
    // ========================================================================

    /// Window size `k = floor(span * n)`, capped at n.
    ///
    /// A small epsilon keeps exact products from landing just below an
    /// integer (0.29 * 100 must give 29, not 28). Sizes below 2 are not
    /// clamped here; the validator rejects them before any fit runs.
    #[inline]
    pub fn size_for_span<T: Float>(n: usize, span: T) -> usize {
        let epsilon = T::from(1e-5).unwrap();
        let scaled = span * T::from(n).unwrap() + epsilon;
        scaled.floor().to_usize().unwrap_or(0).min(n)
    }
}
