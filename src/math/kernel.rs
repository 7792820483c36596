//! Kernel (weight) functions for local regression.
//!
//! ## Purpose
//!
//! This module maps normalized distances `u = |x - c| / radius` to regression
//! weights. The kernel controls how strongly each window member influences
//! the local fit.
//!
//! ## Design notes
//!
//! * **Normalization**: Distances are normalized by the window radius before
//!   evaluation, so the farthest member of a window sits at `u = 1`.
//! * **Clamping**: Results are clamped to [0, 1] to guard against
//!   floating-point overshoot at the support boundary.
//!
//! ## Key concepts
//!
//! * **Tricube**: Cleveland's original kernel and the default. Full weight at
//!   the center, exactly zero at the window radius.
//! * **Uniform**: Constant weight across the whole window, including the
//!   member at the radius. With span 1.0 this reduces the local fit to
//!   ordinary least squares over the entire series.
//!
//! ## Invariants
//!
//! * `K(0) = 1` for both kernels.
//! * Weights are non-negative and non-increasing in `|u|`.
//!
//! ## Non-goals
//!
//! * This module does not perform weight normalization across a window.
//! * This module does not select window sizes.

// External dependencies
use num_traits::Float;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Weight function (kernel) for local regression smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// Tricube kernel: K(u) = (1 - |u|^3)^3 for |u| < 1.
    ///
    /// This is the default and recommended kernel choice.
    #[default]
    Tricube,

    /// Uniform kernel: K(u) = 1 for |u| <= 1.
    Uniform,
}

impl WeightFunction {
    // ========================================================================
    // Metadata Methods
    // ========================================================================

    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Uniform => "Uniform",
        }
    }

    // ========================================================================
    // Weight Computation
    // ========================================================================

    /// Compute the weight K(u) for a normalized distance.
    ///
    /// The tricube support is half-open: `u = 1` (the window's farthest
    /// member) gets exactly zero. The uniform support is closed so that every
    /// window member participates with full weight.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();

        match self {
            WeightFunction::Tricube => {
                if abs_u >= T::one() {
                    return T::zero();
                }
                let tmp = T::one() - abs_u * abs_u * abs_u;
                let w = tmp * tmp * tmp;
                // Clamp against floating-point overshoot near the boundary.
                w.max(T::zero()).min(T::one())
            }

            WeightFunction::Uniform => {
                if abs_u > T::one() {
                    T::zero()
                } else {
                    T::one()
                }
            }
        }
    }
}
