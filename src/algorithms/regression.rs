//! Weighted linear regression for local fitting.
//!
//! ## Purpose
//!
//! This module fits the degree-1 model `y = a + b*x` over one local window
//! by weighted least squares, minimizing `sum w_i (y_i - a - b*x_i)^2`. It
//! provides:
//! - A context tying together the series, the window, and the kernel.
//! - A solver trait with type-specialized SIMD accumulation.
//! - The plain fitted-line record extracted from each window.
//!
//! ## Design notes
//!
//! * **Closed form**: The 2x2 weighted normal equations are solved directly
//!   from five running sums (W, Sx, Sy, Sxx, Sxy).
//! * **Degeneracy policy**: When the weighted x-variance vanishes but weight
//!   mass remains, the fit collapses to the constant weighted mean rather
//!   than dividing by zero. A vanished weight mass is a singular system and
//!   is reported, never turned into NaN.
//! * **SIMD**: f64 and f32 accumulate sums in `wide` lanes; other floats use
//!   the scalar path.
//!
//! ## Invariants
//!
//! * Fitted coefficients are finite whenever `fit` returns `Ok`.
//! * The window radius passed to weighting is strictly positive.
//!
//! ## Non-goals
//!
//! * This module does not select windows (see `primitives::window`).
//! * This module does not iterate over centers (see `engine::executor`).

// External dependencies
use num_traits::Float;
use wide::{f32x8, f64x2};

// Internal dependencies
use crate::math::kernel::WeightFunction;
use crate::primitives::window::Window;

// ============================================================================
// Fit Errors
// ============================================================================

/// Failure modes of a single local fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    /// The window radius is zero; no weights can be normalized.
    DegenerateWindow,

    /// The weighted normal equations are not solvable (no weight mass).
    SingularSystem,
}

// ============================================================================
// Accumulation
// ============================================================================

/// Scalar accumulation of the five weighted sums (generic Float).
#[inline]
pub fn accumulate_wls_scalar<T: Float>(x: &[T], y: &[T], weights: &[T]) -> (T, T, T, T, T) {
    let mut sum_w = T::zero();
    let mut sum_wx = T::zero();
    let mut sum_wy = T::zero();
    let mut sum_wxx = T::zero();
    let mut sum_wxy = T::zero();

    for i in 0..x.len() {
        let w = weights[i];
        let wx = w * x[i];

        sum_w = sum_w + w;
        sum_wx = sum_wx + wx;
        sum_wy = sum_wy + w * y[i];
        sum_wxx = sum_wxx + wx * x[i];
        sum_wxy = sum_wxy + wx * y[i];
    }

    (sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy)
}

/// SIMD accumulation of the five weighted sums (f64, two lanes).
#[inline]
pub fn accumulate_wls_f64(x: &[f64], y: &[f64], weights: &[f64]) -> (f64, f64, f64, f64, f64) {
    let mut s_w = f64x2::splat(0.0);
    let mut s_wx = f64x2::splat(0.0);
    let mut s_wy = f64x2::splat(0.0);
    let mut s_wxx = f64x2::splat(0.0);
    let mut s_wxy = f64x2::splat(0.0);

    let mut xc = x.chunks_exact(2);
    let mut yc = y.chunks_exact(2);
    let mut wc = weights.chunks_exact(2);

    for ((xv, yv), wv) in (&mut xc).zip(&mut yc).zip(&mut wc) {
        let xv = f64x2::new([xv[0], xv[1]]);
        let yv = f64x2::new([yv[0], yv[1]]);
        let wv = f64x2::new([wv[0], wv[1]]);

        let wx = wv * xv;

        s_w += wv;
        s_wx += wx;
        s_wy += wv * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let (mut a_w, mut a_wx, mut a_wy, mut a_wxx, mut a_wxy) = (
        s_w.reduce_add(),
        s_wx.reduce_add(),
        s_wy.reduce_add(),
        s_wxx.reduce_add(),
        s_wxy.reduce_add(),
    );

    for ((&xv, &yv), &wv) in xc
        .remainder()
        .iter()
        .zip(yc.remainder())
        .zip(wc.remainder())
    {
        let wx = wv * xv;
        a_w += wv;
        a_wx += wx;
        a_wy += wv * yv;
        a_wxx += wx * xv;
        a_wxy += wx * yv;
    }

    (a_w, a_wx, a_wy, a_wxx, a_wxy)
}

/// SIMD accumulation of the five weighted sums (f32, eight lanes).
#[inline]
pub fn accumulate_wls_f32(x: &[f32], y: &[f32], weights: &[f32]) -> (f32, f32, f32, f32, f32) {
    let mut s_w = f32x8::splat(0.0);
    let mut s_wx = f32x8::splat(0.0);
    let mut s_wy = f32x8::splat(0.0);
    let mut s_wxx = f32x8::splat(0.0);
    let mut s_wxy = f32x8::splat(0.0);

    let mut xc = x.chunks_exact(8);
    let mut yc = y.chunks_exact(8);
    let mut wc = weights.chunks_exact(8);

    for ((xv, yv), wv) in (&mut xc).zip(&mut yc).zip(&mut wc) {
        let xv = f32x8::new([xv[0], xv[1], xv[2], xv[3], xv[4], xv[5], xv[6], xv[7]]);
        let yv = f32x8::new([yv[0], yv[1], yv[2], yv[3], yv[4], yv[5], yv[6], yv[7]]);
        let wv = f32x8::new([wv[0], wv[1], wv[2], wv[3], wv[4], wv[5], wv[6], wv[7]]);

        let wx = wv * xv;

        s_w += wv;
        s_wx += wx;
        s_wy += wv * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let (mut a_w, mut a_wx, mut a_wy, mut a_wxx, mut a_wxy) = (
        s_w.reduce_add(),
        s_wx.reduce_add(),
        s_wy.reduce_add(),
        s_wxx.reduce_add(),
        s_wxy.reduce_add(),
    );

    for ((&xv, &yv), &wv) in xc
        .remainder()
        .iter()
        .zip(yc.remainder())
        .zip(wc.remainder())
    {
        let wx = wv * xv;
        a_w += wv;
        a_wx += wx;
        a_wy += wv * yv;
        a_wxx += wx * xv;
        a_wxy += wx * yv;
    }

    (a_w, a_wx, a_wy, a_wxx, a_wxy)
}

// ============================================================================
// Solver Trait
// ============================================================================

/// Trait for type-specific weighted least squares accumulation and solving.
pub trait WlsSolver: Float {
    /// Accumulate the weighted sums W, Sx, Sy, Sxx, Sxy over a window.
    #[inline]
    fn accumulate_wls(x: &[Self], y: &[Self], weights: &[Self]) -> (Self, Self, Self, Self, Self) {
        accumulate_wls_scalar(x, y, weights)
    }

    /// Solve the weighted normal equations for (slope, intercept).
    ///
    /// Returns `None` when the system is singular (no weight mass). A
    /// vanishing weighted x-variance with positive weight mass collapses to
    /// the constant fit through the weighted mean.
    #[inline]
    fn solve_wls(
        sum_w: Self,
        sum_wx: Self,
        sum_wy: Self,
        sum_wxx: Self,
        sum_wxy: Self,
        tol: Self,
    ) -> Option<(Self, Self)> {
        if sum_w <= Self::zero() {
            return None;
        }

        let x_mean = sum_wx / sum_w;
        let y_mean = sum_wy / sum_w;

        // Denominator of the 2x2 system, scaled by 1/W for stability.
        let variance = sum_wxx - (sum_wx * sum_wx) / sum_w;
        if variance <= tol {
            return Some((Self::zero(), y_mean));
        }

        let covariance = sum_wxy - (sum_wx * sum_wy) / sum_w;
        let slope = covariance / variance;
        let intercept = y_mean - slope * x_mean;

        Some((slope, intercept))
    }
}

impl WlsSolver for f64 {
    #[inline]
    fn accumulate_wls(x: &[f64], y: &[f64], weights: &[f64]) -> (f64, f64, f64, f64, f64) {
        accumulate_wls_f64(x, y, weights)
    }
}

impl WlsSolver for f32 {
    #[inline]
    fn accumulate_wls(x: &[f32], y: &[f32], weights: &[f32]) -> (f32, f32, f32, f32, f32) {
        accumulate_wls_f32(x, y, weights)
    }
}

// ============================================================================
// LinearFit
// ============================================================================

/// Fitted local line `y = intercept + slope * x`.
///
/// Owned transiently per (span, center) pair; the engine extracts one
/// prediction and discards the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T: Float> {
    /// Slope (b).
    pub slope: T,

    /// Intercept (a).
    pub intercept: T,
}

impl<T: Float> LinearFit<T> {
    /// Evaluate the fitted line at `x`.
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.intercept + self.slope * x
    }
}

// ============================================================================
// Regression Context
// ============================================================================

/// Context for fitting a single (span, center) unit.
pub struct RegressionContext<'a, T: Float> {
    /// Slice of x-values (independent variable).
    pub x: &'a [T],

    /// Slice of y-values (dependent variable).
    pub y: &'a [T],

    /// Index of the center point.
    pub idx: usize,

    /// Window defining the local neighborhood.
    pub window: Window,

    /// Scratch buffer for kernel weights, indexed by series position.
    pub weights: &'a mut [T],

    /// Weight function (kernel).
    pub weight_function: WeightFunction,
}

impl<'a, T: Float + WlsSolver> RegressionContext<'a, T> {
    /// Weight the window and solve the local weighted least squares.
    ///
    /// On success, `self.weights[window.left..=window.right]` holds the
    /// kernel weights used, so callers can expose them as trace rows.
    pub fn fit(&mut self) -> Result<LinearFit<T>, FitError> {
        let x_center = self.x[self.idx];
        let radius = self.window.radius(self.x, x_center);

        if radius <= T::zero() {
            return Err(FitError::DegenerateWindow);
        }

        for j in self.window.left..=self.window.right {
            let distance = (self.x[j] - x_center).abs();
            self.weights[j] = self.weight_function.compute_weight(distance / radius);
        }

        let window_x = &self.x[self.window.left..=self.window.right];
        let window_y = &self.y[self.window.left..=self.window.right];
        let window_w = &self.weights[self.window.left..=self.window.right];

        let (sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy) =
            T::accumulate_wls(window_x, window_y, window_w);

        let abs_tol = T::from(1e-12).unwrap();
        let rel_tol = T::epsilon() * radius * radius;
        let tol = abs_tol.max(rel_tol);

        T::solve_wls(sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy, tol)
            .map(|(slope, intercept)| LinearFit { slope, intercept })
            .ok_or(FitError::SingularSystem)
    }
}
