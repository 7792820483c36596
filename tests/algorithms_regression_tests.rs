#![cfg(feature = "dev")]
//! Tests for weighted linear regression.
//!
//! These tests verify:
//! - Accumulation of the five weighted sums (scalar and SIMD paths)
//! - The closed-form solver, its degeneracy policy, and singularity detection
//! - The regression context: kernel weighting plus fit over one window

use approx::assert_relative_eq;

use locreg::internals::algorithms::regression::{
    accumulate_wls_f32, accumulate_wls_f64, accumulate_wls_scalar, FitError, LinearFit,
    RegressionContext, WlsSolver,
};
use locreg::internals::math::kernel::WeightFunction;
use locreg::internals::primitives::window::Window;

// ============================================================================
// Accumulation Tests
// ============================================================================

/// SIMD and scalar accumulation agree, including the odd-length remainder.
#[test]
fn test_accumulate_simd_matches_scalar_f64() {
    let x: Vec<f64> = (0..11).map(|i| i as f64 * 0.7 + 1.0).collect();
    let y: Vec<f64> = x.iter().map(|&xi| 3.0 * xi - 2.0).collect();
    let w: Vec<f64> = (0..11).map(|i| 1.0 / (i as f64 + 1.0)).collect();

    let scalar = accumulate_wls_scalar(&x, &y, &w);
    let simd = accumulate_wls_f64(&x, &y, &w);

    assert_relative_eq!(scalar.0, simd.0, epsilon = 1e-12);
    assert_relative_eq!(scalar.1, simd.1, epsilon = 1e-12);
    assert_relative_eq!(scalar.2, simd.2, epsilon = 1e-12);
    assert_relative_eq!(scalar.3, simd.3, epsilon = 1e-12);
    assert_relative_eq!(scalar.4, simd.4, epsilon = 1e-12);
}

/// The f32 lanes agree with the scalar path within single precision.
#[test]
fn test_accumulate_simd_matches_scalar_f32() {
    let x: Vec<f32> = (0..13).map(|i| i as f32 * 0.5).collect();
    let y: Vec<f32> = x.iter().map(|&xi| 2.0 * xi + 1.0).collect();
    let w = vec![1.0f32; 13];

    let scalar = accumulate_wls_scalar(&x, &y, &w);
    let simd = accumulate_wls_f32(&x, &y, &w);

    assert_relative_eq!(scalar.0, simd.0, epsilon = 1e-4);
    assert_relative_eq!(scalar.4, simd.4, epsilon = 1e-2);
}

/// Empty input accumulates to all zeros.
#[test]
fn test_accumulate_empty() {
    let sums = accumulate_wls_f64(&[], &[], &[]);
    assert_eq!(sums, (0.0, 0.0, 0.0, 0.0, 0.0));
}

// ============================================================================
// Solver Tests
// ============================================================================

/// The solver recovers a known line from unweighted sums.
#[test]
fn test_solve_wls_known_line() {
    // x = [0, 1, 2], y = [1, 3, 5], w = 1: the line y = 1 + 2x.
    let (slope, intercept) =
        <f64 as WlsSolver>::solve_wls(3.0, 3.0, 9.0, 5.0, 13.0, 1e-12).unwrap();

    assert_relative_eq!(slope, 2.0, epsilon = 1e-12);
    assert_relative_eq!(intercept, 1.0, epsilon = 1e-12);
}

/// A vanished weight mass is singular.
#[test]
fn test_solve_wls_singular_no_weight() {
    assert_eq!(
        <f64 as WlsSolver>::solve_wls(0.0, 0.0, 0.0, 0.0, 0.0, 1e-12),
        None
    );
}

/// Zero weighted x-variance collapses to the constant weighted mean.
#[test]
fn test_solve_wls_zero_variance_flat_fit() {
    // All weighted mass at x = 2: W=3, Sx=6, Sy=6, Sxx=12, Sxy=12.
    let (slope, intercept) =
        <f64 as WlsSolver>::solve_wls(3.0, 6.0, 6.0, 12.0, 12.0, 1e-12).unwrap();

    assert_eq!(slope, 0.0);
    assert_relative_eq!(intercept, 2.0, epsilon = 1e-12);
}

// ============================================================================
// LinearFit Tests
// ============================================================================

/// Prediction evaluates the fitted line.
#[test]
fn test_linear_fit_predict() {
    let fit = LinearFit {
        slope: 2.0f64,
        intercept: -1.0,
    };

    assert_eq!(fit.predict(0.0), -1.0);
    assert_eq!(fit.predict(3.0), 5.0);
}

// ============================================================================
// Regression Context Tests
// ============================================================================

/// Fitting a window over collinear data reproduces the line at the center.
#[test]
fn test_context_fits_exact_line() {
    let x = [0.0f64, 1.0, 2.0, 3.0, 4.0];
    let y = [1.0f64, 3.0, 5.0, 7.0, 9.0];
    let mut weights = vec![0.0f64; 5];

    let mut context = RegressionContext {
        x: &x,
        y: &y,
        idx: 2,
        window: Window { left: 0, right: 4 },
        weights: &mut weights,
        weight_function: WeightFunction::Tricube,
    };

    let model = context.fit().unwrap();
    assert_relative_eq!(model.predict(2.0), 5.0, epsilon = 1e-10);
    assert_relative_eq!(model.slope, 2.0, epsilon = 1e-10);
}

/// Kernel weights are written to the scratch buffer: 1 at the center,
/// exactly 0 at the window radius, monotone in between.
#[test]
fn test_context_weight_profile() {
    let x = [0.0f64, 1.0, 2.0, 3.0, 4.0];
    let y = [0.5f64, 1.0, 0.8, 1.2, 0.9];
    let mut weights = vec![0.0f64; 5];

    let window = Window { left: 0, right: 4 };
    let mut context = RegressionContext {
        x: &x,
        y: &y,
        idx: 2,
        window,
        weights: &mut weights,
        weight_function: WeightFunction::Tricube,
    };
    context.fit().unwrap();

    assert_eq!(weights[2], 1.0);
    assert_eq!(weights[0], 0.0);
    assert_eq!(weights[4], 0.0);
    assert!(weights[1] > 0.0 && weights[1] < 1.0);
    assert_eq!(weights[1], weights[3]);
}

/// A zero-radius window is a degenerate-window error.
#[test]
fn test_context_degenerate_window() {
    let x = [0.0f64, 1.0, 2.0];
    let y = [1.0f64, 2.0, 3.0];
    let mut weights = vec![0.0f64; 3];

    let mut context = RegressionContext {
        x: &x,
        y: &y,
        idx: 1,
        window: Window { left: 1, right: 1 },
        weights: &mut weights,
        weight_function: WeightFunction::Tricube,
    };

    assert_eq!(context.fit(), Err(FitError::DegenerateWindow));
}

/// A two-member window fits exactly through the center's own value.
#[test]
fn test_context_two_member_window() {
    let x = [10.0f64, 20.0];
    let y = [3.0f64, 7.0];
    let mut weights = vec![0.0f64; 2];

    let mut context = RegressionContext {
        x: &x,
        y: &y,
        idx: 0,
        window: Window { left: 0, right: 1 },
        weights: &mut weights,
        weight_function: WeightFunction::Tricube,
    };

    // The non-center member sits at the radius and gets weight zero, so the
    // fit degenerates to the center's own value.
    let model = context.fit().unwrap();
    assert_relative_eq!(model.predict(10.0), 3.0, epsilon = 1e-12);
}
