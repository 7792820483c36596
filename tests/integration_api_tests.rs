//! Integration tests for the public smoothing API.
//!
//! These tests exercise the builder-to-result flow end to end, including the
//! conformance scenario: a dendrochronology-sized series smoothed at span
//! 0.1 must match an independent rank-based reference implementation.

use approx::assert_relative_eq;

use locreg::prelude::*;

// ============================================================================
// Test Data
// ============================================================================

/// Deterministic ring-width-like series: a slow growth trend with faster
/// pseudo-noise oscillations, indexed by year.
fn ring_width_series(n: usize, start_year: f64) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| start_year + i as f64).collect();
    let y: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            1.5 + 0.8 * (t * 0.05).sin() + 0.3 * (t * 0.71).sin() + 0.2 * (t * 1.3).cos()
        })
        .collect();
    (x, y)
}

/// Independent reference: rank-based k-nearest selection (stable sort over
/// distances), tricube weights, direct weighted normal equations.
fn reference_loess_at(x: &[f64], y: &[f64], center: usize, k: usize) -> f64 {
    let x_center = x[center];

    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&a, &b| {
        (x[a] - x_center)
            .abs()
            .partial_cmp(&(x[b] - x_center).abs())
            .unwrap()
    });
    let chosen = &order[..k];

    let radius = chosen
        .iter()
        .map(|&j| (x[j] - x_center).abs())
        .fold(0.0f64, f64::max);

    let (mut sw, mut swx, mut swy, mut swxx, mut swxy) = (0.0f64, 0.0, 0.0, 0.0, 0.0);
    for &j in chosen {
        let u = (x[j] - x_center).abs() / radius;
        let w = if u >= 1.0 {
            0.0
        } else {
            let t = 1.0 - u * u * u;
            (t * t * t).clamp(0.0, 1.0)
        };
        sw += w;
        swx += w * x[j];
        swy += w * y[j];
        swxx += w * x[j] * x[j];
        swxy += w * x[j] * y[j];
    }

    let variance = swxx - swx * swx / sw;
    if variance <= 1e-9 {
        return swy / sw;
    }
    let covariance = swxy - swx * swy / sw;
    let slope = covariance / variance;
    let intercept = swy / sw - slope * swx / sw;
    intercept + slope * x_center
}

// ============================================================================
// Builder Behavior
// ============================================================================

#[test]
fn test_default_configuration() {
    let model = Smoother::<f64>::new().build().unwrap();
    assert_eq!(model.spans(), &[0.67]);
}

#[test]
fn test_duplicate_span_rejected() {
    let result = Smoother::<f64>::new().span(0.3).span(0.5).build();
    assert!(matches!(
        result,
        Err(SmoothError::DuplicateParameter { .. })
    ));

    let result = Smoother::<f64>::new().span(0.3).spans(&[0.5]).build();
    assert!(matches!(
        result,
        Err(SmoothError::DuplicateParameter { .. })
    ));
}

#[test]
fn test_invalid_spans_rejected_at_build() {
    assert!(matches!(
        Smoother::<f64>::new().span(0.0).build(),
        Err(SmoothError::InvalidSpan(_))
    ));
    assert!(matches!(
        Smoother::<f64>::new().span(1.2).build(),
        Err(SmoothError::InvalidSpan(_))
    ));
    assert!(matches!(
        Smoother::<f64>::new().spans(&[]).build(),
        Err(SmoothError::EmptySpanSet)
    ));
}

// ============================================================================
// Fit Behavior
// ============================================================================

#[test]
fn test_smoothing_a_line_returns_the_line() {
    let x: Vec<f64> = (0..50).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&xi| 0.5 * xi - 3.0).collect();

    let model = Smoother::new().span(0.3).build().unwrap();
    let result = model.fit(&x, &y).unwrap();

    assert!(result.is_complete());
    for (p, &yi) in result.predictions.iter().zip(&y) {
        assert_relative_eq!(p.value, yi, epsilon = 1e-9);
    }
}

#[test]
fn test_prediction_cardinality_over_span_sweep() {
    let (x, y) = ring_width_series(120, 1200.0);
    let spans = [0.1, 0.25, 0.5, 1.0];

    let model = Smoother::new().spans(&spans).build().unwrap();
    let result = model.fit(&x, &y).unwrap();

    assert_eq!(
        result.predictions.len() + result.failures.len(),
        spans.len() * x.len()
    );
    assert!(result.is_complete());

    for &span in &spans {
        assert_eq!(result.predictions_for(span).count(), x.len());
    }
}

#[test]
fn test_window_sizes_grow_with_span() {
    let (x, y) = ring_width_series(200, 1000.0);

    let model = Smoother::new().spans(&[0.05, 0.1, 0.4, 1.0]).build().unwrap();
    let result = model.fit(&x, &y).unwrap();

    assert_eq!(result.window_sizes, vec![10, 20, 80, 200]);
    for pair in result.window_sizes.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn test_two_point_series_full_span() {
    // k = 2 satisfies the window-size minimum; each center's non-center
    // member carries zero weight, so each fit passes through its own point.
    let x = [0.0f64, 1.0];
    let y = [5.0f64, -2.0];

    let model = Smoother::new().span(1.0).build().unwrap();
    let result = model.fit(&x, &y).unwrap();

    assert!(result.is_complete());
    assert_relative_eq!(result.predictions[0].value, 5.0, epsilon = 1e-12);
    assert_relative_eq!(result.predictions[1].value, -2.0, epsilon = 1e-12);
}

// ============================================================================
// Input Rejection
// ============================================================================

#[test]
fn test_fit_rejects_bad_series() {
    let model = Smoother::new().span(0.5).build().unwrap();

    assert!(matches!(
        model.fit(&[], &[]),
        Err(SmoothError::EmptyInput)
    ));
    assert!(matches!(
        model.fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(SmoothError::MismatchedInputs { .. })
    ));
    assert!(matches!(
        model.fit(&[1.0, 3.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(SmoothError::UnsortedX { index: 2 })
    ));
    assert!(matches!(
        model.fit(&[1.0, 2.0, f64::NAN], &[1.0, 2.0, 3.0]),
        Err(SmoothError::InvalidNumericValue(_))
    ));
}

#[test]
fn test_fit_rejects_undersized_windows() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let y = x.clone();

    let model = Smoother::new().span(0.1).build().unwrap();
    assert!(matches!(
        model.fit(&x, &y),
        Err(SmoothError::WindowTooSmall { window: 1, min: 2 })
    ));
}

// ============================================================================
// Traces
// ============================================================================

#[test]
fn test_traces_via_public_api() {
    let (x, y) = ring_width_series(60, 1400.0);

    let model = Smoother::new()
        .span(0.2)
        .return_window_traces()
        .build()
        .unwrap();
    let result = model.fit(&x, &y).unwrap();

    assert!(result.has_traces());
    let traces = result.traces.as_ref().unwrap();
    let k = result.window_sizes[0];
    assert_eq!(traces.len(), k * x.len());

    for row in traces {
        assert_eq!(row.distance, (row.x - row.center).abs());
        assert!((0.0..=1.0).contains(&row.weight));
    }
}

// ============================================================================
// Conformance
// ============================================================================

/// The classic scenario: ~390 years of ring widths at span 0.1 (k = 39).
/// Every prediction must match the independent rank-based reference.
#[test]
fn test_conformance_against_reference() {
    let n = 390;
    let (x, y) = ring_width_series(n, 1200.0);

    let model = Smoother::new().span(0.1).build().unwrap();
    let result = model.fit(&x, &y).unwrap();

    assert!(result.is_complete());
    assert_eq!(result.window_sizes, vec![39]);

    for (i, p) in result.predictions.iter().enumerate() {
        let expected = reference_loess_at(&x, &y, i, 39);
        assert_relative_eq!(p.value, expected, epsilon = 1e-9);
    }

    // Spot-check a fixed interior year; index 300 is year 1500 for a
    // series starting at 1200.
    let year_1500 = result
        .predictions
        .iter()
        .find(|p| p.center == 1500.0)
        .unwrap();
    let expected = reference_loess_at(&x, &y, 300, 39);
    assert_relative_eq!(year_1500.value, expected, epsilon = 1e-9);
}

/// An even window size agrees with the reference too (left-preferring ties).
#[test]
fn test_conformance_even_window() {
    let n = 250;
    let (x, y) = ring_width_series(n, 1100.0);

    let model = Smoother::new().span(0.2).build().unwrap();
    let result = model.fit(&x, &y).unwrap();
    assert_eq!(result.window_sizes, vec![50]);

    for (i, p) in result.predictions.iter().enumerate() {
        let expected = reference_loess_at(&x, &y, i, 50);
        assert_relative_eq!(p.value, expected, epsilon = 1e-9);
    }
}

/// Repeated fits over identical input are bit-identical.
#[test]
fn test_reproducibility() {
    let (x, y) = ring_width_series(390, 1100.0);

    let model = Smoother::new().span(0.1).build().unwrap();
    let first = model.fit(&x, &y).unwrap();
    let second = model.fit(&x, &y).unwrap();

    assert_eq!(first, second);
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_result_display() {
    let (x, y) = ring_width_series(40, 1300.0);

    let model = Smoother::new().spans(&[0.25, 0.5]).build().unwrap();
    let result = model.fit(&x, &y).unwrap();

    let rendered = format!("{result}");
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("Data points: 40"));
    assert!(rendered.contains("Smoothed Data:"));
}

// ============================================================================
// Parallel Execution
// ============================================================================

/// The parallel path is a pure fan-out: identical output, any thread count.
#[cfg(feature = "parallel")]
#[test]
fn test_parallel_fit_matches_sequential() {
    let (x, y) = ring_width_series(300, 1100.0);

    let sequential = Smoother::new()
        .spans(&[0.1, 0.3])
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();
    let parallel = Smoother::new()
        .spans(&[0.1, 0.3])
        .parallel(true)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    assert_eq!(sequential, parallel);
}
