//! Dimming curves.
//!
//! Both curves return a multiplicative factor in `(0, 1]` for any scale in
//! `[0, 1)`.

use crate::common::constants::{NIGHT_CURVE_SIGMA, TWILIGHT_CONTROL_POINTS};

/// Night dimming at centered progress `p` (`-1` at sunset, `1` at sunrise).
///
/// `1 - scale * exp(-p^2 / (2 sigma^2))`: deepest at the middle of the night,
/// symmetric around it.
pub fn night_factor(progress: f64, scale: f64) -> f64 {
    let p = progress.clamp(-1.0, 1.0);
    let gaussian = (-(p * p) / (2.0 * NIGHT_CURVE_SIGMA * NIGHT_CURVE_SIGMA)).exp();
    1.0 - scale * gaussian
}

/// Twilight dimming at `t` in `[0, 1]` through the window.
pub fn twilight_factor(t: f64, scale: f64) -> f64 {
    let y = bezier_y(t.clamp(0.0, 1.0), &TWILIGHT_CONTROL_POINTS).clamp(0.0, 1.0);
    1.0 - scale * y
}

/// Evaluate a one-dimensional Bezier curve with Bernstein polynomials.
pub fn bezier_y(t: f64, points: &[f64]) -> f64 {
    let Some(degree) = points.len().checked_sub(1) else {
        return 0.0;
    };
    let u = 1.0 - t;

    let mut coefficient = 1.0;
    let mut sum = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            // C(n, i) = C(n, i - 1) * (n - i + 1) / i
            coefficient = coefficient * (degree - i + 1) as f64 / i as f64;
        }
        sum += coefficient * u.powi((degree - i) as i32) * t.powi(i as i32) * point;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_endpoints_match_control_points() {
        assert_eq!(bezier_y(0.0, &TWILIGHT_CONTROL_POINTS), 0.0);
        assert!(bezier_y(1.0, &TWILIGHT_CONTROL_POINTS).abs() < 1e-12);
        assert!((bezier_y(0.5, &[0.0, 1.0]) - 0.5).abs() < 1e-12);
        assert_eq!(bezier_y(0.3, &[]), 0.0);
    }

    #[test]
    fn test_bezier_with_constant_points_is_constant() {
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            assert!((bezier_y(t, &[1.0; 11]) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_night_factor_reference_values() {
        assert!((night_factor(0.0, 0.95) - 0.05).abs() < 1e-9);
        let edge = night_factor(1.0, 0.95);
        assert!(edge > 0.97 && edge < 0.98, "edge factor {edge}");
        assert_eq!(night_factor(0.4, 0.95), night_factor(-0.4, 0.95));
    }

    #[test]
    fn test_twilight_factor_reference_values() {
        assert_eq!(twilight_factor(0.0, 0.9), 1.0);
        assert!((twilight_factor(1.0, 0.9) - 1.0).abs() < 1e-9);
        assert!((twilight_factor(0.5, 0.9) - 0.1).abs() < 1e-3);
        // One minute into a ten hour window the drop is already visible.
        assert!((twilight_factor(1.0 / 600.0, 0.9) - 0.98216).abs() < 1e-4);
    }

    #[test]
    fn test_factors_stay_positive_at_high_scale() {
        for step in 0..=1000 {
            let t = step as f64 / 1000.0;
            assert!(twilight_factor(t, 0.999) > 0.0);
            assert!(night_factor(t * 2.0 - 1.0, 0.999) > 0.0);
        }
    }
}
