//! Easing curves and motion envelopes.
//!
//! Inputs are clamped to [0, 1] unless noted; outputs of the `ease_*`
//! family map 0 to 0 and 1 to 1.

use std::f64::consts::PI;

#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `0.5 - 0.5 cos(πx)`.
pub fn ease_in_out_cosine(x: f64) -> f64 {
    0.5 - 0.5 * (PI * clamp01(x)).cos()
}

pub fn ease_in_out_cubic(x: f64) -> f64 {
    let x = clamp01(x);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

pub fn ease_out_cubic(x: f64) -> f64 {
    1.0 - (1.0 - clamp01(x)).powi(3)
}

/// Quintic smootherstep `6x⁵ - 15x⁴ + 10x³`: zero velocity and
/// acceleration at both ends.
pub fn smootherstep(x: f64) -> f64 {
    let x = clamp01(x);
    x * x * x * (x * (6.0 * x - 15.0) + 10.0)
}

/// Damped oscillation `sin(2.5πx)·e^{-3x}` used for spring settles.
pub fn damped_spring(x: f64) -> f64 {
    let x = clamp01(x);
    (2.5 * PI * x).sin() * (-3.0 * x).exp()
}

/// Wave burst `exp(-1.2t)·sin(2π·0.8·t)·sin(πt)` over `t` in [0, 1]
/// seconds, zero outside.
pub fn wave_burst(t: f64) -> f64 {
    if !(0.0..=1.0).contains(&t) {
        return 0.0;
    }
    (-1.2 * t).exp() * (2.0 * PI * 0.8 * t).sin() * (PI * t).sin()
}

/// `sin(πx)` on the open interval (0, 1), exactly zero elsewhere.
pub fn half_sine(x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 || x.is_nan() {
        0.0
    } else {
        (PI * x).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        for f in [ease_in_out_cosine, ease_in_out_cubic, ease_out_cubic, smootherstep] {
            assert_relative_eq!(f(0.0), 0.0, epsilon = 1e-12);
            assert_relative_eq!(f(1.0), 1.0, epsilon = 1e-12);
            assert_relative_eq!(f(-3.0), 0.0, epsilon = 1e-12);
            assert_relative_eq!(f(7.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_monotone() {
        for f in [ease_in_out_cosine, ease_in_out_cubic, ease_out_cubic, smootherstep] {
            let mut prev = f(0.0);
            for i in 1..=100 {
                let v = f(i as f64 / 100.0);
                assert!(v >= prev - 1e-12);
                prev = v;
            }
        }
    }

    #[test]
    fn test_symmetric_midpoints() {
        assert_relative_eq!(ease_in_out_cosine(0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(ease_in_out_cubic(0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(smootherstep(0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_wave_burst_window() {
        assert_eq!(wave_burst(-0.1), 0.0);
        assert_eq!(wave_burst(1.2), 0.0);
        assert_relative_eq!(wave_burst(0.0), 0.0);
        assert!(wave_burst(0.25) > 0.0);
        for i in 0..=100 {
            assert!(wave_burst(i as f64 / 100.0).abs() < 1.0);
        }
    }

    #[test]
    fn test_spring_decays() {
        assert_relative_eq!(damped_spring(0.0), 0.0);
        assert!(damped_spring(0.2) > damped_spring(0.95).abs());
    }

    #[test]
    fn test_half_sine_exact_zeros() {
        assert_eq!(half_sine(0.0), 0.0);
        assert_eq!(half_sine(1.0), 0.0);
        assert_relative_eq!(half_sine(0.5), 1.0);
    }
}
