//! Easing functions for animation progress values.
//!
//! Each tween maps a normalized progress `x` in `[0, 1]` to a shaped value that
//! drives color intensity or wedge coverage. All of them are monotonic on
//! `[0, 1]` except the two pulses, [`back_and_forth`] and [`blink`].
//!
//! ```text
//! linear          x
//! ease            0.5 - 0.5 cos(pi x)          smooth start and stop
//! ease_out        sin(pi x / 2)                fast start
//! ease_in         1 - ease_out(1 - x)          fast finish
//! distinv         1 / sqrt(1 + (6 (1 - x))^2)  slow rise, snaps to 1 at x = 1
//! ramp            rescaled distinv             0 at x = 0, 1 at x = 1
//! back_and_forth  1 - |1 - 2x|                 triangle wave
//! blink           sin(pi x)                    smooth pulse
//! ```

use std::f64::consts::PI;

/// A shaping function applied to a progress value.
pub type Tween = fn(f64) -> f64;

#[inline]
pub fn linear(x: f64) -> f64 {
    x
}

#[inline]
pub fn ease(x: f64) -> f64 {
    0.5 - 0.5 * (PI * x).cos()
}

#[inline]
pub fn ease_out(x: f64) -> f64 {
    (PI * x / 2.0).sin()
}

#[inline]
pub fn ease_in(x: f64) -> f64 {
    1.0 - ease_out(1.0 - x)
}

/// Inverse-distance curve used to size the pass spot.
///
/// Stays small for most of the range and flares sharply as `x` approaches 1.
#[inline]
pub fn distinv(x: f64) -> f64 {
    let y = 6.0 * (1.0 - x);
    1.0 / y.mul_add(y, 1.0).sqrt()
}

/// Rescaled inverse-distance curve, 1 at `x = 1`.
#[inline]
pub fn ramp(x: f64) -> f64 {
    let y = 4.898_979 * (1.0 - x);
    (1.0 / y.mul_add(y, 1.0).sqrt() - 0.2) / 0.8
}

#[inline]
pub fn back_and_forth(x: f64) -> f64 {
    1.0 - (1.0 - 2.0 * x).abs()
}

/// Half sine pulse, 0 at both ends and 1 in the middle.
#[inline]
pub fn blink(x: f64) -> f64 {
    (PI * x).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn samples() -> impl Iterator<Item = f64> {
        (0..=100).map(|i| f64::from(i) / 100.0)
    }

    #[test]
    fn test_linear_identity() {
        for x in samples() {
            assert_eq!(linear(x), x);
        }
    }

    #[test]
    fn test_ease_endpoints() {
        assert!(ease(0.0).abs() < EPS);
        assert!((ease(1.0) - 1.0).abs() < EPS);
        assert!((ease(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_ease_monotonic() {
        let mut prev = ease(0.0);
        for x in samples() {
            let y = ease(x);
            assert!(y >= prev - EPS, "ease decreased at {x}");
            prev = y;
        }
    }

    #[test]
    fn test_ease_in_mirrors_ease_out() {
        for x in samples() {
            assert!((ease_in(x) - (1.0 - ease_out(1.0 - x))).abs() < EPS);
        }
        assert!(ease_in(0.0).abs() < EPS);
        assert!((ease_out(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_distinv_shape() {
        // 1 / sqrt(37) at the start, exactly 1 at the end
        assert!((distinv(0.0) - 1.0 / 37f64.sqrt()).abs() < EPS);
        assert!((distinv(1.0) - 1.0).abs() < EPS);
        // Still small halfway through, flares over the last tenth
        assert!(distinv(0.5) < 0.35);
        assert!(distinv(0.9) > 0.85);
    }

    #[test]
    fn test_ramp_shape() {
        assert!((ramp(1.0) - 1.0).abs() < EPS);
        // 4.898979 = sqrt(24): 1/sqrt(25) = 0.2 maps to zero
        assert!(ramp(0.0).abs() < 1e-6);
        assert!(ramp(0.5) > 0.0);
    }

    #[test]
    fn test_ramp_is_monotonic() {
        let mut previous = ramp(0.0);
        for i in 1..=100 {
            let y = ramp(f64::from(i) / 100.0);
            assert!(y >= previous);
            assert!(y > -1e-6 && y <= 1.0 + EPS);
            previous = y;
        }
    }

    #[test]
    fn test_back_and_forth_triangle() {
        assert!(back_and_forth(0.0).abs() < EPS);
        assert!((back_and_forth(0.5) - 1.0).abs() < EPS);
        assert!(back_and_forth(1.0).abs() < EPS);
        assert!((back_and_forth(0.25) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_blink_pulse() {
        assert!(blink(0.0).abs() < EPS);
        assert!((blink(0.5) - 1.0).abs() < EPS);
        assert!(blink(1.0).abs() < EPS);
    }

    #[test]
    fn test_tween_as_fn_pointer() {
        let curves: [Tween; 3] = [linear, ease, distinv];
        for f in curves {
            assert!((f(1.0) - 1.0).abs() < EPS);
        }
    }
}
