//! # Scalar Math
//!
//! Deterministic scalar helpers shared by every vector and matrix routine.
//!
//! All functions are total: NaN propagates through arithmetic, but no helper
//! here panics or produces NaN from non-NaN input unless the math itself does
//! (e.g. `inverse_lerp` with equal bounds).

/// Scalar type used by every real-valued math type.
#[cfg(not(feature = "double-precision"))]
pub type Real = f32;

/// Scalar type used by every real-valued math type.
#[cfg(feature = "double-precision")]
pub type Real = f64;

#[cfg(not(feature = "double-precision"))]
mod consts {
    pub use std::f32::consts::{PI, TAU};
}

#[cfg(feature = "double-precision")]
mod consts {
    pub use std::f64::consts::{PI, TAU};
}

/// Archimedes' constant.
pub const PI: Real = consts::PI;

/// Full turn in radians.
pub const TAU: Real = consts::TAU;

/// Positive infinity.
pub const INF: Real = Real::INFINITY;

/// Tolerance used by the approximate comparisons.
pub const EPSILON: Real = 1e-6;

/// Absolute value.
#[inline]
#[must_use]
pub fn abs(s: Real) -> Real {
    s.abs()
}

/// Returns `-1`, `0` or `1` matching the sign of `s`.
///
/// Unlike [`Real::signum`], zero maps to zero. NaN also maps to zero.
#[inline]
#[must_use]
pub fn sign(s: Real) -> Real {
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Integer sign.
#[inline]
#[must_use]
pub const fn sign_i(s: i32) -> i32 {
    s.signum()
}

/// Clamps `value` into `[min, max]`.
///
/// The lower bound is tested first, so an inverted range (`min > max`)
/// returns `min` for every value below it.
#[inline]
#[must_use]
pub fn clamp(value: Real, min: Real, max: Real) -> Real {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Integer variant of [`clamp`] with the same bound order.
#[inline]
#[must_use]
pub const fn clamp_i(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation, unclamped: weights outside `[0, 1]` extrapolate.
///
/// Written as a two-sided blend so `lerp(a, b, 0.0) == a` and
/// `lerp(a, b, 1.0) == b` hold exactly for finite inputs.
#[inline]
#[must_use]
pub fn lerp(from: Real, to: Real, weight: Real) -> Real {
    from * (1.0 - weight) + to * weight
}

/// Returns the weight that [`lerp`] would need to produce `weight` from
/// `from` and `to`.
#[inline]
#[must_use]
pub fn inverse_lerp(from: Real, to: Real, weight: Real) -> Real {
    (weight - from) / (to - from)
}

/// Maps `value` from one range onto another.
#[inline]
#[must_use]
pub fn remap(value: Real, in_from: Real, in_to: Real, out_from: Real, out_to: Real) -> Real {
    lerp(out_from, out_to, inverse_lerp(in_from, in_to, value))
}

/// Interpolates between two angles along the shortest arc.
#[inline]
#[must_use]
pub fn lerp_angle(from: Real, to: Real, weight: Real) -> Real {
    let difference = (to - from) % TAU;
    let distance = ((2.0 * difference) % TAU) - difference;
    from + distance * weight
}

/// Catmull-Rom style cubic interpolation between `from` and `to`.
#[inline]
#[must_use]
pub fn cubic_interpolate(from: Real, to: Real, pre: Real, post: Real, weight: Real) -> Real {
    0.5 * ((from * 2.0)
        + (-pre + to) * weight
        + (2.0 * pre - 5.0 * from + 4.0 * to - post) * (weight * weight)
        + (-pre + 3.0 * from - 3.0 * to + post) * (weight * weight * weight))
}

/// Cubic interpolation that takes the time of every sample into account,
/// giving smoother results when samples are not evenly spaced.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn cubic_interpolate_in_time(
    from: Real,
    to: Real,
    pre: Real,
    post: Real,
    weight: Real,
    to_t: Real,
    pre_t: Real,
    post_t: Real,
) -> Real {
    let t = lerp(0.0, to_t, weight);
    let a1 = lerp(pre, from, if pre_t == 0.0 { 0.0 } else { (t - pre_t) / -pre_t });
    let a2 = lerp(from, to, if to_t == 0.0 { 0.5 } else { t / to_t });
    let a3 = lerp(
        to,
        post,
        if post_t - to_t == 0.0 { 1.0 } else { (t - to_t) / (post_t - to_t) },
    );
    let b1 = lerp(
        a1,
        a2,
        if to_t - pre_t == 0.0 { 0.0 } else { (t - pre_t) / (to_t - pre_t) },
    );
    let b2 = lerp(a2, a3, if post_t == 0.0 { 1.0 } else { t / post_t });
    lerp(b1, b2, if to_t == 0.0 { 0.5 } else { t / to_t })
}

/// Evaluates a cubic Bezier curve at `t`.
#[inline]
#[must_use]
pub fn bezier_interpolate(start: Real, control_1: Real, control_2: Real, end: Real, t: Real) -> Real {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let omt3 = omt2 * omt;
    let t2 = t * t;
    let t3 = t2 * t;
    start * omt3 + control_1 * omt2 * t * 3.0 + control_2 * omt * t2 * 3.0 + end * t3
}

/// Derivative of a cubic Bezier curve at `t`.
#[inline]
#[must_use]
pub fn bezier_derivative(start: Real, control_1: Real, control_2: Real, end: Real, t: Real) -> Real {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let t2 = t * t;
    (control_1 - start) * 3.0 * omt2
        + (control_2 - control_1) * 6.0 * omt * t
        + (end - control_2) * 3.0 * t2
}

/// Moves `from` toward `to` by at most `delta`.
#[inline]
#[must_use]
pub fn move_toward(from: Real, to: Real, delta: Real) -> Real {
    if (to - from).abs() <= delta {
        to
    } else {
        from + sign(to - from) * delta
    }
}

/// Modulo whose result takes the sign of the divisor.
///
/// `pos_mod(-20.0, 7.0) == 1.0`, whereas `-20.0 % 7.0 == -6.0`.
#[inline]
#[must_use]
pub fn pos_mod(a: Real, b: Real) -> Real {
    let mut c = a % b;
    if (c < 0.0 && b > 0.0) || (c > 0.0 && b < 0.0) {
        c += b;
    }
    c
}

/// Integer variant of [`pos_mod`].
///
/// # Panics
///
/// Panics if `b` is zero, like the `%` operator.
#[inline]
#[must_use]
pub const fn pos_mod_i(a: i32, b: i32) -> i32 {
    let mut c = a % b;
    if (c < 0 && b > 0) || (c > 0 && b < 0) {
        c += b;
    }
    c
}

/// Rounds `s` to the nearest multiple of `step`. A zero step returns `s`.
#[inline]
#[must_use]
pub fn snapped(s: Real, step: Real) -> Real {
    if step != 0.0 {
        (s / step + 0.5).floor() * step
    } else {
        s
    }
}

/// Integer variant of [`snapped`]; rounding happens in `f64`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snapped_i(s: i32, step: i32) -> i32 {
    if step != 0 {
        ((f64::from(s) / f64::from(step) + 0.5).floor() * f64::from(step)) as i32
    } else {
        s
    }
}

/// Wraps `value` into `[min, max)`.
#[inline]
#[must_use]
pub fn wrap(value: Real, min: Real, max: Real) -> Real {
    let range = max - min;
    if is_zero_approx(range) {
        return min;
    }
    let result = value - range * ((value - min) / range).floor();
    if is_equal_approx(result, max) {
        min
    } else {
        result
    }
}

/// Approximate equality with a tolerance that scales with the magnitude of
/// `a`, floored at [`EPSILON`].
#[inline]
#[must_use]
pub fn is_equal_approx(a: Real, b: Real) -> bool {
    // Handles infinities of the same sign.
    if a == b {
        return true;
    }
    let mut tolerance = EPSILON * a.abs();
    if tolerance < EPSILON {
        tolerance = EPSILON;
    }
    (a - b).abs() < tolerance
}

/// Returns `true` if `s` is within [`EPSILON`] of zero.
#[inline]
#[must_use]
pub fn is_zero_approx(s: Real) -> bool {
    s.abs() < EPSILON
}

/// Returns `true` if `s` is neither NaN nor infinite.
#[inline]
#[must_use]
pub fn is_finite(s: Real) -> bool {
    s.is_finite()
}

/// Sine and cosine of one angle, computed together.
#[inline]
#[must_use]
pub fn sin_cos(angle: Real) -> (Real, Real) {
    angle.sin_cos()
}

/// Degrees to radians.
#[inline]
#[must_use]
pub fn deg_to_rad(deg: Real) -> Real {
    deg * (PI / 180.0)
}

/// Radians to degrees.
#[inline]
#[must_use]
pub fn rad_to_deg(rad: Real) -> Real {
    rad * (180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_is_ternary() {
        assert_eq!(sign(-3.5), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(2.0), 1.0);
        assert_eq!(sign(Real::NAN), 0.0);
        assert_eq!(sign_i(-9), -1);
    }

    #[test]
    fn test_clamp_checks_lower_bound_first() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Inverted range: min wins below it, max wins above it.
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp(15.0, 10.0, 0.0), 0.0);
        assert_eq!(clamp_i(7, 1, 3), 3);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let cases = [(1.0e20, 1.0), (0.1, 0.7), (-3.25, 1.0e-8), (5.0, 5.0)];
        for (a, b) in cases {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), -10.0);
    }

    #[test]
    fn test_pos_mod_takes_divisor_sign() {
        assert_eq!(pos_mod(10.0, 7.0), 3.0);
        assert_eq!(pos_mod(-20.0, 7.0), 1.0);
        assert_eq!(pos_mod(20.0, -7.0), -1.0);
        assert_eq!(pos_mod_i(-20, 7), 1);
        assert_eq!(pos_mod_i(-14, 7), 0);
    }

    #[test]
    fn test_snapped() {
        assert_eq!(snapped(7.3, 0.5), 7.5);
        assert_eq!(snapped(-2.2, 1.0), -2.0);
        assert_eq!(snapped(3.3, 0.0), 3.3);
        assert_eq!(snapped_i(17, 5), 15);
        assert_eq!(snapped_i(18, 5), 20);
        assert_eq!(snapped_i(4, 0), 4);
    }

    #[test]
    fn test_approx_comparisons() {
        assert!(is_equal_approx(1.0, 1.0 + 1e-7));
        assert!(!is_equal_approx(1.0, 1.001));
        assert!(is_equal_approx(INF, INF));
        assert!(!is_equal_approx(INF, -INF));
        assert!(is_zero_approx(1e-7));
        assert!(!is_zero_approx(1e-3));
    }

    #[test]
    fn test_curves_hit_endpoints() {
        assert!(is_equal_approx(cubic_interpolate(1.0, 2.0, 0.0, 3.0, 0.0), 1.0));
        assert!(is_equal_approx(cubic_interpolate(1.0, 2.0, 0.0, 3.0, 1.0), 2.0));
        assert!(is_equal_approx(bezier_interpolate(0.0, 1.0, 2.0, 3.0, 0.5), 1.5));
        assert!(is_equal_approx(bezier_derivative(0.0, 1.0, 2.0, 3.0, 0.5), 3.0));
        assert!(is_equal_approx(
            cubic_interpolate_in_time(1.0, 2.0, 0.0, 3.0, 1.0, 1.0, -1.0, 2.0),
            2.0
        ));
    }

    #[test]
    fn test_lerp_angle_takes_short_path() {
        let result = lerp_angle(deg_to_rad(350.0), deg_to_rad(10.0), 0.5);
        assert!((result - TAU).abs() < 1e-4);
    }

    #[test]
    fn test_move_toward_and_wrap() {
        assert_eq!(move_toward(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_toward(0.0, 2.0, 3.0), 2.0);
        assert_eq!(move_toward(5.0, 0.0, 1.0), 4.0);
        assert!(is_equal_approx(wrap(370.0, 0.0, 360.0), 10.0));
        assert!(is_equal_approx(wrap(-10.0, 0.0, 360.0), 350.0));
    }
}
