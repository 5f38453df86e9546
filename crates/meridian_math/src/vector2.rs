//! 2D real vector.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::debug_check_normalized;
use crate::mathf::{self, Real};
use crate::ops::{impl_tuple_display, impl_vector_index, impl_vector_ops};
use crate::{Axis, Vector2i};

/// 2D vector of [`Real`] components.
///
/// Layout is exactly two sequential reals. Ordering is lexicographic over
/// `(x, y)` and exists for sorting only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: Real,
    /// Y component
    pub y: Real,
}

impl_vector_ops!(Vector2, Real, { x, y });
impl_vector_index!(Vector2, Real, 2, { 0 => x, 1 => y });
impl_tuple_display!(Vector2, { x, y });

impl Vector2 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// All components one
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// All components positive infinity
    pub const INF: Self = Self::new(mathf::INF, mathf::INF);
    /// Up in 2D screen space (negative Y)
    pub const UP: Self = Self::new(0.0, -1.0);
    /// Down in 2D screen space
    pub const DOWN: Self = Self::new(0.0, 1.0);
    /// Right
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    /// Left
    pub const LEFT: Self = Self::new(-1.0, 0.0);

    /// Creates a new Vector2
    #[inline]
    #[must_use]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians from the X axis.
    #[must_use]
    pub fn from_angle(angle: Real) -> Self {
        let (sin, cos) = mathf::sin_cos(angle);
        Self::new(cos, sin)
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [Real; 2] {
        [self.x, self.y]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [Real; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    /// Normalizes in place. A zero vector stays zero.
    pub fn normalize(&mut self) {
        let length_squared = self.length_squared();
        if length_squared == 0.0 {
            self.x = 0.0;
            self.y = 0.0;
        } else {
            let length = length_squared.sqrt();
            self.x /= length;
            self.y /= length;
        }
    }

    /// Unit-length copy; the zero vector maps to itself.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut v = self;
        v.normalize();
        v
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Angle from the X axis in radians, in `[-PI, PI]`.
    #[must_use]
    pub fn angle(self) -> Real {
        self.y.atan2(self.x)
    }

    /// Signed angle to another vector.
    #[must_use]
    pub fn angle_to(self, to: Self) -> Real {
        self.cross(to).atan2(self.dot(to))
    }

    /// Angle of the line from this point to `to`.
    #[must_use]
    pub fn angle_to_point(self, to: Self) -> Real {
        (to.y - self.y).atan2(to.x - self.x)
    }

    /// Ratio `x / y`.
    #[must_use]
    pub fn aspect(self) -> Real {
        self.x / self.y
    }

    /// Reflection off a plane with the given normal, pointing away from it.
    #[must_use]
    pub fn bounce(self, normal: Self) -> Self {
        -self.reflect(normal)
    }

    /// Component-wise ceiling.
    #[must_use]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    /// Component-wise floor.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Component-wise rounding, half away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Component-wise clamp against vector bounds.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            mathf::clamp(self.x, min.x, max.x),
            mathf::clamp(self.y, min.y, max.y),
        )
    }

    /// Component-wise clamp against scalar bounds.
    #[must_use]
    pub fn clampf(self, min: Real, max: Real) -> Self {
        Self::new(mathf::clamp(self.x, min, max), mathf::clamp(self.y, min, max))
    }

    /// 2D cross product (the Z of the 3D cross product).
    #[must_use]
    pub fn cross(self, with: Self) -> Real {
        self.x * with.y - self.y * with.x
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, with: Self) -> Real {
        self.x * with.x + self.y * with.y
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> Real {
        self.x * self.x + self.y * self.y
    }

    /// Length
    #[must_use]
    pub fn length(self) -> Real {
        self.length_squared().sqrt()
    }

    /// Distance squared to another point (avoids sqrt)
    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> Real {
        (self - to).length_squared()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance_to(self, to: Self) -> Real {
        (self - to).length()
    }

    /// Normalized direction from this point to `to`.
    #[must_use]
    pub fn direction_to(self, to: Self) -> Self {
        (to - self).normalized()
    }

    /// Component-wise reciprocal.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y)
    }

    /// Returns `true` if no component is NaN or infinite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if the length is one within [`mathf::EPSILON`].
    #[must_use]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() < mathf::EPSILON
    }

    /// Component-wise [`mathf::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        mathf::is_equal_approx(self.x, other.x) && mathf::is_equal_approx(self.y, other.y)
    }

    /// Component-wise [`mathf::is_zero_approx`].
    #[must_use]
    pub fn is_zero_approx(self) -> bool {
        mathf::is_zero_approx(self.x) && mathf::is_zero_approx(self.y)
    }

    /// Linear interpolation toward `to`, unclamped.
    #[must_use]
    pub fn lerp(self, to: Self, weight: Real) -> Self {
        Self::new(
            mathf::lerp(self.x, to.x, weight),
            mathf::lerp(self.y, to.y, weight),
        )
    }

    /// Spherical interpolation: rotates toward `to` while lerping the length.
    ///
    /// Falls back to [`lerp`](Self::lerp) when either vector has zero length,
    /// since there is no angle to rotate through.
    #[must_use]
    pub fn slerp(self, to: Self, weight: Real) -> Self {
        let start_length_squared = self.length_squared();
        let end_length_squared = to.length_squared();
        if start_length_squared == 0.0 || end_length_squared == 0.0 {
            return self.lerp(to, weight);
        }
        let start_length = start_length_squared.sqrt();
        let result_length = mathf::lerp(start_length, end_length_squared.sqrt(), weight);
        let angle = self.angle_to(to);
        self.rotated(angle * weight) * (result_length / start_length)
    }

    /// Cubic interpolation between this vector and `b`.
    #[must_use]
    pub fn cubic_interpolate(self, b: Self, pre_a: Self, post_b: Self, weight: Real) -> Self {
        Self::new(
            mathf::cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            mathf::cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
        )
    }

    /// Time-aware cubic interpolation between this vector and `b`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn cubic_interpolate_in_time(
        self,
        b: Self,
        pre_a: Self,
        post_b: Self,
        weight: Real,
        b_t: Real,
        pre_a_t: Real,
        post_b_t: Real,
    ) -> Self {
        Self::new(
            mathf::cubic_interpolate_in_time(self.x, b.x, pre_a.x, post_b.x, weight, b_t, pre_a_t, post_b_t),
            mathf::cubic_interpolate_in_time(self.y, b.y, pre_a.y, post_b.y, weight, b_t, pre_a_t, post_b_t),
        )
    }

    /// Point on the cubic Bezier curve starting here.
    #[must_use]
    pub fn bezier_interpolate(self, control_1: Self, control_2: Self, end: Self, t: Real) -> Self {
        Self::new(
            mathf::bezier_interpolate(self.x, control_1.x, control_2.x, end.x, t),
            mathf::bezier_interpolate(self.y, control_1.y, control_2.y, end.y, t),
        )
    }

    /// Tangent of the cubic Bezier curve starting here.
    #[must_use]
    pub fn bezier_derivative(self, control_1: Self, control_2: Self, end: Self, t: Real) -> Self {
        Self::new(
            mathf::bezier_derivative(self.x, control_1.x, control_2.x, end.x, t),
            mathf::bezier_derivative(self.y, control_1.y, control_2.y, end.y, t),
        )
    }

    /// Scales the vector down to `length` if it is longer.
    #[must_use]
    pub fn limit_length(self, length: Real) -> Self {
        let l = self.length();
        if l > 0.0 && length < l {
            self / l * length
        } else {
            self
        }
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, with: Self) -> Self {
        Self::new(self.x.max(with.x), self.y.max(with.y))
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn maxf(self, with: Real) -> Self {
        Self::new(self.x.max(with), self.y.max(with))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, with: Self) -> Self {
        Self::new(self.x.min(with.x), self.y.min(with.y))
    }

    /// Component-wise minimum against a scalar.
    #[must_use]
    pub fn minf(self, with: Real) -> Self {
        Self::new(self.x.min(with), self.y.min(with))
    }

    /// Axis of the largest component. A tie returns [`Axis::X`].
    #[must_use]
    pub fn max_axis_index(self) -> Axis {
        if self.x < self.y {
            Axis::Y
        } else {
            Axis::X
        }
    }

    /// Axis of the smallest component. A tie returns [`Axis::Y`].
    #[must_use]
    pub fn min_axis_index(self) -> Axis {
        if self.x < self.y {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// Moves toward `to` by at most `delta`.
    #[must_use]
    pub fn move_toward(self, to: Self, delta: Real) -> Self {
        let vd = to - self;
        let len = vd.length();
        if len <= delta || len < mathf::EPSILON {
            to
        } else {
            self + vd / len * delta
        }
    }

    /// Perpendicular vector, rotated 90 degrees counter-clockwise in screen
    /// space.
    #[must_use]
    pub fn orthogonal(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Component-wise [`mathf::pos_mod`] by a scalar.
    #[must_use]
    pub fn pos_mod(self, modulus: Real) -> Self {
        Self::new(mathf::pos_mod(self.x, modulus), mathf::pos_mod(self.y, modulus))
    }

    /// Component-wise [`mathf::pos_mod`] by a vector.
    #[must_use]
    pub fn pos_modv(self, modv: Self) -> Self {
        Self::new(mathf::pos_mod(self.x, modv.x), mathf::pos_mod(self.y, modv.y))
    }

    /// Projection onto `on_normal`.
    #[must_use]
    pub fn project(self, on_normal: Self) -> Self {
        on_normal * (self.dot(on_normal) / on_normal.length_squared())
    }

    /// Reflection across the line defined by `normal`.
    ///
    /// `normal` must be normalized; checked in debug builds only.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `normal` is not normalized.
    #[must_use]
    pub fn reflect(self, normal: Self) -> Self {
        debug_check_normalized!(normal.is_normalized(), "normal");
        normal * (2.0 * self.dot(normal)) - self
    }

    /// Rotated by `angle` radians.
    #[must_use]
    pub fn rotated(self, angle: Real) -> Self {
        let (sin, cos) = mathf::sin_cos(angle);
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Component-wise [`mathf::sign`].
    #[must_use]
    pub fn sign(self) -> Self {
        Self::new(mathf::sign(self.x), mathf::sign(self.y))
    }

    /// Removes the component along `normal`.
    #[must_use]
    pub fn slide(self, normal: Self) -> Self {
        self - normal * self.dot(normal)
    }

    /// Component-wise [`mathf::snapped`] by a vector step.
    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        Self::new(mathf::snapped(self.x, step.x), mathf::snapped(self.y, step.y))
    }

    /// Component-wise [`mathf::snapped`] by a scalar step.
    #[must_use]
    pub fn snappedf(self, step: Real) -> Self {
        Self::new(mathf::snapped(self.x, step), mathf::snapped(self.y, step))
    }
}

impl From<Vector2i> for Vector2 {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: Vector2i) -> Self {
        Self::new(value.x as Real, value.y as Real)
    }
}

impl From<[Real; 2]> for Vector2 {
    fn from(arr: [Real; 2]) -> Self {
        Self::from_array(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_remainder_truncates() {
        assert_eq!(Vector2::new(10.0, -20.0) % 7.0, Vector2::new(3.0, -6.0));
        assert_eq!(
            Vector2::new(10.0, -20.0) % Vector2::new(7.0, 7.0),
            Vector2::new(3.0, -6.0)
        );
    }

    #[test]
    fn test_vector2_pos_mod_keeps_divisor_sign() {
        assert_eq!(Vector2::new(10.0, -20.0).pos_mod(7.0), Vector2::new(3.0, 1.0));
        assert_eq!(
            Vector2::new(10.0, -20.0).pos_modv(Vector2::new(-7.0, 7.0)),
            Vector2::new(-4.0, 1.0)
        );
    }

    #[test]
    fn test_vector2_normalize_zero_stays_zero() {
        assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
        let n = Vector2::new(3.0, 4.0).normalized();
        assert!(mathf::is_equal_approx(n.length(), 1.0));
        assert!(n.is_equal_approx(Vector2::new(0.6, 0.8)));
    }

    #[test]
    fn test_vector2_axis_ties() {
        // Ties: max picks X, min picks Y.
        let tie = Vector2::new(2.0, 2.0);
        assert_eq!(tie.max_axis_index(), Axis::X);
        assert_eq!(tie.min_axis_index(), Axis::Y);
        assert_eq!(Vector2::new(1.0, 2.0).max_axis_index(), Axis::Y);
        assert_eq!(Vector2::new(1.0, 2.0).min_axis_index(), Axis::X);
    }

    #[test]
    fn test_vector2_ordering_is_lexicographic() {
        let a = Vector2::new(1.0, 5.0);
        let b = Vector2::new(2.0, 0.0);
        let c = Vector2::new(1.0, 6.0);
        assert!(a < b);
        assert!(a < c);
        assert!(c <= c);
        assert!(b > c);
        assert!(b >= a);
    }

    #[test]
    fn test_vector2_slerp_zero_operand_lerps() {
        let to = Vector2::new(4.0, 0.0);
        assert_eq!(Vector2::ZERO.slerp(to, 0.5), Vector2::ZERO.lerp(to, 0.5));
        let halfway = Vector2::RIGHT.slerp(Vector2::DOWN, 0.5);
        let expected = Vector2::new(1.0, 1.0).normalized();
        assert!(halfway.is_equal_approx(expected));
    }

    #[test]
    fn test_vector2_reflect_bounce_slide() {
        let v = Vector2::new(1.0, -1.0);
        let n = Vector2::new(0.0, 1.0);
        assert_eq!(v.reflect(n), Vector2::new(-1.0, -1.0));
        assert_eq!(v.bounce(n), Vector2::new(1.0, 1.0));
        assert_eq!(v.slide(n), Vector2::new(1.0, 0.0));
        assert_eq!(v.project(n), Vector2::new(0.0, -1.0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "not normalized")]
    fn test_vector2_reflect_checks_normal_in_debug() {
        let _ = Vector2::new(1.0, 1.0).reflect(Vector2::new(0.0, 2.0));
    }

    #[test]
    fn test_vector2_index_access() {
        let mut v = Vector2::new(1.0, 2.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v.get(2), Err(crate::MathError::IndexOutOfRange { index: 2, len: 2 }));
        v.set(0, 9.0).unwrap();
        assert_eq!(v.x, 9.0);
        assert!(v.set(5, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_vector2_index_panics_out_of_range() {
        let v = Vector2::ZERO;
        let _ = v[2];
    }

    #[test]
    fn test_vector2_display() {
        assert_eq!(Vector2::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }

    #[test]
    fn test_vector2_bytemuck() {
        let v = Vector2::new(1.0, 2.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<Real>());
    }
}
