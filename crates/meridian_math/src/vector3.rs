//! 3D real vector.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::debug_check_normalized;
use crate::mathf::{self, Real};
use crate::ops::{impl_tuple_display, impl_vector_index, impl_vector_ops};
use crate::{Axis, Basis, Vector3i};

/// 3D vector - position, velocity, direction
///
/// Layout is exactly three sequential reals. Ordering is lexicographic over
/// `(x, y, z)` and exists for sorting only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: Real,
    /// Y component
    pub y: Real,
    /// Z component
    pub z: Real,
}

impl_vector_ops!(Vector3, Real, { x, y, z });
impl_vector_index!(Vector3, Real, 3, { 0 => x, 1 => y, 2 => z });
impl_tuple_display!(Vector3, { x, y, z });

impl Vector3 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All components one
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// All components positive infinity
    pub const INF: Self = Self::new(mathf::INF, mathf::INF, mathf::INF);
    /// Up (positive Y)
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Down
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// Right (positive X)
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// Left
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    /// Forward (negative Z)
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    /// Back
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);
    /// Model space left side (positive X)
    pub const MODEL_LEFT: Self = Self::new(1.0, 0.0, 0.0);
    /// Model space right side
    pub const MODEL_RIGHT: Self = Self::new(-1.0, 0.0, 0.0);
    /// Model space top
    pub const MODEL_TOP: Self = Self::new(0.0, 1.0, 0.0);
    /// Model space bottom
    pub const MODEL_BOTTOM: Self = Self::new(0.0, -1.0, 0.0);
    /// Model space front (positive Z)
    pub const MODEL_FRONT: Self = Self::new(0.0, 0.0, 1.0);
    /// Model space rear
    pub const MODEL_REAR: Self = Self::new(0.0, 0.0, -1.0);

    /// Creates a new Vector3
    #[inline]
    #[must_use]
    pub const fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [Real; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [Real; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Normalizes in place. A zero vector stays zero.
    pub fn normalize(&mut self) {
        let length_squared = self.length_squared();
        if length_squared == 0.0 {
            *self = Self::ZERO;
        } else {
            let length = length_squared.sqrt();
            self.x /= length;
            self.y /= length;
            self.z /= length;
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
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Unsigned angle to another vector, in radians.
    #[must_use]
    pub fn angle_to(self, to: Self) -> Real {
        self.cross(to).length().atan2(self.dot(to))
    }

    /// Angle to `to`, signed by which side of `axis` the rotation falls on.
    #[must_use]
    pub fn signed_angle_to(self, to: Self, axis: Self) -> Real {
        let cross_to = self.cross(to);
        let unsigned_angle = cross_to.length().atan2(self.dot(to));
        if cross_to.dot(axis) < 0.0 {
            -unsigned_angle
        } else {
            unsigned_angle
        }
    }

    /// Reflection off a plane with the given normal, pointing away from it.
    #[must_use]
    pub fn bounce(self, normal: Self) -> Self {
        -self.reflect(normal)
    }

    /// Component-wise ceiling.
    #[must_use]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    /// Component-wise floor.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Component-wise rounding, half away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round())
    }

    /// Component-wise clamp against vector bounds.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            mathf::clamp(self.x, min.x, max.x),
            mathf::clamp(self.y, min.y, max.y),
            mathf::clamp(self.z, min.z, max.z),
        )
    }

    /// Component-wise clamp against scalar bounds.
    #[must_use]
    pub fn clampf(self, min: Real, max: Real) -> Self {
        Self::new(
            mathf::clamp(self.x, min, max),
            mathf::clamp(self.y, min, max),
            mathf::clamp(self.z, min, max),
        )
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, with: Self) -> Self {
        Self::new(
            self.y * with.z - self.z * with.y,
            self.z * with.x - self.x * with.z,
            self.x * with.y - self.y * with.x,
        )
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, with: Self) -> Real {
        self.x * with.x + self.y * with.y + self.z * with.z
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> Real {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> Real {
        self.length_squared().sqrt()
    }

    /// Distance squared to another point (avoids sqrt)
    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> Real {
        (to - self).length_squared()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance_to(self, to: Self) -> Real {
        (to - self).length()
    }

    /// Normalized direction from this point to `to`.
    #[must_use]
    pub fn direction_to(self, to: Self) -> Self {
        (to - self).normalized()
    }

    /// Component-wise reciprocal.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    /// Returns `true` if no component is NaN or infinite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns `true` if the length is one within [`mathf::EPSILON`].
    #[must_use]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() < mathf::EPSILON
    }

    /// Component-wise [`mathf::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        mathf::is_equal_approx(self.x, other.x)
            && mathf::is_equal_approx(self.y, other.y)
            && mathf::is_equal_approx(self.z, other.z)
    }

    /// Component-wise [`mathf::is_zero_approx`].
    #[must_use]
    pub fn is_zero_approx(self) -> bool {
        mathf::is_zero_approx(self.x) && mathf::is_zero_approx(self.y) && mathf::is_zero_approx(self.z)
    }

    /// Linear interpolation toward `to`, unclamped.
    #[must_use]
    pub fn lerp(self, to: Self, weight: Real) -> Self {
        Self::new(
            mathf::lerp(self.x, to.x, weight),
            mathf::lerp(self.y, to.y, weight),
            mathf::lerp(self.z, to.z, weight),
        )
    }

    /// Spherical interpolation: rotates toward `to` about their common normal
    /// while lerping the length.
    ///
    /// Falls back to [`lerp`](Self::lerp) when either vector has zero length
    /// or the two are colinear, since neither case has a rotation axis.
    #[must_use]
    pub fn slerp(self, to: Self, weight: Real) -> Self {
        let start_length_squared = self.length_squared();
        let end_length_squared = to.length_squared();
        if start_length_squared == 0.0 || end_length_squared == 0.0 {
            return self.lerp(to, weight);
        }
        let mut axis = self.cross(to);
        let axis_length_squared = axis.length_squared();
        if axis_length_squared == 0.0 {
            return self.lerp(to, weight);
        }
        axis /= axis_length_squared.sqrt();
        let start_length = start_length_squared.sqrt();
        let result_length = mathf::lerp(start_length, end_length_squared.sqrt(), weight);
        let angle = self.angle_to(to);
        // The axis is normalized by construction; skip the debug check.
        Basis::from_axis_angle_unchecked(axis, angle * weight).xform(self) * (result_length / start_length)
    }

    /// Cubic interpolation between this vector and `b`.
    #[must_use]
    pub fn cubic_interpolate(self, b: Self, pre_a: Self, post_b: Self, weight: Real) -> Self {
        Self::new(
            mathf::cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            mathf::cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
            mathf::cubic_interpolate(self.z, b.z, pre_a.z, post_b.z, weight),
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
            mathf::cubic_interpolate_in_time(self.z, b.z, pre_a.z, post_b.z, weight, b_t, pre_a_t, post_b_t),
        )
    }

    /// Point on the cubic Bezier curve starting here.
    #[must_use]
    pub fn bezier_interpolate(self, control_1: Self, control_2: Self, end: Self, t: Real) -> Self {
        Self::new(
            mathf::bezier_interpolate(self.x, control_1.x, control_2.x, end.x, t),
            mathf::bezier_interpolate(self.y, control_1.y, control_2.y, end.y, t),
            mathf::bezier_interpolate(self.z, control_1.z, control_2.z, end.z, t),
        )
    }

    /// Tangent of the cubic Bezier curve starting here.
    #[must_use]
    pub fn bezier_derivative(self, control_1: Self, control_2: Self, end: Self, t: Real) -> Self {
        Self::new(
            mathf::bezier_derivative(self.x, control_1.x, control_2.x, end.x, t),
            mathf::bezier_derivative(self.y, control_1.y, control_2.y, end.y, t),
            mathf::bezier_derivative(self.z, control_1.z, control_2.z, end.z, t),
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
        Self::new(self.x.max(with.x), self.y.max(with.y), self.z.max(with.z))
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn maxf(self, with: Real) -> Self {
        Self::new(self.x.max(with), self.y.max(with), self.z.max(with))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, with: Self) -> Self {
        Self::new(self.x.min(with.x), self.y.min(with.y), self.z.min(with.z))
    }

    /// Component-wise minimum against a scalar.
    #[must_use]
    pub fn minf(self, with: Real) -> Self {
        Self::new(self.x.min(with), self.y.min(with), self.z.min(with))
    }

    /// Axis of the largest component. Ties go to the lower axis.
    #[must_use]
    pub fn max_axis_index(self) -> Axis {
        if self.x < self.y {
            if self.y < self.z {
                Axis::Z
            } else {
                Axis::Y
            }
        } else if self.x < self.z {
            Axis::Z
        } else {
            Axis::X
        }
    }

    /// Axis of the smallest component. Ties go to the higher axis.
    #[must_use]
    pub fn min_axis_index(self) -> Axis {
        if self.x < self.y {
            if self.x < self.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else if self.y < self.z {
            Axis::Y
        } else {
            Axis::Z
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

    /// Outer product, as a basis whose rows are `self[i] * with`.
    #[must_use]
    pub fn outer(self, with: Self) -> Basis {
        Basis::from_rows(with * self.x, with * self.y, with * self.z)
    }

    /// Component-wise [`mathf::pos_mod`] by a scalar.
    #[must_use]
    pub fn pos_mod(self, modulus: Real) -> Self {
        Self::new(
            mathf::pos_mod(self.x, modulus),
            mathf::pos_mod(self.y, modulus),
            mathf::pos_mod(self.z, modulus),
        )
    }

    /// Component-wise [`mathf::pos_mod`] by a vector.
    #[must_use]
    pub fn pos_modv(self, modv: Self) -> Self {
        Self::new(
            mathf::pos_mod(self.x, modv.x),
            mathf::pos_mod(self.y, modv.y),
            mathf::pos_mod(self.z, modv.z),
        )
    }

    /// Projection onto `on_normal`.
    #[must_use]
    pub fn project(self, on_normal: Self) -> Self {
        on_normal * (self.dot(on_normal) / on_normal.length_squared())
    }

    /// Reflection across the plane defined by `normal`.
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

    /// Rotated around `axis` by `angle` radians.
    ///
    /// `axis` must be normalized; checked in debug builds only.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn rotated(self, axis: Self, angle: Real) -> Self {
        debug_check_normalized!(axis.is_normalized(), "axis");
        Basis::from_axis_angle_unchecked(axis, angle).xform(self)
    }

    /// Component-wise [`mathf::sign`].
    #[must_use]
    pub fn sign(self) -> Self {
        Self::new(mathf::sign(self.x), mathf::sign(self.y), mathf::sign(self.z))
    }

    /// Removes the component along `normal`.
    #[must_use]
    pub fn slide(self, normal: Self) -> Self {
        self - normal * self.dot(normal)
    }

    /// Component-wise [`mathf::snapped`] by a vector step.
    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        Self::new(
            mathf::snapped(self.x, step.x),
            mathf::snapped(self.y, step.y),
            mathf::snapped(self.z, step.z),
        )
    }

    /// Component-wise [`mathf::snapped`] by a scalar step.
    #[must_use]
    pub fn snappedf(self, step: Real) -> Self {
        Self::new(
            mathf::snapped(self.x, step),
            mathf::snapped(self.y, step),
            mathf::snapped(self.z, step),
        )
    }
}

impl From<Vector3i> for Vector3 {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: Vector3i) -> Self {
        Self::new(value.x as Real, value.y as Real, value.z as Real)
    }
}

impl From<[Real; 3]> for Vector3 {
    fn from(arr: [Real; 3]) -> Self {
        Self::from_array(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0); // 1*4 + 2*5 + 3*6
        assert_eq!(Vector3::RIGHT.cross(Vector3::UP), Vector3::BACK);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vec3_axis_ties() {
        // max: ties favour the lower axis; min: ties favour the higher axis.
        assert_eq!(Vector3::new(1.0, 1.0, 1.0).max_axis_index(), Axis::X);
        assert_eq!(Vector3::new(1.0, 1.0, 1.0).min_axis_index(), Axis::Z);
        assert_eq!(Vector3::new(0.0, 2.0, 2.0).max_axis_index(), Axis::Y);
        assert_eq!(Vector3::new(0.0, 0.0, 2.0).min_axis_index(), Axis::Y);
        assert_eq!(Vector3::new(3.0, 1.0, 2.0).max_axis_index(), Axis::X);
        assert_eq!(Vector3::new(3.0, 1.0, 2.0).min_axis_index(), Axis::Y);
    }

    #[test]
    fn test_vec3_rotated_quarter_turn() {
        let v = Vector3::RIGHT.rotated(Vector3::UP, mathf::PI / 2.0);
        assert!(v.is_equal_approx(Vector3::FORWARD));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "`axis` is not normalized")]
    fn test_vec3_rotated_checks_axis_in_debug() {
        let _ = Vector3::RIGHT.rotated(Vector3::new(0.0, 2.0, 0.0), 1.0);
    }

    #[test]
    fn test_vec3_slerp_degenerate_cases_lerp() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let colinear = Vector3::new(3.0, 0.0, 0.0);
        assert_eq!(a.slerp(colinear, 0.5), a.lerp(colinear, 0.5));
        assert_eq!(a.slerp(Vector3::ZERO, 0.25), a.lerp(Vector3::ZERO, 0.25));
        let opposite = Vector3::new(-1.0, 0.0, 0.0);
        assert!(a.slerp(opposite, 0.5).is_finite());
    }

    #[test]
    fn test_vec3_slerp_keeps_arc() {
        let mid = Vector3::RIGHT.slerp(Vector3::UP * 3.0, 0.5);
        assert!(mathf::is_equal_approx(mid.length(), 2.0));
        assert!(mathf::is_equal_approx(mid.x, mid.y));
        assert!(mathf::is_zero_approx(mid.z));
    }

    #[test]
    fn test_vec3_signed_angle() {
        let angle = Vector3::RIGHT.signed_angle_to(Vector3::FORWARD, Vector3::UP);
        assert!(mathf::is_equal_approx(angle, mathf::PI / 2.0));
        let angle = Vector3::RIGHT.signed_angle_to(Vector3::FORWARD, Vector3::DOWN);
        assert!(mathf::is_equal_approx(angle, -mathf::PI / 2.0));
    }

    #[test]
    fn test_vec3_outer_product() {
        let b = Vector3::new(1.0, 2.0, 3.0).outer(Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(b.row(1), Vector3::new(8.0, 10.0, 12.0));
        assert_eq!(b.x, Vector3::new(4.0, 8.0, 12.0));
    }

    #[test]
    fn test_vec3_bytemuck() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<Real>());
    }
}
