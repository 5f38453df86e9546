//! 4D real vector.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::ops::{impl_tuple_display, impl_vector_index, impl_vector_ops};
use crate::{Axis, Vector4i};

/// 4D vector, also used as a row/column of [`Projection`](crate::Projection).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector4 {
    /// X component
    pub x: Real,
    /// Y component
    pub y: Real,
    /// Z component
    pub z: Real,
    /// W component
    pub w: Real,
}

impl_vector_ops!(Vector4, Real, { x, y, z, w });
impl_vector_index!(Vector4, Real, 4, { 0 => x, 1 => y, 2 => z, 3 => w });
impl_tuple_display!(Vector4, { x, y, z, w });

impl Vector4 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// All components one
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// All components positive infinity
    pub const INF: Self = Self::new(mathf::INF, mathf::INF, mathf::INF, mathf::INF);

    /// Creates a new Vector4
    #[inline]
    #[must_use]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [Real; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [Real; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    fn map(self, f: impl Fn(Real) -> Real) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z), f(self.w))
    }

    fn zip(self, other: Self, f: impl Fn(Real, Real) -> Real) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z), f(self.w, other.w))
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> Real {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Length squared
    #[must_use]
    pub fn length_squared(self) -> Real {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> Real {
        self.length_squared().sqrt()
    }

    /// Unit-length copy; the zero vector maps to itself.
    #[must_use]
    pub fn normalized(self) -> Self {
        let length_squared = self.length_squared();
        if length_squared == 0.0 {
            Self::ZERO
        } else {
            self / length_squared.sqrt()
        }
    }

    /// Returns `true` if the length is one within [`mathf::EPSILON`].
    #[must_use]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() < mathf::EPSILON
    }

    /// Distance to another point
    #[must_use]
    pub fn distance_to(self, to: Self) -> Real {
        (to - self).length()
    }

    /// Distance squared to another point
    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> Real {
        (to - self).length_squared()
    }

    /// Normalized direction from `self` to `to`.
    #[must_use]
    pub fn direction_to(self, to: Self) -> Self {
        (to - self).normalized()
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        self.map(Real::abs)
    }

    /// Component-wise ceiling.
    #[must_use]
    pub fn ceil(self) -> Self {
        self.map(Real::ceil)
    }

    /// Component-wise floor.
    #[must_use]
    pub fn floor(self) -> Self {
        self.map(Real::floor)
    }

    /// Component-wise rounding, half away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        self.map(Real::round)
    }

    /// Component-wise reciprocal.
    #[must_use]
    pub fn inverse(self) -> Self {
        self.map(|c| 1.0 / c)
    }

    /// Component-wise clamp against vector bounds.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            mathf::clamp(self.x, min.x, max.x),
            mathf::clamp(self.y, min.y, max.y),
            mathf::clamp(self.z, min.z, max.z),
            mathf::clamp(self.w, min.w, max.w),
        )
    }

    /// Component-wise clamp against scalar bounds.
    #[must_use]
    pub fn clampf(self, min: Real, max: Real) -> Self {
        self.map(|c| mathf::clamp(c, min, max))
    }

    /// Linear interpolation
    #[must_use]
    pub fn lerp(self, to: Self, weight: Real) -> Self {
        self.zip(to, |a, b| mathf::lerp(a, b, weight))
    }

    /// Component-wise cubic interpolation.
    #[must_use]
    pub fn cubic_interpolate(self, b: Self, pre_a: Self, post_b: Self, weight: Real) -> Self {
        Self::new(
            mathf::cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            mathf::cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
            mathf::cubic_interpolate(self.z, b.z, pre_a.z, post_b.z, weight),
            mathf::cubic_interpolate(self.w, b.w, pre_a.w, post_b.w, weight),
        )
    }

    /// Component-wise cubic interpolation with explicit time values.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
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
            mathf::cubic_interpolate_in_time(self.w, b.w, pre_a.w, post_b.w, weight, b_t, pre_a_t, post_b_t),
        )
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Component-wise [`mathf::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        mathf::is_equal_approx(self.x, other.x)
            && mathf::is_equal_approx(self.y, other.y)
            && mathf::is_equal_approx(self.z, other.z)
            && mathf::is_equal_approx(self.w, other.w)
    }

    /// Component-wise [`mathf::is_zero_approx`].
    #[must_use]
    pub fn is_zero_approx(self) -> bool {
        self.to_array().into_iter().all(mathf::is_zero_approx)
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, with: Self) -> Self {
        self.zip(with, Real::max)
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn maxf(self, with: Real) -> Self {
        self.map(|c| c.max(with))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, with: Self) -> Self {
        self.zip(with, Real::min)
    }

    /// Component-wise minimum against a scalar.
    #[must_use]
    pub fn minf(self, with: Real) -> Self {
        self.map(|c| c.min(with))
    }

    /// Axis of the largest component. Ties go to the lower axis.
    #[must_use]
    pub fn max_axis_index(self) -> Axis {
        let components = self.to_array();
        let mut max_index = 0;
        let mut max_value = components[0];
        for (i, &value) in components.iter().enumerate().skip(1) {
            if value > max_value {
                max_index = i;
                max_value = value;
            }
        }
        Axis::from_index(max_index).unwrap_or(Axis::X)
    }

    /// Axis of the smallest component. Ties go to the higher axis.
    #[must_use]
    pub fn min_axis_index(self) -> Axis {
        let components = self.to_array();
        let mut min_index = 0;
        let mut min_value = components[0];
        for (i, &value) in components.iter().enumerate().skip(1) {
            if value <= min_value {
                min_index = i;
                min_value = value;
            }
        }
        Axis::from_index(min_index).unwrap_or(Axis::X)
    }

    /// Component-wise [`mathf::pos_mod`] by a scalar.
    #[must_use]
    pub fn pos_mod(self, modulus: Real) -> Self {
        self.map(|c| mathf::pos_mod(c, modulus))
    }

    /// Component-wise [`mathf::pos_mod`] by a vector.
    #[must_use]
    pub fn pos_modv(self, modv: Self) -> Self {
        self.zip(modv, mathf::pos_mod)
    }

    /// Component-wise [`mathf::sign`].
    #[must_use]
    pub fn sign(self) -> Self {
        self.map(mathf::sign)
    }

    /// Component-wise [`mathf::snapped`] by a vector step.
    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        self.zip(step, mathf::snapped)
    }

    /// Component-wise [`mathf::snapped`] by a scalar step.
    #[must_use]
    pub fn snappedf(self, step: Real) -> Self {
        self.map(|c| mathf::snapped(c, step))
    }
}

impl From<Vector4i> for Vector4 {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: Vector4i) -> Self {
        Self::new(value.x as Real, value.y as Real, value.z as Real, value.w as Real)
    }
}

impl From<[Real; 4]> for Vector4 {
    fn from(arr: [Real; 4]) -> Self {
        Self::from_array(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector4_axis_ties() {
        let flat = Vector4::new(2.0, 2.0, 2.0, 2.0);
        assert_eq!(flat.max_axis_index(), Axis::X);
        assert_eq!(flat.min_axis_index(), Axis::W);

        let v = Vector4::new(1.0, 5.0, 5.0, -3.0);
        assert_eq!(v.max_axis_index(), Axis::Y);
        assert_eq!(v.min_axis_index(), Axis::W);
    }

    #[test]
    fn test_vector4_normalize_and_lengths() {
        let v = Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(v.length(), 2.0);
        assert!(v.normalized().is_normalized());
        assert_eq!(Vector4::ZERO.normalized(), Vector4::ZERO);
    }

    #[test]
    fn test_vector4_remainder_and_pos_mod() {
        let v = Vector4::new(-5.0, 5.0, 7.5, -0.5);
        assert_eq!(v % 2.0, Vector4::new(-1.0, 1.0, 1.5, -0.5));
        assert_eq!(v.pos_mod(2.0), Vector4::new(1.0, 1.0, 1.5, 1.5));
    }

    #[test]
    fn test_vector4_display_and_index() {
        let mut v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.to_string(), "(1, 2, 3, 4)");
        v[3] = 9.0;
        assert_eq!(v.get(3), Ok(9.0));
        assert!(v.get(4).is_err());
    }
}
