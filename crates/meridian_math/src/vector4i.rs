//! 4D integer vector.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::ops::{impl_tuple_display, impl_vector_index, impl_vector_ops};
use crate::{Axis, Vector4};

/// 4D vector of `i32` components.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Vector4i {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
    /// Z component
    pub z: i32,
    /// W component
    pub w: i32,
}

impl_vector_ops!(Vector4i, i32, { x, y, z, w });
impl_vector_index!(Vector4i, i32, 4, { 0 => x, 1 => y, 2 => z, 3 => w });
impl_tuple_display!(Vector4i, { x, y, z, w });

impl Vector4i {
    /// Smallest representable vector
    pub const MIN: Self = Self::new(i32::MIN, i32::MIN, i32::MIN, i32::MIN);
    /// Largest representable vector
    pub const MAX: Self = Self::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX);
    /// Zero vector
    pub const ZERO: Self = Self::new(0, 0, 0, 0);
    /// All components one
    pub const ONE: Self = Self::new(1, 1, 1, 1);

    /// Creates a new Vector4i
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }

    /// Truncates each component toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_real(v: Vector4) -> Self {
        Self::new(v.x as i32, v.y as i32, v.z as i32, v.w as i32)
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [i32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z), f(self.w))
    }

    fn zip(self, other: Self, f: impl Fn(i32, i32) -> i32) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z), f(self.w, other.w))
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        self.map(i32::abs)
    }

    /// Component-wise clamp against vector bounds.
    #[must_use]
    pub const fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            mathf::clamp_i(self.x, min.x, max.x),
            mathf::clamp_i(self.y, min.y, max.y),
            mathf::clamp_i(self.z, min.z, max.z),
            mathf::clamp_i(self.w, min.w, max.w),
        )
    }

    /// Component-wise clamp against scalar bounds.
    #[must_use]
    pub fn clampi(self, min: i32, max: i32) -> Self {
        self.map(|c| mathf::clamp_i(c, min, max))
    }

    /// Length squared, widened to `i64` and saturating at `i64::MAX`.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn length_squared(self) -> i64 {
        (self.x as i64 * self.x as i64)
            .saturating_add(self.y as i64 * self.y as i64)
            .saturating_add(self.z as i64 * self.z as i64)
            .saturating_add(self.w as i64 * self.w as i64)
    }

    /// Length, computed in floating point so large components cannot overflow.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn length(self) -> Real {
        let x = self.x as Real;
        let y = self.y as Real;
        let z = self.z as Real;
        let w = self.w as Real;
        (x * x + y * y + z * z + w * w).sqrt()
    }

    /// Distance squared to another point, widened like [`Self::length_squared`].
    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> i64 {
        let x = i64::from(to.x) - i64::from(self.x);
        let y = i64::from(to.y) - i64::from(self.y);
        let z = i64::from(to.z) - i64::from(self.z);
        let w = i64::from(to.w) - i64::from(self.w);
        x.saturating_mul(x)
            .saturating_add(y.saturating_mul(y))
            .saturating_add(z.saturating_mul(z))
            .saturating_add(w.saturating_mul(w))
    }

    /// Distance to another point
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_to(self, to: Self) -> Real {
        let x = (i64::from(to.x) - i64::from(self.x)) as Real;
        let y = (i64::from(to.y) - i64::from(self.y)) as Real;
        let z = (i64::from(to.z) - i64::from(self.z)) as Real;
        let w = (i64::from(to.w) - i64::from(self.w)) as Real;
        (x * x + y * y + z * z + w * w).sqrt()
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, with: Self) -> Self {
        self.zip(with, i32::max)
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn maxi(self, with: i32) -> Self {
        self.map(|c| c.max(with))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, with: Self) -> Self {
        self.zip(with, i32::min)
    }

    /// Component-wise minimum against a scalar.
    #[must_use]
    pub fn mini(self, with: i32) -> Self {
        self.map(|c| c.min(with))
    }

    /// Axis of the largest component. Ties go to the lower axis.
    #[must_use]
    pub fn max_axis_index(self) -> Axis {
        let components = self.to_array();
        let mut max_index = 0;
        for (i, &value) in components.iter().enumerate().skip(1) {
            if value > components[max_index] {
                max_index = i;
            }
        }
        Axis::from_index(max_index).unwrap_or(Axis::X)
    }

    /// Axis of the smallest component. Ties go to the higher axis.
    #[must_use]
    pub fn min_axis_index(self) -> Axis {
        let components = self.to_array();
        let mut min_index = 0;
        for (i, &value) in components.iter().enumerate().skip(1) {
            if value <= components[min_index] {
                min_index = i;
            }
        }
        Axis::from_index(min_index).unwrap_or(Axis::X)
    }

    /// Component-wise sign.
    #[must_use]
    pub fn sign(self) -> Self {
        self.map(mathf::sign_i)
    }

    /// Component-wise [`mathf::snapped_i`] by a vector step.
    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        self.zip(step, mathf::snapped_i)
    }

    /// Component-wise [`mathf::snapped_i`] by a scalar step.
    #[must_use]
    pub fn snappedi(self, step: i32) -> Self {
        self.map(|c| mathf::snapped_i(c, step))
    }

    /// Component-wise [`mathf::pos_mod_i`] by a scalar.
    #[must_use]
    pub fn pos_mod(self, modulus: i32) -> Self {
        self.map(|c| mathf::pos_mod_i(c, modulus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector4i_axis_ties() {
        let v = Vector4i::new(7, 7, 1, 1);
        assert_eq!(v.max_axis_index(), Axis::X);
        assert_eq!(v.min_axis_index(), Axis::W);
    }

    #[test]
    fn test_vector4i_arithmetic() {
        let v = Vector4i::new(9, -9, 4, 0);
        assert_eq!(v / 4, Vector4i::new(2, -2, 1, 0));
        assert_eq!(v % 4, Vector4i::new(1, -1, 0, 0));
        assert_eq!(v.pos_mod(4), Vector4i::new(1, 3, 0, 0));
        assert_eq!(v.sign(), Vector4i::new(1, -1, 1, 0));
    }

    #[test]
    fn test_vector4i_conversions() {
        assert_eq!(Vector4i::from_real(Vector4::new(1.5, -1.5, 0.9, 3.0)), Vector4i::new(1, -1, 0, 3));
        assert_eq!(Vector4i::new(1, 1, 1, 1).length(), 2.0);
    }
}
