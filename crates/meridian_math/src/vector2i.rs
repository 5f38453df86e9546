//! 2D integer vector.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::ops::{impl_tuple_display, impl_vector_index, impl_vector_ops};
use crate::{Axis, Vector2};

/// 2D vector of `i32` components.
///
/// Division and remainder truncate toward zero. Lengths are computed in
/// floating point and returned as [`Real`].
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Vector2i {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
}

impl_vector_ops!(Vector2i, i32, { x, y });
impl_vector_index!(Vector2i, i32, 2, { 0 => x, 1 => y });
impl_tuple_display!(Vector2i, { x, y });

impl Vector2i {
    /// Smallest representable vector
    pub const MIN: Self = Self::new(i32::MIN, i32::MIN);
    /// Largest representable vector
    pub const MAX: Self = Self::new(i32::MAX, i32::MAX);
    /// Zero vector
    pub const ZERO: Self = Self::new(0, 0);
    /// All components one
    pub const ONE: Self = Self::new(1, 1);
    /// Up in 2D screen space (negative Y)
    pub const UP: Self = Self::new(0, -1);
    /// Down in 2D screen space
    pub const DOWN: Self = Self::new(0, 1);
    /// Right
    pub const RIGHT: Self = Self::new(1, 0);
    /// Left
    pub const LEFT: Self = Self::new(-1, 0);

    /// Creates a new Vector2i
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates each component toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_real(v: Vector2) -> Self {
        Self::new(v.x as i32, v.y as i32)
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// Component-wise absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Ratio `x / y` in floating point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(self) -> Real {
        self.x as Real / self.y as Real
    }

    /// Component-wise clamp against vector bounds.
    #[must_use]
    pub const fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            mathf::clamp_i(self.x, min.x, max.x),
            mathf::clamp_i(self.y, min.y, max.y),
        )
    }

    /// Component-wise clamp against scalar bounds.
    #[must_use]
    pub const fn clampi(self, min: i32, max: i32) -> Self {
        Self::new(mathf::clamp_i(self.x, min, max), mathf::clamp_i(self.y, min, max))
    }

    /// Length squared, widened to `i64` and saturating at `i64::MAX`.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn length_squared(self) -> i64 {
        (self.x as i64 * self.x as i64)
            .saturating_add(self.y as i64 * self.y as i64)
    }

    /// Length, computed in floating point so large components cannot overflow.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn length(self) -> Real {
        let x = self.x as Real;
        let y = self.y as Real;
        (x * x + y * y).sqrt()
    }

    /// Distance squared to another point, widened like [`Self::length_squared`].
    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> i64 {
        let x = i64::from(to.x) - i64::from(self.x);
        let y = i64::from(to.y) - i64::from(self.y);
        x.saturating_mul(x)
            .saturating_add(y.saturating_mul(y))
    }

    /// Distance to another point
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_to(self, to: Self) -> Real {
        let x = (i64::from(to.x) - i64::from(self.x)) as Real;
        let y = (i64::from(to.y) - i64::from(self.y)) as Real;
        (x * x + y * y).sqrt()
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, with: Self) -> Self {
        Self::new(self.x.max(with.x), self.y.max(with.y))
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn maxi(self, with: i32) -> Self {
        Self::new(self.x.max(with), self.y.max(with))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, with: Self) -> Self {
        Self::new(self.x.min(with.x), self.y.min(with.y))
    }

    /// Component-wise minimum against a scalar.
    #[must_use]
    pub fn mini(self, with: i32) -> Self {
        Self::new(self.x.min(with), self.y.min(with))
    }

    /// Axis of the largest component. A tie returns [`Axis::X`].
    #[must_use]
    pub const fn max_axis_index(self) -> Axis {
        if self.x < self.y {
            Axis::Y
        } else {
            Axis::X
        }
    }

    /// Axis of the smallest component. A tie returns [`Axis::Y`].
    #[must_use]
    pub const fn min_axis_index(self) -> Axis {
        if self.x < self.y {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// Component-wise sign.
    #[must_use]
    pub const fn sign(self) -> Self {
        Self::new(mathf::sign_i(self.x), mathf::sign_i(self.y))
    }

    /// Component-wise [`mathf::snapped_i`] by a vector step.
    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        Self::new(mathf::snapped_i(self.x, step.x), mathf::snapped_i(self.y, step.y))
    }

    /// Component-wise [`mathf::snapped_i`] by a scalar step.
    #[must_use]
    pub fn snappedi(self, step: i32) -> Self {
        Self::new(mathf::snapped_i(self.x, step), mathf::snapped_i(self.y, step))
    }

    /// Component-wise [`mathf::pos_mod_i`] by a scalar.
    #[must_use]
    pub const fn pos_mod(self, modulus: i32) -> Self {
        Self::new(mathf::pos_mod_i(self.x, modulus), mathf::pos_mod_i(self.y, modulus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2i_truncating_division() {
        assert_eq!(Vector2i::new(7, -7) / 2, Vector2i::new(3, -3));
        assert_eq!(Vector2i::new(10, -20) % 7, Vector2i::new(3, -6));
        assert_eq!(Vector2i::new(10, -20).pos_mod(7), Vector2i::new(3, 1));
    }

    #[test]
    fn test_vector2i_large_components() {
        let v = Vector2i::new(50_000, 50_000);
        assert_eq!(v.length_squared(), 5_000_000_000);
        assert!((v.length() - 70_710.68).abs() < 0.01);
        assert_eq!(Vector2i::MIN.length_squared(), i64::MAX);
        assert_eq!(Vector2i::MAX + Vector2i::ONE, Vector2i::MIN);
    }

    #[test]
    fn test_vector2i_lengths() {
        let v = Vector2i::new(3, 4);
        assert_eq!(v.length_squared(), 25);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vector2i::ZERO.distance_squared_to(v), 25);
    }

    #[test]
    fn test_vector2i_axis_ties() {
        let tie = Vector2i::new(-1, -1);
        assert_eq!(tie.max_axis_index(), Axis::X);
        assert_eq!(tie.min_axis_index(), Axis::Y);
    }

    #[test]
    fn test_vector2i_real_conversions() {
        assert_eq!(Vector2i::from_real(Vector2::new(1.9, -1.9)), Vector2i::new(1, -1));
        assert_eq!(Vector2::from(Vector2i::new(2, -3)), Vector2::new(2.0, -3.0));
    }

    #[test]
    fn test_vector2i_snapped_and_clamp() {
        assert_eq!(Vector2i::new(17, -17).snappedi(5), Vector2i::new(15, -15));
        assert_eq!(Vector2i::new(-5, 50).clampi(0, 10), Vector2i::new(0, 10));
        assert_eq!(Vector2i::new(-5, 0).sign(), Vector2i::new(-1, 0));
    }
}
