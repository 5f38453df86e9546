//! 3D integer vector.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::ops::{impl_tuple_display, impl_vector_index, impl_vector_ops};
use crate::{Axis, Vector3};

/// 3D vector of `i32` components - grid cells, voxel coordinates.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Vector3i {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
    /// Z component
    pub z: i32,
}

impl_vector_ops!(Vector3i, i32, { x, y, z });
impl_vector_index!(Vector3i, i32, 3, { 0 => x, 1 => y, 2 => z });
impl_tuple_display!(Vector3i, { x, y, z });

impl Vector3i {
    /// Smallest representable vector
    pub const MIN: Self = Self::new(i32::MIN, i32::MIN, i32::MIN);
    /// Largest representable vector
    pub const MAX: Self = Self::new(i32::MAX, i32::MAX, i32::MAX);
    /// Zero vector
    pub const ZERO: Self = Self::new(0, 0, 0);
    /// All components one
    pub const ONE: Self = Self::new(1, 1, 1);
    /// Up (positive Y)
    pub const UP: Self = Self::new(0, 1, 0);
    /// Down
    pub const DOWN: Self = Self::new(0, -1, 0);
    /// Right
    pub const RIGHT: Self = Self::new(1, 0, 0);
    /// Left
    pub const LEFT: Self = Self::new(-1, 0, 0);
    /// Forward (negative Z)
    pub const FORWARD: Self = Self::new(0, 0, -1);
    /// Back
    pub const BACK: Self = Self::new(0, 0, 1);

    /// Creates a new Vector3i
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Truncates each component toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_real(v: Vector3) -> Self {
        Self::new(v.x as i32, v.y as i32, v.z as i32)
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Component-wise clamp against vector bounds.
    #[must_use]
    pub const fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            mathf::clamp_i(self.x, min.x, max.x),
            mathf::clamp_i(self.y, min.y, max.y),
            mathf::clamp_i(self.z, min.z, max.z),
        )
    }

    /// Component-wise clamp against scalar bounds.
    #[must_use]
    pub const fn clampi(self, min: i32, max: i32) -> Self {
        Self::new(
            mathf::clamp_i(self.x, min, max),
            mathf::clamp_i(self.y, min, max),
            mathf::clamp_i(self.z, min, max),
        )
    }

    /// Length squared, widened to `i64` and saturating at `i64::MAX`.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn length_squared(self) -> i64 {
        (self.x as i64 * self.x as i64)
            .saturating_add(self.y as i64 * self.y as i64)
            .saturating_add(self.z as i64 * self.z as i64)
    }

    /// Length, computed in floating point so large components cannot overflow.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn length(self) -> Real {
        let x = self.x as Real;
        let y = self.y as Real;
        let z = self.z as Real;
        (x * x + y * y + z * z).sqrt()
    }

    /// Distance squared to another point, widened like [`Self::length_squared`].
    #[must_use]
    pub fn distance_squared_to(self, to: Self) -> i64 {
        let x = i64::from(to.x) - i64::from(self.x);
        let y = i64::from(to.y) - i64::from(self.y);
        let z = i64::from(to.z) - i64::from(self.z);
        x.saturating_mul(x)
            .saturating_add(y.saturating_mul(y))
            .saturating_add(z.saturating_mul(z))
    }

    /// Distance to another point
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_to(self, to: Self) -> Real {
        let x = (i64::from(to.x) - i64::from(self.x)) as Real;
        let y = (i64::from(to.y) - i64::from(self.y)) as Real;
        let z = (i64::from(to.z) - i64::from(self.z)) as Real;
        (x * x + y * y + z * z).sqrt()
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, with: Self) -> Self {
        Self::new(self.x.max(with.x), self.y.max(with.y), self.z.max(with.z))
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn maxi(self, with: i32) -> Self {
        Self::new(self.x.max(with), self.y.max(with), self.z.max(with))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, with: Self) -> Self {
        Self::new(self.x.min(with.x), self.y.min(with.y), self.z.min(with.z))
    }

    /// Component-wise minimum against a scalar.
    #[must_use]
    pub fn mini(self, with: i32) -> Self {
        Self::new(self.x.min(with), self.y.min(with), self.z.min(with))
    }

    /// Axis of the largest component. Ties go to the lower axis.
    #[must_use]
    pub const fn max_axis_index(self) -> Axis {
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
    pub const fn min_axis_index(self) -> Axis {
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

    /// Component-wise sign.
    #[must_use]
    pub const fn sign(self) -> Self {
        Self::new(mathf::sign_i(self.x), mathf::sign_i(self.y), mathf::sign_i(self.z))
    }

    /// Component-wise [`mathf::snapped_i`] by a vector step.
    #[must_use]
    pub fn snapped(self, step: Self) -> Self {
        Self::new(
            mathf::snapped_i(self.x, step.x),
            mathf::snapped_i(self.y, step.y),
            mathf::snapped_i(self.z, step.z),
        )
    }

    /// Component-wise [`mathf::snapped_i`] by a scalar step.
    #[must_use]
    pub fn snappedi(self, step: i32) -> Self {
        Self::new(
            mathf::snapped_i(self.x, step),
            mathf::snapped_i(self.y, step),
            mathf::snapped_i(self.z, step),
        )
    }

    /// Component-wise [`mathf::pos_mod_i`] by a scalar.
    #[must_use]
    pub const fn pos_mod(self, modulus: i32) -> Self {
        Self::new(
            mathf::pos_mod_i(self.x, modulus),
            mathf::pos_mod_i(self.y, modulus),
            mathf::pos_mod_i(self.z, modulus),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3i_exact_arithmetic() {
        let a = Vector3i::new(7, -8, 9);
        assert_eq!(a / 2, Vector3i::new(3, -4, 4));
        assert_eq!(a % 4, Vector3i::new(3, 0, 1));
        assert_eq!(a * Vector3i::new(2, 2, -1), Vector3i::new(14, -16, -9));
        assert_eq!(a.length_squared(), 49 + 64 + 81);
    }

    #[test]
    fn test_vector3i_axis_ties() {
        assert_eq!(Vector3i::new(4, 4, 4).max_axis_index(), Axis::X);
        assert_eq!(Vector3i::new(4, 4, 4).min_axis_index(), Axis::Z);
        assert_eq!(Vector3i::new(1, 5, 5).max_axis_index(), Axis::Y);
    }

    #[test]
    fn test_vector3i_ordering_and_hash() {
        use std::collections::BTreeSet;
        let set: BTreeSet<Vector3i> = [Vector3i::new(1, 0, 0), Vector3i::new(0, 9, 9), Vector3i::new(0, 9, 1)]
            .into_iter()
            .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(ordered[0], Vector3i::new(0, 9, 1));
        assert_eq!(ordered[2], Vector3i::new(1, 0, 0));
    }

    #[test]
    fn test_vector3i_conversions() {
        assert_eq!(Vector3i::from_real(Vector3::new(-0.5, 2.7, -3.2)), Vector3i::new(0, 2, -3));
        assert_eq!(Vector3::from(Vector3i::new(1, 2, 3)), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3i::new(3, 4, 12).length(), 13.0);
    }
}
