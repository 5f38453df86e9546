//! Axis-aligned bounding box.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::Real;
use crate::Vector3;

/// Axis-aligned box given by its minimum corner and size.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub position: Vector3,
    /// Extent along each axis
    pub size: Vector3,
}

impl Aabb {
    /// Creates a box from its minimum corner and size.
    #[inline]
    #[must_use]
    pub const fn new(position: Vector3, size: Vector3) -> Self {
        Self { position, size }
    }

    /// Maximum corner.
    #[must_use]
    pub fn end(&self) -> Vector3 {
        self.position + self.size
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vector3 {
        self.position + self.size * 0.5
    }

    /// Product of the three extents.
    #[must_use]
    pub fn volume(&self) -> Real {
        self.size.x * self.size.y * self.size.z
    }

    /// Same box with a non-negative size.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.position + self.size.minf(0.0), self.size.abs())
    }

    /// Returns `true` if the point is inside, far faces inclusive.
    #[must_use]
    pub fn has_point(&self, point: Vector3) -> bool {
        let end = self.end();
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.z >= self.position.z
            && point.x <= end.x
            && point.y <= end.y
            && point.z <= end.z
    }

    /// Returns `true` if the boxes overlap with a non-zero volume.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_end, b_end) = (self.end(), other.end());
        self.position.x < b_end.x
            && a_end.x > other.position.x
            && self.position.y < b_end.y
            && a_end.y > other.position.y
            && self.position.z < b_end.z
            && a_end.z > other.position.z
    }

    /// Smallest box enclosing both.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let position = self.position.min(other.position);
        let end = self.end().max(other.end());
        Self::new(position, end - position)
    }

    /// Smallest box enclosing this one and `to`.
    #[must_use]
    pub fn expand(&self, to: Vector3) -> Self {
        let position = self.position.min(to);
        let end = self.end().max(to);
        Self::new(position, end - position)
    }

    /// One of the eight corners, bit 0 selecting X, bit 1 Y, bit 2 Z.
    #[must_use]
    pub fn endpoint(&self, index: u8) -> Vector3 {
        let pick = |bit: u8, axis: usize| {
            if index & bit == 0 {
                self.position[axis]
            } else {
                self.position[axis] + self.size[axis]
            }
        };
        Vector3::new(pick(1, 0), pick(2, 1), pick(4, 2))
    }

    /// Returns `true` if position and size are approximately equal.
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.position.is_equal_approx(other.position) && self.size.is_equal_approx(other.size)
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[P: {}, S: {}]", self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_basics() {
        let b = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(b.volume(), 8.0);
        assert_eq!(b.center(), Vector3::ZERO);
        assert!(b.has_point(Vector3::ONE));
        assert!(!b.has_point(Vector3::new(0.0, 1.5, 0.0)));
        assert_eq!(b.endpoint(7), Vector3::ONE);
        assert_eq!(b.endpoint(0), b.position);
    }

    #[test]
    fn test_aabb_merge_expand() {
        let a = Aabb::new(Vector3::ZERO, Vector3::ONE);
        let b = a.expand(Vector3::new(3.0, -1.0, 0.5));
        assert_eq!(b, Aabb::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(3.0, 2.0, 1.0)));
        assert!(a.intersects(&b));
        let far = Aabb::new(Vector3::new(5.0, 5.0, 5.0), Vector3::ONE);
        assert!(!a.intersects(&far));
        assert_eq!(a.merge(&far).end(), Vector3::new(6.0, 6.0, 6.0));
    }
}
