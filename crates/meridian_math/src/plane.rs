//! Plane in Hessian normal form.

use std::fmt;
use std::ops::Neg;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::Vector3;

/// Plane `normal · p = d`. Points with `normal · p > d` are "above".
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal, normally unit length
    pub normal: Vector3,
    /// Distance from the origin along the normal
    pub d: Real,
}

impl Plane {
    /// The XY plane through the origin, facing +Z.
    pub const PLANE_XY: Self = Self::new(Vector3::BACK, 0.0);
    /// The YZ plane through the origin, facing +X.
    pub const PLANE_YZ: Self = Self::new(Vector3::RIGHT, 0.0);
    /// The XZ plane through the origin, facing +Y.
    pub const PLANE_XZ: Self = Self::new(Vector3::UP, 0.0);

    /// Creates a plane from a normal and a distance.
    #[inline]
    #[must_use]
    pub const fn new(normal: Vector3, d: Real) -> Self {
        Self { normal, d }
    }

    /// Plane with `normal` through `point`.
    #[must_use]
    pub fn from_normal_point(normal: Vector3, point: Vector3) -> Self {
        Self::new(normal, normal.dot(point))
    }

    /// Plane through three points, clockwise winding facing the viewer.
    #[must_use]
    pub fn from_points(a: Vector3, b: Vector3, c: Vector3) -> Self {
        let normal = (a - c).cross(a - b).normalized();
        Self::new(normal, normal.dot(a))
    }

    /// Point on the plane closest to the origin.
    #[must_use]
    pub fn center(&self) -> Vector3 {
        self.normal * self.d
    }

    /// Signed distance from the plane to `point`.
    #[must_use]
    pub fn distance_to(&self, point: Vector3) -> Real {
        self.normal.dot(point) - self.d
    }

    /// Returns `true` if `point` is strictly above the plane.
    #[must_use]
    pub fn is_point_over(&self, point: Vector3) -> bool {
        self.normal.dot(point) > self.d
    }

    /// Orthogonal projection of `point` onto the plane.
    #[must_use]
    pub fn project(&self, point: Vector3) -> Vector3 {
        point - self.normal * self.distance_to(point)
    }

    /// Plane scaled to a unit normal. A zero normal yields the zero plane.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let len = self.normal.length();
        if len == 0.0 {
            return Self::new(Vector3::ZERO, 0.0);
        }
        Self::new(self.normal / len, self.d / len)
    }

    /// Returns `true` if normal and distance are approximately equal.
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.normal.is_equal_approx(other.normal) && mathf::is_equal_approx(self.d, other.d)
    }
}

impl Neg for Plane {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.normal, -self.d)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[N: {}, D: {}]", self.normal, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_distance() {
        let p = Plane::new(Vector3::UP, 2.0);
        assert_eq!(p.distance_to(Vector3::new(4.0, 5.0, 0.0)), 3.0);
        assert!(p.is_point_over(Vector3::new(0.0, 2.5, 0.0)));
        assert_eq!(p.project(Vector3::new(1.0, 9.0, 1.0)), Vector3::new(1.0, 2.0, 1.0));
        assert_eq!(p.center(), Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_plane_from_points() {
        let p = Plane::from_points(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 1.0),
        );
        assert!(p.normal.is_equal_approx(Vector3::UP));
        assert!(mathf::is_equal_approx(p.d, 1.0));
    }

    #[test]
    fn test_plane_normalized() {
        let p = Plane::new(Vector3::new(0.0, 0.0, 2.0), 4.0).normalized();
        assert_eq!(p, Plane::new(Vector3::BACK, 2.0));
        assert_eq!(Plane::default().normalized(), Plane::default());
    }
}
