//! Unit quaternion for 3D rotations.

use std::fmt;
use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::debug_check_normalized;
use crate::mathf::{self, Real};
use crate::{Basis, Vector3};

/// Rotation quaternion `(x, y, z, w)`, `w` being the real part.
///
/// Rotation operations expect a normalized quaternion.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X (imaginary i)
    pub x: Real,
    /// Y (imaginary j)
    pub y: Real,
    /// Z (imaginary k)
    pub z: Real,
    /// W (real part)
    pub w: Real,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from raw components.
    #[inline]
    #[must_use]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn from_axis_angle(axis: Vector3, angle: Real) -> Self {
        debug_check_normalized!(axis.is_normalized(), "axis");
        let d = axis.length();
        if d == 0.0 {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        let (sin_half, cos_half) = mathf::sin_cos(angle * 0.5);
        let s = sin_half / d;
        Self::new(axis.x * s, axis.y * s, axis.z * s, cos_half)
    }

    /// Shortest rotation taking `arc_from` onto `arc_to`. Both must be
    /// normalized.
    #[must_use]
    pub fn from_arc(arc_from: Vector3, arc_to: Vector3) -> Self {
        let c = arc_from.cross(arc_to);
        let d = arc_from.dot(arc_to);

        if d < -1.0 + mathf::EPSILON {
            // Opposite vectors: any perpendicular axis works.
            let mut axis = Vector3::RIGHT.cross(arc_from);
            if axis.is_zero_approx() {
                axis = Vector3::UP.cross(arc_from);
            }
            let axis = axis.normalized();
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        let s = ((1.0 + d) * 2.0).sqrt();
        let rs = 1.0 / s;
        Self::new(c.x * rs, c.y * rs, c.z * rs, s * 0.5)
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

    /// Unit-length copy.
    #[must_use]
    pub fn normalized(self) -> Self {
        self / self.length()
    }

    /// Returns `true` if the length is one within [`mathf::EPSILON`].
    #[must_use]
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() < mathf::EPSILON
    }

    /// Conjugate, the inverse rotation.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `self` is not normalized.
    #[must_use]
    pub fn inverse(self) -> Self {
        debug_check_normalized!(self.is_normalized(), "quaternion");
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotation axis. Undefined for the identity rotation.
    #[must_use]
    pub fn axis(self) -> Vector3 {
        if self.w.abs() > 1.0 - mathf::EPSILON {
            return Vector3::new(self.x, self.y, self.z);
        }
        let r = 1.0 / (1.0 - self.w * self.w).sqrt();
        Vector3::new(self.x * r, self.y * r, self.z * r)
    }

    /// Rotation angle in radians, in `[0, 2π]`.
    #[must_use]
    pub fn angle(self) -> Real {
        2.0 * mathf::clamp(self.w, -1.0, 1.0).acos()
    }

    /// Angle between the two rotations.
    #[must_use]
    pub fn angle_to(self, to: Self) -> Real {
        let d = self.dot(to);
        mathf::clamp(d * d * 2.0 - 1.0, -1.0, 1.0).acos()
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// Falls back to linear interpolation when the rotations are nearly
    /// identical.
    #[must_use]
    pub fn slerp(self, to: Self, weight: Real) -> Self {
        let mut cosom = self.dot(to);
        let mut to1 = to;
        if cosom < 0.0 {
            cosom = -cosom;
            to1 = -to;
        }

        let (scale0, scale1) = if 1.0 - cosom > mathf::EPSILON {
            let omega = cosom.acos();
            let sinom = omega.sin();
            (
                ((1.0 - weight) * omega).sin() / sinom,
                (weight * omega).sin() / sinom,
            )
        } else {
            (1.0 - weight, weight)
        };

        self * scale0 + to1 * scale1
    }

    /// Rotates `v`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `self` is not normalized.
    #[must_use]
    pub fn xform(self, v: Vector3) -> Vector3 {
        debug_check_normalized!(self.is_normalized(), "quaternion");
        let u = Vector3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        v + (uv * self.w + u.cross(uv)) * 2.0
    }

    /// Component-wise [`mathf::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        mathf::is_equal_approx(self.x, other.x)
            && mathf::is_equal_approx(self.y, other.y)
            && mathf::is_equal_approx(self.z, other.z)
            && mathf::is_equal_approx(self.w, other.w)
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<Real> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Real) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Div<Real> for Quaternion {
    type Output = Self;

    fn div(self, rhs: Real) -> Self {
        self * (1.0 / rhs)
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, r: Self) -> Self {
        let l = self;
        Self::new(
            l.w * r.x + l.x * r.w + l.y * r.z - l.z * r.y,
            l.w * r.y + l.y * r.w + l.z * r.x - l.x * r.z,
            l.w * r.z + l.z * r.w + l.x * r.y - l.y * r.x,
            l.w * r.w - l.x * r.x - l.y * r.y - l.z * r.z,
        )
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.xform(rhs)
    }
}

impl From<Basis> for Quaternion {
    fn from(basis: Basis) -> Self {
        basis.get_rotation_quaternion()
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathf::PI;

    #[test]
    fn test_xform_matches_basis() {
        let axis = Vector3::new(1.0, 2.0, -1.0).normalized();
        let q = Quaternion::from_axis_angle(axis, 0.8);
        let b = Basis::from_axis_angle(axis, 0.8);
        let v = Vector3::new(3.0, -1.0, 0.5);
        assert!(q.xform(v).is_equal_approx(b.xform(v)));
    }

    #[test]
    fn test_composition_order() {
        let yaw = Quaternion::from_axis_angle(Vector3::UP, PI / 2.0);
        let roll = Quaternion::from_axis_angle(Vector3::BACK, PI / 2.0);
        let v = Vector3::RIGHT;
        assert!((yaw * roll).xform(v).is_equal_approx(yaw.xform(roll.xform(v))));
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Vector3::RIGHT, 1.3);
        let v = Vector3::new(0.0, 2.0, 1.0);
        assert!(q.inverse().xform(q.xform(v)).is_equal_approx(v));
        assert!((q * q.inverse()).is_equal_approx(Quaternion::IDENTITY));
    }

    #[test]
    fn test_slerp() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vector3::UP, PI / 2.0);
        assert!(a.slerp(b, 0.0).is_equal_approx(a));
        assert!(a.slerp(b, 1.0).is_equal_approx(b));
        let mid = a.slerp(b, 0.5);
        assert!(mid.is_equal_approx(Quaternion::from_axis_angle(Vector3::UP, PI / 4.0)));
        assert!(mathf::is_equal_approx(a.angle_to(mid), PI / 4.0));
    }

    #[test]
    fn test_slerp_takes_short_arc() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_axis_angle(Vector3::UP, 0.2);
        let mid = a.slerp(b, 0.5);
        assert!(mid.w > 0.0);
        assert!(mid.is_equal_approx(Quaternion::from_axis_angle(Vector3::UP, 0.1)));
    }

    #[test]
    fn test_from_arc() {
        let q = Quaternion::from_arc(Vector3::RIGHT, Vector3::UP);
        assert!(q.xform(Vector3::RIGHT).is_equal_approx(Vector3::UP));
        let flip = Quaternion::from_arc(Vector3::RIGHT, Vector3::LEFT);
        assert!(flip.xform(Vector3::RIGHT).is_equal_approx(Vector3::LEFT));
    }

    #[test]
    fn test_axis_and_angle() {
        let q = Quaternion::from_axis_angle(Vector3::BACK, 1.0);
        assert!(q.axis().is_equal_approx(Vector3::BACK));
        assert!(mathf::is_equal_approx(q.angle(), 1.0));
    }
}
