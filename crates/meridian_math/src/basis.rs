//! 3×3 rotation/scale/skew matrix.
//!
//! Stored as three column vectors. `basis.x` is the image of the X unit
//! vector, so `xform(v) = x * v.x + y * v.y + z * v.z`.

use std::fmt;
use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::debug_check_normalized;
use crate::mathf::{self, Real};
use crate::{MathError, MathResult, Quaternion, Vector3};

/// 3×3 matrix used for the linear part of [`Transform3D`](crate::Transform3D).
///
/// Not orthonormal in general. Operations that assume a pure rotation say so.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Basis {
    /// First column, the X axis
    pub x: Vector3,
    /// Second column, the Y axis
    pub y: Vector3,
    /// Third column, the Z axis
    pub z: Vector3,
}

impl Default for Basis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Basis {
    /// Identity basis
    pub const IDENTITY: Self = Self::from_columns(Vector3::RIGHT, Vector3::UP, Vector3::BACK);
    /// Mirrors along X
    pub const FLIP_X: Self =
        Self::from_columns(Vector3::new(-1.0, 0.0, 0.0), Vector3::UP, Vector3::BACK);
    /// Mirrors along Y
    pub const FLIP_Y: Self =
        Self::from_columns(Vector3::RIGHT, Vector3::new(0.0, -1.0, 0.0), Vector3::BACK);
    /// Mirrors along Z
    pub const FLIP_Z: Self =
        Self::from_columns(Vector3::RIGHT, Vector3::UP, Vector3::new(0.0, 0.0, -1.0));

    /// Creates a basis from its three columns.
    #[inline]
    #[must_use]
    pub const fn from_columns(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self { x, y, z }
    }

    /// Creates a basis from its three rows.
    #[must_use]
    pub const fn from_rows(row0: Vector3, row1: Vector3, row2: Vector3) -> Self {
        Self {
            x: Vector3::new(row0.x, row1.x, row2.x),
            y: Vector3::new(row0.y, row1.y, row2.y),
            z: Vector3::new(row0.z, row1.z, row2.z),
        }
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// `axis` must be normalized; checked in debug builds only.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn from_axis_angle(axis: Vector3, angle: Real) -> Self {
        debug_check_normalized!(axis.is_normalized(), "axis");
        Self::from_axis_angle_unchecked(axis, angle)
    }

    /// [`Basis::from_axis_angle`] without the debug normalization check.
    #[must_use]
    pub(crate) fn from_axis_angle_unchecked(axis: Vector3, angle: Real) -> Self {
        let (sine, cosine) = mathf::sin_cos(angle);
        let t = 1.0 - cosine;
        let sq = Vector3::new(axis.x * axis.x, axis.y * axis.y, axis.z * axis.z);

        let xyt = axis.x * axis.y * t;
        let xzt = axis.x * axis.z * t;
        let yzt = axis.y * axis.z * t;
        let xs = axis.x * sine;
        let ys = axis.y * sine;
        let zs = axis.z * sine;

        Self::from_rows(
            Vector3::new(sq.x + cosine * (1.0 - sq.x), xyt - zs, xzt + ys),
            Vector3::new(xyt + zs, sq.y + cosine * (1.0 - sq.y), yzt - xs),
            Vector3::new(xzt - ys, yzt + xs, sq.z + cosine * (1.0 - sq.z)),
        )
    }

    /// Pure scale along the three axes.
    #[must_use]
    pub const fn from_scale(scale: Vector3) -> Self {
        Self::from_columns(
            Vector3::new(scale.x, 0.0, 0.0),
            Vector3::new(0.0, scale.y, 0.0),
            Vector3::new(0.0, 0.0, scale.z),
        )
    }

    /// Rotation matrix for a quaternion. Non-unit quaternions are normalized
    /// implicitly.
    #[must_use]
    pub fn from_quaternion(q: Quaternion) -> Self {
        let s = 2.0 / q.length_squared();
        let (xs, ys, zs) = (q.x * s, q.y * s, q.z * s);
        let (wx, wy, wz) = (q.w * xs, q.w * ys, q.w * zs);
        let (xx, xy, xz) = (q.x * xs, q.x * ys, q.x * zs);
        let (yy, yz, zz) = (q.y * ys, q.y * zs, q.z * zs);

        Self::from_rows(
            Vector3::new(1.0 - (yy + zz), xy - wz, xz + wy),
            Vector3::new(xy + wz, 1.0 - (xx + zz), yz - wx),
            Vector3::new(xz - wy, yz + wx, 1.0 - (xx + yy)),
        )
    }

    /// Rotation pointing -Z (or +Z with `use_model_front`) at `target`, with
    /// +Y as close to `up` as possible.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DegenerateLookAt`] if `target` or `up` is zero, or
    /// if they are parallel.
    pub fn looking_at(target: Vector3, up: Vector3, use_model_front: bool) -> MathResult<Self> {
        if target.is_zero_approx() {
            return Err(MathError::DegenerateLookAt { reason: "target direction is zero" });
        }
        if up.is_zero_approx() {
            return Err(MathError::DegenerateLookAt { reason: "up vector is zero" });
        }

        let mut v_z = target.normalized();
        if !use_model_front {
            v_z = -v_z;
        }
        let v_x = up.cross(v_z);
        if v_x.is_zero_approx() {
            return Err(MathError::DegenerateLookAt { reason: "target and up are parallel" });
        }
        let v_x = v_x.normalized();
        let v_y = v_z.cross(v_x);

        Ok(Self::from_columns(v_x, v_y, v_z))
    }

    /// Row `index` as a vector.
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    #[must_use]
    pub fn row(&self, index: usize) -> Vector3 {
        Vector3::new(self.x[index], self.y[index], self.z[index])
    }

    /// Column `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 2`.
    pub fn column(&self, index: usize) -> MathResult<Vector3> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::IndexOutOfRange { index, len: 3 }),
        }
    }

    /// Overwrites column `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 2`.
    pub fn set_column(&mut self, index: usize, value: Vector3) -> MathResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(MathError::IndexOutOfRange { index, len: 3 }),
        }
        Ok(())
    }

    /// Element at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if either index is past 2.
    pub fn element(&self, column: usize, row: usize) -> MathResult<Real> {
        self.column(column)?.get(row)
    }

    // m[row][col]
    #[inline]
    fn m(&self, row: usize, col: usize) -> Real {
        let column = match col {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        };
        column[row]
    }

    /// Determinant of the matrix.
    #[must_use]
    pub fn determinant(&self) -> Real {
        self.x.dot(self.y.cross(self.z))
    }

    /// Transposed copy.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::from_rows(self.x, self.y, self.z)
    }

    /// General inverse.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the determinant is exactly zero.
    pub fn inverse(&self) -> MathResult<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(MathError::SingularMatrix);
        }
        let inv_det = 1.0 / det;
        Ok(Self::from_rows(
            self.y.cross(self.z) * inv_det,
            self.z.cross(self.x) * inv_det,
            self.x.cross(self.y) * inv_det,
        ))
    }

    /// Gram-Schmidt orthonormalization of the columns.
    #[must_use]
    pub fn orthonormalized(&self) -> Self {
        let x = self.x.normalized();
        let y = (self.y - x * x.dot(self.y)).normalized();
        let z = (self.z - x * x.dot(self.z) - y * y.dot(self.z)).normalized();
        Self::from_columns(x, y, z)
    }

    /// Transforms `v` by this matrix.
    #[inline]
    #[must_use]
    pub fn xform(&self, v: Vector3) -> Vector3 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Transforms `v` by the transpose, which is the inverse only for a
    /// pure rotation.
    #[inline]
    #[must_use]
    pub fn xform_inv(&self, v: Vector3) -> Vector3 {
        Vector3::new(self.x.dot(v), self.y.dot(v), self.z.dot(v))
    }

    /// Signed scale along each column. A negative determinant flips all three.
    #[must_use]
    pub fn scale(&self) -> Vector3 {
        let det_sign = mathf::sign(self.determinant());
        Vector3::new(self.x.length(), self.y.length(), self.z.length()) * det_sign
    }

    /// Rotation quaternion of a basis with arbitrary scale. Not valid for
    /// skewed bases.
    #[must_use]
    pub fn get_rotation_quaternion(&self) -> Quaternion {
        let mut orthonormal = self.orthonormalized();
        if orthonormal.determinant() < 0.0 {
            orthonormal = orthonormal.scaled(-Vector3::ONE);
        }
        orthonormal.get_quaternion()
    }

    /// Quaternion of a pure rotation matrix.
    #[must_use]
    pub fn get_quaternion(&self) -> Quaternion {
        let trace = self.m(0, 0) + self.m(1, 1) + self.m(2, 2);

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                (self.m(2, 1) - self.m(1, 2)) * inv_s,
                (self.m(0, 2) - self.m(2, 0)) * inv_s,
                (self.m(1, 0) - self.m(0, 1)) * inv_s,
                s * 0.25,
            )
        } else if self.m(0, 0) > self.m(1, 1) && self.m(0, 0) > self.m(2, 2) {
            let s = (self.m(0, 0) - self.m(1, 1) - self.m(2, 2) + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                s * 0.25,
                (self.m(0, 1) + self.m(1, 0)) * inv_s,
                (self.m(0, 2) + self.m(2, 0)) * inv_s,
                (self.m(2, 1) - self.m(1, 2)) * inv_s,
            )
        } else if self.m(1, 1) > self.m(2, 2) {
            let s = (-self.m(0, 0) + self.m(1, 1) - self.m(2, 2) + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                (self.m(0, 1) + self.m(1, 0)) * inv_s,
                s * 0.25,
                (self.m(1, 2) + self.m(2, 1)) * inv_s,
                (self.m(0, 2) - self.m(2, 0)) * inv_s,
            )
        } else {
            let s = (-self.m(0, 0) - self.m(1, 1) + self.m(2, 2) + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                (self.m(0, 2) + self.m(2, 0)) * inv_s,
                (self.m(1, 2) + self.m(2, 1)) * inv_s,
                s * 0.25,
                (self.m(1, 0) - self.m(0, 1)) * inv_s,
            )
        }
    }

    /// Rotation from `q` followed by a local `scale`.
    #[must_use]
    pub fn from_quaternion_scale(q: Quaternion, scale: Vector3) -> Self {
        Self::from_quaternion(q).scaled_local(scale)
    }

    /// Replaces this basis with [`Basis::from_quaternion_scale`].
    pub fn set_quaternion_scale(&mut self, q: Quaternion, scale: Vector3) {
        *self = Self::from_quaternion_scale(q, scale);
    }

    /// Rotated around `axis` in the parent frame (left-multiply).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn rotated(&self, axis: Vector3, angle: Real) -> Self {
        Self::from_axis_angle(axis, angle) * *self
    }

    /// Rotated around `axis` in the local frame (right-multiply).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn rotated_local(&self, axis: Vector3, angle: Real) -> Self {
        *self * Self::from_axis_angle(axis, angle)
    }

    /// Scaled in the parent frame (left-multiply).
    #[must_use]
    pub fn scaled(&self, scale: Vector3) -> Self {
        Self::from_columns(self.x * scale, self.y * scale, self.z * scale)
    }

    /// Scaled in the local frame (right-multiply).
    #[must_use]
    pub fn scaled_local(&self, scale: Vector3) -> Self {
        Self::from_columns(self.x * scale.x, self.y * scale.y, self.z * scale.z)
    }

    /// Spherical interpolation of the rotation with linear interpolation of
    /// the column lengths.
    #[must_use]
    pub fn slerp(&self, to: Self, weight: Real) -> Self {
        let from = self.get_rotation_quaternion();
        let target = to.get_rotation_quaternion();
        let b = Self::from_quaternion(from.slerp(target, weight));
        Self::from_columns(
            b.x * mathf::lerp(self.x.length(), to.x.length(), weight),
            b.y * mathf::lerp(self.y.length(), to.y.length(), weight),
            b.z * mathf::lerp(self.z.length(), to.z.length(), weight),
        )
    }

    /// Component-wise [`mathf::is_equal_approx`] over all nine elements.
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.x.is_equal_approx(other.x)
            && self.y.is_equal_approx(other.y)
            && self.z.is_equal_approx(other.z)
    }

    /// Returns `true` if every element is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Mul for Basis {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_columns(self.xform(rhs.x), self.xform(rhs.y), self.xform(rhs.z))
    }
}

impl MulAssign for Basis {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Basis {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.xform(rhs)
    }
}

impl From<Quaternion> for Basis {
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(q)
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[X: {}, Y: {}, Z: {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathf::PI;

    #[test]
    fn test_basis_rows_and_columns() {
        let b = Basis::from_rows(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            Vector3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(b.x, Vector3::new(1.0, 4.0, 7.0));
        assert_eq!(b.row(1), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(b.element(2, 0), Ok(3.0));
        assert!(matches!(b.column(3), Err(MathError::IndexOutOfRange { index: 3, len: 3 })));
        assert_eq!(b.transposed().x, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_basis_inverse() {
        let b = Basis::from_scale(Vector3::new(2.0, 4.0, 8.0)).rotated(Vector3::UP, 0.3);
        let inv = b.inverse().unwrap();
        assert!((b * inv).is_equal_approx(&Basis::IDENTITY));
        assert!((inv * b).is_equal_approx(&Basis::IDENTITY));
    }

    #[test]
    fn test_singular_basis_inverse_is_error() {
        let b = Basis::from_scale(Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(b.determinant(), 0.0);
        assert_eq!(b.inverse(), Err(MathError::SingularMatrix));
    }

    #[test]
    fn test_quaternion_round_trip() {
        let b = Basis::from_axis_angle(Vector3::new(1.0, 1.0, 0.0).normalized(), 1.1);
        let back = Basis::from_quaternion(b.get_quaternion());
        assert!(back.is_equal_approx(&b));
    }

    #[test]
    fn test_rotation_quaternion_ignores_scale() {
        let rot = Basis::from_axis_angle(Vector3::UP, PI / 3.0);
        let scaled = rot.scaled_local(Vector3::new(2.0, 3.0, 4.0));
        let q = scaled.get_rotation_quaternion();
        assert!(Basis::from_quaternion(q).is_equal_approx(&rot));
        assert!(scaled.scale().is_equal_approx(Vector3::new(2.0, 3.0, 4.0)));

        let mut rebuilt = Basis::IDENTITY;
        rebuilt.set_quaternion_scale(q, Vector3::new(2.0, 3.0, 4.0));
        assert!(rebuilt.is_equal_approx(&scaled));
    }

    #[test]
    fn test_scaled_vs_scaled_local() {
        let b = Basis::from_axis_angle(Vector3::BACK, PI / 2.0);
        let s = Vector3::new(2.0, 1.0, 1.0);
        assert!(b.scaled(s).is_equal_approx(&(Basis::from_scale(s) * b)));
        assert!(b.scaled_local(s).is_equal_approx(&(b * Basis::from_scale(s))));
    }

    #[test]
    fn test_looking_at() {
        let b = Basis::looking_at(Vector3::new(0.0, 0.0, -5.0), Vector3::UP, false).unwrap();
        assert!(b.is_equal_approx(&Basis::IDENTITY));

        let front = Basis::looking_at(Vector3::RIGHT, Vector3::UP, true).unwrap();
        assert!(front.z.is_equal_approx(Vector3::RIGHT));
    }

    #[test]
    fn test_looking_at_degenerate() {
        assert!(matches!(
            Basis::looking_at(Vector3::ZERO, Vector3::UP, false),
            Err(MathError::DegenerateLookAt { .. })
        ));
        assert!(matches!(
            Basis::looking_at(Vector3::UP * 3.0, Vector3::UP, false),
            Err(MathError::DegenerateLookAt { .. })
        ));
    }

    #[test]
    fn test_orthonormalized() {
        let skewed = Basis::from_columns(
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 3.0, 0.0),
            Vector3::new(1.0, 1.0, 5.0),
        );
        let o = skewed.orthonormalized();
        assert!(o.is_equal_approx(&Basis::IDENTITY));
    }

    #[test]
    fn test_basis_slerp_endpoints() {
        let a = Basis::IDENTITY;
        let b = Basis::from_axis_angle(Vector3::UP, PI / 2.0);
        assert!(a.slerp(b, 0.0).is_equal_approx(&a));
        assert!(a.slerp(b, 1.0).is_equal_approx(&b));
        let half = a.slerp(b, 0.5);
        assert!(half.is_equal_approx(&Basis::from_axis_angle(Vector3::UP, PI / 4.0)));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "`axis` is not normalized")]
    fn test_from_axis_angle_rejects_unnormalized_axis() {
        let _ = Basis::from_axis_angle(Vector3::new(0.0, 2.0, 0.0), 1.0);
    }
}
