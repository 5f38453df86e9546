//! 3×4 affine transform for 3D.

use std::fmt;
use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::Real;
use crate::{Aabb, Basis, MathError, MathResult, Plane, Projection, Vector3};

/// 3D affine transform: a [`Basis`] plus a translation.
///
/// `a * b` maps through `b` first, then `a`; the left operand is the parent
/// frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Transform3D {
    /// Rotation, scale and skew
    pub basis: Basis,
    /// Translation
    pub origin: Vector3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    /// Identity transform
    pub const IDENTITY: Self = Self::new(Basis::IDENTITY, Vector3::ZERO);
    /// Mirrors along X
    pub const FLIP_X: Self = Self::new(Basis::FLIP_X, Vector3::ZERO);
    /// Mirrors along Y
    pub const FLIP_Y: Self = Self::new(Basis::FLIP_Y, Vector3::ZERO);
    /// Mirrors along Z
    pub const FLIP_Z: Self = Self::new(Basis::FLIP_Z, Vector3::ZERO);

    /// Creates a transform from a basis and an origin.
    #[inline]
    #[must_use]
    pub const fn new(basis: Basis, origin: Vector3) -> Self {
        Self { basis, origin }
    }

    /// Creates a transform from four columns.
    #[must_use]
    pub const fn from_columns(x: Vector3, y: Vector3, z: Vector3, origin: Vector3) -> Self {
        Self::new(Basis::from_columns(x, y, z), origin)
    }

    /// Upper 3×4 part of a projection; the bottom row is dropped.
    #[must_use]
    pub fn from_projection(p: &Projection) -> Self {
        Self::from_columns(
            Vector3::new(p.x.x, p.x.y, p.x.z),
            Vector3::new(p.y.x, p.y.y, p.y.z),
            Vector3::new(p.z.x, p.z.y, p.z.z),
            Vector3::new(p.w.x, p.w.y, p.w.z),
        )
    }

    /// Column `index`; 3 is the origin.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 3`.
    pub fn column(&self, index: usize) -> MathResult<Vector3> {
        match index {
            0..=2 => self.basis.column(index),
            3 => Ok(self.origin),
            _ => Err(MathError::IndexOutOfRange { index, len: 4 }),
        }
    }

    /// Overwrites column `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 3`.
    pub fn set_column(&mut self, index: usize, value: Vector3) -> MathResult<()> {
        match index {
            0..=2 => self.basis.set_column(index, value),
            3 => {
                self.origin = value;
                Ok(())
            }
            _ => Err(MathError::IndexOutOfRange { index, len: 4 }),
        }
    }

    /// Element at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] for a bad column or row.
    pub fn element(&self, column: usize, row: usize) -> MathResult<Real> {
        self.column(column)?.get(row)
    }

    /// Inverse for an orthonormal basis (rotation and reflection only).
    ///
    /// Scaled or skewed transforms give silently wrong results; use
    /// [`Transform3D::affine_inverse`] for those.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let basis = self.basis.transposed();
        Self::new(basis, basis.xform(-self.origin))
    }

    /// General affine inverse.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the basis determinant is
    /// exactly zero.
    pub fn affine_inverse(&self) -> MathResult<Self> {
        let basis = self.basis.inverse()?;
        Ok(Self::new(basis, basis.xform(-self.origin)))
    }

    /// Decomposes both transforms, then lerps origin and scale and slerps
    /// rotation.
    #[must_use]
    pub fn interpolate_with(&self, to: &Self, weight: Real) -> Self {
        let source_rotation = self.basis.get_rotation_quaternion();
        let target_rotation = to.basis.get_rotation_quaternion();
        let rotation = source_rotation.slerp(target_rotation, weight).normalized();
        let scale = self.basis.scale().lerp(to.basis.scale(), weight);

        Self::new(
            Basis::from_quaternion_scale(rotation, scale),
            self.origin.lerp(to.origin, weight),
        )
    }

    /// Same origin, basis rotated so -Z (or +Z with `use_model_front`) faces
    /// `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DegenerateLookAt`] if `target` coincides with the
    /// origin, `up` is zero, or the two are parallel.
    pub fn looking_at(&self, target: Vector3, up: Vector3, use_model_front: bool) -> MathResult<Self> {
        let basis = Basis::looking_at(target - self.origin, up, use_model_front)?;
        Ok(Self::new(basis, self.origin))
    }

    /// Basis orthonormalized, origin unchanged.
    #[must_use]
    pub fn orthonormalized(&self) -> Self {
        Self::new(self.basis.orthonormalized(), self.origin)
    }

    /// Rotated in the parent frame (left-multiply).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn rotated(&self, axis: Vector3, angle: Real) -> Self {
        Self::new(Basis::from_axis_angle(axis, angle), Vector3::ZERO) * *self
    }

    /// Rotated in the local frame (right-multiply).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `axis` is not normalized.
    #[must_use]
    pub fn rotated_local(&self, axis: Vector3, angle: Real) -> Self {
        Self::new(self.basis * Basis::from_axis_angle(axis, angle), self.origin)
    }

    /// Scaled in the parent frame (left-multiply); the origin scales too.
    #[must_use]
    pub fn scaled(&self, scale: Vector3) -> Self {
        Self::new(self.basis.scaled(scale), self.origin * scale)
    }

    /// Scaled in the local frame (right-multiply); the origin is unchanged.
    #[must_use]
    pub fn scaled_local(&self, scale: Vector3) -> Self {
        Self::new(self.basis * Basis::from_scale(scale), self.origin)
    }

    /// Translated in the parent frame.
    #[must_use]
    pub fn translated(&self, offset: Vector3) -> Self {
        Self::new(self.basis, self.origin + offset)
    }

    /// Translated in the local frame.
    #[must_use]
    pub fn translated_local(&self, offset: Vector3) -> Self {
        Self::new(self.basis, self.origin + self.basis.xform(offset))
    }

    /// Transforms a point.
    #[must_use]
    pub fn xform(&self, v: Vector3) -> Vector3 {
        self.basis.xform(v) + self.origin
    }

    /// Inverse-transforms a point, assuming an orthonormal basis.
    #[must_use]
    pub fn xform_inv(&self, v: Vector3) -> Vector3 {
        self.basis.xform_inv(v - self.origin)
    }

    /// Bounding box of the transformed box.
    #[must_use]
    pub fn xform_aabb(&self, aabb: &Aabb) -> Aabb {
        let min = aabb.position;
        let max = aabb.end();
        let mut tmin = self.origin;
        let mut tmax = self.origin;
        let columns = [self.basis.x, self.basis.y, self.basis.z];

        for i in 0..3 {
            for (j, column) in columns.iter().enumerate() {
                let e = column[i] * min[j];
                let f = column[i] * max[j];
                if e < f {
                    tmin[i] += e;
                    tmax[i] += f;
                } else {
                    tmin[i] += f;
                    tmax[i] += e;
                }
            }
        }

        Aabb::new(tmin, tmax - tmin)
    }

    /// Transforms a plane, using the inverse transpose for the normal.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the basis cannot be inverted.
    pub fn xform_plane(&self, plane: &Plane) -> MathResult<Plane> {
        let b_inv_trans = self.basis.inverse()?.transposed();
        let point = self.xform(plane.normal * plane.d);
        let normal = b_inv_trans.xform(plane.normal).normalized();
        Ok(Plane::new(normal, normal.dot(point)))
    }

    /// Column-wise [`Vector3::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.basis.is_equal_approx(&other.basis) && self.origin.is_equal_approx(other.origin)
    }

    /// Returns `true` if every element is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.basis.is_finite() && self.origin.is_finite()
    }
}

impl Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.basis * rhs.basis, self.xform(rhs.origin))
    }
}

impl MulAssign for Transform3D {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Transform3D {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.xform(rhs)
    }
}

/// `v * t` is `t.xform_inv(v)`.
impl Mul<Transform3D> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Transform3D) -> Vector3 {
        rhs.xform_inv(self)
    }
}

impl Mul<Aabb> for Transform3D {
    type Output = Aabb;

    fn mul(self, rhs: Aabb) -> Aabb {
        self.xform_aabb(&rhs)
    }
}

impl From<Projection> for Transform3D {
    fn from(p: Projection) -> Self {
        Self::from_projection(&p)
    }
}

impl fmt::Display for Transform3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[X: {}, Y: {}, Z: {}, O: {}]",
            self.basis.x, self.basis.y, self.basis.z, self.origin
        )
    }
}
