//! 2×3 affine transform for 2D.

use std::fmt;
use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::{MathError, MathResult, Rect2, Vector2};

/// 2D affine transform: two basis columns plus a translation column.
///
/// `a * b` maps through `b` first, then `a`; the left operand is the parent
/// frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Transform2D {
    /// Basis X column
    pub x: Vector2,
    /// Basis Y column
    pub y: Vector2,
    /// Translation
    pub origin: Vector2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Identity transform
    pub const IDENTITY: Self =
        Self::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0), Vector2::ZERO);
    /// Mirrors along X
    pub const FLIP_X: Self =
        Self::new(Vector2::new(-1.0, 0.0), Vector2::new(0.0, 1.0), Vector2::ZERO);
    /// Mirrors along Y
    pub const FLIP_Y: Self =
        Self::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, -1.0), Vector2::ZERO);

    /// Creates a transform from its three columns.
    #[inline]
    #[must_use]
    pub const fn new(x: Vector2, y: Vector2, origin: Vector2) -> Self {
        Self { x, y, origin }
    }

    /// Pure rotation of `rotation` radians, then translated to `origin`.
    #[must_use]
    pub fn from_rotation(rotation: Real, origin: Vector2) -> Self {
        let (sin, cos) = mathf::sin_cos(rotation);
        Self::new(Vector2::new(cos, sin), Vector2::new(-sin, cos), origin)
    }

    /// Builds a transform from its decomposed parts.
    #[must_use]
    pub fn from_components(rotation: Real, scale: Vector2, skew: Real, origin: Vector2) -> Self {
        let (rot_sin, rot_cos) = mathf::sin_cos(rotation);
        let (skew_sin, skew_cos) = mathf::sin_cos(rotation + skew);
        Self::new(
            Vector2::new(rot_cos * scale.x, rot_sin * scale.x),
            Vector2::new(-skew_sin * scale.y, skew_cos * scale.y),
            origin,
        )
    }

    #[inline]
    fn tdotx(&self, v: Vector2) -> Real {
        self.x.x * v.x + self.y.x * v.y
    }

    #[inline]
    fn tdoty(&self, v: Vector2) -> Real {
        self.x.y * v.x + self.y.y * v.y
    }

    /// Column `index`; 2 is the origin.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 2`.
    pub fn column(&self, index: usize) -> MathResult<Vector2> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.origin),
            _ => Err(MathError::IndexOutOfRange { index, len: 3 }),
        }
    }

    /// Overwrites column `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 2`.
    pub fn set_column(&mut self, index: usize, value: Vector2) -> MathResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.origin = value,
            _ => return Err(MathError::IndexOutOfRange { index, len: 3 }),
        }
        Ok(())
    }

    /// Element at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] for a bad column or row.
    pub fn element(&self, column: usize, row: usize) -> MathResult<Real> {
        self.column(column)?.get(row)
    }

    /// Rotation angle in radians.
    #[must_use]
    pub fn rotation(&self) -> Real {
        self.x.y.atan2(self.x.x)
    }

    /// Scale, with Y negated for a mirrored basis.
    #[must_use]
    pub fn scale(&self) -> Vector2 {
        let det_sign = mathf::sign(self.determinant());
        Vector2::new(self.x.length(), det_sign * self.y.length())
    }

    /// Skew angle in radians.
    #[must_use]
    pub fn skew(&self) -> Real {
        let det_sign = mathf::sign(self.determinant());
        self.x.normalized().dot(self.y.normalized() * det_sign).acos() - mathf::PI * 0.5
    }

    /// Determinant of the basis.
    #[must_use]
    pub fn determinant(&self) -> Real {
        self.x.x * self.y.y - self.x.y * self.y.x
    }

    /// Inverse for an orthonormal basis (rotation and reflection only).
    ///
    /// Scaled or skewed transforms give silently wrong results; use
    /// [`Transform2D::affine_inverse`] for those.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut inv = *self;
        std::mem::swap(&mut inv.x.y, &mut inv.y.x);
        inv.origin = inv.basis_xform(-inv.origin);
        inv
    }

    /// General affine inverse.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the basis determinant is
    /// exactly zero.
    pub fn affine_inverse(&self) -> MathResult<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(MathError::SingularMatrix);
        }
        let inv_det = 1.0 / det;

        let mut inv = *self;
        std::mem::swap(&mut inv.x.x, &mut inv.y.y);
        inv.x *= Vector2::new(inv_det, -inv_det);
        inv.y *= Vector2::new(-inv_det, inv_det);
        inv.origin = inv.basis_xform(-inv.origin);
        Ok(inv)
    }

    /// Transforms `v` by the basis only, ignoring the origin.
    #[must_use]
    pub fn basis_xform(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.tdotx(v), self.tdoty(v))
    }

    /// Inverse basis transform for an orthonormal basis.
    #[must_use]
    pub fn basis_xform_inv(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.x.dot(v), self.y.dot(v))
    }

    /// Transforms a point.
    #[must_use]
    pub fn xform(&self, v: Vector2) -> Vector2 {
        self.basis_xform(v) + self.origin
    }

    /// Inverse-transforms a point, assuming an orthonormal basis.
    #[must_use]
    pub fn xform_inv(&self, v: Vector2) -> Vector2 {
        let v_inv = v - self.origin;
        Vector2::new(self.x.dot(v_inv), self.y.dot(v_inv))
    }

    /// Bounding rect of the transformed rect.
    #[must_use]
    pub fn xform_rect(&self, rect: Rect2) -> Rect2 {
        let pos = self.xform(rect.position);
        let to_x = self.x * rect.size.x;
        let to_y = self.y * rect.size.y;
        Rect2::new(pos, Vector2::ZERO)
            .expand(pos + to_x)
            .expand(pos + to_y)
            .expand(pos + to_x + to_y)
    }

    /// Bounding rect of the inverse-transformed rect, assuming an
    /// orthonormal basis.
    #[must_use]
    pub fn xform_inv_rect(&self, rect: Rect2) -> Rect2 {
        let p = rect.position;
        let s = rect.size;
        let pos = self.xform_inv(p);
        Rect2::new(pos, Vector2::ZERO)
            .expand(self.xform_inv(Vector2::new(p.x, p.y + s.y)))
            .expand(self.xform_inv(Vector2::new(p.x + s.x, p.y + s.y)))
            .expand(self.xform_inv(Vector2::new(p.x + s.x, p.y)))
    }

    /// Interpolates rotation and skew by shortest angle, scale and origin
    /// linearly.
    #[must_use]
    pub fn interpolate_with(&self, to: &Self, weight: Real) -> Self {
        Self::from_components(
            mathf::lerp_angle(self.rotation(), to.rotation(), weight),
            self.scale().lerp(to.scale(), weight),
            mathf::lerp_angle(self.skew(), to.skew(), weight),
            self.origin.lerp(to.origin, weight),
        )
    }

    /// Basis made orthogonal with unit-length axes.
    #[must_use]
    pub fn orthonormalized(&self) -> Self {
        let x = self.x.normalized();
        let y = (self.y - x * x.dot(self.y)).normalized();
        Self::new(x, y, self.origin)
    }

    /// Rotated in the parent frame (left-multiply).
    #[must_use]
    pub fn rotated(&self, angle: Real) -> Self {
        Self::from_rotation(angle, Vector2::ZERO) * *self
    }

    /// Rotated in the local frame (right-multiply).
    #[must_use]
    pub fn rotated_local(&self, angle: Real) -> Self {
        *self * Self::from_rotation(angle, Vector2::ZERO)
    }

    /// Scaled in the parent frame (left-multiply); the origin scales too.
    #[must_use]
    pub fn scaled(&self, scale: Vector2) -> Self {
        Self::new(self.x * scale, self.y * scale, self.origin * scale)
    }

    /// Scaled in the local frame (right-multiply); the origin is unchanged.
    #[must_use]
    pub fn scaled_local(&self, scale: Vector2) -> Self {
        Self::new(self.x * scale.x, self.y * scale.y, self.origin)
    }

    /// Translated in the parent frame.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.x, self.y, self.origin + offset)
    }

    /// Translated in the local frame.
    #[must_use]
    pub fn translated_local(&self, offset: Vector2) -> Self {
        Self::new(self.x, self.y, self.origin + self.basis_xform(offset))
    }

    /// Column-wise [`Vector2::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.x.is_equal_approx(other.x)
            && self.y.is_equal_approx(other.y)
            && self.origin.is_equal_approx(other.origin)
    }

    /// Returns `true` if every element is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.origin.is_finite()
    }
}

impl Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.basis_xform(rhs.x),
            self.basis_xform(rhs.y),
            self.xform(rhs.origin),
        )
    }
}

impl MulAssign for Transform2D {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector2> for Transform2D {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        self.xform(rhs)
    }
}

/// `v * t` is `t.xform_inv(v)`.
impl Mul<Transform2D> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: Transform2D) -> Vector2 {
        rhs.xform_inv(self)
    }
}

impl Mul<Rect2> for Transform2D {
    type Output = Rect2;

    fn mul(self, rhs: Rect2) -> Rect2 {
        self.xform_rect(rhs)
    }
}

impl fmt::Display for Transform2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[X: {}, Y: {}, O: {}]", self.x, self.y, self.origin)
    }
}
