//! 4×4 projection matrix.

use std::fmt;
use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::{self, Real};
use crate::{MathError, MathResult, Transform3D, Vector3, Vector4};

/// 4×4 matrix stored as four [`Vector4`] columns, used for camera
/// projections.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Projection {
    /// First column
    pub x: Vector4,
    /// Second column
    pub y: Vector4,
    /// Third column
    pub z: Vector4,
    /// Fourth column, the translation part
    pub w: Vector4,
}

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Projection {
    /// Identity matrix
    pub const IDENTITY: Self = Self::new(
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );
    /// All elements zero
    pub const ZERO: Self = Self::new(Vector4::ZERO, Vector4::ZERO, Vector4::ZERO, Vector4::ZERO);

    /// Creates a projection from its four columns.
    #[inline]
    #[must_use]
    pub const fn new(x: Vector4, y: Vector4, z: Vector4, w: Vector4) -> Self {
        Self { x, y, z, w }
    }

    /// Perspective projection. `fovy_degrees` is the vertical field of view.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidProjection`] if the depth range, the
    /// field of view or the aspect ratio is zero.
    pub fn create_perspective(fovy_degrees: Real, aspect: Real, z_near: Real, z_far: Real) -> MathResult<Self> {
        let radians = mathf::deg_to_rad(fovy_degrees / 2.0);
        let delta_z = z_far - z_near;
        let (sine, cosine) = mathf::sin_cos(radians);

        if delta_z == 0.0 {
            return Err(MathError::InvalidProjection { reason: "near and far planes coincide" });
        }
        if sine == 0.0 {
            return Err(MathError::InvalidProjection { reason: "field of view is zero" });
        }
        if aspect == 0.0 {
            return Err(MathError::InvalidProjection { reason: "aspect ratio is zero" });
        }

        let cotangent = cosine / sine;
        let mut p = Self::IDENTITY;
        p.x.x = cotangent / aspect;
        p.y.y = cotangent;
        p.z.z = -(z_far + z_near) / delta_z;
        p.z.w = -1.0;
        p.w.z = -2.0 * z_near * z_far / delta_z;
        p.w.w = 0.0;
        Ok(p)
    }

    /// Orthogonal projection of the given box.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidProjection`] if any extent is zero.
    pub fn create_orthogonal(
        left: Real,
        right: Real,
        bottom: Real,
        top: Real,
        z_near: Real,
        z_far: Real,
    ) -> MathResult<Self> {
        if right == left || top == bottom || z_far == z_near {
            return Err(MathError::InvalidProjection { reason: "orthogonal box has a zero extent" });
        }
        let mut p = Self::IDENTITY;
        p.x.x = 2.0 / (right - left);
        p.w.x = -((right + left) / (right - left));
        p.y.y = 2.0 / (top - bottom);
        p.w.y = -((top + bottom) / (top - bottom));
        p.z.z = -2.0 / (z_far - z_near);
        p.w.z = -((z_far + z_near) / (z_far - z_near));
        p.w.w = 1.0;
        Ok(p)
    }

    /// Column `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfRange`] if `index > 3`.
    pub fn column(&self, index: usize) -> MathResult<Vector4> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::IndexOutOfRange { index, len: 4 }),
        }
    }

    fn columns(&self) -> [Vector4; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Transposed copy.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let row = |i: usize| Vector4::new(self.x[i], self.y[i], self.z[i], self.w[i]);
        Self::new(row(0), row(1), row(2), row(3))
    }

    /// Determinant by cofactor expansion along the first column.
    #[must_use]
    pub fn determinant(&self) -> Real {
        let m = |c: usize, r: usize| self.columns()[c][r];
        let minor = |skip_row: usize| {
            let rows: Vec<usize> = (0..4).filter(|&r| r != skip_row).collect();
            let e = |c: usize, r: usize| m(c, rows[r]);
            e(1, 0) * (e(2, 1) * e(3, 2) - e(3, 1) * e(2, 2))
                - e(2, 0) * (e(1, 1) * e(3, 2) - e(3, 1) * e(1, 2))
                + e(3, 0) * (e(1, 1) * e(2, 2) - e(2, 1) * e(1, 2))
        };
        m(0, 0) * minor(0) - m(0, 1) * minor(1) + m(0, 2) * minor(2) - m(0, 3) * minor(3)
    }

    /// General inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the matrix has no inverse.
    pub fn inverse(&self) -> MathResult<Self> {
        // Row-major working copies: a[r][c].
        let t = self.transposed().columns();
        let mut a: [[Real; 4]; 4] = [t[0].to_array(), t[1].to_array(), t[2].to_array(), t[3].to_array()];
        let mut inv = [[0.0; 4]; 4];
        for (i, row) in inv.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        for col in 0..4 {
            let pivot = (col..4)
                .max_by(|&p, &q| a[p][col].abs().total_cmp(&a[q][col].abs()))
                .unwrap_or(col);
            if a[pivot][col] == 0.0 {
                return Err(MathError::SingularMatrix);
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);

            let scale = 1.0 / a[col][col];
            for c in 0..4 {
                a[col][c] *= scale;
                inv[col][c] *= scale;
            }
            for r in 0..4 {
                if r == col {
                    continue;
                }
                let factor = a[r][col];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..4 {
                    a[r][c] -= factor * a[col][c];
                    inv[r][c] -= factor * inv[col][c];
                }
            }
        }

        Ok(Self::new(
            Vector4::from_array(inv[0]),
            Vector4::from_array(inv[1]),
            Vector4::from_array(inv[2]),
            Vector4::from_array(inv[3]),
        )
        .transposed())
    }

    /// Transforms a homogeneous vector.
    #[must_use]
    pub fn xform(&self, v: Vector4) -> Vector4 {
        self.x * v.x + self.y * v.y + self.z * v.z + self.w * v.w
    }

    /// Transforms a point with `w = 1` and divides by the resulting `w`.
    #[must_use]
    pub fn xform_point(&self, v: Vector3) -> Vector3 {
        let h = self.xform(Vector4::new(v.x, v.y, v.z, 1.0));
        Vector3::new(h.x, h.y, h.z) / h.w
    }

    /// Column-wise [`Vector4::is_equal_approx`].
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.x.is_equal_approx(other.x)
            && self.y.is_equal_approx(other.y)
            && self.z.is_equal_approx(other.z)
            && self.w.is_equal_approx(other.w)
    }
}

impl Mul for Projection {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.xform(rhs.x), self.xform(rhs.y), self.xform(rhs.z), self.xform(rhs.w))
    }
}

impl MulAssign for Projection {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector4> for Projection {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.xform(rhs)
    }
}

impl From<Transform3D> for Projection {
    fn from(t: Transform3D) -> Self {
        let b = t.basis;
        Self::new(
            Vector4::new(b.x.x, b.x.y, b.x.z, 0.0),
            Vector4::new(b.y.x, b.y.y, b.y.z, 0.0),
            Vector4::new(b.z.x, b.z.y, b.z.z, 0.0),
            Vector4::new(t.origin.x, t.origin.y, t.origin.z, 1.0),
        )
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[X: {}, Y: {}, Z: {}, W: {}]", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_determinant_and_inverse() {
        assert_eq!(Projection::IDENTITY.determinant(), 1.0);
        assert_eq!(Projection::IDENTITY.inverse(), Ok(Projection::IDENTITY));
        assert_eq!(Projection::ZERO.inverse(), Err(MathError::SingularMatrix));
    }

    #[test]
    fn test_perspective_inverse_round_trip() {
        let p = Projection::create_perspective(70.0, 16.0 / 9.0, 0.1, 100.0).unwrap();
        let inv = p.inverse().unwrap();
        assert!((p * inv).is_equal_approx(&Projection::IDENTITY));
    }

    #[test]
    fn test_perspective_maps_near_plane() {
        let p = Projection::create_perspective(90.0, 1.0, 1.0, 10.0).unwrap();
        let near = p.xform_point(Vector3::new(0.0, 0.0, -1.0));
        let far = p.xform_point(Vector3::new(0.0, 0.0, -10.0));
        assert!(mathf::is_equal_approx(near.z, -1.0));
        assert!(mathf::is_equal_approx(far.z, 1.0));
    }

    #[test]
    fn test_invalid_projection() {
        assert!(matches!(
            Projection::create_perspective(60.0, 1.0, 5.0, 5.0),
            Err(MathError::InvalidProjection { .. })
        ));
        assert!(Projection::create_orthogonal(0.0, 0.0, -1.0, 1.0, 0.1, 10.0).is_err());
    }

    #[test]
    fn test_orthogonal_maps_box_to_cube() {
        let p = Projection::create_orthogonal(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0).unwrap();
        let corner = p.xform_point(Vector3::new(2.0, 1.0, -10.0));
        assert!(corner.is_equal_approx(Vector3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_determinant_of_scale() {
        let mut p = Projection::IDENTITY;
        p.x.x = 2.0;
        p.y.y = 3.0;
        p.z.z = 4.0;
        assert_eq!(p.determinant(), 24.0);
        assert_eq!(p.column(4), Err(MathError::IndexOutOfRange { index: 4, len: 4 }));
    }
}
