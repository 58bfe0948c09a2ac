//! 3x3 matrices for linear color transforms.
//!
//! Row-major storage, column vectors:
//!
//! ```text
//! | m00 m01 m02 |   | r |
//! | m10 m11 m12 | * | g |
//! | m20 m21 m22 |   | b |
//! ```

use crate::Vec3;
use std::ops::Mul;

/// A 3x3 matrix.
///
/// ```rust
/// use lutfx_math::{Mat3, Vec3};
///
/// let swap_rg = Mat3::from_rows([
///     [0.0, 1.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0],
/// ]);
/// assert_eq!(swap_rg * Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.2, 0.1, 0.3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Elements as `[row0, row1, row2]`.
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// All zeros.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Builds a matrix from rows.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Builds a matrix whose rows are the given vectors.
    ///
    /// A channel mixer is exactly this: `out.r = dot(c, red)` and so on.
    #[inline]
    pub const fn from_row_vecs(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::from_rows([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Row `i` as a vector.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse by cofactors, `None` when singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return None;
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// `self * v`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
        )
    }

    /// `self * other`.
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        out
    }

    /// Converts to [`glam::Mat3`] (column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat3 {
        glam::Mat3::from_cols(
            self.col(0).to_glam(),
            self.col(1).to_glam(),
            self.col(2).to_glam(),
        )
    }

    #[inline]
    fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform() {
        let v = Vec3::new(0.3, 0.6, 0.9);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn inverse_roundtrip() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let product = m * m.inverse().unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.m[i][j] - expected).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn singular_has_no_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn glam_agrees() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let v = Vec3::new(0.5, -1.0, 2.0);
        let ours = m * v;
        let theirs = Vec3::from_glam(m.to_glam() * v.to_glam());
        assert!(ours.max_abs_diff(theirs) < 1e-6);
    }

    #[test]
    fn row_vectors_build_a_mixer() {
        let mixer = Mat3::from_row_vecs(Vec3::Y, Vec3::X, Vec3::Z);
        assert_eq!(mixer * Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.2, 0.1, 0.3));
    }
}
