//! LMS cone space and the daylight locus.
//!
//! White balance works by scaling cone responses. Linear Rec.709 RGB goes
//! to LMS through the CAT02 sharpened-cone matrix; a target white point,
//! given as CIE xy on the daylight locus, goes to LMS the same way. The
//! ratio between the two whites is the per-cone gain.
//!
//! # Reference
//!
//! CIECAM02 (CIE 159:2004) for [`CAT02`].

use crate::{Mat3, Vec3};

/// CAT02 chromatic adaptation matrix, XYZ to sharpened LMS.
pub const CAT02: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// Linear Rec.709 RGB (D65) to CAT02 LMS.
pub const LINEAR_TO_LMS: Mat3 = Mat3::from_rows([
    [3.90405e-1, 5.49941e-1, 8.92632e-3],
    [7.08416e-2, 9.63172e-1, 1.35775e-3],
    [2.31082e-2, 1.28021e-1, 9.36245e-1],
]);

/// CAT02 LMS back to linear Rec.709 RGB, rounded to six digits.
///
/// Prefer [`lms_to_linear`] when the round trip must be tight.
pub const LMS_TO_LINEAR: Mat3 = Mat3::from_rows([
    [2.85847e+0, -1.62879e+0, -2.48910e-2],
    [-2.10182e-1, 1.15820e+0, 3.24281e-4],
    [-4.18120e-2, -1.18169e-1, 1.06867e+0],
]);

/// CIE x of the D65 white point.
pub const D65_X: f32 = 0.31271;

/// Exact inverse of [`LINEAR_TO_LMS`].
pub fn lms_to_linear() -> Mat3 {
    LINEAR_TO_LMS.inverse().unwrap_or(LMS_TO_LINEAR)
}

/// CIE y on the daylight locus for a given x.
///
/// Polynomial fit valid for roughly 4000K to 25000K.
#[inline]
pub fn standard_illuminant_y(x: f32) -> f32 {
    2.87 * x - 3.0 * x * x - 0.27509507
}

/// CIE xy chromaticity (Y = 1) to CAT02 LMS.
///
/// ```rust
/// use lutfx_math::{cie_xy_to_lms, standard_illuminant_y, D65_X};
///
/// let d65 = cie_xy_to_lms(D65_X, standard_illuminant_y(D65_X));
/// assert!(d65.is_finite());
/// ```
pub fn cie_xy_to_lms(x: f32, y: f32) -> Vec3 {
    let xyz = Vec3::new(x / y, 1.0, (1.0 - x - y) / y);
    CAT02 * xyz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_inverse_is_close() {
        let product = LMS_TO_LINEAR * LINEAR_TO_LMS;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.m[i][j] - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn exact_inverse_roundtrips() {
        let back = lms_to_linear();
        let c = Vec3::new(0.8, 0.2, 0.05);
        let rt = back * (LINEAR_TO_LMS * c);
        assert!(rt.max_abs_diff(c) < 1e-5);
    }

    #[test]
    fn daylight_locus_at_d65() {
        let y = standard_illuminant_y(D65_X);
        assert!((y - 0.329).abs() < 1e-3);
    }

    #[test]
    fn white_is_balanced_in_lms() {
        // Linear white maps close to the D65 white in LMS.
        let lms = LINEAR_TO_LMS * Vec3::ONE;
        let d65 = cie_xy_to_lms(D65_X, standard_illuminant_y(D65_X));
        assert!((lms.x / d65.x - 1.0).abs() < 1e-3);
        assert!((lms.y / d65.y - 1.0).abs() < 1e-3);
        assert!((lms.z / d65.z - 1.0).abs() < 1e-3);
    }
}
