//! # lutfx-math
//!
//! Math primitives for the lutfx grading pipeline.
//!
//! - [`Vec3`] - RGB / LMS / XYZ triplets with component-wise operators
//! - [`Mat3`] - 3x3 matrices for linear color transforms
//! - Scalar helpers ([`lerp`], [`saturate`], [`smoothstep`])
//! - Rec.709 luminance ([`luminance`], [`REC709_LUMA`])
//! - LMS cone space and the daylight locus ([`LINEAR_TO_LMS`], [`cie_xy_to_lms`])
//!
//! # Convention
//!
//! Matrices are **row-major** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use lutfx_math::{Vec3, LINEAR_TO_LMS, luminance};
//!
//! let rgb = Vec3::new(0.5, 0.25, 0.125);
//! let lms = LINEAR_TO_LMS * rgb;
//! assert!(luminance(rgb) > 0.0);
//! assert!(lms.is_finite());
//! ```
//!
//! # Used By
//!
//! - `lutfx-lut` - LUT sampling
//! - `lutfx-grade` - the grading operator chain

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod lms;
mod mat3;
mod vec3;

pub use interp::*;
pub use lms::*;
pub use mat3::*;
pub use vec3::*;

/// Rec.709 luminance coefficient for red.
pub const REC709_LUMA_R: f32 = 0.2126729;

/// Rec.709 luminance coefficient for green.
pub const REC709_LUMA_G: f32 = 0.7151522;

/// Rec.709 luminance coefficient for blue.
pub const REC709_LUMA_B: f32 = 0.0721750;

/// Rec.709 luminance weights as a vector.
pub const REC709_LUMA: Vec3 = Vec3::new(REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B);

/// Rec.709 luminance of a linear RGB triplet.
///
/// ```rust
/// use lutfx_math::{luminance, Vec3};
///
/// assert!((luminance(Vec3::ONE) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(REC709_LUMA)
}
