//! Per-pixel grading operators.
//!
//! Each operator takes a linear RGB color plus its precomputed uniform and
//! returns the adjusted color. [`ColorGradingPipeline`](crate::ColorGradingPipeline)
//! derives the uniforms once per frame and chains the operators in order:
//!
//! 1. [`exposure`]
//! 2. [`contrast`]
//! 3. [`tint`]
//! 4. [`hue_saturation`]
//! 5. [`white_balance`]
//! 6. [`split_toning`]
//! 7. [`channel_mixer`]
//! 8. [`shadows_midtones_highlights`]
//!
//! None of them fail or panic. Values outside [0, 1] pass through; only the
//! split-toning stage, which works in gamma space, folds negatives.

use lutfx_math::{
    LINEAR_TO_LMS, Mat3, Vec3, cie_xy_to_lms, fract, lms_to_linear, luminance, saturate,
    smoothstep, standard_illuminant_y, D65_X,
};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Scene-linear mid gray, the contrast pivot.
pub const MID_GRAY: f32 = 0.18;

/// Gamma used by the split-toning stage.
pub const SPLIT_TONING_GAMMA: f32 = 2.2;

// ============================================================================
// Exposure / contrast / tint
// ============================================================================

/// Multiplier for an exposure in stops: `2^stops`.
#[inline]
pub fn exposure_multiplier(stops: f32) -> f32 {
    stops.exp2()
}

/// Scales by an exposure multiplier.
///
/// ```rust
/// use lutfx_grade::ops::{exposure, exposure_multiplier};
/// use lutfx_math::Vec3;
///
/// let c = exposure(Vec3::splat(0.25), exposure_multiplier(1.0));
/// assert_eq!(c, Vec3::splat(0.5));
/// ```
#[inline]
pub fn exposure(c: Vec3, multiplier: f32) -> Vec3 {
    c * multiplier
}

/// Contrast slider value [-100, 100] to a slope around [`MID_GRAY`].
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    contrast * 0.01 + 1.0
}

/// `(c - mid) * factor + mid`, per channel.
#[inline]
pub fn contrast(c: Vec3, factor: f32) -> Vec3 {
    (c - MID_GRAY) * factor + MID_GRAY
}

/// Color filter.
#[inline]
pub fn tint(c: Vec3, filter: Vec3) -> Vec3 {
    c * filter
}

// ============================================================================
// Hue / saturation
// ============================================================================

/// RGB to HSV, hue in turns.
///
/// Grays get hue and saturation 0. An all-negative color keeps its hue
/// with a negative value and saturation, which [`hsv_to_rgb`] inverts.
/// Only `max == 0` has no hue and collapses to black.
pub fn rgb_to_hsv(c: Vec3) -> Vec3 {
    let max = c.max_element();
    let min = c.min_element();
    let d = max - min;

    if d <= 0.0 || max == 0.0 {
        return Vec3::new(0.0, 0.0, max);
    }

    let h = if max == c.x {
        (c.y - c.z) / d
    } else if max == c.y {
        (c.z - c.x) / d + 2.0
    } else {
        (c.x - c.y) / d + 4.0
    };

    Vec3::new(fract(h / 6.0), d / max, max)
}

/// HSV (hue in turns) to RGB.
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let h = fract(hsv.x);
    let p = Vec3::new(
        (fract(h + 1.0) * 6.0 - 3.0).abs() - 1.0,
        (fract(h + 2.0 / 3.0) * 6.0 - 3.0).abs() - 1.0,
        (fract(h + 1.0 / 3.0) * 6.0 - 3.0).abs() - 1.0,
    );
    Vec3::ONE.lerp_vec(p.clamp01(), Vec3::splat(hsv.y)) * hsv.z
}

/// Saturation slider value [-100, 100] to a scale around luma.
#[inline]
pub fn saturation_factor(saturation: f32) -> f32 {
    saturation * 0.01 + 1.0
}

/// Rotates hue by `hue_turns`, then scales saturation around Rec.709 luma.
///
/// A zero rotation skips the HSV round trip.
pub fn hue_saturation(c: Vec3, hue_turns: f32, sat_factor: f32) -> Vec3 {
    let c = if hue_turns != 0.0 {
        let mut hsv = rgb_to_hsv(c);
        hsv.x = fract(hsv.x + hue_turns);
        hsv_to_rgb(hsv)
    } else {
        c
    };

    let luma = luminance(c);
    (c - luma) * sat_factor + luma
}

// ============================================================================
// White balance
// ============================================================================

/// Per-cone gains that move D65 to the white picked by `(temperature, tint)`.
///
/// Temperature walks x along the daylight locus, tint offsets y off it.
/// Both are slider values in [-100, 100]; `(0, 0)` gives exactly `(1, 1, 1)`.
///
/// ```rust
/// use lutfx_grade::ops::color_balance_to_lms_coeffs;
/// use lutfx_math::Vec3;
///
/// assert_eq!(color_balance_to_lms_coeffs(0.0, 0.0), Vec3::ONE);
/// let warm = color_balance_to_lms_coeffs(50.0, 0.0);
/// assert!(warm.x > warm.z);
/// ```
pub fn color_balance_to_lms_coeffs(temperature: f32, tint: f32) -> Vec3 {
    let t1 = temperature / 65.0;
    let t2 = tint / 65.0;

    // Cooler moves faster along x than warmer.
    let x = D65_X - t1 * if t1 < 0.0 { 0.1 } else { 0.05 };
    let y = standard_illuminant_y(x) + t2 * 0.05;

    let reference = cie_xy_to_lms(D65_X, standard_illuminant_y(D65_X));
    let target = cie_xy_to_lms(x, y);
    reference / target
}

/// Linear RGB to LMS, scaled per cone, and back.
#[inline]
pub fn white_balance(c: Vec3, lms_coeffs: Vec3) -> Vec3 {
    lms_to_linear() * ((LINEAR_TO_LMS * c) * lms_coeffs)
}

/// Same as [`white_balance`] with a caller-held LMS-to-linear matrix.
#[inline]
pub(crate) fn white_balance_with(c: Vec3, lms_coeffs: Vec3, to_linear: &Mat3) -> Vec3 {
    *to_linear * ((LINEAR_TO_LMS * c) * lms_coeffs)
}

// ============================================================================
// Split toning
// ============================================================================

/// Soft-light blend. A 0.5 blend returns `base` unchanged.
#[inline]
pub fn soft_light(base: Vec3, blend: Vec3) -> Vec3 {
    let mut out = Vec3::ZERO;
    for i in 0..3 {
        let (b, s) = (base[i], blend[i]);
        out[i] = if s >= 0.5 {
            b.sqrt() * (2.0 * s - 1.0) + 2.0 * b * (1.0 - s)
        } else {
            2.0 * b * s + b * b * (1.0 - 2.0 * s)
        };
    }
    out
}

/// Soft-light tints toward `shadows` in dark tones and `highlights` in
/// bright tones, in gamma 2.2 space.
///
/// `balance` is the split-toning balance already scaled by 0.01; it biases
/// the luma that weighs the two colors.
pub fn split_toning(c: Vec3, shadows: Vec3, highlights: Vec3, balance: f32) -> Vec3 {
    let gamma = c.positive_pow(1.0 / SPLIT_TONING_GAMMA);
    let t = saturate(luminance(gamma.clamp01()) + balance);

    let sh = Vec3::splat(0.5).lerp(shadows, 1.0 - t);
    let hi = Vec3::splat(0.5).lerp(highlights, t);

    let toned = soft_light(soft_light(gamma, sh), hi);
    toned.positive_pow(SPLIT_TONING_GAMMA)
}

// ============================================================================
// Channel mixer
// ============================================================================

/// Mixer matrix whose rows are the per-output-channel weights.
#[inline]
pub fn channel_mixer_matrix(red: Vec3, green: Vec3, blue: Vec3) -> Mat3 {
    Mat3::from_row_vecs(red, green, blue)
}

/// `out.r = dot(c, red)` and so on.
#[inline]
pub fn channel_mixer(c: Vec3, mixer: &Mat3) -> Vec3 {
    *mixer * c
}

// ============================================================================
// Shadows / midtones / highlights
// ============================================================================

/// Luma ranges of the shadow and highlight ramps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRanges {
    /// Shadow mask is 1 below this luma.
    pub shadows_start: f32,
    /// Shadow mask is 0 above this luma.
    pub shadows_end: f32,
    /// Highlight mask is 0 below this luma.
    pub highlights_start: f32,
    /// Highlight mask is 1 above this luma.
    pub highlights_end: f32,
}

impl Default for ToneRanges {
    fn default() -> Self {
        Self {
            shadows_start: 0.0,
            shadows_end: 0.3,
            highlights_start: 0.55,
            highlights_end: 1.0,
        }
    }
}

/// Weights of the three tonal ranges at one luma. They sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMasks {
    /// Shadow weight.
    pub shadows: f32,
    /// Midtone weight.
    pub midtones: f32,
    /// Highlight weight.
    pub highlights: f32,
}

/// Evaluates the tonal masks.
///
/// If the ramps overlap far enough that shadows and highlights together
/// exceed 1, both are scaled down and midtones get nothing.
///
/// ```rust
/// use lutfx_grade::ops::{ToneRanges, tone_masks};
///
/// let m = tone_masks(0.4, ToneRanges::default());
/// assert_eq!(m.shadows, 0.0);
/// assert_eq!(m.highlights, 0.0);
/// assert_eq!(m.midtones, 1.0);
/// ```
pub fn tone_masks(luma: f32, ranges: ToneRanges) -> ToneMasks {
    // NaN luma behaves like black.
    let luma = if luma.is_nan() { 0.0 } else { luma };

    let mut s = 1.0 - smoothstep(ranges.shadows_start, ranges.shadows_end, luma);
    let mut h = smoothstep(ranges.highlights_start, ranges.highlights_end, luma);

    let sum = s + h;
    if sum > 1.0 {
        s /= sum;
        h /= sum;
    }

    ToneMasks {
        shadows: s,
        midtones: (1.0 - s - h).max(0.0),
        highlights: h,
    }
}

/// Linear multipliers for the three tonal ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneColors {
    /// Shadows multiplier.
    pub shadows: Vec3,
    /// Midtones multiplier.
    pub midtones: Vec3,
    /// Highlights multiplier.
    pub highlights: Vec3,
}

impl Default for ToneColors {
    fn default() -> Self {
        Self {
            shadows: Vec3::ONE,
            midtones: Vec3::ONE,
            highlights: Vec3::ONE,
        }
    }
}

/// Three-way multiply weighted by the luma masks.
pub fn shadows_midtones_highlights(c: Vec3, colors: &ToneColors, ranges: ToneRanges) -> Vec3 {
    let m = tone_masks(luminance(c), ranges);
    c * colors.shadows * m.shadows
        + c * colors.midtones * m.midtones
        + c * colors.highlights * m.highlights
}
