//! The per-pixel grading pipeline.
//!
//! [`ColorGradingPipeline::new`] turns a [`GradingParameters`] snapshot into
//! the uniforms the operators consume, once per frame. After that every
//! pixel goes through:
//!
//! ```text
//! source ──► [operator chain, if enabled] ──► tonemap ──► LUT ──► lerp(source, ·, intensity)
//! ```
//!
//! The pipeline holds no references and no interior state, so one instance
//! can be shared by every worker thread of a frame.

use crate::GradingParameters;
use crate::ops::{self, ToneColors, ToneRanges};
use crate::tonemap::Tonemapper;
use crate::{Color, GradeResult};
use lutfx_lut::{Lut3D, LutProfile, Mode};
use lutfx_math::{Mat3, Vec3, lms_to_linear};
use tracing::trace;

/// Precomputed grading uniforms.
///
/// # Example
///
/// ```rust
/// use lutfx_grade::{ColorGradingPipeline, GradingParameters};
/// use lutfx_lut::LutProfile;
/// use lutfx_math::Vec3;
///
/// let params = GradingParameters {
///     enable_color_grading: true,
///     exposure: 1.0,
///     ..Default::default()
/// };
/// let pipeline = ColorGradingPipeline::new(&params);
/// let profile = LutProfile::identity("Neutral", 33, 17);
///
/// let out = pipeline.apply(Vec3::new(0.1, 0.2, 0.3), &profile);
/// assert!((out.y - 0.4).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradingPipeline {
    intensity: f32,
    mode: Mode,
    grading: bool,
    tonemap: Tonemapper,

    exposure: f32,
    contrast: f32,
    tint: Vec3,
    hue_turns: f32,
    saturation: f32,

    white_balance: Option<(Vec3, Mat3)>,
    /// Shadows tone in rgb, balance in alpha.
    split_shadows: Color,
    split_highlights: Vec3,
    split_toning: bool,

    mixer: Mat3,
    tone_colors: ToneColors,
    tone_ranges: ToneRanges,
}

impl ColorGradingPipeline {
    /// Derives the uniforms from a parameter snapshot.
    ///
    /// Parameters are taken as given; clamp them at the host boundary with
    /// [`GradingParameters::clamped`].
    pub fn new(params: &GradingParameters) -> Self {
        let white_balance = if params.white_temperature != 0.0 || params.white_tint != 0.0 {
            let coeffs = ops::color_balance_to_lms_coeffs(params.white_temperature, params.white_tint);
            Some((coeffs, lms_to_linear()))
        } else {
            None
        };

        let split_shadows = params
            .split_toning_shadows
            .with_alpha(params.split_toning_balance * 0.01);
        let split_highlights = params.split_toning_highlights.rgb();
        // Gray on both sides blends to nothing whatever the balance.
        let split_toning = split_shadows.rgb() != Color::GRAY.rgb()
            || split_highlights != Color::GRAY.rgb();

        let pipeline = Self {
            intensity: params.intensity,
            mode: params.mode,
            grading: params.enable_color_grading,
            tonemap: params.tonemap,
            exposure: ops::exposure_multiplier(params.exposure),
            contrast: ops::contrast_factor(params.contrast),
            tint: params.tint.rgb(),
            hue_turns: params.hue / 360.0,
            saturation: ops::saturation_factor(params.saturation),
            white_balance,
            split_shadows,
            split_highlights,
            split_toning,
            mixer: ops::channel_mixer_matrix(
                params.channel_mixer_red,
                params.channel_mixer_green,
                params.channel_mixer_blue,
            ),
            tone_colors: ToneColors {
                shadows: params.shadows.to_linear().rgb(),
                midtones: params.midtones.to_linear().rgb(),
                highlights: params.highlights.to_linear().rgb(),
            },
            tone_ranges: ToneRanges {
                shadows_start: params.shadows_start,
                shadows_end: params.shadows_end,
                highlights_start: params.highlights_start,
                highlights_end: params.highlights_end,
            },
        };

        trace!(
            intensity = pipeline.intensity,
            grading = pipeline.grading,
            exposure = pipeline.exposure,
            contrast = pipeline.contrast,
            split_toning = pipeline.split_toning,
            white_balance = pipeline.white_balance.is_some(),
            "pipeline uniforms"
        );
        pipeline
    }

    /// Effect intensity.
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// LUT tier sampled by [`apply`](Self::apply).
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// False when every pixel would come back unchanged.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Operator chain only, steps exposure through tonemap.
    ///
    /// Runs the chain whether or not grading is enabled.
    pub fn grade(&self, c: Vec3) -> Vec3 {
        let mut c = ops::exposure(c, self.exposure);
        c = ops::contrast(c, self.contrast);
        c = ops::tint(c, self.tint);
        c = ops::hue_saturation(c, self.hue_turns, self.saturation);

        if let Some((coeffs, to_linear)) = &self.white_balance {
            c = ops::white_balance_with(c, *coeffs, to_linear);
        }

        if self.split_toning {
            c = ops::split_toning(
                c,
                self.split_shadows.rgb(),
                self.split_highlights,
                self.split_shadows.a,
            );
        }

        c = ops::channel_mixer(c, &self.mixer);
        c = ops::shadows_midtones_highlights(c, &self.tone_colors, self.tone_ranges);
        self.tonemap.apply(c)
    }

    /// Full per-pixel transform against the profile tier picked by `mode`.
    #[inline]
    pub fn apply(&self, source: Vec3, profile: &LutProfile) -> Vec3 {
        self.apply_with_lut(source, profile.select(self.mode))
    }

    /// Full per-pixel transform against an explicit LUT.
    ///
    /// Returns `source` untouched when intensity is 0 or below.
    pub fn apply_with_lut(&self, source: Vec3, lut: &Lut3D) -> Vec3 {
        if self.intensity <= 0.0 {
            return source;
        }

        let graded = if self.grading { self.grade(source) } else { source };
        let looked_up = lut.sample(graded);
        blend(source, looked_up, self.intensity)
    }

    /// [`apply`](Self::apply) on RGBA; alpha passes through.
    #[inline]
    pub fn apply_rgba(&self, rgba: [f32; 4], profile: &LutProfile) -> [f32; 4] {
        self.apply_rgba_with_lut(rgba, profile.select(self.mode))
    }

    /// [`apply_with_lut`](Self::apply_with_lut) on RGBA; alpha passes through.
    #[inline]
    pub fn apply_rgba_with_lut(&self, rgba: [f32; 4], lut: &Lut3D) -> [f32; 4] {
        let rgb = self.apply_with_lut(Vec3::new(rgba[0], rgba[1], rgba[2]), lut);
        [rgb.x, rgb.y, rgb.z, rgba[3]]
    }

    /// Bakes the whole transform into a single cube.
    ///
    /// With a base LUT the result matches [`apply_with_lut`](Self::apply_with_lut)
    /// at the grid points; without one the chain output is blended directly.
    pub fn bake(&self, size: usize, base: Option<&Lut3D>) -> GradeResult<Lut3D> {
        let lut = Lut3D::from_fn(size, |rgb| {
            let source = Vec3::from(rgb);
            let out = match base {
                Some(base) => self.apply_with_lut(source, base),
                None if self.intensity <= 0.0 => source,
                None => {
                    let graded = if self.grading { self.grade(source) } else { source };
                    blend(source, graded, self.intensity)
                }
            };
            out.to_array()
        })?;
        Ok(lut)
    }
}

impl Default for ColorGradingPipeline {
    fn default() -> Self {
        Self::new(&GradingParameters::default())
    }
}

/// `source * (1 - t) + result * t`. Full intensity returns `result` as is,
/// so a non-finite source never leaks into it.
#[inline]
fn blend(source: Vec3, result: Vec3, t: f32) -> Vec3 {
    if t >= 1.0 {
        return result;
    }
    source * (1.0 - t) + result * t
}
