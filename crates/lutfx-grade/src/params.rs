//! Grading parameter block.
//!
//! The host owns one [`GradingParameters`] per effect and edits it from UI
//! or scripts. Ranged fields are clamped at the host boundary with
//! [`GradingParameters::clamped`]; the pipeline itself takes values as given.
//!
//! Parameters round-trip through YAML. Missing fields take their defaults,
//! so a file only needs the values that differ:
//!
//! ```yaml
//! enable_color_grading: true
//! exposure: 0.5
//! tonemap: ACES
//! ```

use crate::{Color, GradeError, GradeResult, Tonemapper};
use lutfx_lut::Mode;
use lutfx_math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Parameters of the grading effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingParameters {
    /// Blend between source and result, [0, 1]. 0 disables the effect.
    pub intensity: f32,
    /// LUT tier to sample.
    pub mode: Mode,

    /// Gates the operator chain. The LUT is applied either way.
    pub enable_color_grading: bool,
    /// Tonemap operator.
    pub tonemap: Tonemapper,
    /// Post exposure in stops.
    pub exposure: f32,
    /// Contrast, [-100, 100].
    pub contrast: f32,
    /// Color filter.
    pub tint: Color,
    /// Hue shift in degrees, [-180, 180].
    pub hue: f32,
    /// Saturation, [-100, 100].
    pub saturation: f32,
    /// White balance temperature, [-100, 100].
    pub white_temperature: f32,
    /// White balance green/magenta tint, [-100, 100].
    pub white_tint: f32,
    /// Split-toning color for shadows.
    pub split_toning_shadows: Color,
    /// Split-toning color for highlights.
    pub split_toning_highlights: Color,
    /// Bias between the two split-toning colors, [-100, 100].
    pub split_toning_balance: f32,
    /// Weights of the output red channel.
    pub channel_mixer_red: Vec3,
    /// Weights of the output green channel.
    pub channel_mixer_green: Vec3,
    /// Weights of the output blue channel.
    pub channel_mixer_blue: Vec3,
    /// Shadows multiplier (sRGB-encoded).
    pub shadows: Color,
    /// Midtones multiplier (sRGB-encoded).
    pub midtones: Color,
    /// Highlights multiplier (sRGB-encoded).
    pub highlights: Color,
    /// Luma where the shadow mask starts falling, [0, 2].
    pub shadows_start: f32,
    /// Luma where the shadow mask reaches 0, [0, 2].
    pub shadows_end: f32,
    /// Luma where the highlight mask starts rising, [0, 2].
    pub highlights_start: f32,
    /// Luma where the highlight mask reaches 1, [0, 2].
    pub highlights_end: f32,
}

impl Default for GradingParameters {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            mode: Mode::Quality,
            enable_color_grading: false,
            tonemap: Tonemapper::None,
            exposure: 0.0,
            contrast: 0.0,
            tint: Color::WHITE,
            hue: 0.0,
            saturation: 0.0,
            white_temperature: 0.0,
            white_tint: 0.0,
            split_toning_shadows: Color::GRAY,
            split_toning_highlights: Color::GRAY,
            split_toning_balance: 0.0,
            channel_mixer_red: Vec3::X,
            channel_mixer_green: Vec3::Y,
            channel_mixer_blue: Vec3::Z,
            shadows: Color::WHITE,
            midtones: Color::WHITE,
            highlights: Color::WHITE,
            shadows_start: 0.0,
            shadows_end: 0.3,
            highlights_start: 0.55,
            highlights_end: 1.0,
        }
    }
}

impl GradingParameters {
    /// Restores every field to its default.
    pub fn reset_default_values(&mut self) {
        *self = Self::default();
    }

    /// True when the effect would change anything at all.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Copy with every ranged field clamped and start/end pairs ordered.
    ///
    /// Non-finite values fall back to the field default. Each adjustment is
    /// logged at debug level.
    ///
    /// ```rust
    /// use lutfx_grade::GradingParameters;
    ///
    /// let p = GradingParameters { contrast: 250.0, ..Default::default() };
    /// assert_eq!(p.clamped().contrast, 100.0);
    /// ```
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        let mut defaults = Self::default();

        for ((name, value, min, max), (_, fallback, _, _)) in
            out.ranged_mut().into_iter().zip(defaults.ranged_mut())
        {
            let fixed = if (*value).is_finite() {
                (*value).clamp(min, max)
            } else {
                *fallback
            };
            if fixed != *value {
                debug!(field = name, from = *value, to = fixed, "clamped grading parameter");
                *value = fixed;
            }
        }

        if !out.exposure.is_finite() {
            debug!(field = "exposure", from = out.exposure, to = 0.0, "clamped grading parameter");
            out.exposure = 0.0;
        }

        if out.shadows_start > out.shadows_end {
            debug!(start = out.shadows_start, end = out.shadows_end, "swapped shadow range");
            std::mem::swap(&mut out.shadows_start, &mut out.shadows_end);
        }
        if out.highlights_start > out.highlights_end {
            debug!(
                start = out.highlights_start,
                end = out.highlights_end,
                "swapped highlight range"
            );
            std::mem::swap(&mut out.highlights_start, &mut out.highlights_end);
        }

        out
    }

    /// Ranged fields with their bounds.
    fn ranged_mut(&mut self) -> [(&'static str, &mut f32, f32, f32); 11] {
        [
            ("intensity", &mut self.intensity, 0.0, 1.0),
            ("contrast", &mut self.contrast, -100.0, 100.0),
            ("hue", &mut self.hue, -180.0, 180.0),
            ("saturation", &mut self.saturation, -100.0, 100.0),
            ("white_temperature", &mut self.white_temperature, -100.0, 100.0),
            ("white_tint", &mut self.white_tint, -100.0, 100.0),
            ("split_toning_balance", &mut self.split_toning_balance, -100.0, 100.0),
            ("shadows_start", &mut self.shadows_start, 0.0, 2.0),
            ("shadows_end", &mut self.shadows_end, 0.0, 2.0),
            ("highlights_start", &mut self.highlights_start, 0.0, 2.0),
            ("highlights_end", &mut self.highlights_end, 0.0, 2.0),
        ]
    }

    /// Rejects non-finite numbers, which clamping cannot give a meaning to
    /// in colors and mixer weights.
    pub fn validate(&self) -> GradeResult<()> {
        let colors = [
            ("tint", self.tint),
            ("split_toning_shadows", self.split_toning_shadows),
            ("split_toning_highlights", self.split_toning_highlights),
            ("shadows", self.shadows),
            ("midtones", self.midtones),
            ("highlights", self.highlights),
        ];
        for (name, c) in colors {
            if !(c.rgb().is_finite() && c.a.is_finite()) {
                return Err(GradeError::InvalidParameter(format!("{} is not finite", name)));
            }
        }

        let mixer = [
            ("channel_mixer_red", self.channel_mixer_red),
            ("channel_mixer_green", self.channel_mixer_green),
            ("channel_mixer_blue", self.channel_mixer_blue),
        ];
        for (name, v) in mixer {
            if !v.is_finite() {
                return Err(GradeError::InvalidParameter(format!("{} is not finite", name)));
            }
        }
        Ok(())
    }

    /// Parses YAML. Missing fields take defaults.
    pub fn from_yaml_str(text: &str) -> GradeResult<Self> {
        let params: Self = serde_yaml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Serializes every field to YAML.
    pub fn to_yaml_string(&self) -> GradeResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reads a YAML parameter file.
    pub fn load<P: AsRef<Path>>(path: P) -> GradeResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading grading parameters");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Writes a YAML parameter file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> GradeResult<()> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}
