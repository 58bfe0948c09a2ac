//! RGBA colors as grading parameters carry them.
//!
//! Parameter colors (tint, split-toning, shadows/midtones/highlights) are
//! authored in a color picker, so they are plain RGBA with alpha. Some of
//! them are sRGB-encoded and need [`Color::to_linear`] before use.

use lutfx_math::Vec3;
use serde::{Deserialize, Serialize};

/// An RGBA color, f32 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    #[serde(default = "one")]
    pub a: f32,
}

fn one() -> f32 {
    1.0
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb_const(1.0, 1.0, 1.0);
    /// Opaque 50% gray, the neutral value for soft-light blends.
    pub const GRAY: Self = Self::rgb_const(0.5, 0.5, 0.5);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb_const(0.0, 0.0, 0.0);

    /// Creates a color.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    const fn rgb_const(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from RGB.
    #[inline]
    pub fn opaque(rgb: Vec3) -> Self {
        Self::new(rgb.x, rgb.y, rgb.z, 1.0)
    }

    /// Same color with another alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// RGB part.
    #[inline]
    pub fn rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Decodes sRGB-encoded RGB to linear. Alpha is left alone.
    ///
    /// ```rust
    /// use lutfx_grade::Color;
    ///
    /// let lin = Color::GRAY.to_linear();
    /// assert!((lin.r - 0.214).abs() < 1e-3);
    /// assert_eq!(lin.a, 1.0);
    /// ```
    pub fn to_linear(self) -> Self {
        Self::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// sRGB EOTF, piecewise with the linear toe.
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn eotf_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert_relative_eq!(srgb_to_linear(1.0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(srgb_to_linear(0.04), 0.04 / 12.92, epsilon = 1e-7);
    }

    #[test]
    fn white_stays_white() {
        let lin = Color::WHITE.to_linear();
        assert_relative_eq!(lin.r, 1.0, epsilon = 1e-6);
        assert_relative_eq!(lin.b, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn yaml_alpha_defaults_to_one() {
        let c: Color = serde_yaml::from_str("{ r: 0.1, g: 0.2, b: 0.3 }").unwrap();
        assert_eq!(c, Color::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn array_conversions() {
        let c = Color::from([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(<[f32; 4]>::from(c), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(c.with_alpha(1.0).a, 1.0);
        assert_eq!(Color::opaque(Vec3::ONE), Color::WHITE);
    }
}
