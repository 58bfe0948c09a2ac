//! Tonemapping operators.
//!
//! Applied after every grading step and before the LUT lookup, compressing
//! scene-linear HDR values into the range the LUT was baked for. Inputs are
//! floored at zero first, so negative channels out of the channel mixer
//! cannot hit a pole in the rational curves.

use lutfx_math::{Vec3, saturate};
use serde::{Deserialize, Serialize};

/// Tonemapping operator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tonemapper {
    /// Identity.
    #[default]
    None,
    /// Low-contrast filmic curve that keeps hues stable.
    Neutral,
    /// Narkowicz fit of the ACES RRT+ODT.
    #[serde(rename = "ACES", alias = "Aces")]
    Aces,
    /// `c / (1 + c)`.
    Reinhard,
}

impl Tonemapper {
    /// Tonemaps a linear RGB color.
    ///
    /// ```rust
    /// use lutfx_grade::Tonemapper;
    /// use lutfx_math::Vec3;
    ///
    /// let out = Tonemapper::Reinhard.apply(Vec3::splat(2.0));
    /// assert!((out.x - 2.0 / 3.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn apply(self, rgb: Vec3) -> Vec3 {
        match self {
            Tonemapper::None => rgb,
            Tonemapper::Neutral => rgb.map(neutral),
            Tonemapper::Aces => rgb.map(aces_fitted),
            Tonemapper::Reinhard => rgb.map(reinhard),
        }
    }

    /// Parses a CLI-style name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Tonemapper::None),
            "neutral" => Some(Tonemapper::Neutral),
            "aces" => Some(Tonemapper::Aces),
            "reinhard" => Some(Tonemapper::Reinhard),
            _ => None,
        }
    }
}

/// Coefficients of the rational filmic curve
/// `((x(ax + cb) + de) / (x(ax + b) + df)) - e/f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmicCurve {
    /// Shoulder strength
    pub a: f32,
    /// Linear strength
    pub b: f32,
    /// Linear angle
    pub c: f32,
    /// Toe strength
    pub d: f32,
    /// Toe numerator
    pub e: f32,
    /// Toe denominator
    pub f: f32,
    /// Input mapped to 1.0 after white scaling.
    pub white_level: f32,
    /// Output divisor applied last.
    pub white_clip: f32,
}

impl FilmicCurve {
    /// Constants of the neutral tonemapper.
    pub const NEUTRAL: Self = Self {
        a: 0.2,
        b: 0.29,
        c: 0.24,
        d: 0.272,
        e: 0.02,
        f: 0.3,
        white_level: 5.3,
        white_clip: 1.0,
    };

    /// Unscaled curve value.
    #[inline]
    pub fn curve(&self, x: f32) -> f32 {
        let Self { a, b, c, d, e, f, .. } = *self;
        ((x * (a * x + c * b) + d * e) / (x * (a * x + b) + d * f)) - e / f
    }

    /// Curve normalized so `white_level` maps to `1 / white_clip`.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        let white_scale = 1.0 / self.curve(self.white_level);
        self.curve(x.max(0.0) * white_scale) * white_scale / self.white_clip
    }
}

impl Default for FilmicCurve {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Neutral filmic tonemap of one channel.
#[inline]
pub fn neutral(x: f32) -> f32 {
    FilmicCurve::NEUTRAL.eval(x)
}

/// ACES fitted curve `(x(2.51x + 0.03)) / (x(2.43x + 0.59) + 0.14)`, in [0, 1].
#[inline]
pub fn aces_fitted(x: f32) -> f32 {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;
    let x = x.max(0.0);
    saturate((x * (A * x + B)) / (x * (C * x + D) + E))
}

/// Reinhard `x / (1 + x)`.
#[inline]
pub fn reinhard(x: f32) -> f32 {
    let x = x.max(0.0);
    x / (1.0 + x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn none_is_identity() {
        let c = Vec3::new(-0.5, 1.5, 12.0);
        assert_eq!(Tonemapper::None.apply(c), c);
    }

    #[test]
    fn black_stays_black() {
        for op in [Tonemapper::Neutral, Tonemapper::Aces, Tonemapper::Reinhard] {
            let out = op.apply(Vec3::ZERO);
            assert!(out.max_element().abs() < 1e-6, "{:?}", op);
        }
    }

    #[test]
    fn reinhard_two() {
        let out = Tonemapper::Reinhard.apply(Vec3::splat(2.0));
        assert_relative_eq!(out.y, 0.6667, epsilon = 1e-4);
    }

    #[test]
    fn neutral_shoulder_is_bounded() {
        let c = FilmicCurve::NEUTRAL;
        let asymptote = (1.0 - c.e / c.f) / c.curve(c.white_level);
        assert!(neutral(1.0e4) < asymptote);
        assert_relative_eq!(neutral(1.0e4), asymptote, epsilon = 1e-2);
        assert!(neutral(1.0) < 1.0);
    }

    #[test]
    fn curves_are_monotonic() {
        for f in [neutral, aces_fitted, reinhard] {
            let mut prev = f(0.0);
            for i in 1..200 {
                let y = f(i as f32 * 0.05);
                assert!(y >= prev);
                prev = y;
            }
        }
    }

    #[test]
    fn aces_saturates() {
        assert!(aces_fitted(100.0) <= 1.0);
        assert!(aces_fitted(100.0) > 0.99);
    }

    #[test]
    fn negative_input_is_floored() {
        assert_eq!(reinhard(-1.0), 0.0);
        assert_eq!(aces_fitted(-3.0), 0.0);
        assert!(neutral(-2.0).abs() < 1e-6);
    }

    #[test]
    fn names() {
        assert_eq!(Tonemapper::from_name("ACES"), Some(Tonemapper::Aces));
        assert_eq!(Tonemapper::from_name("bogus"), None);
        assert_eq!(serde_yaml::to_string(&Tonemapper::Aces).unwrap().trim(), "ACES");
        let t: Tonemapper = serde_yaml::from_str("Neutral").unwrap();
        assert_eq!(t, Tonemapper::Neutral);
    }
}
