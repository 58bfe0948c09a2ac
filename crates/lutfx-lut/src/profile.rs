//! LUT profiles: a named pair of cubes, one per quality tier.

use crate::{Lut3D, LutResult, cube};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Which cube of a profile to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Full-size cube.
    #[default]
    Quality,
    /// Smaller cube for cheaper sampling.
    Performance,
}

/// A named pair of 3D LUTs.
///
/// Both tiers are expected to encode the same grade; the performance cube is
/// usually a lower-resolution bake. Cubes are shared, so cloning a profile or
/// handing it to several effects never copies LUT data.
///
/// ```rust
/// use lutfx_lut::{LutProfile, Mode};
///
/// let profile = LutProfile::identity("Horror_01", 32, 16);
/// assert_eq!(profile.select(Mode::Quality).size(), 32);
/// assert_eq!(profile.select(Mode::Performance).size(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct LutProfile {
    /// Display name, also used for catalogue grouping.
    pub name: String,
    /// Cube sampled in [`Mode::Quality`].
    pub quality: Arc<Lut3D>,
    /// Cube sampled in [`Mode::Performance`].
    pub performance: Arc<Lut3D>,
}

impl LutProfile {
    /// Creates a profile from two cubes.
    pub fn new(name: impl Into<String>, quality: Arc<Lut3D>, performance: Arc<Lut3D>) -> Self {
        Self {
            name: name.into(),
            quality,
            performance,
        }
    }

    /// Creates a profile that uses the same cube for both tiers.
    pub fn single(name: impl Into<String>, lut: Lut3D) -> Self {
        let lut = Arc::new(lut);
        Self::new(name, Arc::clone(&lut), lut)
    }

    /// Identity cubes of the given sizes.
    ///
    /// # Panics
    ///
    /// Panics if either size is below [`Lut3D::MIN_SIZE`].
    pub fn identity(name: impl Into<String>, quality_size: usize, performance_size: usize) -> Self {
        Self::new(
            name,
            Arc::new(Lut3D::identity(quality_size)),
            Arc::new(Lut3D::identity(performance_size)),
        )
    }

    /// Loads both tiers from `.cube` files.
    ///
    /// Without a performance path the quality cube serves both tiers.
    pub fn load(
        name: impl Into<String>,
        quality: impl AsRef<Path>,
        performance: Option<&Path>,
    ) -> LutResult<Self> {
        let quality = Arc::new(cube::read_3d(quality)?);
        let performance = match performance {
            Some(path) => Arc::new(cube::read_3d(path)?),
            None => Arc::clone(&quality),
        };
        Ok(Self::new(name, quality, performance))
    }

    /// The cube for a tier.
    #[inline]
    pub fn select(&self, mode: Mode) -> &Lut3D {
        match mode {
            Mode::Quality => &self.quality,
            Mode::Performance => &self.performance,
        }
    }

    /// Category part of the name: everything before the first `_`.
    pub fn category(&self) -> &str {
        category_of(&self.name)
    }
}

/// Category part of a profile name.
///
/// ```rust
/// use lutfx_lut::category_of;
///
/// assert_eq!(category_of("Horror_03"), "Horror");
/// assert_eq!(category_of("Bleach_Bypass_2"), "Bleach");
/// assert_eq!(category_of("Noir"), "Noir");
/// ```
pub fn category_of(name: &str) -> &str {
    match name.split_once('_') {
        Some((prefix, _)) => prefix,
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_shares_cube() {
        let p = LutProfile::single("Noir", Lut3D::identity(8));
        assert!(Arc::ptr_eq(&p.quality, &p.performance));
        assert_eq!(p.select(Mode::Performance).size(), 8);
    }

    #[test]
    fn default_mode_is_quality() {
        assert_eq!(Mode::default(), Mode::Quality);
    }

    #[test]
    fn mode_yaml_names() {
        assert_eq!(serde_yaml::to_string(&Mode::Performance).unwrap().trim(), "Performance");
        let m: Mode = serde_yaml::from_str("Quality").unwrap();
        assert_eq!(m, Mode::Quality);
    }

    #[test]
    fn load_without_performance_reuses_quality() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.cube");
        cube::write_3d(&path, &Lut3D::identity(3), None).unwrap();

        let p = LutProfile::load("Horror_01", &path, None).unwrap();
        assert!(Arc::ptr_eq(&p.quality, &p.performance));
        assert_eq!(p.category(), "Horror");
    }

    #[test]
    fn leading_underscore_is_empty_category() {
        assert_eq!(category_of("_hidden"), "");
    }
}
