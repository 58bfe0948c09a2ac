//! CLI command implementations

pub mod bake;
pub mod catalogue;
pub mod defaults;
pub mod eval;

use anyhow::{Context, Result, bail};
use lutfx_grade::GradingParameters;
use lutfx_lut::{Interpolation, Lut3D, cube};
use std::path::Path;

/// Loads a parameter file, or the defaults, clamped to valid ranges.
pub fn load_params(path: Option<&Path>) -> Result<GradingParameters> {
    let params = match path {
        Some(path) => GradingParameters::load(path)
            .with_context(|| format!("Failed to load parameters: {}", path.display()))?,
        None => GradingParameters::default(),
    };
    Ok(params.clamped())
}

/// Loads a 3D `.cube` LUT.
pub fn load_lut(path: &Path) -> Result<Lut3D> {
    cube::read_3d(path).with_context(|| format!("Failed to load LUT: {}", path.display()))
}

/// Identity cube of the given size, rejecting sizes outside the cube limits.
pub fn identity_lut(size: usize) -> Result<Lut3D> {
    Lut3D::from_fn(size, |rgb| rgb).with_context(|| format!("Invalid identity LUT size: {}", size))
}

/// Parses an interpolation name.
pub fn parse_interp(name: &str) -> Result<Interpolation> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "nearest" => Interpolation::Nearest,
        "linear" | "trilinear" => Interpolation::Linear,
        "tetrahedral" | "tetra" => Interpolation::Tetrahedral,
        other => bail!("Unknown interpolation: {} (nearest, linear, tetrahedral)", other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interp_names() {
        assert_eq!(parse_interp("Tetra").unwrap(), Interpolation::Tetrahedral);
        assert_eq!(parse_interp("linear").unwrap(), Interpolation::Linear);
        assert!(parse_interp("cubic").is_err());
    }

    #[test]
    fn identity_size_is_bounded() {
        assert_eq!(identity_lut(17).unwrap().size(), 17);
        assert!(identity_lut(1).is_err());
        let err = identity_lut(1 << 40).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid identity LUT size"));
    }

    #[test]
    fn params_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.yaml");
        std::fs::write(&path, "contrast: 300\nintensity: -1\n").unwrap();

        let p = load_params(Some(&path)).unwrap();
        assert_eq!(p.contrast, 100.0);
        assert_eq!(p.intensity, 0.0);
    }

    #[test]
    fn missing_params_file_has_context() {
        let err = load_params(Some(Path::new("/nonexistent/grade.yaml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load parameters"));
    }
}
