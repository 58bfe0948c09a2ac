//! Interpolation methods for LUT evaluation.

use serde::{Deserialize, Serialize};

/// How a [`Lut3D`](crate::Lut3D) blends between grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Closest grid point.
    Nearest,

    /// Trilinear, what GPU texture filtering does.
    #[default]
    Linear,

    /// Tetrahedral: four taps instead of eight, keeps the neutral axis clean.
    Tetrahedral,
}
