//! # lutfx-lut
//!
//! 3D lookup tables for the lutfx grading pipeline.
//!
//! A grade is shipped as a pre-baked cube: every RGB input maps to a graded
//! output, with interpolation between grid points. This crate owns the cube
//! itself, the `.cube` file format, and the grouping of cubes into profiles.
//!
//! # Types
//!
//! - [`Lut3D`] - RGB cube with trilinear or tetrahedral sampling
//! - [`LutProfile`] - named Quality/Performance pair of cubes
//! - [`ProfileCatalogue`] - profiles grouped by name prefix
//!
//! # Usage
//!
//! ```rust
//! use lutfx_lut::{Interpolation, Lut3D, LutProfile, Mode};
//!
//! let lut = Lut3D::identity(33).with_interpolation(Interpolation::Tetrahedral);
//! let rgb = lut.apply([0.5, 0.3, 0.2]);
//! assert!((rgb[1] - 0.3).abs() < 1e-5);
//!
//! let profile = LutProfile::single("Horror_01", lut);
//! assert_eq!(profile.select(Mode::Performance).size(), 33);
//! ```
//!
//! # Sampling
//!
//! Lookups reproduce what a shader does with a 3D texture: the input is
//! scaled by `(N-1)/N` and offset by half a texel, so `0` and `1` land on the
//! centers of the edge texels. Inputs outside the domain clamp to the edge.
//!
//! # Dependencies
//!
//! - [`lutfx-math`] - `Vec3`
//! - [`thiserror`] - Error handling
//! - [`serde_yaml`] - Catalogue manifests
//!
//! # Used By
//!
//! - `lutfx-grade` - LUT stage of the pipeline
//! - `lutfx-cli` - baking and inspection

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod catalogue;
mod error;
mod interp;
mod lut3d;
mod profile;
pub mod cube;

pub use catalogue::ProfileCatalogue;
pub use cube::{read_3d as read_cube_3d, write_3d as write_cube_3d};
pub use error::{LutError, LutResult};
pub use interp::Interpolation;
pub use lut3d::Lut3D;
pub use profile::{LutProfile, Mode, category_of};
