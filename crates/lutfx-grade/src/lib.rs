//! # lutfx-grade
//!
//! Color grading pipeline: an ordered operator chain followed by a 3D LUT
//! lookup, blended with the source by effect intensity.
//!
//! # Pipeline
//!
//! With `enable_color_grading` set, each pixel goes through, in order:
//!
//! 1. Exposure (`2^stops`)
//! 2. Contrast around mid gray 0.18
//! 3. Tint
//! 4. Hue rotation and saturation
//! 5. White balance in CAT02 LMS
//! 6. Split toning (soft light, gamma 2.2)
//! 7. Channel mixer
//! 8. Shadows / midtones / highlights
//! 9. Tonemap ([`Tonemapper`])
//!
//! and is then looked up in the profile's LUT for the current [`Mode`].
//! Intensity 0 returns the source bit-for-bit.
//!
//! # Example
//!
//! ```rust
//! use lutfx_grade::{ColorGradingPipeline, GradingParameters, Tonemapper};
//! use lutfx_lut::LutProfile;
//! use lutfx_math::Vec3;
//!
//! let params = GradingParameters {
//!     enable_color_grading: true,
//!     exposure: 0.5,
//!     tonemap: Tonemapper::Aces,
//!     ..Default::default()
//! }
//! .clamped();
//!
//! let profile = LutProfile::identity("Horror_01", 33, 17);
//! let pipeline = ColorGradingPipeline::new(&params);
//! let out = pipeline.apply(Vec3::new(0.8, 0.4, 0.2), &profile);
//! assert!(out.max_element() <= 1.0);
//! ```
//!
//! # Frames and effects
//!
//! - [`apply_pipeline`] grades a whole [`Frame`], rows in parallel
//! - [`GradingEffect`] bundles parameters with a profile for the host
//!
//! # Features
//!
//! - `parallel` (default) - rayon row parallelism in [`apply_pipeline`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod effect;
mod error;
mod frame;
mod params;
mod pipeline;
pub mod ops;
pub mod tonemap;

pub use color::{Color, srgb_to_linear};
pub use effect::GradingEffect;
pub use error::{GradeError, GradeResult};
pub use frame::{Frame, apply_pipeline, apply_pipeline_inplace};
pub use ops::{ToneMasks, ToneRanges, color_balance_to_lms_coeffs, tone_masks};
pub use params::GradingParameters;
pub use pipeline::ColorGradingPipeline;
pub use tonemap::Tonemapper;

pub use lutfx_lut::{Lut3D, LutProfile, Mode};
