//! Error types for the grading crate.

use lutfx_lut::LutError;
use thiserror::Error;

/// Error type for grading operations.
///
/// The per-pixel pipeline itself never fails; these come from frame
/// validation and parameter files.
#[derive(Error, Debug)]
pub enum GradeError {
    /// Frame buffer does not match its declared shape.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// LUT loading or construction failed.
    #[error(transparent)]
    Lut(#[from] LutError),

    /// I/O error while reading or writing parameters.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed parameter file.
    #[error("parameter file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for grading operations.
pub type GradeResult<T> = Result<T, GradeError>;
