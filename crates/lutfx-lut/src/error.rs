//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors raised while building, parsing or loading LUTs.
#[derive(Debug, Error)]
pub enum LutError {
    /// Cube size or entry count is wrong.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Domain min is not below domain max.
    #[error("invalid input range: [{min}, {max}]")]
    InvalidRange {
        /// Minimum value
        min: f32,
        /// Maximum value
        max: f32,
    },

    /// Malformed `.cube` text.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed catalogue manifest.
    #[error("manifest error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
