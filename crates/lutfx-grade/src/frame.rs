//! Frame-level application of the pipeline.
//!
//! A [`Frame`] is an interleaved f32 buffer, RGB or RGBA. The pipeline is
//! built once per call and shared across rows; with the `parallel` feature
//! rows are processed on the rayon pool.

use crate::{ColorGradingPipeline, GradeError, GradeResult, GradingParameters};
use lutfx_lut::{Lut3D, LutProfile};
use lutfx_math::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

/// Interleaved f32 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: usize,
    /// `width * height * channels` samples, row-major.
    pub data: Vec<f32>,
}

impl Frame {
    /// Black frame.
    pub fn new(width: usize, height: usize, channels: usize) -> GradeResult<Self> {
        let len = checked_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0.0; len],
        })
    }

    /// Wraps an existing buffer after checking its shape.
    pub fn from_data(width: usize, height: usize, channels: usize, data: Vec<f32>) -> GradeResult<Self> {
        let frame = Self {
            width,
            height,
            channels,
            data,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Checks channel count and buffer length.
    ///
    /// Fields are public, so a frame can drift out of shape after creation.
    pub fn validate(&self) -> GradeResult<()> {
        let expected = checked_len(self.width, self.height, self.channels)?;
        if self.data.len() != expected {
            return Err(GradeError::InvalidDimensions(format!(
                "expected {} samples for {}x{}x{}, got {}",
                expected,
                self.width,
                self.height,
                self.channels,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Samples of the pixel at (x, y), `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.channels.max(1))
    }
}

fn checked_len(width: usize, height: usize, channels: usize) -> GradeResult<usize> {
    if channels != 3 && channels != 4 {
        return Err(GradeError::InvalidDimensions(format!(
            "channels must be 3 or 4, got {}",
            channels
        )));
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| GradeError::InvalidDimensions("image dimensions overflow".into()))
}

/// Grades a frame into a new one.
///
/// # Example
///
/// ```rust
/// use lutfx_grade::{Frame, GradingParameters, apply_pipeline};
/// use lutfx_lut::LutProfile;
///
/// let frame = Frame::from_data(2, 1, 4, vec![0.5, 0.5, 0.5, 1.0, 0.2, 0.3, 0.4, 0.5]).unwrap();
/// let profile = LutProfile::identity("Neutral", 17, 9);
/// let out = apply_pipeline(&frame, &GradingParameters::default(), &profile).unwrap();
/// assert_eq!(out.data[7], 0.5);
/// ```
pub fn apply_pipeline(
    frame: &Frame,
    params: &GradingParameters,
    profile: &LutProfile,
) -> GradeResult<Frame> {
    let mut out = frame.clone();
    apply_pipeline_inplace(&mut out, params, profile)?;
    Ok(out)
}

/// Grades a frame in place.
pub fn apply_pipeline_inplace(
    frame: &mut Frame,
    params: &GradingParameters,
    profile: &LutProfile,
) -> GradeResult<()> {
    frame.validate()?;
    let pipeline = ColorGradingPipeline::new(params);
    if !pipeline.is_active() {
        trace!("intensity is zero, frame left untouched");
        return Ok(());
    }

    let lut = profile.select(pipeline.mode());
    trace!(
        width = frame.width,
        height = frame.height,
        channels = frame.channels,
        lut_size = lut.size(),
        "grading frame"
    );
    process_rows(frame, &pipeline, lut);
    Ok(())
}

fn process_rows(frame: &mut Frame, pipeline: &ColorGradingPipeline, lut: &Lut3D) {
    let channels = frame.channels;
    let row_len = frame.width * channels;
    if row_len == 0 {
        return;
    }

    let grade_row = |row: &mut [f32]| {
        for px in row.chunks_exact_mut(channels) {
            let out = pipeline.apply_with_lut(Vec3::new(px[0], px[1], px[2]), lut);
            px[0] = out.x;
            px[1] = out.y;
            px[2] = out.z;
            // alpha unchanged
        }
    };

    #[cfg(feature = "parallel")]
    frame.data.par_chunks_mut(row_len).for_each(grade_row);

    #[cfg(not(feature = "parallel"))]
    frame.data.chunks_mut(row_len).for_each(grade_row);
}
