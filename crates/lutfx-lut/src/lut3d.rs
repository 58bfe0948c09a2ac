//! 3-dimensional lookup table.
//!
//! A cube of `size^3` RGB entries. Lookups go through the same scale/bias a
//! GPU shader applies to a 3D texture, `(1/N, N-1)`, so that coordinate 0
//! lands on the center of the first texel and coordinate 1 on the center of
//! the last one. Sampling outside the domain clamps to the edge.

use crate::{Interpolation, LutError, LutResult};
use lutfx_math::Vec3;

/// A 3D lookup table.
///
/// # Layout
///
/// Entries are stored red-fastest, then green, then blue, the same order a
/// `.cube` file lists them:
///
/// ```text
/// index = r + g * size + b * size * size
/// ```
///
/// # Example
///
/// ```rust
/// use lutfx_lut::Lut3D;
///
/// let lut = Lut3D::identity(33);
/// let out = lut.apply([0.5, 0.3, 0.2]);
/// assert!((out[0] - 0.5).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    data: Vec<[f32; 3]>,
    size: usize,
    /// Input value mapped to the first texel, per channel.
    pub domain_min: [f32; 3],
    /// Input value mapped to the last texel, per channel.
    pub domain_max: [f32; 3],
    /// Blend between grid points.
    pub interpolation: Interpolation,
}

impl Lut3D {
    /// Smallest cube that can be interpolated.
    pub const MIN_SIZE: usize = 2;

    /// Largest cube accepted, the `.cube` format's own limit.
    pub const MAX_SIZE: usize = 256;

    /// Identity cube: every entry holds its own normalized grid coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside `MIN_SIZE..=MAX_SIZE`.
    pub fn identity(size: usize) -> Self {
        assert!(
            (Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size),
            "identity LUT size must be in {}..={}, got {}",
            Self::MIN_SIZE,
            Self::MAX_SIZE,
            size
        );
        Self::build(size, |rgb| rgb)
    }

    /// Builds a cube by evaluating `f` at every grid coordinate in [0, 1]^3.
    ///
    /// This is how a grading chain gets baked into a LUT.
    pub fn from_fn(size: usize, f: impl Fn([f32; 3]) -> [f32; 3]) -> LutResult<Self> {
        check_size(size)?;
        Ok(Self::build(size, f))
    }

    fn build(size: usize, f: impl Fn([f32; 3]) -> [f32; 3]) -> Self {
        let total = size * size * size;
        let scale = 1.0 / (size - 1) as f32;
        let mut data = Vec::with_capacity(total);

        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(f([r as f32 * scale, g as f32 * scale, b as f32 * scale]));
                }
            }
        }

        Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            interpolation: Interpolation::Linear,
        }
    }

    /// Wraps raw entries, red-fastest, exactly `size^3` of them.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> LutResult<Self> {
        check_size(size)?;
        let expected = size * size * size;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            interpolation: Interpolation::Linear,
        })
    }

    /// Sets the input domain.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> LutResult<Self> {
        for c in 0..3 {
            if !(max[c] > min[c]) {
                return Err(LutError::InvalidRange { min: min[c], max: max[c] });
            }
        }
        self.domain_min = min;
        self.domain_max = max;
        Ok(self)
    }

    /// Sets the interpolation method.
    pub fn with_interpolation(mut self, interp: Interpolation) -> Self {
        self.interpolation = interp;
        self
    }

    /// Edge length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw entries, red-fastest.
    #[inline]
    pub fn data(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Total number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Shader-style scale/bias `(1/N, N-1)`.
    #[inline]
    pub fn scale_offset(&self) -> [f32; 2] {
        [1.0 / self.size as f32, (self.size - 1) as f32]
    }

    /// Entry at grid position (r, g, b).
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= size`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[r + self.size * (g + self.size * b)]
    }

    /// Largest per-channel difference between neighboring entries.
    ///
    /// Bounds how much a lookup can change across one texel.
    pub fn max_texel_delta(&self) -> f32 {
        let n = self.size;
        let mut delta = 0.0f32;
        for b in 0..n {
            for g in 0..n {
                for r in 0..n {
                    let here = Vec3::from(self.get(r, g, b));
                    if r + 1 < n {
                        delta = delta.max(here.max_abs_diff(self.get(r + 1, g, b).into()));
                    }
                    if g + 1 < n {
                        delta = delta.max(here.max_abs_diff(self.get(r, g + 1, b).into()));
                    }
                    if b + 1 < n {
                        delta = delta.max(here.max_abs_diff(self.get(r, g, b + 1).into()));
                    }
                }
            }
        }
        delta
    }

    /// Texture coordinates after domain normalization, clamping and the
    /// `(1/N, N-1)` scale/bias. Each axis lands in `[0.5/N, 1 - 0.5/N]`.
    #[inline]
    pub fn texture_coords(&self, rgb: [f32; 3]) -> [f32; 3] {
        let [scale, offset] = self.scale_offset();
        let mut uvw = [0.0f32; 3];
        for c in 0..3 {
            let range = self.domain_max[c] - self.domain_min[c];
            let t = ((rgb[c] - self.domain_min[c]) / range).clamp(0.0, 1.0);
            // NaN input lands on the first texel.
            let t = if t.is_nan() { 0.0 } else { t };
            uvw[c] = t * offset * scale + scale * 0.5;
        }
        uvw
    }

    /// Looks up an RGB value with the configured interpolation.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let texel = self.texel_coords(rgb);
        match self.interpolation {
            Interpolation::Nearest => self.apply_nearest(texel),
            Interpolation::Linear => self.apply_trilinear(texel),
            Interpolation::Tetrahedral => self.apply_tetrahedral(texel),
        }
    }

    /// [`apply`](Self::apply) on a [`Vec3`].
    #[inline]
    pub fn sample(&self, rgb: Vec3) -> Vec3 {
        Vec3::from(self.apply(rgb.to_array()))
    }

    /// Continuous grid coordinates in `[0, N-1]`, recovered from the
    /// texture coordinates the way a sampler addresses texel centers.
    #[inline]
    fn texel_coords(&self, rgb: [f32; 3]) -> [f32; 3] {
        let uvw = self.texture_coords(rgb);
        let n = self.size as f32;
        let max = n - 1.0;
        uvw.map(|t| (t * n - 0.5).clamp(0.0, max))
    }

    /// Lower corner index and fractional offset along one axis.
    #[inline]
    fn split(&self, t: f32) -> (usize, f32) {
        let i = (t.floor() as usize).min(self.size - 2);
        (i, (t - i as f32).clamp(0.0, 1.0))
    }

    fn apply_nearest(&self, texel: [f32; 3]) -> [f32; 3] {
        let last = self.size - 1;
        let [r, g, b] = texel.map(|t| (t.round() as usize).min(last));
        self.get(r, g, b)
    }

    fn apply_trilinear(&self, texel: [f32; 3]) -> [f32; 3] {
        let (ri, rf) = self.split(texel[0]);
        let (gi, gf) = self.split(texel[1]);
        let (bi, bf) = self.split(texel[2]);

        let c000 = Vec3::from(self.get(ri, gi, bi));
        let c100 = Vec3::from(self.get(ri + 1, gi, bi));
        let c010 = Vec3::from(self.get(ri, gi + 1, bi));
        let c110 = Vec3::from(self.get(ri + 1, gi + 1, bi));
        let c001 = Vec3::from(self.get(ri, gi, bi + 1));
        let c101 = Vec3::from(self.get(ri + 1, gi, bi + 1));
        let c011 = Vec3::from(self.get(ri, gi + 1, bi + 1));
        let c111 = Vec3::from(self.get(ri + 1, gi + 1, bi + 1));

        let c00 = c000.lerp(c100, rf);
        let c10 = c010.lerp(c110, rf);
        let c01 = c001.lerp(c101, rf);
        let c11 = c011.lerp(c111, rf);

        let c0 = c00.lerp(c10, gf);
        let c1 = c01.lerp(c11, gf);

        c0.lerp(c1, bf).to_array()
    }

    fn apply_tetrahedral(&self, texel: [f32; 3]) -> [f32; 3] {
        let (ri, rf) = self.split(texel[0]);
        let (gi, gf) = self.split(texel[1]);
        let (bi, bf) = self.split(texel[2]);

        let c000 = Vec3::from(self.get(ri, gi, bi));
        let c111 = Vec3::from(self.get(ri + 1, gi + 1, bi + 1));

        // Walk from c000 to c111 along the edges of the tetrahedron that
        // contains the sample; the axis with the largest fraction goes first.
        let (w0, w1, w2, p1, p2) = if rf > gf {
            if gf > bf {
                (rf, gf, bf, self.get(ri + 1, gi, bi), self.get(ri + 1, gi + 1, bi))
            } else if rf > bf {
                (rf, bf, gf, self.get(ri + 1, gi, bi), self.get(ri + 1, gi, bi + 1))
            } else {
                (bf, rf, gf, self.get(ri, gi, bi + 1), self.get(ri + 1, gi, bi + 1))
            }
        } else if gf > bf {
            if rf > bf {
                (gf, rf, bf, self.get(ri, gi + 1, bi), self.get(ri + 1, gi + 1, bi))
            } else {
                (gf, bf, rf, self.get(ri, gi + 1, bi), self.get(ri, gi + 1, bi + 1))
            }
        } else {
            (bf, gf, rf, self.get(ri, gi, bi + 1), self.get(ri, gi + 1, bi + 1))
        };
        let p1 = Vec3::from(p1);
        let p2 = Vec3::from(p2);

        (c000 + (p1 - c000) * w0 + (p2 - p1) * w1 + (c111 - p2) * w2).to_array()
    }
}

fn check_size(size: usize) -> LutResult<()> {
    if size < Lut3D::MIN_SIZE {
        return Err(LutError::InvalidSize(format!(
            "cube size must be at least {}, got {}",
            Lut3D::MIN_SIZE,
            size
        )));
    }
    if size > Lut3D::MAX_SIZE {
        return Err(LutError::InvalidSize(format!(
            "cube size must be at most {}, got {}",
            Lut3D::MAX_SIZE,
            size
        )));
    }
    Ok(())
}
