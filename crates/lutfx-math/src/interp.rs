//! Scalar interpolation helpers, named after their shader counterparts.

/// `a + (b - a) * t`. Extrapolates outside [0, 1].
///
/// ```rust
/// use lutfx_math::lerp;
///
/// assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`; 0 when the range is empty.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-10 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Clamps to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Hermite ramp from 0 at `edge0` to 1 at `edge1`.
///
/// An empty range (`edge1 <= edge0`) degenerates to a hard step at `edge0`
/// instead of collapsing to a constant.
///
/// ```rust
/// use lutfx_math::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(smoothstep(0.3, 0.3, 0.29), 0.0);
/// assert_eq!(smoothstep(0.3, 0.3, 0.3), 1.0);
/// ```
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return step(edge0, x);
    }
    let t = saturate(inverse_lerp(edge0, edge1, x));
    t * t * (3.0 - 2.0 * t)
}

/// 0 below `edge`, 1 at or above it.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Fractional part, always in [0, 1).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_and_inverse() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(inverse_lerp(0.0, 10.0, 2.5), 0.25);
        assert_eq!(inverse_lerp(1.0, 1.0, 5.0), 0.0);
    }

    #[test]
    fn smoothstep_clamps() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!(smoothstep(0.2, 0.8, 0.3) < smoothstep(0.2, 0.8, 0.4));
    }

    #[test]
    fn fract_wraps_negatives() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(2.5) - 0.5).abs() < 1e-6);
    }
}
