//! End-to-end behavior of the grading pipeline.

use approx::assert_relative_eq;
use lutfx_grade::{
    Color, ColorGradingPipeline, Frame, GradeError, GradingEffect, GradingParameters, Lut3D,
    LutProfile, Mode, ToneRanges, Tonemapper, apply_pipeline, tone_masks,
};
use lutfx_lut::Interpolation;
use lutfx_math::Vec3;
use std::sync::Arc;

fn horror_lut(size: usize) -> Lut3D {
    Lut3D::from_fn(size, |c| {
        let luma = 0.3 * c[0] + 0.6 * c[1] + 0.1 * c[2];
        [luma * 0.7 + c[0] * 0.2, luma * 0.9, luma * 0.8 + c[2] * 0.15]
    })
    .unwrap()
}

fn horror_profile() -> LutProfile {
    LutProfile::new("Horror_01", Arc::new(horror_lut(32)), Arc::new(horror_lut(16)))
}

fn samples() -> Vec<Vec3> {
    let mut out = Vec::new();
    for r in [0.0, 0.07, 0.33, 0.5, 0.91, 1.0] {
        for g in [0.0, 0.18, 0.62, 1.0] {
            for b in [0.02, 0.45, 0.8] {
                out.push(Vec3::new(r, g, b));
            }
        }
    }
    out
}

fn everything_on() -> GradingParameters {
    GradingParameters {
        enable_color_grading: true,
        tonemap: Tonemapper::Neutral,
        exposure: 0.7,
        contrast: 25.0,
        tint: Color::new(1.0, 0.92, 0.85, 1.0),
        hue: -20.0,
        saturation: -35.0,
        white_temperature: -15.0,
        white_tint: 10.0,
        split_toning_shadows: Color::new(0.3, 0.4, 0.7, 1.0),
        split_toning_highlights: Color::new(0.7, 0.6, 0.4, 1.0),
        split_toning_balance: 20.0,
        channel_mixer_red: Vec3::new(0.9, 0.1, 0.0),
        shadows: Color::new(0.8, 0.9, 1.0, 1.0),
        highlights: Color::new(1.0, 0.95, 0.9, 1.0),
        ..Default::default()
    }
}

#[test]
fn zero_intensity_is_exact_noop() {
    let params = GradingParameters { intensity: 0.0, ..everything_on() };
    let pipeline = ColorGradingPipeline::new(&params);
    let profile = horror_profile();
    for c in samples() {
        assert_eq!(pipeline.apply(c, &profile), c);
    }
}

#[test]
fn full_intensity_without_grading_is_lut() {
    let pipeline = ColorGradingPipeline::new(&GradingParameters::default());
    let profile = horror_profile();
    let lut = profile.select(Mode::Quality);
    for c in samples() {
        assert_eq!(pipeline.apply(c, &profile), lut.sample(c));
    }
}

#[test]
fn identity_parameters_leave_only_lut_sampling() {
    let params = GradingParameters { enable_color_grading: true, ..Default::default() };
    let pipeline = ColorGradingPipeline::new(&params);
    let lut = Lut3D::identity(33).with_interpolation(Interpolation::Tetrahedral);
    for c in samples() {
        let out = pipeline.apply_with_lut(c, &lut);
        assert!(out.max_abs_diff(c) < 1e-4, "{:?} -> {:?}", c, out);
    }
}

#[test]
fn graded_output_stays_finite() {
    let pipeline = ColorGradingPipeline::new(&everything_on());
    let profile = horror_profile();
    for c in samples() {
        assert!(pipeline.apply(c, &profile).is_finite(), "{:?}", c);
    }
    for c in [Vec3::splat(-1.0), Vec3::splat(50.0), Vec3::new(f32::NAN, 0.5, 0.5)] {
        let out = pipeline.apply_with_lut(c, profile.select(Mode::Quality));
        assert!(out.x.is_finite() || c.x.is_nan());
    }
}

#[test]
fn exposure_stop_doubles_linear_rgb() {
    let params = GradingParameters { exposure: 1.0, ..Default::default() };
    let pipeline = ColorGradingPipeline::new(&params);
    let c = Vec3::new(0.05, 0.21, 0.33);
    let out = pipeline.grade(c);
    assert_relative_eq!(out.x, 0.10, epsilon = 1e-5);
    assert_relative_eq!(out.y, 0.42, epsilon = 1e-5);
    assert_relative_eq!(out.z, 0.66, epsilon = 1e-5);
}

#[test]
fn reinhard_of_two() {
    let out = Tonemapper::Reinhard.apply(Vec3::splat(2.0));
    assert_relative_eq!(out.x, 0.667, epsilon = 1e-3);
    assert_relative_eq!(out.z, 0.667, epsilon = 1e-3);
}

#[test]
fn channel_mixer_swap() {
    let params = GradingParameters {
        channel_mixer_red: Vec3::Y,
        channel_mixer_green: Vec3::X,
        ..Default::default()
    };
    let out = ColorGradingPipeline::new(&params).grade(Vec3::new(0.2, 0.7, 0.4));
    assert!(out.max_abs_diff(Vec3::new(0.7, 0.2, 0.4)) < 1e-5);
}

#[test]
fn masks_partition_unity() {
    let ranges = ToneRanges {
        shadows_start: 0.1,
        shadows_end: 0.9,
        highlights_start: 0.4,
        highlights_end: 1.2,
    };
    for i in 0..=400 {
        let m = tone_masks(i as f32 * 0.005, ranges);
        assert_relative_eq!(m.shadows + m.midtones + m.highlights, 1.0, epsilon = 1e-5);
        assert!(m.midtones >= 0.0);
    }
}

#[test]
fn lut_sampling_is_continuous() {
    let pipeline = ColorGradingPipeline::new(&GradingParameters::default());
    let lut = horror_lut(16);
    let delta = lut.max_texel_delta();
    let step = 1.0 / (15.0 * 4.0);

    for interp in [Interpolation::Linear, Interpolation::Tetrahedral] {
        let lut = lut.clone().with_interpolation(interp);
        let mut prev = pipeline.apply_with_lut(Vec3::new(0.0, 0.5, 0.25), &lut);
        for i in 1..=60 {
            let next = pipeline.apply_with_lut(Vec3::new(i as f32 * step, 0.5, 0.25), &lut);
            assert!(next.max_abs_diff(prev) <= delta + 1e-6);
            prev = next;
        }
    }
}

#[test]
fn frame_keeps_alpha_and_matches_pixels() {
    let (w, h) = (7, 5);
    let mut data = Vec::with_capacity(w * h * 4);
    for i in 0..w * h {
        let t = i as f32 / (w * h) as f32;
        data.extend_from_slice(&[t, 1.0 - t, 0.5 * t, 0.25 + 0.5 * t]);
    }
    let frame = Frame::from_data(w, h, 4, data).unwrap();
    let params = everything_on();
    let profile = horror_profile();

    let out = apply_pipeline(&frame, &params, &profile).unwrap();
    let pipeline = ColorGradingPipeline::new(&params);

    for (src, dst) in frame.pixels().zip(out.pixels()) {
        assert_eq!(src[3], dst[3]);
        let expected = pipeline.apply(Vec3::new(src[0], src[1], src[2]), &profile);
        assert_eq!(Vec3::new(dst[0], dst[1], dst[2]), expected);
    }
}

#[test]
fn rgb_frame_grades_too() {
    let frame = Frame::from_data(1, 2, 3, vec![0.2, 0.4, 0.6, 0.9, 0.1, 0.3]).unwrap();
    let out = apply_pipeline(&frame, &GradingParameters::default(), &horror_profile()).unwrap();
    let lut = horror_lut(32);
    assert_eq!(out.pixel(0, 1).unwrap(), &lut.apply([0.9, 0.1, 0.3])[..]);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let err = Frame::from_data(4, 4, 4, vec![0.0; 63]).unwrap_err();
    assert!(matches!(err, GradeError::InvalidDimensions(_)));

    let mut frame = Frame::new(4, 4, 4).unwrap();
    frame.width = 5;
    assert!(apply_pipeline(&frame, &GradingParameters::default(), &horror_profile()).is_err());
}

#[test]
fn effect_without_profile_is_passthrough() {
    let frame = Frame::from_data(1, 1, 4, vec![0.3, 0.6, 0.9, 1.0]).unwrap();
    let mut effect = GradingEffect::new(everything_on());
    assert_eq!(effect.render(&frame).unwrap(), frame);

    effect.set_profile(horror_profile());
    assert_ne!(effect.render(&frame).unwrap(), frame);
}

#[test]
fn performance_mode_uses_small_cube() {
    let params = GradingParameters { mode: Mode::Performance, ..Default::default() };
    let pipeline = ColorGradingPipeline::new(&params);
    let c = Vec3::new(0.33, 0.71, 0.12);
    assert_eq!(pipeline.apply(c, &horror_profile()), horror_lut(16).sample(c));
}

#[test]
fn parameter_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grade.yaml");

    let params = everything_on();
    params.save(&path).unwrap();
    assert_eq!(GradingParameters::load(&path).unwrap(), params);

    std::fs::write(&path, "intensity: 0.5\n").unwrap();
    let partial = GradingParameters::load(&path).unwrap();
    assert_eq!(partial.intensity, 0.5);
    assert_eq!(partial.split_toning_shadows, Color::GRAY);
    assert_eq!(partial.highlights_start, 0.55);
}
