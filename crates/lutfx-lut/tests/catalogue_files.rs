//! Catalogue and `.cube` file handling on a real directory tree.

use approx::assert_relative_eq;
use lutfx_lut::{Lut3D, LutError, Mode, ProfileCatalogue, cube};
use std::fs;
use std::sync::Arc;

fn warm(size: usize) -> Lut3D {
    Lut3D::from_fn(size, |c| [c[0] * 0.9 + 0.1, c[1] * 0.8, c[2] * 0.7]).unwrap()
}

#[test]
fn manifest_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let luts = dir.path().join("luts");
    fs::create_dir(&luts).unwrap();

    cube::write_3d(luts.join("h1_q.cube"), &warm(8), Some("Horror 01")).unwrap();
    cube::write_3d(luts.join("h1_p.cube"), &warm(4), None).unwrap();
    cube::write_3d(luts.join("noir.cube"), &Lut3D::identity(5), None).unwrap();

    let manifest = dir.path().join("profiles.yaml");
    fs::write(
        &manifest,
        "profiles:\n\
         \x20 - name: Horror_01\n\
         \x20   quality: luts/h1_q.cube\n\
         \x20   performance: luts/h1_p.cube\n\
         \x20 - name: Noir\n\
         \x20   quality: luts/noir.cube\n",
    )
    .unwrap();

    let cat = ProfileCatalogue::load(&manifest).unwrap();
    assert_eq!(cat.len(), 2);
    assert_eq!(cat.categories().collect::<Vec<_>>(), ["Horror", "Noir"]);

    let horror = cat.find("Horror_01").unwrap();
    assert_eq!(horror.select(Mode::Quality).size(), 8);
    assert_eq!(horror.select(Mode::Performance).size(), 4);

    let out = horror.select(Mode::Quality).apply([1.0, 1.0, 1.0]);
    assert_relative_eq!(out[0], 1.0, epsilon = 1e-5);
    assert_relative_eq!(out[1], 0.8, epsilon = 1e-5);
    assert_relative_eq!(out[2], 0.7, epsilon = 1e-5);

    let noir = cat.get("Noir", 0).unwrap();
    assert!(Arc::ptr_eq(&noir.quality, &noir.performance));
}

#[test]
fn missing_cube_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("profiles.yaml");
    fs::write(&manifest, "profiles:\n  - name: Ghost\n    quality: nope.cube\n").unwrap();

    let err = ProfileCatalogue::load(&manifest).unwrap_err();
    assert!(matches!(err, LutError::Io(_)));
}

#[test]
fn domain_survives_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hdr.cube");

    let lut = Lut3D::identity(3)
        .with_domain([0.0; 3], [4.0; 3])
        .unwrap();
    cube::write_3d(&path, &lut, None).unwrap();

    let back = cube::read_3d(&path).unwrap();
    assert_eq!(back.domain_max, [4.0; 3]);
    assert_relative_eq!(back.apply([2.0, 2.0, 2.0])[0], 0.5, epsilon = 1e-5);
}

#[test]
fn sampling_is_continuous() {
    let lut = warm(17);
    let delta = lut.max_texel_delta();
    let step = 1.0 / (16.0 * 8.0);

    let mut prev = lut.apply([0.0, 0.4, 0.6]);
    let mut x = step;
    while x <= 1.0 {
        let next = lut.apply([x, 0.4, 0.6]);
        for c in 0..3 {
            assert!((next[c] - prev[c]).abs() <= delta + 1e-6);
        }
        prev = next;
        x += step;
    }
}
