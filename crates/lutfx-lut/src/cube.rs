//! Adobe/Resolve `.cube` 3D LUT files.
//!
//! The format every grading tool can export:
//!
//! ```text
//! # Comment
//! TITLE "Horror 01"
//! LUT_3D_SIZE 32
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Entries are listed red-fastest, which is also [`Lut3D`]'s memory order.
//!
//! # Example
//!
//! ```rust,ignore
//! use lutfx_lut::cube;
//!
//! let lut = cube::read_3d("horror_01.cube")?;
//! let rgb = lut.apply([0.5, 0.3, 0.2]);
//! ```

use crate::{Lut3D, LutError, LutResult};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a 3D LUT from a `.cube` file.
pub fn read_3d<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading cube");
    let file = File::open(path)?;
    parse_3d(BufReader::new(file))
}

/// Parses a 3D LUT from a reader.
pub fn parse_3d<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let mut size: Option<usize> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut data: Vec<[f32; 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("TITLE") {
            continue;
        } else if line.starts_with("LUT_3D_SIZE") {
            let n = parse_size(line)?;
            data.reserve(n.saturating_mul(n).saturating_mul(n).min(1 << 24));
            size = Some(n);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(LutError::ParseError("expected 3D LUT, found 1D".into()));
        } else if line.starts_with("DOMAIN_MIN") {
            domain_min = parse_domain(line)?;
        } else if line.starts_with("DOMAIN_MAX") {
            domain_max = parse_domain(line)?;
        } else if line.starts_with(|c: char| c.is_ascii_alphabetic()) && !starts_with_number(line) {
            // Vendor keywords (LUT_3D_INPUT_RANGE and friends) are skipped.
            trace!(line = line_no + 1, keyword = line, "ignoring cube keyword");
        } else {
            data.push(parse_rgb(line, line_no + 1)?);
        }
    }

    let size = size.ok_or_else(|| LutError::ParseError("missing LUT_3D_SIZE".into()))?;
    let expected = size
        .checked_mul(size)
        .and_then(|v| v.checked_mul(size))
        .ok_or_else(|| LutError::InvalidSize(format!("cube size {} overflows", size)))?;

    if data.len() != expected {
        return Err(LutError::ParseError(format!(
            "expected {} values, found {}",
            expected,
            data.len()
        )));
    }

    Lut3D::from_data(data, size)?.with_domain(domain_min, domain_max)
}

/// Formats a 3D LUT as `.cube` text.
pub fn to_string_3d(lut: &Lut3D, title: Option<&str>) -> String {
    let mut out = String::with_capacity(lut.entry_count() * 28 + 96);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# Generated by lutfx");
    if let Some(title) = title {
        let _ = writeln!(out, "TITLE \"{}\"", title.replace('"', "'"));
    }
    let _ = writeln!(out, "LUT_3D_SIZE {}", lut.size());

    let min = lut.domain_min;
    let max = lut.domain_max;
    if min != [0.0; 3] || max != [1.0; 3] {
        let _ = writeln!(out, "DOMAIN_MIN {} {} {}", min[0], min[1], min[2]);
        let _ = writeln!(out, "DOMAIN_MAX {} {} {}", max[0], max[1], max[2]);
    }
    out.push('\n');

    for rgb in lut.data() {
        let _ = writeln!(out, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2]);
    }
    out
}

/// Writes a 3D LUT to a `.cube` file.
pub fn write_3d<P: AsRef<Path>>(path: P, lut: &Lut3D, title: Option<&str>) -> LutResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), size = lut.size(), "writing cube");
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(to_string_3d(lut, title).as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn parse_size(line: &str) -> LutResult<usize> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| LutError::ParseError("invalid size line".into()))?
        .parse()
        .map_err(|_| LutError::ParseError(format!("invalid size value: {}", line)))
}

fn parse_domain(line: &str) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(LutError::ParseError(format!("invalid domain line: {}", line)));
    }
    let mut out = [0.0f32; 3];
    for (c, part) in parts[1..4].iter().enumerate() {
        out[c] = part
            .parse()
            .map_err(|_| LutError::ParseError(format!("invalid domain value: {}", part)))?;
    }
    Ok(out)
}

/// `nan`, `inf` and friends start data rows, not keywords.
fn starts_with_number(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|token| token.parse::<f32>().is_ok())
}

fn parse_rgb(line: &str, line_no: usize) -> LutResult<[f32; 3]> {
    let mut parts = line.split_whitespace();
    let mut out = [0.0f32; 3];
    for v in out.iter_mut() {
        let part = parts.next().ok_or_else(|| {
            LutError::ParseError(format!("line {}: expected 3 values: {}", line_no, line))
        })?;
        *v = part
            .parse()
            .map_err(|_| LutError::ParseError(format!("line {}: invalid value: {}", line_no, part)))?;
    }
    Ok(out)
}
