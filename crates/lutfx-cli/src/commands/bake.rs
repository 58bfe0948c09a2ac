//! LUT baking command

use crate::BakeArgs;
use anyhow::{Context, Result, bail};
use lutfx_grade::ColorGradingPipeline;
use lutfx_lut::{Lut3D, cube};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BakeArgs, verbose: u8) -> Result<()> {
    if !(Lut3D::MIN_SIZE..=Lut3D::MAX_SIZE).contains(&args.size) {
        bail!("Cube size must be in {}..={}", Lut3D::MIN_SIZE, Lut3D::MAX_SIZE);
    }

    let params = super::load_params(args.params.as_deref())?;
    let base = args.lut.as_deref().map(super::load_lut).transpose()?;

    if verbose > 0 {
        println!(
            "Baking {}^3 cube{}",
            args.size,
            match &args.lut {
                Some(path) => format!(" over {}", path.display()),
                None => String::new(),
            }
        );
    }

    let pipeline = ColorGradingPipeline::new(&params);
    let baked = pipeline
        .bake(args.size, base.as_ref())
        .context("Failed to bake LUT")?;
    info!(size = baked.size(), output = %args.output.display(), "baked");

    cube::write_3d(&args.output, &baked, args.title.as_deref())
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
