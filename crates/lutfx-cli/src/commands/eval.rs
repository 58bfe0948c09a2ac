//! Single-color evaluation command

use crate::EvalArgs;
use anyhow::Result;
use lutfx_grade::ColorGradingPipeline;
use lutfx_math::Vec3;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: EvalArgs, verbose: u8) -> Result<()> {
    let params = super::load_params(args.params.as_deref())?;
    let interp = super::parse_interp(&args.interp)?;

    let lut = match &args.lut {
        Some(path) => super::load_lut(path)?,
        None => super::identity_lut(args.identity)?,
    }
    .with_interpolation(interp);

    let source = Vec3::new(args.r, args.g, args.b);
    let pipeline = ColorGradingPipeline::new(&params);
    let out = pipeline.apply_with_lut(source, &lut);
    debug!(?source, ?out, lut_size = lut.size(), "evaluated");

    if verbose > 0 {
        if params.enable_color_grading {
            let graded = pipeline.grade(source);
            println!("graded: {:.6} {:.6} {:.6}", graded.x, graded.y, graded.z);
        }
        println!("lut:    {}^3 {:?}", lut.size(), lut.interpolation);
    }
    println!("{:.6} {:.6} {:.6}", out.x, out.y, out.z);
    Ok(())
}
