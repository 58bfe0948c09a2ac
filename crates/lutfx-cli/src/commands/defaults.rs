//! Default parameter dump command

use crate::DefaultsArgs;
use anyhow::{Context, Result};
use lutfx_grade::GradingParameters;

pub fn run(args: DefaultsArgs, verbose: u8) -> Result<()> {
    let params = GradingParameters::default();
    match &args.output {
        Some(path) => {
            params
                .save(path)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if verbose > 0 {
                println!("Wrote {}", path.display());
            }
        }
        None => print!("{}", params.to_yaml_string()?),
    }
    Ok(())
}
