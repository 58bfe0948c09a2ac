//! Catalogue listing command

use crate::CatalogueArgs;
use anyhow::{Context, Result};
use lutfx_lut::{Mode, ProfileCatalogue};

pub fn run(args: CatalogueArgs, verbose: u8) -> Result<()> {
    let catalogue = ProfileCatalogue::load(&args.manifest)
        .with_context(|| format!("Failed to load catalogue: {}", args.manifest.display()))?;

    if catalogue.is_empty() {
        println!("No profiles in {}", args.manifest.display());
        return Ok(());
    }

    for name in catalogue.categories() {
        let profiles = catalogue.category(name).unwrap_or_default();
        println!("{} ({})", name, profiles.len());
        for profile in profiles {
            if verbose > 0 {
                println!(
                    "  {:<24} quality {}^3, performance {}^3",
                    profile.name,
                    profile.select(Mode::Quality).size(),
                    profile.select(Mode::Performance).size()
                );
            } else {
                println!("  {}", profile.name);
            }
        }
    }
    println!("{} profiles", catalogue.len());
    Ok(())
}
