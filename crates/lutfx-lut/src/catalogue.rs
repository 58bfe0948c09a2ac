//! Profile catalogue.
//!
//! Profiles are grouped by the prefix of their name, so `Horror_01` and
//! `Horror_02` end up next to each other under `Horror`. Categories keep the
//! order they were first seen in, profiles keep insertion order.
//!
//! A catalogue can be loaded from a YAML manifest:
//!
//! ```yaml
//! profiles:
//!   - name: Horror_01
//!     quality: luts/horror_01_q.cube
//!     performance: luts/horror_01_p.cube
//!   - name: Noir
//!     quality: luts/noir.cube
//! ```
//!
//! Relative paths are resolved against the manifest's directory. A missing
//! `performance` entry reuses the quality cube.

use crate::{LutProfile, LutResult, category_of};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Profiles grouped into ordered categories.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalogue {
    categories: Vec<(String, Vec<Arc<LutProfile>>)>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    profiles: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    quality: PathBuf,
    #[serde(default)]
    performance: Option<PathBuf>,
}

impl ProfileCatalogue {
    /// Empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile under its name's category.
    pub fn insert(&mut self, profile: impl Into<Arc<LutProfile>>) {
        let profile = profile.into();
        let category = category_of(&profile.name);

        match self.categories.iter_mut().find(|(name, _)| name == category) {
            Some((_, profiles)) => profiles.push(profile),
            None => {
                let category = category.to_string();
                self.categories.push((category, vec![profile]));
            }
        }
    }

    /// Category names in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Profiles in one category.
    pub fn category(&self, name: &str) -> Option<&[Arc<LutProfile>]> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, profiles)| profiles.as_slice())
    }

    /// Profile by category and position.
    pub fn get(&self, category: &str, index: usize) -> Option<&Arc<LutProfile>> {
        self.category(category)?.get(index)
    }

    /// Profile by full name.
    pub fn find(&self, name: &str) -> Option<&Arc<LutProfile>> {
        self.category(category_of(name))?
            .iter()
            .find(|p| p.name == name)
    }

    /// Total number of profiles.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, p)| p.len()).sum()
    }

    /// True when no profile was inserted.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Loads every profile listed in a YAML manifest.
    pub fn load<P: AsRef<Path>>(manifest: P) -> LutResult<Self> {
        let manifest = manifest.as_ref();
        let base = manifest.parent().unwrap_or_else(|| Path::new(""));
        let text = std::fs::read_to_string(manifest)?;
        Self::from_manifest_str(&text, base)
    }

    /// Parses a manifest, resolving relative cube paths against `base`.
    pub fn from_manifest_str(text: &str, base: &Path) -> LutResult<Self> {
        let manifest: Manifest = serde_yaml::from_str(text)?;
        let mut catalogue = Self::new();

        for entry in manifest.profiles {
            let quality = base.join(&entry.quality);
            let performance = entry.performance.map(|p| base.join(p));
            debug!(name = %entry.name, quality = %quality.display(), "loading profile");

            let profile = LutProfile::load(entry.name, &quality, performance.as_deref())?;
            catalogue.insert(profile);
        }

        info!(
            profiles = catalogue.len(),
            categories = catalogue.categories.len(),
            "catalogue loaded"
        );
        Ok(catalogue)
    }
}

impl FromIterator<LutProfile> for ProfileCatalogue {
    fn from_iter<I: IntoIterator<Item = LutProfile>>(iter: I) -> Self {
        let mut catalogue = Self::new();
        for profile in iter {
            catalogue.insert(profile);
        }
        catalogue
    }
}
