//! Host-side handle for one grading effect.
//!
//! The host owns a [`GradingEffect`], edits its parameters from UI, assigns
//! a profile, and calls [`GradingEffect::render`] once per frame. Parameters
//! are clamped to their ranges at render time, so UI edits can be stored
//! as typed.

use crate::{Frame, GradeResult, GradingParameters, apply_pipeline_inplace};
use lutfx_lut::LutProfile;
use std::sync::Arc;
use tracing::debug;

/// Parameters plus the profile they grade against.
#[derive(Debug, Clone, Default)]
pub struct GradingEffect {
    /// Current parameters.
    pub params: GradingParameters,
    profile: Option<Arc<LutProfile>>,
}

impl GradingEffect {
    /// Effect without a profile. It renders as a passthrough until one is set.
    pub fn new(params: GradingParameters) -> Self {
        Self {
            params,
            profile: None,
        }
    }

    /// Builder-style profile assignment.
    pub fn with_profile(mut self, profile: impl Into<Arc<LutProfile>>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Assigns the profile.
    pub fn set_profile(&mut self, profile: impl Into<Arc<LutProfile>>) {
        self.profile = Some(profile.into());
    }

    /// Removes the profile, disabling the effect.
    pub fn clear_profile(&mut self) {
        self.profile = None;
    }

    /// Current profile.
    pub fn profile(&self) -> Option<&Arc<LutProfile>> {
        self.profile.as_ref()
    }

    /// Mutable parameters.
    pub fn params_mut(&mut self) -> &mut GradingParameters {
        &mut self.params
    }

    /// Restores default parameters. The profile is kept.
    pub fn reset(&mut self) {
        self.params.reset_default_values();
    }

    /// True when rendering would touch pixels.
    pub fn is_active(&self) -> bool {
        self.profile.is_some() && self.params.clamped().is_active()
    }

    /// Renders into a new frame. Inactive effects return a copy.
    pub fn render(&self, frame: &Frame) -> GradeResult<Frame> {
        let mut out = frame.clone();
        self.render_inplace(&mut out)?;
        Ok(out)
    }

    /// Renders in place. Inactive effects leave the frame alone.
    pub fn render_inplace(&self, frame: &mut Frame) -> GradeResult<()> {
        let Some(profile) = self.profile.as_deref() else {
            debug!("no LUT profile, effect disabled");
            return Ok(());
        };
        let params = self.params.clamped();
        if !params.is_active() {
            debug!(profile = %profile.name, "intensity is zero, effect disabled");
            return Ok(());
        }

        apply_pipeline_inplace(frame, &params, profile)
    }
}
