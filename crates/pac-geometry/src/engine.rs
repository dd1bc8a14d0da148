//! Geometry engine
//!
//! Bundles a validated policy with the scene frame and the derived scale and
//! threshold engine, so every geometry builder sees one consistent view.

use pac_model::{ConfigFile, GovernanceConfig, GovernanceError};

use crate::frame::SceneFrame;
use crate::scale::ReliabilityScale;
use crate::threshold::ThresholdEngine;

/// Validated policy plus scene frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryEngine {
    config: GovernanceConfig,
    frame: SceneFrame,
    thresholds: ThresholdEngine,
    scale: ReliabilityScale,
}

impl GeometryEngine {
    /// Engine over a policy and frame
    ///
    /// # Errors
    /// Any [`GovernanceError`] raised by [`GovernanceConfig::validate`].
    pub fn new(config: GovernanceConfig, frame: SceneFrame) -> Result<Self, GovernanceError> {
        config.validate()?;
        Ok(Self {
            config,
            frame,
            thresholds: ThresholdEngine::new(&config),
            scale: ReliabilityScale::from_config(&config, &frame),
        })
    }

    /// Engine from a loaded configuration file
    ///
    /// # Errors
    /// Invalid policy or axis length.
    pub fn from_config_file(file: &ConfigFile) -> Result<Self, GovernanceError> {
        Self::new(file.governance, SceneFrame::new(file.scene.axis_length)?)
    }

    /// Policy
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Scene frame
    #[inline]
    #[must_use]
    pub fn frame(&self) -> &SceneFrame {
        &self.frame
    }

    /// Requirements and autonomy resolution
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> &ThresholdEngine {
        &self.thresholds
    }

    /// Reliability axis
    #[inline]
    #[must_use]
    pub fn scale(&self) -> &ReliabilityScale {
        &self.scale
    }

    /// Same frame, different policy
    ///
    /// # Errors
    /// Invalid policy.
    pub fn with_config(&self, config: GovernanceConfig) -> Result<Self, GovernanceError> {
        Self::new(config, self.frame)
    }
}

impl Default for GeometryEngine {
    fn default() -> Self {
        let config = GovernanceConfig::default();
        let frame = SceneFrame::default();
        Self {
            config,
            frame,
            thresholds: ThresholdEngine::new(&config),
            scale: ReliabilityScale::from_config(&config, &frame),
        }
    }
}
