//! Governance configuration
//!
//! [`GovernanceConfig`] is the policy: the base threshold table, the per-level
//! autonomy escalation and the reliability floor of the axis. [`ConfigFile`]
//! wraps it with scene settings for loading from TOML, YAML or JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GovernanceError};
use crate::level::ImpactLevel;

/// Base thresholds used when nothing else is configured
pub const DEFAULT_THRESHOLDS: [f64; 6] = [0.0, 0.80, 0.90, 0.95, 0.97, 0.99];

/// Extra nines required per autonomy level above A1
pub const DEFAULT_ESCALATION: f64 = 0.25;

/// Reliability percent at the bottom of the axis
pub const DEFAULT_MIN_RELIABILITY: f64 = 70.0;

/// Reliability percent at the top of the axis; fixed
pub const MAX_RELIABILITY: f64 = 99.9;

/// Scene axis length in scene units
pub const DEFAULT_AXIS_LENGTH: f64 = 3.0;

/// Minimum reliability fraction per blast radius at autonomy A1
///
/// Index 0 is a placeholder so the table can be indexed by blast radius
/// directly. Exactly six entries, each a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Thresholds([f64; 6]);

impl Thresholds {
    /// Validate a raw table
    ///
    /// # Errors
    /// Fails on a non-finite value or one outside `[0, 1]` at indices 1..=5.
    pub fn new(values: [f64; 6]) -> Result<Self, GovernanceError> {
        for (index, &value) in values.iter().enumerate().skip(1) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GovernanceError::ThresholdOutOfRange { index, value });
            }
        }
        Ok(Self(values))
    }

    /// Requirement at a blast radius
    #[inline]
    #[must_use]
    pub fn at(&self, impact: ImpactLevel) -> f64 {
        self.0[impact.as_u8() as usize]
    }

    /// Replace the requirement at a blast radius
    ///
    /// # Errors
    /// Fails when `value` is not a fraction.
    pub fn set(&mut self, impact: ImpactLevel, value: f64) -> Result<(), GovernanceError> {
        let mut next = self.0;
        next[impact.as_u8() as usize] = value;
        *self = Self::new(next)?;
        Ok(())
    }

    /// Raw table including the placeholder
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> &[f64; 6] {
        &self.0
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLDS)
    }
}

impl TryFrom<Vec<f64>> for Thresholds {
    type Error = GovernanceError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let actual = values.len();
        let array: [f64; 6] = values
            .try_into()
            .map_err(|_| GovernanceError::ThresholdCount { expected: 6, actual })?;
        Self::new(array)
    }
}

impl From<Thresholds> for Vec<f64> {
    fn from(thresholds: Thresholds) -> Self {
        thresholds.0.to_vec()
    }
}

/// The governance policy
///
/// Missing fields fall back to defaults, so a saved partial config merges
/// over [`GovernanceConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernanceConfig {
    /// Base requirement per blast radius at A1
    pub thresholds: Thresholds,
    /// Extra nines per autonomy level above A1
    #[serde(alias = "autonomy_escalation")]
    pub autonomy_escalation: f64,
    /// Axis floor in percent
    #[serde(alias = "min_reliability")]
    pub min_reliability: f64,
}

impl GovernanceConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With threshold table
    #[inline]
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// With autonomy escalation
    #[inline]
    #[must_use]
    pub fn with_escalation(mut self, escalation: f64) -> Self {
        self.autonomy_escalation = escalation;
        self
    }

    /// With axis floor
    #[inline]
    #[must_use]
    pub fn with_min_reliability(mut self, min_reliability: f64) -> Self {
        self.min_reliability = min_reliability;
        self
    }

    /// Check the scalar fields; the threshold table validates itself
    ///
    /// # Errors
    /// Negative or non-finite escalation, or a floor outside `[0, 99.9)`.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if !self.autonomy_escalation.is_finite() || self.autonomy_escalation < 0.0 {
            return Err(GovernanceError::InvalidEscalation(self.autonomy_escalation));
        }
        if !self.min_reliability.is_finite()
            || !(0.0..MAX_RELIABILITY).contains(&self.min_reliability)
        {
            return Err(GovernanceError::InvalidMinReliability(self.min_reliability));
        }
        Ok(())
    }

    /// Consume and return self when valid
    ///
    /// # Errors
    /// See [`GovernanceConfig::validate`].
    pub fn validated(self) -> Result<Self, GovernanceError> {
        self.validate()?;
        Ok(self)
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            autonomy_escalation: DEFAULT_ESCALATION,
            min_reliability: DEFAULT_MIN_RELIABILITY,
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Length of every axis in scene units
    #[serde(alias = "axisLength")]
    pub axis_length: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            axis_length: DEFAULT_AXIS_LENGTH,
        }
    }
}

/// On-disk configuration
///
/// ```toml
/// [governance]
/// thresholds = [0.0, 0.80, 0.90, 0.95, 0.97, 0.99]
/// autonomyEscalation = 0.25
/// minReliability = 70.0
///
/// [scene]
/// axis_length = 3.0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Policy
    pub governance: GovernanceConfig,
    /// Scene
    pub scene: SceneSettings,
}

impl ConfigFile {
    /// Parse from TOML
    ///
    /// # Errors
    /// Returns error if TOML is invalid or values are out of range
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let file: Self = toml::from_str(toml)?;
        file.validated()
    }

    /// Parse from YAML
    ///
    /// # Errors
    /// Returns error if YAML is invalid or values are out of range
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: Self = serde_yaml::from_str(yaml)?;
        file.validated()
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// Returns error if JSON is invalid or values are out of range
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: Self = serde_json::from_str(json)?;
        file.validated()
    }

    /// Load from disk, choosing the format by extension
    ///
    /// # Errors
    /// I/O failure, unknown extension, parse failure or invalid values.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        tracing::debug!(path = %path.display(), format = %ext, "loading config");
        match ext.as_str() {
            "toml" => Self::from_toml_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.governance.validate()?;
        let s = self.scene.axis_length;
        if !s.is_finite() || s <= 0.0 {
            return Err(GovernanceError::InvalidAxisLength(s).into());
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_require_six_entries() {
        let err = Thresholds::try_from(vec![0.0, 0.8, 0.9]).unwrap_err();
        assert_eq!(
            err,
            GovernanceError::ThresholdCount {
                expected: 6,
                actual: 3
            }
        );
    }

    #[test]
    fn thresholds_reject_non_fractions() {
        let err = Thresholds::new([0.0, 0.8, 1.2, 0.95, 0.97, 0.99]).unwrap_err();
        assert!(matches!(err, GovernanceError::ThresholdOutOfRange { index: 2, .. }));
    }

    #[test]
    fn placeholder_is_not_validated() {
        assert!(Thresholds::new([-1.0, 0.8, 0.9, 0.95, 0.97, 0.99]).is_ok());
    }

    #[test]
    fn set_keeps_old_table_on_error() {
        let mut t = Thresholds::default();
        assert!(t.set(ImpactLevel::B3, 2.0).is_err());
        assert_eq!(t, Thresholds::default());
        t.set(ImpactLevel::B3, 0.93).unwrap();
        assert!((t.at(ImpactLevel::B3) - 0.93).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_merges_over_defaults() {
        let cfg: GovernanceConfig = serde_json::from_str(r#"{"autonomyEscalation":0.5}"#).unwrap();
        assert!((cfg.autonomy_escalation - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.thresholds, Thresholds::default());
        assert!((cfg.min_reliability - DEFAULT_MIN_RELIABILITY).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_rejects_bad_scalars() {
        assert_eq!(
            GovernanceConfig::new().with_escalation(-0.1).validate(),
            Err(GovernanceError::InvalidEscalation(-0.1))
        );
        assert_eq!(
            GovernanceConfig::new().with_min_reliability(99.9).validate(),
            Err(GovernanceError::InvalidMinReliability(99.9))
        );
        assert!(GovernanceConfig::new().with_escalation(0.0).validate().is_ok());
    }

    #[test]
    fn toml_and_yaml_agree() {
        let toml = r"
[governance]
thresholds = [0.0, 0.75, 0.85, 0.9, 0.95, 0.99]
autonomyEscalation = 0.3

[scene]
axis_length = 4.0
";
        let yaml = "
governance:
  thresholds: [0.0, 0.75, 0.85, 0.9, 0.95, 0.99]
  autonomy_escalation: 0.3
scene:
  axis_length: 4.0
";
        let a = ConfigFile::from_toml_str(toml).unwrap();
        let b = ConfigFile::from_yaml_str(yaml).unwrap();
        assert_eq!(a, b);
        assert!((a.scene.axis_length - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_axis() {
        let err = ConfigFile::from_json_str(r#"{"scene":{"axis_length":0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GovernanceError::InvalidAxisLength(_))
        ));
    }
}
