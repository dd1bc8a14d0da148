//! Error types for the PAC model
//!
//! Two families:
//! - [`GovernanceError`]: a value outside its domain (caller bug, never recovered locally)
//! - [`ConfigError`]: a configuration file that could not be read or parsed

use std::path::PathBuf;

/// Invalid-domain input to the governance model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GovernanceError {
    /// Blast radius outside 1..=5
    #[error("blast radius level {0} outside 1..=5")]
    InvalidImpact(u8),

    /// Autonomy level outside 1..=5
    #[error("autonomy level {0} outside 1..=5")]
    InvalidAutonomy(u8),

    /// Infrastructure control level outside 1..=5
    #[error("infrastructure level {0} outside 1..=5")]
    InvalidInfraLevel(u8),

    /// Infrastructure flag key that is not an integer
    #[error("infrastructure level key {0:?} is not an integer")]
    InvalidLevelKey(String),

    /// Business value outside 1..=4
    #[error("business value {0} outside 1..=4")]
    InvalidBizValue(u8),

    /// Threshold table has the wrong length
    #[error("expected {expected} thresholds, got {actual}")]
    ThresholdCount {
        /// Required length (index 0 is a placeholder)
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// A threshold is not a fraction
    #[error("threshold for blast radius {index} is {value}, outside [0, 1]")]
    ThresholdOutOfRange {
        /// Blast radius index into the table
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Escalation is negative or not finite
    #[error("autonomy escalation must be finite and >= 0, got {0}")]
    InvalidEscalation(f64),

    /// Reliability floor leaves no room below the 99.9% ceiling
    #[error("minimum reliability must lie in [0, 99.9), got {0}")]
    InvalidMinReliability(f64),

    /// Scene axis length is zero, negative or not finite
    #[error("axis length must be finite and > 0, got {0}")]
    InvalidAxisLength(f64),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Malformed YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Malformed TOML
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Extension is not one of toml, yaml, yml, json
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Parsed but semantically invalid
    #[error(transparent)]
    Invalid(#[from] GovernanceError),
}

/// Result alias for model operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;
