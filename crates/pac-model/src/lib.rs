//! PAC Model
//!
//! Data model for the risk-governance space of AI-agent deployments.
//!
//! # Core Concepts
//!
//! - [`Case`]: an agent use case placed by blast radius, reliability and autonomy
//! - [`ImpactLevel`], [`AutonomyLevel`], [`InfraLevel`], [`BizValue`]: the ordinal axes
//! - [`InfraFlags`]: which infrastructure controls a case has in place
//! - [`GovernanceConfig`]: the threshold policy
//! - [`ConfigFile`]: policy plus scene settings, loadable from TOML/YAML/JSON
//!
//! # Example
//!
//! ```rust
//! use pac_model::{Case, GovernanceConfig, ImpactLevel, InfraFlags, InfraLevel};
//!
//! let case = Case::new(ImpactLevel::B2, 93.5)
//!     .with_name("Ticket triage")
//!     .with_infra(InfraFlags::up_to(InfraLevel::I3));
//!
//! let config = GovernanceConfig::default();
//! assert_eq!(config.thresholds.at(case.impact), 0.90);
//! ```

#![warn(unreachable_pub)]

mod case;
mod catalog;
mod config;
mod error;
mod level;
mod samples;

pub use case::{Case, CaseId, CaseSet, InfraFlags, LevelKey};
pub use catalog::{AutonomyInfo, BizInfo, ImpactInfo, EDGE_COLOR, FAIL_COLOR, PASS_COLOR};
pub use config::{
    ConfigFile, GovernanceConfig, SceneSettings, Thresholds, DEFAULT_AXIS_LENGTH,
    DEFAULT_ESCALATION, DEFAULT_MIN_RELIABILITY, DEFAULT_THRESHOLDS, MAX_RELIABILITY,
};
pub use error::{ConfigError, GovernanceError, GovernanceResult};
pub use level::{AutonomyLevel, BizValue, ImpactLevel, InfraLevel};
pub use samples::{is_sample_id, sample_cases};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the model
    pub use crate::{
        AutonomyLevel, BizValue, Case, CaseId, GovernanceConfig, GovernanceError, ImpactLevel,
        InfraFlags, InfraLevel, Thresholds,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
