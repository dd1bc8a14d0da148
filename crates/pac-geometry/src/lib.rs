//! PAC Geometry - Risk-Governance Geometry Engine
//!
//! Places agent use cases in a three-axis space and draws the policy that
//! governs them:
//! - Maps reliability onto a bounded "nines" axis
//! - Derives the reliability required at every blast radius and autonomy level
//! - Resolves the autonomy a case qualifies for once infrastructure gates it
//! - Synthesizes the governance staircase, flat contours and reference geometry
//! - Lays out case dots with lateral de-overlap
//!
//! All builders are pure functions of a [`GeometryEngine`] and their inputs.
//! [`GovernanceSession`] adds mutable state and change notification on top.
//!
//! # Example
//!
//! ```rust
//! use pac_geometry::{layout, GeometryEngine, ViewMode};
//! use pac_model::{AutonomyLevel, Case, ImpactLevel, InfraFlags, InfraLevel};
//!
//! let engine = GeometryEngine::default();
//! let case = Case::new(ImpactLevel::B1, 99.5).with_infra(InfraFlags::up_to(InfraLevel::I2));
//!
//! let resolved = engine.thresholds().resolve(&case);
//! assert_eq!(resolved.actual, AutonomyLevel::A2);
//! assert!(resolved.infra_limited);
//!
//! let placed = layout::resolve(&engine, &[case], ViewMode::Elevated);
//! assert!(placed[0].ok);
//! ```

#![warn(unreachable_pub)]

pub mod assessment;
pub mod axes;
pub mod cache;
pub mod contours;
pub mod engine;
pub mod frame;
pub mod layout;
pub mod picking;
pub mod scale;
pub mod session;
pub mod staircase;
pub mod threshold;

pub use assessment::{Assessment, CaseStatus, ThresholdTable};
pub use axes::ReferenceGeometry;
pub use cache::{GeometryCache, GeometryKey, SceneGeometry};
pub use contours::FlatContours;
pub use engine::GeometryEngine;
pub use frame::{Point3, SceneFrame};
pub use layout::{PlacedCase, ViewMode};
pub use picking::CellReadout;
pub use scale::ReliabilityScale;
pub use session::{GovernanceSession, Scene, SceneChange, SceneObserver, SessionError};
pub use staircase::{CellTag, Panel, PanelShape, StaircaseGeometry};
pub use threshold::{ResolvedAutonomy, ThresholdEngine};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the geometry engine
    pub use crate::{
        GeometryEngine, GovernanceSession, PlacedCase, ReliabilityScale, SceneFrame,
        SceneObserver, StaircaseGeometry, ThresholdEngine, ViewMode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
