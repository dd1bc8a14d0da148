//! Threshold engine
//!
//! Turns the governance policy into reliability requirements and resolves the
//! autonomy level a case actually clears.
//!
//! Requirements compound in failure-rate space: each autonomy step above A1
//! adds `autonomy_escalation` nines to the blast radius base requirement.

use pac_model::{
    AutonomyLevel, Case, GovernanceConfig, GovernanceError, ImpactLevel, InfraFlags, Thresholds,
};
use serde::{Deserialize, Serialize};

use crate::scale::{fraction_from_nines, nines};

/// Autonomy a case clears, and what held it back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAutonomy {
    /// Level granted: the lower of `potential` and the infrastructure ceiling
    pub actual: AutonomyLevel,
    /// Highest level reliability alone would justify
    pub potential: AutonomyLevel,
    /// Infrastructure, not reliability, is the binding constraint
    pub infra_limited: bool,
}

/// Reliability requirements derived from a [`GovernanceConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEngine {
    thresholds: Thresholds,
    escalation: f64,
}

impl ThresholdEngine {
    /// Engine over a configuration
    #[inline]
    #[must_use]
    pub fn new(config: &GovernanceConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            escalation: config.autonomy_escalation,
        }
    }

    /// Base requirement (fraction) at a blast radius, autonomy A1
    #[inline]
    #[must_use]
    pub fn required_reliability(&self, impact: ImpactLevel) -> f64 {
        self.thresholds.at(impact)
    }

    /// Requirement (fraction) at a blast radius and autonomy level
    #[must_use]
    pub fn required_for_autonomy(&self, impact: ImpactLevel, autonomy: AutonomyLevel) -> f64 {
        let base = self.required_reliability(impact);
        let extra = f64::from(autonomy.as_u8() - 1) * self.escalation;
        if extra == 0.0 {
            return base;
        }
        fraction_from_nines(nines(base) + extra)
    }

    /// Requirement for raw level numbers
    ///
    /// # Errors
    /// `InvalidImpact` or `InvalidAutonomy` outside 1..=5.
    pub fn threshold_at(&self, impact: u8, autonomy: u8) -> Result<f64, GovernanceError> {
        Ok(self.required_for_autonomy(ImpactLevel::new(impact)?, AutonomyLevel::new(autonomy)?))
    }

    /// Does a reliability percent meet the requirement at a cell
    #[inline]
    #[must_use]
    pub fn clears(&self, reliability: f64, impact: ImpactLevel, autonomy: AutonomyLevel) -> bool {
        reliability / 100.0 >= self.required_for_autonomy(impact, autonomy)
    }

    /// Highest level the reliability justifies; A1 when none do
    ///
    /// A1 is returned even when its own requirement fails. Whether the case
    /// passes at all is a separate check.
    #[must_use]
    pub fn qualified_level(&self, reliability: f64, impact: ImpactLevel) -> AutonomyLevel {
        AutonomyLevel::ALL
            .iter()
            .rev()
            .copied()
            .find(|&level| self.clears(reliability, impact, level))
            .unwrap_or(AutonomyLevel::A1)
    }

    /// Highest level the infrastructure allows; A1 when no control is present
    ///
    /// Gaps are not repaired: `{1, 3}` yields A3.
    #[must_use]
    pub fn infra_ceiling(infra: &InfraFlags) -> AutonomyLevel {
        infra
            .highest_present()
            .map_or(AutonomyLevel::A1, AutonomyLevel::from)
    }

    /// Resolve against the case's own infrastructure
    #[inline]
    #[must_use]
    pub fn resolve(&self, case: &Case) -> ResolvedAutonomy {
        self.resolve_with(case, &case.infra)
    }

    /// Resolve against explicit infrastructure flags
    #[must_use]
    pub fn resolve_with(&self, case: &Case, infra: &InfraFlags) -> ResolvedAutonomy {
        if !infra.is_prefix() {
            tracing::warn!(case = %case.id, "infra flags have a gap; using highest present level");
        }
        let potential = self.qualified_level(case.reliability, case.impact);
        let ceiling = Self::infra_ceiling(infra);
        ResolvedAutonomy {
            actual: potential.min(ceiling),
            potential,
            infra_limited: ceiling < potential,
        }
    }
}

impl Default for ThresholdEngine {
    fn default() -> Self {
        Self::new(&GovernanceConfig::default())
    }
}
