//! Case assessment and the threshold table
//!
//! Turns layout results into the statuses a viewer reads: pass or shortfall
//! in flat mode, the granted autonomy level in elevated mode.

use std::fmt;

use pac_model::{AutonomyLevel, Case, CaseId, ImpactLevel};
use serde::{Deserialize, Serialize};

use crate::engine::GeometryEngine;
use crate::layout::ViewMode;
use crate::threshold::ThresholdEngine;

/// How a case fares against the policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CaseStatus {
    /// Meets the A1 requirement
    Pass,
    /// Misses the A1 requirement by `gap` percentage points
    Shortfall {
        /// Required percent minus reliability
        gap: f64,
    },
    /// Elevated mode: the level granted
    #[serde(rename_all = "camelCase")]
    Autonomy {
        /// Level granted
        actual: AutonomyLevel,
        /// Level reliability alone would grant
        potential: AutonomyLevel,
        /// Infrastructure is the binding constraint
        infra_limited: bool,
        /// Reliability meets the requirement at `actual`
        ok: bool,
    },
}

impl CaseStatus {
    /// Meets the requirement for the level shown
    #[must_use]
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Pass => true,
            Self::Shortfall { .. } => false,
            Self::Autonomy { ok, .. } => *ok,
        }
    }

    /// Compact label: `✓`, `✗ -5%`, `A2 Approve (→A5)`
    #[must_use]
    pub fn short_label(&self) -> String {
        match *self {
            Self::Pass => "✓".to_string(),
            Self::Shortfall { gap } => format!("✗ -{gap:.0}%"),
            Self::Autonomy {
                actual,
                potential,
                infra_limited,
                ..
            } => {
                let mut label = format!("{actual} {}", actual.name());
                if infra_limited {
                    label.push_str(&format!(" (→{potential})"));
                }
                label
            }
        }
    }

    /// One-line explanation
    #[must_use]
    pub fn message(&self) -> String {
        match *self {
            Self::Pass => "✓ Above governance line".to_string(),
            Self::Shortfall { gap } => format!("✗ Below, needs {gap:.0}% more"),
            Self::Autonomy {
                actual,
                potential,
                infra_limited,
                ok,
            } => match (ok, infra_limited) {
                (true, true) => {
                    format!("✓ {actual} (infra ceiling, governance allows {potential})")
                }
                (true, false) => format!("✓ Cleared at {actual} {}", actual.name()),
                (false, _) => format!("✗ Reliability insufficient for {actual}"),
            },
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_label())
    }
}

/// A case with its status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Identity of the case
    pub id: CaseId,
    /// Display name
    pub name: String,
    /// `B2 Recoverable · V3 Strategic · 93.5%`
    pub detail: String,
    /// Requirement at A1, percent
    pub required_percent: f64,
    /// Outcome
    pub status: CaseStatus,
}

/// Assess one case
#[must_use]
pub fn assess(engine: &GeometryEngine, case: &Case, mode: ViewMode) -> Assessment {
    let thresholds = engine.thresholds();
    let required = thresholds.required_reliability(case.impact);
    let status = match mode {
        ViewMode::Flat => {
            if case.reliability_fraction() >= required {
                CaseStatus::Pass
            } else {
                CaseStatus::Shortfall {
                    gap: required * 100.0 - case.reliability,
                }
            }
        }
        ViewMode::Elevated => {
            let r = thresholds.resolve(case);
            CaseStatus::Autonomy {
                actual: r.actual,
                potential: r.potential,
                infra_limited: r.infra_limited,
                ok: thresholds.clears(case.reliability, case.impact, r.actual),
            }
        }
    };

    Assessment {
        id: case.id.clone(),
        name: case.name.clone(),
        detail: format!(
            "{} {} · {} {} · {}%",
            case.impact,
            case.impact.name(),
            case.biz_value,
            case.biz_value.name(),
            case.reliability
        ),
        required_percent: required * 100.0,
        status,
    }
}

/// Assess every case, in input order
#[must_use]
pub fn assess_all(engine: &GeometryEngine, cases: &[Case], mode: ViewMode) -> Vec<Assessment> {
    cases.iter().map(|c| assess(engine, c, mode)).collect()
}

/// Required reliability in percent for every cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// `rows[impact][autonomy]`, zero-based
    pub rows: [[f64; 5]; 5],
}

impl ThresholdTable {
    /// Tabulate an engine
    #[must_use]
    pub fn new(engine: &ThresholdEngine) -> Self {
        let mut rows = [[0.0; 5]; 5];
        for &impact in ImpactLevel::ALL {
            for &level in AutonomyLevel::ALL {
                rows[impact.index()][level.index()] =
                    engine.required_for_autonomy(impact, level) * 100.0;
            }
        }
        Self { rows }
    }

    /// Percent at a cell
    #[inline]
    #[must_use]
    pub fn percent(&self, impact: ImpactLevel, level: AutonomyLevel) -> f64 {
        self.rows[impact.index()][level.index()]
    }
}

impl fmt::Display for ThresholdTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16}", "")?;
        for level in AutonomyLevel::ALL {
            write!(f, "{:>8}", level.to_string())?;
        }
        writeln!(f)?;
        for &impact in ImpactLevel::ALL {
            write!(f, "{:<16}", format!("{impact} {}", impact.name()))?;
            for &level in AutonomyLevel::ALL {
                write!(f, "{:>8}", format!("{:.1}%", self.percent(impact, level)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
