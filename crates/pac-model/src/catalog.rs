//! Level catalogs: names, descriptions and palette entries for each ordinal scale

use serde::Serialize;

use crate::level::{AutonomyLevel, BizValue, ImpactLevel, InfraLevel};

/// Descriptor for an autonomy level and the infra tier that unlocks it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutonomyInfo {
    /// Short name
    pub name: &'static str,
    /// Position of the human relative to the loop
    pub human_loop: &'static str,
    /// Name of the matching infrastructure tier
    pub infra_name: &'static str,
    /// What the infrastructure tier adds
    pub infra_description: &'static str,
    /// Palette entry, light to dark blue with rising autonomy
    pub color: u32,
}

/// Descriptor for a blast radius level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImpactInfo {
    /// Short name
    pub name: &'static str,
    /// What a mistake at this level looks like
    pub description: &'static str,
    /// Typical use cases
    pub examples: &'static str,
}

/// Descriptor for a business value level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BizInfo {
    /// Short name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
}

const AUTONOMY: [AutonomyInfo; 5] = [
    AutonomyInfo {
        name: "Suggestion",
        human_loop: "human-in",
        infra_name: "Open",
        infra_description: "Bare model output",
        color: 0x93c5fd,
    },
    AutonomyInfo {
        name: "Approve",
        human_loop: "human-in",
        infra_name: "Logged",
        infra_description: "Audit trail, trace what it did",
        color: 0x60a5fa,
    },
    AutonomyInfo {
        name: "Oversight",
        human_loop: "human-on",
        infra_name: "Verified",
        infra_description: "+ Identity & provenance",
        color: 0x3b82f6,
    },
    AutonomyInfo {
        name: "Delegated",
        human_loop: "human-over",
        infra_name: "Authorized",
        infra_description: "+ Positive authority grants",
        color: 0x2563eb,
    },
    AutonomyInfo {
        name: "Autonomous",
        human_loop: "no loop",
        infra_name: "Contained",
        infra_description: "+ Sandbox & isolation",
        color: 0x1d4ed8,
    },
];

const IMPACT: [ImpactInfo; 5] = [
    ImpactInfo {
        name: "Contained",
        description: "Errors caught before impact, easily reversed",
        examples: "Knowledge search, log analysis, code suggestions",
    },
    ImpactInfo {
        name: "Recoverable",
        description: "Small group affected, correctable with effort",
        examples: "Ticket routing, CI/CD deploys, internal reports",
    },
    ImpactInfo {
        name: "Exposed",
        description: "Public-facing, hard to fully recall",
        examples: "Support chat, outbound email, sales outreach",
    },
    ImpactInfo {
        name: "Regulated",
        description: "Compliance or legal consequences",
        examples: "HR data, patient records, GDPR scope",
    },
    ImpactInfo {
        name: "Irreversible",
        description: "Can't undo: money, contracts, safety",
        examples: "Payments, contracts, trading, legal filings",
    },
];

const BIZ: [BizInfo; 4] = [
    BizInfo {
        name: "Incremental",
        description: "Small efficiency gain",
    },
    BizInfo {
        name: "Operational",
        description: "Meaningful workflow improvement",
    },
    BizInfo {
        name: "Strategic",
        description: "Competitive advantage",
    },
    BizInfo {
        name: "Transformative",
        description: "Fundamentally changes the business",
    },
];

/// Floor tint below the minimum bar
pub const FAIL_COLOR: u32 = 0xef4444;

/// Floor tint above the minimum bar, and passing dots
pub const PASS_COLOR: u32 = 0x10b981;

/// Outline color for staircase edges
pub const EDGE_COLOR: u32 = 0x5c6a78;

impl AutonomyLevel {
    /// Catalog entry
    #[inline]
    #[must_use]
    pub fn info(self) -> &'static AutonomyInfo {
        &AUTONOMY[self.index()]
    }

    /// Short name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl InfraLevel {
    /// Short name of the control tier
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        AUTONOMY[self.index()].infra_name
    }
}

impl ImpactLevel {
    /// Catalog entry
    #[inline]
    #[must_use]
    pub fn info(self) -> &'static ImpactInfo {
        &IMPACT[self.index()]
    }

    /// Short name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl BizValue {
    /// Catalog entry
    #[inline]
    #[must_use]
    pub fn info(self) -> &'static BizInfo {
        &BIZ[self.index()]
    }

    /// Short name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }
}
