//! Dot layout
//!
//! Places every case in its blast radius column at its reliability depth.
//! Cases in one column whose dots would overlap along the reliability axis are
//! grouped into clusters and fanned out across the column. The declutter is
//! best effort: a dense enough column may still overlap.

use pac_model::{BizValue, Case, CaseId, ImpactLevel};
use serde::{Deserialize, Serialize};

use crate::engine::GeometryEngine;
use crate::frame::Point3;
use crate::threshold::ResolvedAutonomy;

/// Dot radius per business value, elevated mode
pub const BIZ_RADIUS: [f64; 4] = [0.04, 0.06, 0.09, 0.12];

/// Radius factor applied in flat mode
pub const FLAT_RADIUS_SCALE: f64 = 0.6;

/// Extra gap two neighbouring dots need to stay apart
const CLUSTER_GAP: f64 = 0.02;

/// Share of the largest radius a cluster spreads across
const SPREAD: f64 = 1.8;

/// Whether the autonomy axis is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Autonomy hidden; every dot on the floor
    #[default]
    Flat,
    /// Autonomy shown; dots lifted to the band they qualify for
    Elevated,
}

impl ViewMode {
    /// True for [`ViewMode::Elevated`]
    #[inline]
    #[must_use]
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::Elevated)
    }
}

/// A case placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCase {
    /// Position of the case in the input slice
    pub index: usize,
    /// Identity of the case
    pub id: CaseId,
    /// Dot center
    pub position: Point3,
    /// Dot radius
    pub radius: f64,
    /// Meets the requirement for the level shown
    pub ok: bool,
    /// Autonomy resolution; elevated mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedAutonomy>,
}

/// Dot radius for a business value in a view mode
#[inline]
#[must_use]
pub fn dot_radius(biz_value: BizValue, mode: ViewMode) -> f64 {
    let r = BIZ_RADIUS[biz_value.index()];
    match mode {
        ViewMode::Flat => r * FLAT_RADIUS_SCALE,
        ViewMode::Elevated => r,
    }
}

/// Lateral offsets for a cluster of radii, in cluster order
///
/// A single dot stays centered. Larger clusters are spread symmetrically
/// about the column center.
#[must_use]
pub fn cluster_offsets(radii: &[f64]) -> Vec<f64> {
    let n = radii.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let max_r = radii.iter().copied().fold(0.0, f64::max);
    let spacing = SPREAD * max_r / (n - 1) as f64;
    let mid = (n - 1) as f64 / 2.0;
    (0..n).map(|k| (k as f64 - mid) * spacing).collect()
}

struct Pending {
    index: usize,
    z: f64,
    radius: f64,
}

/// Place every case
///
/// Output order matches input order.
#[must_use]
pub fn resolve(engine: &GeometryEngine, cases: &[Case], mode: ViewMode) -> Vec<PlacedCase> {
    let mut buckets: [Vec<Pending>; 5] = Default::default();
    for (index, case) in cases.iter().enumerate() {
        buckets[case.impact.index()].push(Pending {
            index,
            z: engine.scale().to_axis(case.reliability),
            radius: dot_radius(case.biz_value, mode),
        });
    }

    let mut offsets = vec![0.0; cases.len()];
    for bucket in &mut buckets {
        bucket.sort_by(|a, b| a.z.total_cmp(&b.z));
        for cluster in clusters(bucket) {
            let radii: Vec<f64> = cluster.iter().map(|p| p.radius).collect();
            for (p, offset) in cluster.iter().zip(cluster_offsets(&radii)) {
                offsets[p.index] = offset;
            }
        }
    }

    let placed: Vec<PlacedCase> = cases
        .iter()
        .enumerate()
        .map(|(index, case)| place(engine, index, case, mode, offsets[index]))
        .collect();

    tracing::debug!(cases = placed.len(), ?mode, "resolved dot layout");
    placed
}

/// Split a z-sorted bucket into runs of overlapping dots
fn clusters(sorted: &[Pending]) -> Vec<&[Pending]> {
    let mut out = Vec::new();
    let mut start = 0;
    for i in 1..sorted.len() {
        let (prev, cur) = (&sorted[i - 1], &sorted[i]);
        if cur.z - prev.z >= prev.radius + cur.radius + CLUSTER_GAP {
            out.push(&sorted[start..i]);
            start = i;
        }
    }
    if start < sorted.len() {
        out.push(&sorted[start..]);
    }
    out
}

fn place(
    engine: &GeometryEngine,
    index: usize,
    case: &Case,
    mode: ViewMode,
    offset: f64,
) -> PlacedCase {
    let frame = engine.frame();
    let thresholds = engine.thresholds();
    let x = frame.column_center(case.impact) + offset;
    let z = engine.scale().to_axis(case.reliability);
    let radius = dot_radius(case.biz_value, mode);

    let (y, ok, resolved) = match mode {
        ViewMode::Flat => {
            let ok = case.reliability_fraction() >= thresholds.required_reliability(case.impact);
            (0.0, ok, None)
        }
        ViewMode::Elevated => {
            let r = thresholds.resolve(case);
            let ok = thresholds.clears(case.reliability, case.impact, r.actual);
            (frame.band_center(r.actual), ok, Some(r))
        }
    };

    PlacedCase {
        index,
        id: case.id.clone(),
        position: Point3::new(x, y, z),
        radius,
        ok,
        resolved,
    }
}

/// Cases of one column, in input order
#[must_use]
pub fn in_column<'a>(
    placed: &'a [PlacedCase],
    cases: &[Case],
    impact: ImpactLevel,
) -> Vec<&'a PlacedCase> {
    placed
        .iter()
        .filter(|p| cases.get(p.index).is_some_and(|c| c.impact == impact))
        .collect()
}
