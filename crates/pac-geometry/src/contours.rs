//! Flat-mode governance contours
//!
//! With the autonomy axis hidden the staircase collapses onto the floor: each
//! autonomy level becomes a contour line per lane at its threshold depth,
//! joined by steps on the lane boundaries. The A1 contour is the pass/fail
//! boundary and is drawn solid; higher levels are dashed.

use pac_model::{AutonomyLevel, ImpactLevel, FAIL_COLOR, PASS_COLOR};
use serde::{Deserialize, Serialize};

use crate::engine::GeometryEngine;
use crate::frame::Point3;
use crate::staircase::{in_band, FloorZone};

/// Height of contour lines above the floor
const CONTOUR_Y: f64 = 0.008;

/// Height of the flat floor tint
const FLOOR_Y: f64 = 0.003;

const BELOW_BAR_OPACITY: f64 = 0.06;
const CLEARS_BAR_OPACITY: f64 = 0.045;

/// Dash pattern of a contour line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "style")]
pub enum Stroke {
    /// Continuous line
    Solid,
    /// Dashed line
    Dashed {
        /// Dash length
        dash: f64,
        /// Gap length
        gap: f64,
    },
}

impl Stroke {
    /// Stroke for an autonomy level's contour
    #[must_use]
    pub fn for_level(level: AutonomyLevel) -> Self {
        if level == AutonomyLevel::A1 {
            Self::Solid
        } else {
            Self::Dashed {
                dash: 0.06,
                gap: 0.03,
            }
        }
    }
}

/// Line running across a lane at a threshold, or a step between lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContourKind {
    /// Across one lane
    Lane(ImpactLevel),
    /// On the boundary between a lane and the next one
    Step(ImpactLevel),
}

/// A contour segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContourLine {
    /// Autonomy level drawn
    pub level: AutonomyLevel,
    /// Lane or step
    pub kind: ContourKind,
    /// Start
    pub from: Point3,
    /// End
    pub to: Point3,
    /// Dash pattern
    pub stroke: Stroke,
    /// Rendering hint
    pub opacity: f64,
    /// Rendering hint, `0xRRGGBB`
    pub color: u32,
}

/// Pass/fail tint of one lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorStrip {
    /// Lane
    pub impact: ImpactLevel,
    /// Side of the A1 threshold
    pub zone: FloorZone,
    /// Corners in winding order
    pub corners: [Point3; 4],
    /// Rendering hint
    pub opacity: f64,
    /// Rendering hint, `0xRRGGBB`
    pub color: u32,
}

/// Everything flat mode draws in place of the staircase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatContours {
    /// Lane contours and steps, level by level
    pub lines: Vec<ContourLine>,
    /// Floor tint, lane by lane
    pub floor: Vec<FloorStrip>,
}

impl FlatContours {
    /// Lines of one autonomy level
    pub fn level(&self, level: AutonomyLevel) -> impl Iterator<Item = &ContourLine> + '_ {
        self.lines.iter().filter(move |l| l.level == level)
    }
}

/// Build the flat-mode contours and floor
#[must_use]
pub fn synthesize(engine: &GeometryEngine) -> FlatContours {
    let mut out = FlatContours::default();
    for &impact in ImpactLevel::ALL {
        emit_floor(engine, impact, &mut out.floor);
    }
    for &level in AutonomyLevel::ALL {
        emit_level(engine, level, &mut out.lines);
    }
    tracing::debug!(
        lines = out.lines.len(),
        strips = out.floor.len(),
        "synthesized flat contours"
    );
    out
}

fn emit_floor(engine: &GeometryEngine, impact: ImpactLevel, out: &mut Vec<FloorStrip>) {
    let required = engine
        .thresholds()
        .required_for_autonomy(impact, AutonomyLevel::A1);
    if !in_band(required) {
        return;
    }
    let frame = engine.frame();
    let s = frame.axis_length();
    let (x_left, x_right) = frame.column_bounds(impact);
    let z = engine.scale().to_axis(required * 100.0);

    let strip = |zone, z0: f64, z1: f64, opacity, color| FloorStrip {
        impact,
        zone,
        corners: [
            Point3::new(x_left, FLOOR_Y, z0),
            Point3::new(x_right, FLOOR_Y, z0),
            Point3::new(x_right, FLOOR_Y, z1),
            Point3::new(x_left, FLOOR_Y, z1),
        ],
        opacity,
        color,
    };

    out.push(strip(
        FloorZone::BelowMinimumBar,
        0.0,
        z,
        BELOW_BAR_OPACITY,
        FAIL_COLOR,
    ));
    if s - z > 0.01 {
        out.push(strip(
            FloorZone::ClearsMinimumBar,
            z,
            s,
            CLEARS_BAR_OPACITY,
            PASS_COLOR,
        ));
    }
}

fn emit_level(engine: &GeometryEngine, level: AutonomyLevel, out: &mut Vec<ContourLine>) {
    let frame = engine.frame();
    let thresholds = engine.thresholds();
    let scale = engine.scale();
    let stroke = Stroke::for_level(level);
    let opacity = if stroke == Stroke::Solid { 1.0 } else { 0.6 };
    let color = level.info().color;
    let depth = |impact| scale.to_axis(thresholds.required_for_autonomy(impact, level) * 100.0);

    let mut line = |kind, from, to| {
        out.push(ContourLine {
            level,
            kind,
            from,
            to,
            stroke,
            opacity,
            color,
        });
    };

    for &impact in ImpactLevel::ALL {
        if !in_band(thresholds.required_for_autonomy(impact, level)) {
            continue;
        }
        let (x_left, x_right) = frame.column_bounds(impact);
        let z = depth(impact);
        line(
            ContourKind::Lane(impact),
            Point3::new(x_left, CONTOUR_Y, z),
            Point3::new(x_right, CONTOUR_Y, z),
        );
    }

    // Steps join clamped depths, so they are drawn even for out-of-band lanes
    for &impact in ImpactLevel::ALL {
        let Some(next) = impact.next() else { break };
        let (_, x) = frame.column_bounds(impact);
        line(
            ContourKind::Step(impact),
            Point3::new(x, CONTOUR_Y, depth(impact)),
            Point3::new(x, CONTOUR_Y, depth(next)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a1_is_solid_and_rest_dashed() {
        let contours = synthesize(&GeometryEngine::default());
        assert!(contours
            .level(AutonomyLevel::A1)
            .all(|l| l.stroke == Stroke::Solid));
        assert!(contours
            .level(AutonomyLevel::A3)
            .all(|l| matches!(l.stroke, Stroke::Dashed { .. })));
    }

    #[test]
    fn four_steps_per_level() {
        let contours = synthesize(&GeometryEngine::default());
        for &level in AutonomyLevel::ALL {
            let steps = contours
                .level(level)
                .filter(|l| matches!(l.kind, ContourKind::Step(_)))
                .count();
            assert_eq!(steps, 4, "{level}");
        }
    }

    #[test]
    fn lanes_skip_out_of_band_requirements() {
        let engine = GeometryEngine::new(
            pac_model::GovernanceConfig::new().with_escalation(0.5),
            Default::default(),
        )
        .unwrap();
        let contours = synthesize(&engine);
        // B5 needs 3.5 nines at A4
        assert_eq!(
            contours
                .level(AutonomyLevel::A1)
                .filter(|l| matches!(l.kind, ContourKind::Lane(_)))
                .count(),
            5
        );
        assert!(!contours
            .level(AutonomyLevel::A4)
            .any(|l| l.kind == ContourKind::Lane(ImpactLevel::B5)));
        // B4 also needs over three nines; B1 to B3 remain
        assert_eq!(contours.level(AutonomyLevel::A4).count(), 3 + 4);
    }

    #[test]
    fn floor_has_both_zones_per_lane() {
        let contours = synthesize(&GeometryEngine::default());
        assert_eq!(contours.floor.len(), 10);
        let b1: Vec<_> = contours
            .floor
            .iter()
            .filter(|s| s.impact == ImpactLevel::B1)
            .collect();
        assert_eq!(b1[0].zone, FloorZone::BelowMinimumBar);
        assert_eq!(b1[0].color, FAIL_COLOR);
        assert_eq!(b1[1].zone, FloorZone::ClearsMinimumBar);
        assert!((b1[1].corners[2].z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn contours_lie_on_the_floor_plane() {
        let contours = synthesize(&GeometryEngine::default());
        assert!(contours
            .lines
            .iter()
            .all(|l| l.from.y == CONTOUR_Y && l.to.y == CONTOUR_Y));
    }
}
