//! Reference geometry: axis ticks, lane dividers, autonomy bands and infra
//! gate planes

use pac_model::{AutonomyLevel, ImpactLevel, InfraLevel};
use serde::{Deserialize, Serialize};

use crate::engine::GeometryEngine;
use crate::frame::Point3;

/// Reliability percents that get a tick
pub const RELIABILITY_TICKS: [f64; 6] = [70.0, 80.0, 90.0, 95.0, 99.0, 99.9];

/// Half-length of a tick dash
pub const TICK_HALF: f64 = 0.08;

/// Gate planes float this far above their band floor
const GATE_LIFT: f64 = 0.01;

/// A tick on the reliability axis with its grid line across the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliabilityTick {
    /// Percent
    pub percent: f64,
    /// Axis position
    pub z: f64,
    /// Display text, e.g. `99.9%`
    pub label: String,
    /// Tick dash across the axis, `x` in `±TICK_HALF`
    pub dash: [Point3; 2],
    /// Grid line from `x = 0` to `x = S`
    pub grid: [Point3; 2],
}

/// A tick at a blast radius column center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactTick {
    /// Column
    pub impact: ImpactLevel,
    /// Column center
    pub x: f64,
    /// Tick dash across the axis, `z` in `±TICK_HALF`
    pub dash: [Point3; 2],
    /// Display text
    pub label: String,
}

/// An autonomy band with its boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutonomyBand {
    /// Level
    pub level: AutonomyLevel,
    /// Bottom boundary
    pub y_floor: f64,
    /// Label height
    pub y_center: f64,
    /// Top boundary
    pub y_top: f64,
    /// Display text
    pub label: String,
    /// Rendering hint, `0xRRGGBB`
    pub color: u32,
}

/// A translucent `S × S` plane marking where an infra tier gates autonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraGatePlane {
    /// Tier
    pub level: InfraLevel,
    /// Height of the plane
    pub y: f64,
    /// Corners, also the outline in order
    pub corners: [Point3; 4],
    /// Display text
    pub label: String,
}

/// Everything drawn to orient the viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceGeometry {
    /// Reliability ticks, low to high
    pub reliability_ticks: Vec<ReliabilityTick>,
    /// Lane divider x positions
    pub lane_dividers: Vec<f64>,
    /// Blast radius ticks
    pub impact_ticks: Vec<ImpactTick>,
    /// Band boundaries from `y = 0` to `y = S`
    pub band_boundaries: Vec<f64>,
    /// Autonomy bands
    pub autonomy_bands: Vec<AutonomyBand>,
    /// Infra gate planes
    pub infra_gates: Vec<InfraGatePlane>,
}

/// Label for a reliability percent: `70%`, `99.9%`
#[must_use]
pub fn percent_label(percent: f64) -> String {
    format!("{percent}%")
}

/// Build the reference geometry
#[must_use]
pub fn build(engine: &GeometryEngine) -> ReferenceGeometry {
    let frame = engine.frame();
    let s = frame.axis_length();
    let cell = frame.cell();

    let reliability_ticks = RELIABILITY_TICKS
        .iter()
        .map(|&percent| {
            let z = engine.scale().to_axis(percent);
            ReliabilityTick {
                percent,
                z,
                label: percent_label(percent),
                dash: [Point3::new(-TICK_HALF, 0.0, z), Point3::new(TICK_HALF, 0.0, z)],
                grid: [Point3::new(0.0, 0.0, z), Point3::new(s, 0.0, z)],
            }
        })
        .collect();

    let lane_dividers = (1..ImpactLevel::ALL.len())
        .map(|i| i as f64 * cell)
        .collect();

    let impact_ticks = ImpactLevel::ALL
        .iter()
        .map(|&impact| {
            let x = frame.column_center(impact);
            ImpactTick {
                impact,
                x,
                dash: [Point3::new(x, 0.0, -TICK_HALF), Point3::new(x, 0.0, TICK_HALF)],
                label: format!("{impact} {}", impact.name()),
            }
        })
        .collect();

    let band_boundaries = (0..=AutonomyLevel::ALL.len())
        .map(|l| l as f64 * cell)
        .collect();

    let autonomy_bands = AutonomyLevel::ALL
        .iter()
        .map(|&level| AutonomyBand {
            level,
            y_floor: frame.band_floor(level),
            y_center: frame.band_center(level),
            y_top: frame.shelf_height(level),
            label: format!("{level} {}", level.name()),
            color: level.info().color,
        })
        .collect();

    let infra_gates = InfraLevel::ALL
        .iter()
        .map(|&level| {
            let y = frame.band_floor(AutonomyLevel::from(level)) + GATE_LIFT;
            InfraGatePlane {
                level,
                y,
                corners: [
                    Point3::new(0.0, y, 0.0),
                    Point3::new(s, y, 0.0),
                    Point3::new(s, y, s),
                    Point3::new(0.0, y, s),
                ],
                label: format!("{level} {}", level.name()),
            }
        })
        .collect();

    ReferenceGeometry {
        reliability_ticks,
        lane_dividers,
        impact_ticks,
        band_boundaries,
        autonomy_bands,
        infra_gates,
    }
}
