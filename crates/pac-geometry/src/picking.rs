//! Shelf picking
//!
//! A pointer landing on any staircase panel reports the cell it belongs to.
//! The readout names the threshold the cell encodes and places a highlight
//! wall across the column at that depth.

use pac_model::{AutonomyLevel, ImpactLevel};
use serde::{Deserialize, Serialize};

use crate::engine::GeometryEngine;
use crate::frame::Point3;
use crate::staircase::{CellTag, Panel, PanelShape};

/// Highlight wall color
pub const HIGHLIGHT_COLOR: u32 = 0x3b82f6;

/// Highlight wall opacity
pub const HIGHLIGHT_OPACITY: f64 = 0.15;

/// Vertical square facing the reliability axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightWall {
    /// Center of the square
    pub center: Point3,
    /// Side length
    pub size: f64,
    /// Rendering hint, `0xRRGGBB`
    pub color: u32,
    /// Rendering hint
    pub opacity: f64,
}

impl HighlightWall {
    /// Corners in winding order, in the plane `z = center.z`
    #[must_use]
    pub fn corners(&self) -> [Point3; 4] {
        let h = self.size / 2.0;
        let Point3 { x, y, z } = self.center;
        [
            Point3::new(x - h, y - h, z),
            Point3::new(x + h, y - h, z),
            Point3::new(x + h, y + h, z),
            Point3::new(x - h, y + h, z),
        ]
    }
}

/// What a picked cell encodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReadout {
    /// Cell
    pub tag: CellTag,
    /// Requirement, percent
    pub threshold_percent: f64,
    /// Depth of the threshold
    pub z: f64,
    /// Where to draw the highlight
    pub highlight: HighlightWall,
    /// `B3 Exposed · A2 Approve`
    pub title: String,
    /// `Threshold: 96.5%`
    pub detail: String,
}

/// Describe a cell
#[must_use]
pub fn readout(engine: &GeometryEngine, tag: CellTag) -> CellReadout {
    let CellTag { impact, level } = tag;
    let frame = engine.frame();
    let required = engine.thresholds().required_for_autonomy(impact, level);
    let threshold_percent = required * 100.0;
    let z = engine.scale().to_axis(threshold_percent);

    CellReadout {
        tag,
        threshold_percent,
        z,
        highlight: HighlightWall {
            center: Point3::new(frame.column_center(impact), frame.band_center(level), z),
            size: frame.cell(),
            color: HIGHLIGHT_COLOR,
            opacity: HIGHLIGHT_OPACITY,
        },
        title: title(impact, level),
        detail: format!("Threshold: {threshold_percent:.1}%"),
    }
}

/// Describe the cell a panel belongs to; floor panels are not pickable
#[must_use]
pub fn pick_panel(engine: &GeometryEngine, panel: &Panel) -> Option<CellReadout> {
    (panel.shape != PanelShape::Floor).then(|| readout(engine, panel.tag))
}

fn title(impact: ImpactLevel, level: AutonomyLevel) -> String {
    format!("{impact} {} · {level} {}", impact.name(), level.name())
}
