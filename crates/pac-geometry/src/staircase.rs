//! Governance staircase synthesis
//!
//! For every blast radius column the requirement rises with autonomy, which
//! draws a staircase along the reliability axis: the shelf of level `l` spans
//! the reliability band in which `l` is the best level reachable, the riser
//! at its front edge climbs from band `l - 1` to band `l`.
//!
//! Geometry is disposable and always rebuilt whole. Shelf spans depend on
//! the neighbouring cell, so there is no meaningful partial update.

use pac_model::{AutonomyLevel, ImpactLevel, EDGE_COLOR, FAIL_COLOR, PASS_COLOR};
use serde::{Deserialize, Serialize};

use crate::engine::GeometryEngine;
use crate::frame::Point3;

/// Requirements below this fraction are not drawn
pub const BAND_MIN: f64 = 0.65;

/// Requirements above this fraction are not drawn
pub const BAND_MAX: f64 = 0.999;

/// Shelves and floor zones float this far above their nominal height
const LIFT: f64 = 0.005;

/// Shorter shelf spans are dropped
const MIN_SPAN: f64 = 0.01;

/// Shorter riser steps get no side walls
const MIN_STEP: f64 = 0.005;

const SIDE_WALL_OPACITY: f64 = 0.03;
const BELOW_BAR_OPACITY: f64 = 0.08;
const CLEARS_BAR_OPACITY: f64 = 0.06;

/// Owning cell of a panel, used to map picks back to the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellTag {
    /// Blast radius column
    pub impact: ImpactLevel,
    /// Autonomy level
    pub level: AutonomyLevel,
}

impl CellTag {
    /// New tag
    #[inline]
    #[must_use]
    pub const fn new(impact: ImpactLevel, level: AutonomyLevel) -> Self {
        Self { impact, level }
    }
}

/// Kind of panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelShape {
    /// Horizontal, at the top of an autonomy band
    Shelf,
    /// Vertical, facing the reliability axis, at a threshold
    Riser,
    /// Vertical, on a column boundary
    SideWall,
    /// Horizontal, on the floor
    Floor,
}

/// Which side of the minimum bar a floor panel tints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FloorZone {
    /// From the axis origin to the A1 threshold
    BelowMinimumBar,
    /// From the A1 threshold to the axis end
    ClearsMinimumBar,
}

/// A flat quadrilateral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Kind of panel
    pub shape: PanelShape,
    /// Corners in winding order
    pub corners: [Point3; 4],
    /// Owning cell; floor panels carry level A1
    pub tag: CellTag,
    /// Floor side, for floor panels only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<FloorZone>,
    /// Rendering hint
    pub opacity: f64,
    /// Rendering hint, `0xRRGGBB`
    pub color: u32,
}

/// An outline segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    /// Start
    pub from: Point3,
    /// End
    pub to: Point3,
    /// Owning cell
    pub tag: CellTag,
}

/// The full staircase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaircaseGeometry {
    /// Shelves, risers, side walls, then floor zones
    pub panels: Vec<Panel>,
    /// Outline segments
    pub edges: Vec<EdgeSegment>,
    /// Outline color hint
    pub edge_color: u32,
}

impl StaircaseGeometry {
    /// Panels of one shape
    pub fn of_shape(&self, shape: PanelShape) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter().filter(move |p| p.shape == shape)
    }

    /// Panels a pointer can land on: everything except the floor
    pub fn pickable(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter().filter(|p| p.shape != PanelShape::Floor)
    }

    /// Panels owned by one cell
    pub fn for_cell(&self, tag: CellTag) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter().filter(move |p| p.tag == tag)
    }

    /// True when nothing was emitted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty() && self.edges.is_empty()
    }
}

/// Is a requirement inside the drawn band
#[inline]
#[must_use]
pub fn in_band(required: f64) -> bool {
    (BAND_MIN..=BAND_MAX).contains(&required)
}

/// Shelf opacity; grows with autonomy
#[inline]
#[must_use]
pub fn shelf_opacity(level: AutonomyLevel) -> f64 {
    0.06 + f64::from(level.as_u8()) * 0.03
}

/// Riser opacity; a step stronger than the shelf
#[inline]
#[must_use]
pub fn riser_opacity(level: AutonomyLevel) -> f64 {
    shelf_opacity(level) + 0.04
}

/// Build the staircase for every column
#[must_use]
pub fn synthesize(engine: &GeometryEngine) -> StaircaseGeometry {
    let mut geometry = StaircaseGeometry {
        edge_color: EDGE_COLOR,
        ..StaircaseGeometry::default()
    };

    for &impact in ImpactLevel::ALL {
        for &level in AutonomyLevel::ALL {
            emit_cell(engine, CellTag::new(impact, level), &mut geometry);
        }
    }
    for &impact in ImpactLevel::ALL {
        emit_floor(engine, impact, &mut geometry);
    }

    tracing::debug!(
        panels = geometry.panels.len(),
        edges = geometry.edges.len(),
        "synthesized governance staircase"
    );
    geometry
}

/// Threshold z of a cell, or `None` when the requirement is out of band
fn cell_z(engine: &GeometryEngine, impact: ImpactLevel, level: AutonomyLevel) -> Option<f64> {
    let required = engine.thresholds().required_for_autonomy(impact, level);
    in_band(required).then(|| engine.scale().to_axis(required * 100.0))
}

fn emit_cell(engine: &GeometryEngine, tag: CellTag, out: &mut StaircaseGeometry) {
    let CellTag { impact, level } = tag;
    let Some(z) = cell_z(engine, impact, level) else {
        tracing::trace!(%impact, %level, "cell requirement out of band");
        return;
    };

    let frame = engine.frame();
    let s = frame.axis_length();
    let (x_left, x_right) = frame.column_bounds(impact);
    let y = frame.shelf_height(level);
    let y_prev = frame.band_floor(level);
    let color = level.info().color;

    let z_end = match level.next() {
        Some(next) => {
            let required = engine.thresholds().required_for_autonomy(impact, next);
            if required <= BAND_MAX {
                engine.scale().to_axis(required * 100.0)
            } else {
                s
            }
        }
        None => s,
    };
    let span = z_end - z;

    let mut push = |shape, corners, opacity| {
        out.panels.push(Panel {
            shape,
            corners,
            tag,
            zone: None,
            opacity,
            color,
        });
    };

    if span > MIN_SPAN {
        let ys = y + LIFT;
        push(
            PanelShape::Shelf,
            [
                Point3::new(x_left, ys, z),
                Point3::new(x_right, ys, z),
                Point3::new(x_right, ys, z_end),
                Point3::new(x_left, ys, z_end),
            ],
            shelf_opacity(level),
        );
    }

    push(
        PanelShape::Riser,
        [
            Point3::new(x_left, y_prev, z),
            Point3::new(x_right, y_prev, z),
            Point3::new(x_right, y, z),
            Point3::new(x_left, y, z),
        ],
        riser_opacity(level),
    );

    if span > MIN_SPAN {
        for x in [x_left, x_right] {
            push(
                PanelShape::SideWall,
                [
                    Point3::new(x, y_prev, z),
                    Point3::new(x, y_prev, z_end),
                    Point3::new(x, y, z_end),
                    Point3::new(x, y, z),
                ],
                SIDE_WALL_OPACITY,
            );
        }
    }

    let z_prev = level
        .prev()
        .and_then(|prev| cell_z(engine, impact, prev))
        .unwrap_or(0.0);
    if z - z_prev > MIN_STEP {
        for x in [x_left, x_right] {
            push(
                PanelShape::SideWall,
                [
                    Point3::new(x, y_prev, z_prev),
                    Point3::new(x, y_prev, z),
                    Point3::new(x, y, z),
                    Point3::new(x, y, z_prev),
                ],
                SIDE_WALL_OPACITY,
            );
        }
    }

    let mut edge = |from, to| out.edges.push(EdgeSegment { from, to, tag });
    edge(Point3::new(x_left, y, z), Point3::new(x_left, y, z_end));
    edge(Point3::new(x_right, y, z), Point3::new(x_right, y, z_end));
    edge(Point3::new(x_left, y, z), Point3::new(x_right, y, z));
    edge(Point3::new(x_left, y_prev, z), Point3::new(x_left, y, z));
    edge(Point3::new(x_right, y_prev, z), Point3::new(x_right, y, z));
}

fn emit_floor(engine: &GeometryEngine, impact: ImpactLevel, out: &mut StaircaseGeometry) {
    let frame = engine.frame();
    let s = frame.axis_length();
    let (x_left, x_right) = frame.column_bounds(impact);
    let threshold_z = cell_z(engine, impact, AutonomyLevel::A1).unwrap_or(0.0);
    let tag = CellTag::new(impact, AutonomyLevel::A1);

    let mut zone = |zone, z0: f64, z1: f64, opacity, color| {
        out.panels.push(Panel {
            shape: PanelShape::Floor,
            corners: [
                Point3::new(x_left, LIFT, z0),
                Point3::new(x_right, LIFT, z0),
                Point3::new(x_right, LIFT, z1),
                Point3::new(x_left, LIFT, z1),
            ],
            tag,
            zone: Some(zone),
            opacity,
            color,
        });
    };

    if threshold_z > MIN_SPAN {
        zone(FloorZone::BelowMinimumBar, 0.0, threshold_z, BELOW_BAR_OPACITY, FAIL_COLOR);
    }
    if threshold_z < s - MIN_SPAN {
        zone(FloorZone::ClearsMinimumBar, threshold_z, s, CLEARS_BAR_OPACITY, PASS_COLOR);
    }
}
