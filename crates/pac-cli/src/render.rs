//! Plain-text rendering of engine outputs

use std::fmt::{self, Write};

use pac_geometry::assessment::Assessment;
use pac_geometry::axes::ReferenceGeometry;
use pac_geometry::contours::{ContourKind, FlatContours, Stroke};
use pac_geometry::staircase::{PanelShape, StaircaseGeometry};
use pac_geometry::PlacedCase;
use pac_model::{AutonomyLevel, Case, ImpactLevel};

fn display_name(case: &Case) -> String {
    if case.name.is_empty() {
        case.id.to_string()
    } else {
        case.name.clone()
    }
}

pub(crate) fn layout(cases: &[Case], placed: &[PlacedCase]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for p in placed {
        let Some(case) = cases.get(p.index) else { continue };
        let mark = if p.ok { "ok" } else { "FAIL" };
        let mut autonomy = String::new();
        if let Some(r) = p.resolved {
            autonomy = format!("  {}", r.actual);
            if r.infra_limited {
                write!(autonomy, " (→{})", r.potential)?;
            }
        }
        writeln!(
            out,
            "{:<40} {}  x={:.3} y={:.3} z={:.3}  r={:.3}  {mark}{autonomy}",
            display_name(case),
            case.impact,
            p.position.x,
            p.position.y,
            p.position.z,
            p.radius,
        )?;
    }
    Ok(out)
}

pub(crate) fn staircase(geometry: &StaircaseGeometry) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for &impact in ImpactLevel::ALL {
        writeln!(out, "{impact} {}", impact.name())?;
        for &level in AutonomyLevel::ALL {
            let tag = pac_geometry::CellTag::new(impact, level);
            let panels: Vec<_> = geometry
                .for_cell(tag)
                .filter(|p| p.shape != PanelShape::Floor)
                .collect();
            let Some(riser) = panels.iter().find(|p| p.shape == PanelShape::Riser) else {
                writeln!(out, "  {level}  out of band")?;
                continue;
            };
            let shelf = panels.iter().find(|p| p.shape == PanelShape::Shelf);
            let walls = panels.iter().filter(|p| p.shape == PanelShape::SideWall).count();
            let span = shelf.map_or_else(
                || "no shelf".to_string(),
                |s| format!("shelf z {:.3}..{:.3}", s.corners[0].z, s.corners[2].z),
            );
            writeln!(
                out,
                "  {level}  riser z={:.3}  {span}  side walls {walls}",
                riser.corners[0].z
            )?;
        }
    }
    writeln!(
        out,
        "{} panels, {} edges",
        geometry.panels.len(),
        geometry.edges.len()
    )?;
    Ok(out)
}

pub(crate) fn contours(contours: &FlatContours) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for &level in AutonomyLevel::ALL {
        let style = match Stroke::for_level(level) {
            Stroke::Solid => "solid",
            Stroke::Dashed { .. } => "dashed",
        };
        writeln!(out, "{level} {} ({style})", level.name())?;
        for l in contours.level(level) {
            match l.kind {
                ContourKind::Lane(impact) => {
                    writeln!(out, "  lane {impact}  z={:.3}", l.from.z)?;
                }
                ContourKind::Step(impact) => {
                    writeln!(
                        out,
                        "  step {impact}|{}  x={:.3}  z {:.3}..{:.3}",
                        impact.next().map_or_else(String::new, |n| n.to_string()),
                        l.from.x,
                        l.from.z,
                        l.to.z
                    )?;
                }
            }
        }
    }
    writeln!(out, "floor")?;
    for strip in &contours.floor {
        writeln!(
            out,
            "  {} {:?}  z {:.3}..{:.3}",
            strip.impact,
            strip.zone,
            strip.corners[0].z,
            strip.corners[2].z
        )?;
    }
    Ok(out)
}

pub(crate) fn reference(reference: &ReferenceGeometry) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "reliability")?;
    for t in &reference.reliability_ticks {
        writeln!(out, "  {:>6}  z={:.3}", t.label, t.z)?;
    }
    writeln!(out, "blast radius")?;
    for t in &reference.impact_ticks {
        writeln!(out, "  {:<16}  x={:.3}", t.label, t.x)?;
    }
    let dividers: Vec<String> = reference
        .lane_dividers
        .iter()
        .map(|x| format!("{x:.3}"))
        .collect();
    writeln!(out, "lane dividers  {}", dividers.join(" "))?;
    writeln!(out, "autonomy")?;
    for b in &reference.autonomy_bands {
        writeln!(
            out,
            "  {:<16}  y {:.3}..{:.3}  label y={:.3}",
            b.label,
            b.y_floor,
            b.y_top,
            b.y_center
        )?;
    }
    writeln!(out, "infra gates")?;
    for g in &reference.infra_gates {
        writeln!(out, "  {:<16}  y={:.3}", g.label, g.y)?;
    }
    Ok(out)
}

pub(crate) fn assessments(assessments: &[Assessment]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for a in assessments {
        let name = if a.name.is_empty() {
            a.id.to_string()
        } else {
            a.name.clone()
        };
        writeln!(out, "{name}")?;
        writeln!(out, "  {}  req {:.0}%", a.detail, a.required_percent)?;
        writeln!(out, "  {}", a.status.message())?;
    }
    Ok(out)
}

pub(crate) fn samples(cases: &[Case]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for c in cases {
        let infra = c
            .infra
            .highest_present()
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        writeln!(
            out,
            "{:<6} {:<40} {} {} {:>5}% infra {infra}",
            c.id.to_string(),
            display_name(c),
            c.impact,
            c.biz_value,
            c.reliability
        )?;
    }
    Ok(out)
}
