use pac_geometry::{layout, staircase, GeometryEngine, ReliabilityScale, SceneFrame, ViewMode};
use pac_model::{AutonomyLevel, ImpactLevel, MAX_RELIABILITY};
use pac_test_utils::{arb_case, arb_config, arb_impact, arb_infra};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scale_round_trips_inside_range(min in 0.0..95.0f64, t in 0.0..=1.0f64, s in 0.5..10.0f64) {
        let scale = ReliabilityScale::new(min, s);
        let p = min + t * (MAX_RELIABILITY - min);
        let back = scale.from_axis(scale.to_axis(p));
        prop_assert!((back - p).abs() <= 1e-6 * p.max(1.0), "{} -> {}", p, back);
    }

    #[test]
    fn scale_is_monotone_and_bounded(a in -50.0..150.0f64, b in -50.0..150.0f64) {
        let scale = ReliabilityScale::new(70.0, 3.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (zl, zh) = (scale.to_axis(lo), scale.to_axis(hi));
        prop_assert!(zl <= zh + 1e-12);
        prop_assert!((-1e-12..=3.0 + 1e-12).contains(&zl));
        prop_assert!((-1e-12..=3.0 + 1e-12).contains(&zh));
    }

    #[test]
    fn requirement_never_falls_with_autonomy(config in arb_config(), impact in arb_impact()) {
        let engine = GeometryEngine::new(config, SceneFrame::default()).unwrap();
        let reqs: Vec<f64> = AutonomyLevel::ALL
            .iter()
            .map(|&l| engine.thresholds().required_for_autonomy(impact, l))
            .collect();
        prop_assert_eq!(reqs[0], config.thresholds.at(impact));
        prop_assert!(reqs.windows(2).all(|w| w[0] <= w[1] + 1e-15));
    }

    #[test]
    fn resolution_respects_both_ceilings(case in arb_case(), infra in arb_infra()) {
        let engine = GeometryEngine::default();
        let thresholds = engine.thresholds();
        let r = thresholds.resolve_with(&case, &infra);
        let ceiling = pac_geometry::ThresholdEngine::infra_ceiling(&infra);

        prop_assert!(r.actual <= r.potential);
        prop_assert!(r.actual <= ceiling);
        prop_assert_eq!(r.actual, r.potential.min(ceiling));
        prop_assert_eq!(r.infra_limited, ceiling < r.potential);
        if r.potential > AutonomyLevel::A1 {
            prop_assert!(thresholds.clears(case.reliability, case.impact, r.potential));
        }
        if let Some(above) = r.potential.next() {
            prop_assert!(!thresholds.clears(case.reliability, case.impact, above));
        }
    }

    #[test]
    fn layout_is_idempotent(
        cases in prop::collection::vec(arb_case(), 0..24),
        elevated in any::<bool>(),
    ) {
        let engine = GeometryEngine::default();
        let mode = if elevated { ViewMode::Elevated } else { ViewMode::Flat };
        let first = layout::resolve(&engine, &cases, mode);
        let second = layout::resolve(&engine, &cases, mode);
        prop_assert_eq!(first.len(), cases.len());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn dots_stay_near_their_column(cases in prop::collection::vec(arb_case(), 1..24)) {
        let engine = GeometryEngine::default();
        let placed = layout::resolve(&engine, &cases, ViewMode::Elevated);
        for (p, c) in placed.iter().zip(&cases) {
            let center = engine.frame().column_center(c.impact);
            // Offsets never exceed 0.9 of the largest radius, 0.108
            prop_assert!((p.position.x - center).abs() <= 0.108 + 1e-12);
            prop_assert!(p.position.z >= 0.0 && p.position.z <= 3.0 + 1e-12);
        }
    }

    #[test]
    fn staircase_is_well_formed_for_any_policy(config in arb_config()) {
        let engine = GeometryEngine::new(config, SceneFrame::default()).unwrap();
        let geometry = staircase::synthesize(&engine);
        for panel in &geometry.panels {
            for c in &panel.corners {
                prop_assert!(c.x.is_finite() && c.y.is_finite() && c.z.is_finite());
                prop_assert!(c.z >= -1e-12 && c.z <= 3.0 + 1e-12);
            }
            prop_assert!(panel.opacity > 0.0 && panel.opacity < 1.0);
        }
        let risers = geometry
            .of_shape(staircase::PanelShape::Riser)
            .count();
        prop_assert_eq!(geometry.edges.len(), risers * 5);
    }
}

#[test]
fn impact_ordering_holds_for_default_policy() {
    let engine = GeometryEngine::default();
    for &level in AutonomyLevel::ALL {
        let reqs: Vec<f64> = ImpactLevel::ALL
            .iter()
            .map(|&i| engine.thresholds().required_for_autonomy(i, level))
            .collect();
        assert!(reqs.windows(2).all(|w| w[0] < w[1]), "{level}");
    }
}
