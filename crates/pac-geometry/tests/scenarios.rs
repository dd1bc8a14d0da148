use std::sync::Arc;

use pac_geometry::{
    assessment, layout, picking, staircase, CaseStatus, CellTag, GeometryCache, GovernanceSession,
    SceneChange, SceneFrame, SessionError, ViewMode,
};
use pac_model::{sample_cases, AutonomyLevel, CaseId, ImpactLevel, InfraLevel};
use pac_test_utils::{
    create_case, create_cluster, create_equipped_case, default_engine, engine_with_escalation,
    RecordingObserver,
};
use pretty_assertions::assert_eq;

#[test]
fn ceiling_values_under_default_policy() {
    let engine = default_engine();
    let t = engine.thresholds();
    assert_eq!(t.required_for_autonomy(ImpactLevel::B3, AutonomyLevel::A1), 0.95);
    let a2 = t.required_for_autonomy(ImpactLevel::B3, AutonomyLevel::A2);
    assert!(0.95 < a2 && a2 < 0.99);
    assert_eq!(t.threshold_at(3, 1), Ok(0.95));
}

#[test]
fn contained_case_at_88_percent() {
    // 88% clears B1's 80% bar; A2 at B1 needs about 88.75%
    let engine = default_engine();
    let case = create_equipped_case("c", ImpactLevel::B1, 88.0, InfraLevel::I2);

    let flat = layout::resolve(&engine, &[case.clone()], ViewMode::Flat);
    assert!(flat[0].ok);
    assert_eq!(flat[0].position.y, 0.0);

    let elevated = layout::resolve(&engine, &[case], ViewMode::Elevated);
    let r = elevated[0].resolved.unwrap();
    assert_eq!(r.potential, AutonomyLevel::A1);
    assert_eq!(r.actual, AutonomyLevel::A1);
    assert!(!r.infra_limited);
    assert!(elevated[0].ok);
}

#[test]
fn infra_ceiling_two_caps_reliable_case() {
    let engine = default_engine();
    let case = create_equipped_case("c", ImpactLevel::B1, 95.0, InfraLevel::I2);
    let r = engine.thresholds().resolve(&case);
    assert_eq!(r.actual, AutonomyLevel::A2);
    assert!(r.potential > AutonomyLevel::A2);
    assert!(r.infra_limited);

    let placed = layout::resolve(&engine, &[case], ViewMode::Elevated);
    let band = engine.frame().band_center(AutonomyLevel::A2);
    assert!((placed[0].position.y - band).abs() < 1e-12);
}

#[test]
fn cluster_fans_out_symmetrically() {
    let engine = default_engine();
    for n in 2..=6 {
        let cases = create_cluster(ImpactLevel::B3, 96.0, n);
        let placed = layout::resolve(&engine, &cases, ViewMode::Elevated);
        let center = engine.frame().column_center(ImpactLevel::B3);
        let offsets: Vec<f64> = placed.iter().map(|p| p.position.x - center).collect();
        let sum: f64 = offsets.iter().sum();
        assert!(sum.abs() < 1e-12, "n={n}");
        let mut sorted = offsets.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        assert_eq!(sorted.len(), n, "n={n}: every dot gets its own slot");
    }
}

#[test]
fn samples_lay_out_and_assess() {
    let engine = default_engine();
    let cases = sample_cases();
    let placed = layout::resolve(&engine, &cases, ViewMode::Elevated);
    let assessed = assessment::assess_all(&engine, &cases, ViewMode::Elevated);
    assert_eq!(placed.len(), cases.len());
    for (p, a) in placed.iter().zip(&assessed) {
        assert_eq!(p.id, a.id);
        assert_eq!(p.ok, a.status.is_ok());
        let CaseStatus::Autonomy { actual, .. } = a.status else {
            panic!("elevated assessment must carry autonomy");
        };
        assert_eq!(Some(actual), p.resolved.map(|r| r.actual));
    }
}

#[test]
fn flat_escalation_leaves_one_shelf_per_column() {
    let engine = engine_with_escalation(0.0);
    let geometry = staircase::synthesize(&engine);
    for &impact in ImpactLevel::ALL {
        let shelves: Vec<_> = geometry
            .of_shape(staircase::PanelShape::Shelf)
            .filter(|p| p.tag.impact == impact)
            .map(|p| p.tag.level)
            .collect();
        assert_eq!(shelves, vec![AutonomyLevel::A5], "{impact}");
    }
}

#[test]
fn picking_matches_threshold_table() {
    let engine = default_engine();
    let table = pac_geometry::ThresholdTable::new(engine.thresholds());
    for &impact in ImpactLevel::ALL {
        for &level in AutonomyLevel::ALL {
            let r = picking::readout(&engine, CellTag::new(impact, level));
            assert!((r.threshold_percent - table.percent(impact, level)).abs() < 1e-12);
        }
    }
}

#[test]
fn session_notifies_observers_in_order() {
    let observer = RecordingObserver::new();
    let mut session = GovernanceSession::new(default_engine());
    session.subscribe(observer.clone());

    session
        .add_case(create_case("a", ImpactLevel::B2, 92.0))
        .unwrap();
    session
        .add_case(create_case("b", ImpactLevel::B4, 99.0))
        .unwrap();
    session.set_threshold(ImpactLevel::B4, 0.98).unwrap();
    session.set_mode(ViewMode::Elevated);
    session.remove_case(&CaseId::from("a")).unwrap();
    session.reset_config();

    assert_eq!(
        observer.changes(),
        vec![
            SceneChange::Cases,
            SceneChange::Cases,
            SceneChange::Config,
            SceneChange::View,
            SceneChange::Cases,
            SceneChange::Config,
        ]
    );
    assert_eq!(observer.last_case_count(), Some(1));
}

#[test]
fn sessions_share_cached_geometry() {
    let cache = GeometryCache::default();
    let a = GovernanceSession::new(default_engine()).with_cache(cache.clone());
    let b = GovernanceSession::new(default_engine()).with_cache(cache.clone());
    assert!(Arc::ptr_eq(&a.scene().geometry, &b.scene().geometry));
    assert_eq!(cache.stats().entry_count, 1);
}

#[test]
fn config_change_rebuilds_geometry() {
    let mut session = GovernanceSession::new(default_engine());
    let before = session.scene().geometry;
    session.set_escalation(0.5).unwrap();
    let after = session.scene().geometry;
    assert!(!Arc::ptr_eq(&before, &after));
    assert_ne!(before.staircase, after.staircase);
}

fn ids(session: &GovernanceSession) -> Vec<String> {
    session.cases().iter().map(|c| c.id.to_string()).collect()
}

#[test]
fn replace_case_keeps_position() {
    let observer = RecordingObserver::new();
    let mut session = GovernanceSession::new(default_engine())
        .with_cases(vec![
            create_case("a", ImpactLevel::B1, 90.0),
            create_case("b", ImpactLevel::B2, 91.0),
            create_case("c", ImpactLevel::B3, 96.0),
        ])
        .unwrap();
    session.subscribe(observer.clone());

    session
        .replace_case(&CaseId::from("b"), create_case("b", ImpactLevel::B4, 99.0))
        .unwrap();
    assert_eq!(ids(&session), vec!["a", "b", "c"]);
    assert_eq!(session.cases()[1].impact, ImpactLevel::B4);

    session
        .replace_case(&CaseId::from("b"), create_case("d", ImpactLevel::B4, 99.0))
        .unwrap();
    assert_eq!(ids(&session), vec!["a", "d", "c"]);
    assert_eq!(observer.changes(), vec![SceneChange::Cases, SceneChange::Cases]);
    assert_eq!(observer.last_case_count(), Some(3));
}

#[test]
fn replace_case_rejects_taken_id() {
    let observer = RecordingObserver::new();
    let mut session = GovernanceSession::new(default_engine())
        .with_cases(vec![
            create_case("a", ImpactLevel::B1, 90.0),
            create_case("b", ImpactLevel::B2, 91.0),
        ])
        .unwrap();
    session.subscribe(observer.clone());

    let err = session
        .replace_case(&CaseId::from("a"), create_case("b", ImpactLevel::B5, 99.9))
        .unwrap_err();
    assert_eq!(err, SessionError::DuplicateCase(CaseId::from("b")));

    let err = session
        .replace_case(&CaseId::from("zz"), create_case("zz", ImpactLevel::B1, 80.0))
        .unwrap_err();
    assert_eq!(err, SessionError::UnknownCase(CaseId::from("zz")));

    assert_eq!(ids(&session), vec!["a", "b"]);
    assert_eq!(session.cases()[0].impact, ImpactLevel::B1);
    assert!(observer.changes().is_empty());
}

#[test]
fn set_cases_replaces_everything() {
    let observer = RecordingObserver::new();
    let mut session = GovernanceSession::new(default_engine());
    session.subscribe(observer.clone());
    session
        .add_case(create_case("old", ImpactLevel::B1, 85.0))
        .unwrap();
    observer.clear();

    session.set_cases(create_cluster(ImpactLevel::B2, 93.0, 4)).unwrap();
    assert_eq!(session.cases().len(), 4);
    assert!(session.case(&CaseId::from("old")).is_none());
    assert_eq!(observer.changes(), vec![SceneChange::Cases]);
    assert_eq!(observer.last_case_count(), Some(4));
    assert_eq!(session.scene().placed.len(), 4);
}

#[test]
fn set_frame_rescales_geometry() {
    let observer = RecordingObserver::new();
    let mut session = GovernanceSession::new(default_engine())
        .with_cases(vec![create_case("a", ImpactLevel::B3, 96.0)])
        .unwrap();
    session.subscribe(observer.clone());
    let before = session.scene();

    session.set_frame(SceneFrame::new(6.0).unwrap()).unwrap();
    let after = session.scene();

    assert_eq!(observer.changes(), vec![SceneChange::Config]);
    assert!((after.engine.frame().axis_length() - 6.0).abs() < 1e-12);
    assert!(!Arc::ptr_eq(&before.geometry, &after.geometry));

    let max_z = |scene: &pac_geometry::Scene| {
        scene
            .geometry
            .staircase
            .panels
            .iter()
            .flat_map(|p| p.corners)
            .map(|c| c.z)
            .fold(0.0f64, f64::max)
    };
    assert!((max_z(&before) - 3.0).abs() < 1e-9);
    assert!((max_z(&after) - 6.0).abs() < 1e-9);

    let (b, a) = (before.placed[0].position, after.placed[0].position);
    assert!((a.x - 2.0 * b.x).abs() < 1e-9);
    assert!((a.z - 2.0 * b.z).abs() < 1e-9);
    let ticks = &after.geometry.reference.reliability_ticks;
    assert!((ticks[ticks.len() - 1].z - 6.0).abs() < 1e-9);
}
