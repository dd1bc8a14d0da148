//! JSON shapes exchanged with renderers and import/export collaborators

use pac_geometry::{assessment, layout, staircase, ViewMode};
use pac_model::{sample_cases, Case, ImpactLevel, InfraLevel};
use pac_test_utils::{create_equipped_case, default_engine};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn placed_case_uses_camel_case() {
    let engine = default_engine();
    let case = create_equipped_case("x", ImpactLevel::B1, 99.5, InfraLevel::I2);
    let placed = layout::resolve(&engine, &[case], ViewMode::Elevated);
    let value = serde_json::to_value(&placed[0]).unwrap();

    assert_eq!(value["id"], json!("x"));
    assert_eq!(value["index"], json!(0));
    assert_eq!(
        value["resolved"],
        json!({"actual": 2, "potential": 5, "infraLimited": true})
    );
    assert!(value["position"]["z"].is_f64());
}

#[test]
fn flat_layout_omits_resolution() {
    let engine = default_engine();
    let case = create_equipped_case("x", ImpactLevel::B1, 99.5, InfraLevel::I2);
    let placed = layout::resolve(&engine, &[case], ViewMode::Flat);
    let value = serde_json::to_value(&placed[0]).unwrap();
    assert!(value.get("resolved").is_none());
}

#[test]
fn case_round_trips_with_keyed_infra() {
    let case = Case::new(ImpactLevel::B4, 97.0)
        .with_id("r1")
        .with_infra(pac_model::InfraFlags::up_to(InfraLevel::I3));
    let value = serde_json::to_value(&case).unwrap();

    assert_eq!(value["bizValue"], json!(1));
    assert_eq!(value["deputyResistant"], json!(false));
    assert_eq!(
        value["infra"],
        json!({"1": true, "2": true, "3": true, "4": false, "5": false})
    );
    assert!(value.get("source").is_none());

    let back: Case = serde_json::from_value(value).unwrap();
    assert_eq!(back, case);
}

#[test]
fn snake_case_aliases_are_accepted() {
    let case: Case = serde_json::from_value(json!({
        "id": "s",
        "impact": 2,
        "reliability": 92.0,
        "biz_value": 3,
        "deputy_resistant": true
    }))
    .unwrap();
    assert_eq!(case.biz_value, pac_model::BizValue::V3);
    assert!(case.deputy_resistant);
}

#[test]
fn staircase_panels_are_tagged_by_shape() {
    let geometry = staircase::synthesize(&default_engine());
    let value = serde_json::to_value(&geometry).unwrap();
    let shapes: Vec<&str> = value["panels"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["shape"].as_str())
        .collect();

    for expected in ["shelf", "riser", "sideWall", "floor"] {
        assert!(shapes.contains(&expected), "missing {expected}");
    }
    assert!(value["edgeColor"].is_u64());

    let floor = value["panels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["shape"] == "floor")
        .unwrap();
    assert!(matches!(
        floor["zone"].as_str(),
        Some("belowMinimumBar" | "clearsMinimumBar")
    ));
    assert_eq!(floor["tag"]["level"], json!(1));
}

#[test]
fn assessment_status_is_internally_tagged() {
    let engine = default_engine();
    let cases = sample_cases();
    let flat = assessment::assess_all(&engine, &cases, ViewMode::Flat);
    let flat = serde_json::to_value(flat).unwrap();
    let statuses: Vec<&Value> = flat
        .as_array()
        .unwrap()
        .iter()
        .map(|a| &a["status"])
        .collect();
    assert!(statuses
        .iter()
        .all(|s| s["status"] == "pass" || s["gap"].is_f64()));

    let case = create_equipped_case("x", ImpactLevel::B1, 99.5, InfraLevel::I2);
    let elevated = assessment::assess(&engine, &case, ViewMode::Elevated);
    let elevated = serde_json::to_value(elevated).unwrap();
    assert_eq!(
        elevated["status"],
        json!({
            "status": "autonomy",
            "actual": 2,
            "potential": 5,
            "infraLimited": true,
            "ok": true
        })
    );
    assert!(elevated["requiredPercent"].is_f64());
}
