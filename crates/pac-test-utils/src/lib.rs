//! Testing utilities for PAC workspace
//!
//! Shared test helpers, fixtures, and strategies.

#![allow(missing_docs)]

use std::sync::Arc;

use pac_geometry::{GeometryEngine, Scene, SceneChange, SceneFrame, SceneObserver};
use pac_model::{
    BizValue, Case, GovernanceConfig, ImpactLevel, InfraFlags, InfraLevel, MAX_RELIABILITY,
};
use parking_lot::Mutex;
use proptest::prelude::*;

pub fn default_engine() -> GeometryEngine {
    GeometryEngine::default()
}

pub fn engine_with_escalation(escalation: f64) -> GeometryEngine {
    GeometryEngine::new(
        GovernanceConfig::new().with_escalation(escalation),
        SceneFrame::default(),
    )
    .unwrap()
}

pub fn create_case(id: &str, impact: ImpactLevel, reliability: f64) -> Case {
    Case::new(impact, reliability).with_id(id).with_name(id)
}

pub fn create_equipped_case(
    id: &str,
    impact: ImpactLevel,
    reliability: f64,
    infra: InfraLevel,
) -> Case {
    create_case(id, impact, reliability).with_infra(InfraFlags::up_to(infra))
}

/// `n` cases sharing one column and one reliability, so they all cluster
pub fn create_cluster(impact: ImpactLevel, reliability: f64, n: usize) -> Vec<Case> {
    (0..n)
        .map(|i| {
            let biz = BizValue::ALL[i % BizValue::ALL.len()];
            create_case(&format!("cluster-{i}"), impact, reliability).with_biz_value(biz)
        })
        .collect()
}

/// Records every notification it receives
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(SceneChange, usize)>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Changes seen, in order
    pub fn changes(&self) -> Vec<SceneChange> {
        self.events.lock().iter().map(|(c, _)| *c).collect()
    }

    /// Case count of the last scene seen
    pub fn last_case_count(&self) -> Option<usize> {
        self.events.lock().last().map(|(_, n)| *n)
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl SceneObserver for RecordingObserver {
    fn scene_changed(&self, change: SceneChange, scene: &Scene) {
        self.events.lock().push((change, scene.cases.len()));
    }
}

pub fn arb_impact() -> impl Strategy<Value = ImpactLevel> {
    prop::sample::select(ImpactLevel::ALL)
}

pub fn arb_biz_value() -> impl Strategy<Value = BizValue> {
    prop::sample::select(BizValue::ALL)
}

pub fn arb_infra() -> impl Strategy<Value = InfraFlags> {
    prop::array::uniform5(any::<bool>()).prop_map(InfraFlags::from_array)
}

pub fn arb_case() -> impl Strategy<Value = Case> {
    (arb_impact(), 0.0..=100.0f64, arb_biz_value(), arb_infra()).prop_map(
        |(impact, reliability, biz, infra)| {
            Case::new(impact, reliability)
                .with_biz_value(biz)
                .with_infra(infra)
        },
    )
}

pub fn arb_config() -> impl Strategy<Value = GovernanceConfig> {
    (
        prop::array::uniform5(0.0..0.999f64),
        0.0..1.0f64,
        0.0..(MAX_RELIABILITY - 0.5),
    )
        .prop_map(|(base, escalation, min_reliability)| {
            let mut table = [0.0; 6];
            table[1..].copy_from_slice(&base);
            GovernanceConfig::new()
                .with_thresholds(pac_model::Thresholds::new(table).unwrap())
                .with_escalation(escalation)
                .with_min_reliability(min_reliability)
        })
}
