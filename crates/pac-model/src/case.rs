//! Agent use cases
//!
//! A [`Case`] is an immutable snapshot as far as the geometry engine is
//! concerned. Editing happens in the caller, which hands a fresh slice of
//! cases to the engine on every change.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GovernanceError;
use crate::level::{BizValue, ImpactLevel, InfraLevel};

/// Opaque identity of a case, unique within a session
///
/// Curated samples use short text keys (`ex-3`); imported data may carry
/// numeric timestamps. Both round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseId {
    /// Numeric key
    Number(u64),
    /// Text key
    Text(String),
}

impl CaseId {
    /// Fresh random identity
    #[must_use]
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CaseId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for CaseId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// Which infrastructure controls are in place
///
/// Serialized as an object keyed `"1"`..`"5"`. Well-formed sets are prefixes
/// (`{1..k}`), but nothing here rejects a gap: the threshold engine reads the
/// highest present level as the ceiling either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<LevelKey, bool>", into = "BTreeMap<u8, bool>")]
pub struct InfraFlags([bool; 5]);

/// Map key for infra flags: JSON object keys arrive as text, YAML keys as integers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
pub enum LevelKey {
    /// Integer key
    Int(u8),
    /// Text key holding an integer
    Text(String),
}

impl TryFrom<LevelKey> for InfraLevel {
    type Error = GovernanceError;

    fn try_from(key: LevelKey) -> Result<Self, Self::Error> {
        match key {
            LevelKey::Int(n) => InfraLevel::new(n),
            LevelKey::Text(s) => s
                .trim()
                .parse::<u8>()
                .map_err(|_| GovernanceError::InvalidLevelKey(s))
                .and_then(InfraLevel::new),
        }
    }
}

impl InfraFlags {
    /// No controls
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self([false; 5])
    }

    /// Controls `1..=level` present
    #[must_use]
    pub fn up_to(level: InfraLevel) -> Self {
        let mut flags = [false; 5];
        for slot in flags.iter_mut().take(level.index() + 1) {
            *slot = true;
        }
        Self(flags)
    }

    /// Build from raw flags, index 0 = level 1
    #[inline]
    #[must_use]
    pub const fn from_array(flags: [bool; 5]) -> Self {
        Self(flags)
    }

    /// Is the control at `level` present
    #[inline]
    #[must_use]
    pub fn is_present(&self, level: InfraLevel) -> bool {
        self.0[level.index()]
    }

    /// Set one control without touching the others
    #[inline]
    pub fn set(&mut self, level: InfraLevel, present: bool) {
        self.0[level.index()] = present;
    }

    /// Highest present control, ignoring gaps below it
    #[must_use]
    pub fn highest_present(&self) -> Option<InfraLevel> {
        InfraLevel::ALL
            .iter()
            .rev()
            .copied()
            .find(|level| self.is_present(*level))
    }

    /// Present levels, ascending
    pub fn present(&self) -> impl Iterator<Item = InfraLevel> + '_ {
        InfraLevel::ALL.iter().copied().filter(|l| self.is_present(*l))
    }

    /// True when the present set is `{1..k}` for some k (including empty)
    #[must_use]
    pub fn is_prefix(&self) -> bool {
        let mut seen_absent = false;
        for &present in &self.0 {
            if present && seen_absent {
                return false;
            }
            seen_absent |= !present;
        }
        true
    }

    /// Toggle with cascade: enabling a level enables everything below it,
    /// disabling a level disables everything above it.
    pub fn toggle_cascade(&mut self, level: InfraLevel) {
        let i = level.index();
        if self.0[i] {
            for slot in &mut self.0[i..] {
                *slot = false;
            }
        } else {
            for slot in &mut self.0[..=i] {
                *slot = true;
            }
        }
    }
}

impl TryFrom<BTreeMap<LevelKey, bool>> for InfraFlags {
    type Error = GovernanceError;

    fn try_from(map: BTreeMap<LevelKey, bool>) -> Result<Self, Self::Error> {
        let mut flags = Self::none();
        for (key, present) in map {
            flags.set(InfraLevel::try_from(key)?, present);
        }
        Ok(flags)
    }
}

impl From<InfraFlags> for BTreeMap<u8, bool> {
    fn from(flags: InfraFlags) -> Self {
        InfraLevel::ALL
            .iter()
            .map(|l| (l.as_u8(), flags.is_present(*l)))
            .collect()
    }
}

/// A single agent use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Identity key
    #[serde(default = "CaseId::generate")]
    pub id: CaseId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Blast radius
    pub impact: ImpactLevel,
    /// Percent of correct/safe behavior; out-of-range values saturate on the axis
    pub reliability: f64,
    /// Business value
    #[serde(default, alias = "biz_value")]
    pub biz_value: BizValue,
    /// Infrastructure controls present
    #[serde(default)]
    pub infra: InfraFlags,
    /// Spawns sub-agents (cosmetic)
    #[serde(default)]
    pub spawns: bool,
    /// Resists confused-deputy attacks (cosmetic)
    #[serde(default, alias = "deputy_resistant")]
    pub deputy_resistant: bool,
    /// Where the reliability figure comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Case {
    /// New case with generated id, value V1 and no infrastructure
    #[must_use]
    pub fn new(impact: ImpactLevel, reliability: f64) -> Self {
        Self {
            id: CaseId::generate(),
            name: String::new(),
            impact,
            reliability,
            biz_value: BizValue::default(),
            infra: InfraFlags::none(),
            spawns: false,
            deputy_resistant: false,
            source: None,
        }
    }

    /// With identity
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<CaseId>) -> Self {
        self.id = id.into();
        self
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// With business value
    #[inline]
    #[must_use]
    pub fn with_biz_value(mut self, biz_value: BizValue) -> Self {
        self.biz_value = biz_value;
        self
    }

    /// With infrastructure controls
    #[inline]
    #[must_use]
    pub fn with_infra(mut self, infra: InfraFlags) -> Self {
        self.infra = infra;
        self
    }

    /// With spawn flag
    #[inline]
    #[must_use]
    pub fn with_spawns(mut self, spawns: bool) -> Self {
        self.spawns = spawns;
        self
    }

    /// With provenance note
    #[inline]
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Reliability as a fraction, unclamped
    #[inline]
    #[must_use]
    pub fn reliability_fraction(&self) -> f64 {
        self.reliability / 100.0
    }
}

/// A list of cases as exchanged with import/export collaborators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseSet {
    /// The cases
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl CaseSet {
    /// Parse `{"cases": [...]}` or a bare array
    ///
    /// The shape is chosen from the first token, so a bad case reports its
    /// own error (an out-of-range level, a missing field) with its position.
    ///
    /// # Errors
    /// Returns the JSON error for the chosen shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim_start().starts_with('[') {
            let cases = serde_json::from_str::<Vec<Case>>(json)?;
            Ok(Self { cases })
        } else {
            serde_json::from_str(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_toggle_keeps_prefix() {
        let mut flags = InfraFlags::none();
        flags.toggle_cascade(InfraLevel::I3);
        assert_eq!(flags, InfraFlags::up_to(InfraLevel::I3));

        flags.toggle_cascade(InfraLevel::I2);
        assert_eq!(flags, InfraFlags::up_to(InfraLevel::I1));
        assert!(flags.is_prefix());
    }

    #[test]
    fn gap_is_detected_but_tolerated() {
        let flags = InfraFlags::from_array([true, false, true, false, false]);
        assert!(!flags.is_prefix());
        assert_eq!(flags.highest_present(), Some(InfraLevel::I3));
    }

    #[test]
    fn infra_serializes_as_keyed_object() {
        let flags = InfraFlags::up_to(InfraLevel::I2);
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(
            json,
            r#"{"1":true,"2":true,"3":false,"4":false,"5":false}"#
        );
        let back: InfraFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }

    #[test]
    fn infra_rejects_unknown_level() {
        let err = serde_json::from_str::<InfraFlags>(r#"{"6":true}"#).unwrap_err();
        assert!(err.to_string().contains("infrastructure level 6"), "{err}");
    }

    #[test]
    fn infra_rejects_non_numeric_key() {
        let err = serde_json::from_str::<InfraFlags>(r#"{"x":true}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(r#""x""#), "{msg}");
        assert!(!msg.contains("level 0"), "{msg}");
    }

    #[test]
    fn yaml_integer_keys_parse() {
        let flags: InfraFlags = serde_yaml::from_str("1: true\n2: true\n").unwrap();
        assert_eq!(flags, InfraFlags::up_to(InfraLevel::I2));
    }

    #[test]
    fn case_defaults_fill_missing_fields() {
        let case: Case =
            serde_json::from_str(r#"{"id":"c1","impact":2,"reliability":91.5}"#).unwrap();
        assert_eq!(case.id, CaseId::from("c1"));
        assert_eq!(case.biz_value, BizValue::V1);
        assert_eq!(case.infra, InfraFlags::none());
        assert!(!case.spawns);
    }

    #[test]
    fn case_rejects_bad_impact() {
        let err = serde_json::from_str::<Case>(r#"{"impact":0,"reliability":90}"#);
        assert!(err.is_err());
    }

    #[test]
    fn numeric_ids_round_trip() {
        let case: Case =
            serde_json::from_str(r#"{"id":1717000000000,"impact":1,"reliability":80}"#).unwrap();
        assert_eq!(case.id, CaseId::Number(1_717_000_000_000));
    }

    #[test]
    fn case_set_accepts_both_shapes() {
        let wrapped = CaseSet::from_json(r#"{"cases":[{"impact":1,"reliability":90}]}"#).unwrap();
        let bare = CaseSet::from_json(r#"[{"impact":1,"reliability":90}]"#).unwrap();
        assert_eq!(wrapped.cases.len(), 1);
        assert_eq!(bare.cases.len(), 1);
    }

    #[test]
    fn case_set_reports_the_bad_case() {
        let bare = CaseSet::from_json(r#"[{"impact":0,"reliability":90}]"#).unwrap_err();
        assert!(bare.to_string().contains("blast radius level 0"), "{bare}");

        let wrapped =
            CaseSet::from_json(r#"{"cases":[{"impact":1,"reliability":90,"bizValue":7}]}"#)
                .unwrap_err();
        assert!(wrapped.to_string().contains("business value 7"), "{wrapped}");
    }

    #[test]
    fn case_set_reports_missing_field() {
        let err = CaseSet::from_json(r#"[{"impact":2}]"#).unwrap_err();
        assert!(err.to_string().contains("reliability"), "{err}");
    }
}
