//! Governance session
//!
//! Holds the current cases, policy and view mode, and tells subscribed
//! observers what changed. Every mutation produces a fresh [`Scene`]
//! snapshot; observers never see partially updated state.

use std::sync::Arc;

use pac_model::{
    Case, CaseId, GovernanceConfig, GovernanceError, ImpactLevel, InfraLevel, Thresholds,
};
use thiserror::Error;

use crate::cache::{GeometryCache, SceneGeometry};
use crate::engine::GeometryEngine;
use crate::frame::SceneFrame;
use crate::layout::{self, PlacedCase, ViewMode};

/// Session errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// No case with this id
    #[error("unknown case: {0}")]
    UnknownCase(CaseId),

    /// A case with this id already exists
    #[error("duplicate case id: {0}")]
    DuplicateCase(CaseId),

    /// Policy rejected
    #[error(transparent)]
    Governance(#[from] GovernanceError),
}

/// What a mutation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneChange {
    /// Case list or a case's fields
    Cases,
    /// Thresholds, escalation or reliability floor
    Config,
    /// Flat or elevated
    View,
}

/// Snapshot handed to observers
#[derive(Debug, Clone)]
pub struct Scene {
    /// Policy and frame in effect
    pub engine: GeometryEngine,
    /// View mode in effect
    pub mode: ViewMode,
    /// Cases, in session order
    pub cases: Arc<[Case]>,
    /// Dot layout for `cases`
    pub placed: Arc<[PlacedCase]>,
    /// Case-independent geometry
    pub geometry: Arc<SceneGeometry>,
}

/// Receives scene updates
pub trait SceneObserver: Send + Sync {
    /// Called after every mutation with the new scene
    fn scene_changed(&self, change: SceneChange, scene: &Scene);
}

/// Handle returned by [`GovernanceSession::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Cases, policy and view mode with change notification
pub struct GovernanceSession {
    engine: GeometryEngine,
    mode: ViewMode,
    cases: Vec<Case>,
    cache: GeometryCache,
    observers: Vec<(SubscriptionId, Arc<dyn SceneObserver>)>,
    next_subscription: u64,
}

impl std::fmt::Debug for GovernanceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceSession")
            .field("engine", &self.engine)
            .field("mode", &self.mode)
            .field("cases", &self.cases.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl GovernanceSession {
    /// Session over an engine, flat view, no cases
    #[must_use]
    pub fn new(engine: GeometryEngine) -> Self {
        tracing::info!(axis_length = engine.frame().axis_length(), "governance session started");
        Self {
            engine,
            mode: ViewMode::Flat,
            cases: Vec::new(),
            cache: GeometryCache::default(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Share a geometry cache with other sessions
    #[must_use]
    pub fn with_cache(mut self, cache: GeometryCache) -> Self {
        self.cache = cache;
        self
    }

    /// Start with cases, rejecting duplicate ids
    ///
    /// # Errors
    /// `DuplicateCase` on the first repeated id.
    pub fn with_cases(mut self, cases: Vec<Case>) -> Result<Self, SessionError> {
        for case in cases {
            self.ensure_unique(&case.id)?;
            self.cases.push(case);
        }
        Ok(self)
    }

    /// Policy and frame in effect
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &GeometryEngine {
        &self.engine
    }

    /// View mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Cases in session order
    #[inline]
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Look up a case
    #[must_use]
    pub fn case(&self, id: &CaseId) -> Option<&Case> {
        self.cases.iter().find(|c| &c.id == id)
    }

    /// Register an observer
    pub fn subscribe(&mut self, observer: Arc<dyn SceneObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        tracing::debug!(subscription = id.0, "observer subscribed");
        id
    }

    /// Remove an observer; `false` when it was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        before != self.observers.len()
    }

    /// Current snapshot
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene {
            engine: self.engine,
            mode: self.mode,
            cases: self.cases.clone().into(),
            placed: layout::resolve(&self.engine, &self.cases, self.mode).into(),
            geometry: self.cache.get_or_build(&self.engine),
        }
    }

    /// Append a case
    ///
    /// # Errors
    /// `DuplicateCase` when the id is taken.
    pub fn add_case(&mut self, case: Case) -> Result<(), SessionError> {
        self.ensure_unique(&case.id)?;
        self.cases.push(case);
        self.notify(SceneChange::Cases);
        Ok(())
    }

    /// Remove a case and return it
    ///
    /// # Errors
    /// `UnknownCase` when no case has the id.
    pub fn remove_case(&mut self, id: &CaseId) -> Result<Case, SessionError> {
        let pos = self.position(id)?;
        let removed = self.cases.remove(pos);
        self.notify(SceneChange::Cases);
        Ok(removed)
    }

    /// Replace a case in place, keeping its position
    ///
    /// # Errors
    /// `UnknownCase` when no case has the id; `DuplicateCase` when the new
    /// case carries a different id that is already taken.
    pub fn replace_case(&mut self, id: &CaseId, case: Case) -> Result<(), SessionError> {
        let pos = self.position(id)?;
        if &case.id != id {
            self.ensure_unique(&case.id)?;
        }
        self.cases[pos] = case;
        self.notify(SceneChange::Cases);
        Ok(())
    }

    /// Replace every case
    ///
    /// # Errors
    /// `DuplicateCase` on the first repeated id; the session is unchanged.
    pub fn set_cases(&mut self, cases: Vec<Case>) -> Result<(), SessionError> {
        let mut seen = std::collections::HashSet::with_capacity(cases.len());
        if let Some(dup) = cases.iter().find(|c| !seen.insert(&c.id)) {
            return Err(SessionError::DuplicateCase(dup.id.clone()));
        }
        self.cases = cases;
        self.notify(SceneChange::Cases);
        Ok(())
    }

    /// Toggle an infra control on a case with the cascade rule: turning a
    /// level on turns on everything below, turning it off turns off
    /// everything above
    ///
    /// # Errors
    /// `UnknownCase` when no case has the id.
    pub fn toggle_case_infra(
        &mut self,
        id: &CaseId,
        level: InfraLevel,
    ) -> Result<(), SessionError> {
        let pos = self.position(id)?;
        self.cases[pos].infra.toggle_cascade(level);
        self.notify(SceneChange::Cases);
        Ok(())
    }

    /// Set the A1 requirement of one blast radius
    ///
    /// # Errors
    /// `ThresholdOutOfRange` outside `[0, 1]`; the policy is unchanged.
    pub fn set_threshold(&mut self, impact: ImpactLevel, value: f64) -> Result<(), SessionError> {
        let mut config = *self.engine.config();
        config.thresholds.set(impact, value)?;
        self.apply_config(config)
    }

    /// Replace the whole threshold table
    ///
    /// # Errors
    /// Invalid policy.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) -> Result<(), SessionError> {
        self.apply_config(self.engine.config().with_thresholds(thresholds))
    }

    /// Set the extra nines per autonomy level
    ///
    /// # Errors
    /// `InvalidEscalation` when negative or not finite.
    pub fn set_escalation(&mut self, escalation: f64) -> Result<(), SessionError> {
        self.apply_config(self.engine.config().with_escalation(escalation))
    }

    /// Set the reliability axis floor
    ///
    /// # Errors
    /// `InvalidMinReliability` outside `[0, 99.9)`.
    pub fn set_min_reliability(&mut self, min_reliability: f64) -> Result<(), SessionError> {
        self.apply_config(self.engine.config().with_min_reliability(min_reliability))
    }

    /// Replace the policy
    ///
    /// # Errors
    /// Invalid policy; the session is unchanged.
    pub fn set_config(&mut self, config: GovernanceConfig) -> Result<(), SessionError> {
        self.apply_config(config)
    }

    /// Back to the default policy
    pub fn reset_config(&mut self) {
        // The default policy always validates
        if self.apply_config(GovernanceConfig::default()).is_err() {
            tracing::error!("default governance config rejected");
        }
    }

    /// Switch view mode; no notification when unchanged
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.mode = mode;
            self.notify(SceneChange::View);
        }
    }

    /// Replace the frame
    ///
    /// # Errors
    /// Invalid policy; cannot happen for a session built from a valid engine.
    pub fn set_frame(&mut self, frame: SceneFrame) -> Result<(), SessionError> {
        self.engine = GeometryEngine::new(*self.engine.config(), frame)?;
        self.notify(SceneChange::Config);
        Ok(())
    }

    fn apply_config(&mut self, config: GovernanceConfig) -> Result<(), SessionError> {
        self.engine = self.engine.with_config(config)?;
        tracing::info!(
            escalation = config.autonomy_escalation,
            min_reliability = config.min_reliability,
            "governance config updated"
        );
        self.notify(SceneChange::Config);
        Ok(())
    }

    fn position(&self, id: &CaseId) -> Result<usize, SessionError> {
        self.cases
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| SessionError::UnknownCase(id.clone()))
    }

    fn ensure_unique(&self, id: &CaseId) -> Result<(), SessionError> {
        if self.case(id).is_some() {
            return Err(SessionError::DuplicateCase(id.clone()));
        }
        Ok(())
    }

    fn notify(&self, change: SceneChange) {
        if self.observers.is_empty() {
            return;
        }
        let scene = self.scene();
        for (_, observer) in &self.observers {
            observer.scene_changed(change, &scene);
        }
    }
}

impl Default for GovernanceSession {
    fn default() -> Self {
        Self::new(GeometryEngine::default())
    }
}
