//! Content-addressed geometry cache using moka
//!
//! Staircase, contours and reference geometry depend only on the policy and
//! the axis length, never on the cases. They are built once per distinct
//! `(config, S)` and shared behind an [`Arc`].

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use moka::sync::Cache;
use serde::Serialize;

use crate::axes::{self, ReferenceGeometry};
use crate::contours::{self, FlatContours};
use crate::engine::GeometryEngine;
use crate::staircase::{self, StaircaseGeometry};

/// Blake3 digest of everything the static geometry depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryKey([u8; 32]);

impl GeometryKey {
    /// Key for an engine's policy and frame
    #[must_use]
    pub fn for_engine(engine: &GeometryEngine) -> Self {
        let config = engine.config();
        let mut hasher = blake3::Hasher::new();
        for t in config.thresholds.as_array() {
            hasher.update(&t.to_le_bytes());
        }
        hasher.update(&config.autonomy_escalation.to_le_bytes());
        hasher.update(&config.min_reliability.to_le_bytes());
        hasher.update(&engine.frame().axis_length().to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Raw digest
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for GeometryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Case-independent geometry for one policy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGeometry {
    /// Elevated-mode staircase
    pub staircase: StaircaseGeometry,
    /// Flat-mode contours
    pub contours: FlatContours,
    /// Ticks, dividers, bands and gate planes
    pub reference: ReferenceGeometry,
}

impl SceneGeometry {
    /// Build everything for an engine
    #[must_use]
    pub fn build(engine: &GeometryEngine) -> Self {
        Self {
            staircase: staircase::synthesize(engine),
            contours: contours::synthesize(engine),
            reference: axes::build(engine),
        }
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Geometry cache keyed by [`GeometryKey`]
#[derive(Debug, Clone)]
pub struct GeometryCache {
    inner: Cache<GeometryKey, Arc<SceneGeometry>>,
}

impl GeometryCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Cached geometry for an engine, building it on a miss
    ///
    /// Concurrent callers with the same key share one build.
    pub fn get_or_build(&self, engine: &GeometryEngine) -> Arc<SceneGeometry> {
        let key = GeometryKey::for_engine(engine);
        self.inner.get_with(key, || {
            tracing::debug!(key = %key.short(), "geometry cache miss");
            Arc::new(SceneGeometry::build(engine))
        })
    }

    /// Check if geometry for an engine is cached
    #[inline]
    #[must_use]
    pub fn contains(&self, engine: &GeometryEngine) -> bool {
        self.inner.contains_key(&GeometryKey::for_engine(engine))
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for GeometryCache {
    /// Create cache with default capacity (64 policies)
    fn default() -> Self {
        Self::new(64)
    }
}
