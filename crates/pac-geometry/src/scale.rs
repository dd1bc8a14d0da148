//! Nines scale
//!
//! Reliability near 100% is compressed on a linear axis: 90% and 99.9% would
//! sit almost on top of each other. The axis instead carries the failure rate
//! in "nines", `-log10(1 - p)`, rescaled onto `[0, S]`. Input is clamped to
//! `[min_reliability, 99.9]` first, so the transform is always finite and
//! values below the floor collapse onto the floor.

use pac_model::{GovernanceConfig, MAX_RELIABILITY};

use crate::frame::SceneFrame;

/// Nines of a reliability fraction: `-log10(1 - p)`
///
/// `p = 1` gives infinity.
#[inline]
#[must_use]
pub fn nines(fraction: f64) -> f64 {
    -(1.0 - fraction).log10()
}

/// Inverse of [`nines`]: `1 - 10^-n`
#[inline]
#[must_use]
pub fn fraction_from_nines(n: f64) -> f64 {
    1.0 - 10f64.powf(-n)
}

/// Reliability percent ⇄ axis position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliabilityScale {
    min_reliability: f64,
    nines_min: f64,
    nines_max: f64,
    axis_length: f64,
}

impl ReliabilityScale {
    /// Scale for a floor (percent) and an axis length
    ///
    /// The floor is assumed to lie in `[0, 99.9)`; [`GovernanceConfig::validate`]
    /// enforces that before a scale is built from configuration.
    #[must_use]
    pub fn new(min_reliability: f64, axis_length: f64) -> Self {
        Self {
            min_reliability,
            nines_min: nines(min_reliability / 100.0),
            nines_max: nines(MAX_RELIABILITY / 100.0),
            axis_length,
        }
    }

    /// Scale from configuration and frame
    #[inline]
    #[must_use]
    pub fn from_config(config: &GovernanceConfig, frame: &SceneFrame) -> Self {
        Self::new(config.min_reliability, frame.axis_length())
    }

    /// Axis floor in percent
    #[inline]
    #[must_use]
    pub fn min_reliability(&self) -> f64 {
        self.min_reliability
    }

    /// Axis length `S`
    #[inline]
    #[must_use]
    pub fn axis_length(&self) -> f64 {
        self.axis_length
    }

    /// Clamp a percent into the representable range
    #[inline]
    #[must_use]
    pub fn clamp_percent(&self, percent: f64) -> f64 {
        percent.max(self.min_reliability).min(MAX_RELIABILITY)
    }

    /// Nines of a percent after clamping
    #[inline]
    #[must_use]
    pub fn nines(&self, percent: f64) -> f64 {
        nines(self.clamp_percent(percent) / 100.0)
    }

    /// Axis position of a percent, in `[0, S]`
    #[must_use]
    pub fn to_axis(&self, percent: f64) -> f64 {
        (self.nines(percent) - self.nines_min) / (self.nines_max - self.nines_min)
            * self.axis_length
    }

    /// Percent at an axis position; positions outside `[0, S]` saturate
    #[must_use]
    pub fn from_axis(&self, z: f64) -> f64 {
        let t = (z / self.axis_length).clamp(0.0, 1.0);
        let n = t * (self.nines_max - self.nines_min) + self.nines_min;
        self.clamp_percent(fraction_from_nines(n) * 100.0)
    }
}
