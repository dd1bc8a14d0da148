//! Scene frame
//!
//! The scene is a cube of side `S`. X carries blast radius in five equal
//! columns, Y carries autonomy in five equal bands, Z carries reliability on
//! the nines scale.

use pac_model::{AutonomyLevel, GovernanceError, ImpactLevel, DEFAULT_AXIS_LENGTH};
use serde::{Deserialize, Serialize};

/// Number of cells along the blast radius and autonomy axes
pub const CELLS: usize = 5;

/// A point in scene space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// Blast radius axis
    pub x: f64,
    /// Autonomy axis
    pub y: f64,
    /// Reliability axis
    pub z: f64,
}

impl Point3 {
    /// New point
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Cell grid of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    axis_length: f64,
}

impl SceneFrame {
    /// Frame with the given axis length
    ///
    /// # Errors
    /// `InvalidAxisLength` when `axis_length` is not finite and positive.
    pub fn new(axis_length: f64) -> Result<Self, GovernanceError> {
        if !axis_length.is_finite() || axis_length <= 0.0 {
            return Err(GovernanceError::InvalidAxisLength(axis_length));
        }
        Ok(Self { axis_length })
    }

    /// Axis length `S`
    #[inline]
    #[must_use]
    pub fn axis_length(&self) -> f64 {
        self.axis_length
    }

    /// Width of one column or band
    #[inline]
    #[must_use]
    pub fn cell(&self) -> f64 {
        self.axis_length / CELLS as f64
    }

    /// `(left, right)` X extent of a blast radius column
    #[inline]
    #[must_use]
    pub fn column_bounds(&self, impact: ImpactLevel) -> (f64, f64) {
        let i = f64::from(impact.as_u8());
        ((i - 1.0) * self.cell(), i * self.cell())
    }

    /// X center of a blast radius column
    #[inline]
    #[must_use]
    pub fn column_center(&self, impact: ImpactLevel) -> f64 {
        (f64::from(impact.as_u8()) - 0.5) * self.cell()
    }

    /// Y center of an autonomy band
    #[inline]
    #[must_use]
    pub fn band_center(&self, level: AutonomyLevel) -> f64 {
        (f64::from(level.as_u8()) - 0.5) * self.cell()
    }

    /// Y of the top of an autonomy band, where its shelf sits
    #[inline]
    #[must_use]
    pub fn shelf_height(&self, level: AutonomyLevel) -> f64 {
        f64::from(level.as_u8()) * self.cell()
    }

    /// Y of the bottom of an autonomy band
    #[inline]
    #[must_use]
    pub fn band_floor(&self, level: AutonomyLevel) -> f64 {
        self.shelf_height(level) - self.cell()
    }
}

impl Default for SceneFrame {
    fn default() -> Self {
        Self {
            axis_length: DEFAULT_AXIS_LENGTH,
        }
    }
}
