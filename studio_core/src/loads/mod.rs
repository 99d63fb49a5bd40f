//! Loads applied to structural components
//!
//! Each [`Load`] belongs to exactly one component and is removed with it.
//! The engine only ever looks at the per-direction sums, so load order is
//! irrelevant to the analysis.
//!
//! # Example
//!
//! ```
//! use studio_core::loads::{Load, LoadDirection, LoadTotals};
//!
//! let loads = vec![
//!     Load::new("Dead", 60.0, LoadDirection::Axial),
//!     Load::new("Live", 40.0, LoadDirection::Axial),
//!     Load::new("Wind", 5.0, LoadDirection::Shear),
//! ];
//!
//! let totals = LoadTotals::from_loads(&loads);
//! assert_eq!(totals.axial_kn, 100.0);
//! assert_eq!(totals.shear_kn, 5.0);
//! assert_eq!(totals.moment_knm, 0.0);
//! ```

pub mod direction;

pub use direction::LoadDirection;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single load on a component.
///
/// # JSON Format
/// ```json
/// {
///   "id": "5f0c7c1e-2a47-4b53-9d8e-0e6f0d3f9a11",
///   "label": "Load 1",
///   "magnitude": 10.0,
///   "direction": "axial"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Identity key
    pub id: Uuid,

    /// Display label
    pub label: String,

    /// Signed magnitude in kN (kN·m for moments)
    pub magnitude: f64,

    /// Which stress term the load feeds
    pub direction: LoadDirection,
}

impl Load {
    /// Create a load with a fresh key.
    pub fn new(label: impl Into<String>, magnitude: f64, direction: LoadDirection) -> Self {
        Load {
            id: Uuid::new_v4(),
            label: label.into(),
            magnitude,
            direction,
        }
    }

    /// Apply a partial update, returning the patched load.
    pub fn patched(&self, update: &LoadUpdate) -> Load {
        Load {
            id: self.id,
            label: update.label.clone().unwrap_or_else(|| self.label.clone()),
            magnitude: update.magnitude.unwrap_or(self.magnitude),
            direction: update.direction.unwrap_or(self.direction),
        }
    }
}

/// Partial update for a load; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadUpdate {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub direction: Option<LoadDirection>,
}

/// Load magnitudes summed per direction.
///
/// Sums are sign-sensitive: opposing loads cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadTotals {
    /// Σ axial magnitudes (kN)
    pub axial_kn: f64,
    /// Σ shear magnitudes (kN)
    pub shear_kn: f64,
    /// Σ moment magnitudes (kN·m)
    pub moment_knm: f64,
}

impl LoadTotals {
    /// Partition loads by direction and sum each partition.
    pub fn from_loads(loads: &[Load]) -> Self {
        loads.iter().fold(LoadTotals::default(), |mut totals, load| {
            match load.direction {
                LoadDirection::Axial => totals.axial_kn += load.magnitude,
                LoadDirection::Shear => totals.shear_kn += load.magnitude,
                LoadDirection::Moment => totals.moment_knm += load.magnitude,
            }
            totals
        })
    }

    /// Sum for one direction
    pub fn get(&self, direction: LoadDirection) -> f64 {
        match direction {
            LoadDirection::Axial => self.axial_kn,
            LoadDirection::Shear => self.shear_kn,
            LoadDirection::Moment => self.moment_knm,
        }
    }
}
