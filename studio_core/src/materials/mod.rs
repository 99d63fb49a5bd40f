//! # Materials
//!
//! Material records referenced by structural components. Components hold
//! only a [`MaterialId`]; the analysis engine resolves it against the
//! current material list on every pass, so edits to a material take effect
//! on the next computation and a deleted material leaves a dangling key.
//!
//! Only `yield_strength_mpa` participates in the stress check. Density and
//! elastic modulus are carried for reporting.
//!
//! ## Example
//!
//! ```rust
//! use studio_core::materials::{default_materials, MaterialDraft};
//!
//! let steel = default_materials()
//!     .iter()
//!     .find(|m| m.id.as_str() == "steel-s355")
//!     .unwrap();
//! assert_eq!(steel.yield_strength_mpa, 355.0);
//!
//! let custom = MaterialDraft {
//!     name: "Aluminium 6061-T6".to_string(),
//!     density: 2700.0,
//!     elastic_modulus_gpa: 69.0,
//!     yield_strength_mpa: 276.0,
//!     description: None,
//! }
//! .into_material()
//! .unwrap();
//! assert_eq!(custom.name, "Aluminium 6061-T6");
//! ```

pub mod library;

pub use library::default_materials;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{StudioError, StudioResult};

/// Identity key of a material.
///
/// Built-in materials use stable slugs (`"concrete-c30"`); user materials
/// get a UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(id: impl Into<String>) -> Self {
        MaterialId(id.into())
    }

    /// Fresh random key for a user-defined material
    pub fn generate() -> Self {
        MaterialId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(s: &str) -> Self {
        MaterialId(s.to_string())
    }
}

/// A structural material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "steel-s355",
///   "name": "Structural Steel S355",
///   "density": 7850.0,
///   "elastic_modulus_gpa": 200.0,
///   "yield_strength_mpa": 355.0,
///   "description": "High strength steel for beams and columns with excellent ductility."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Identity key
    pub id: MaterialId,

    /// Display name
    pub name: String,

    /// Density (kg/m³), informational
    pub density: f64,

    /// Elastic modulus (GPa), informational
    pub elastic_modulus_gpa: f64,

    /// Yield strength (MPa), the capacity used for utilization
    pub yield_strength_mpa: f64,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Material {
    /// Apply a partial update, returning the patched material.
    pub fn patched(&self, update: &MaterialUpdate) -> Material {
        Material {
            id: self.id.clone(),
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            density: update.density.unwrap_or(self.density),
            elastic_modulus_gpa: update.elastic_modulus_gpa.unwrap_or(self.elastic_modulus_gpa),
            yield_strength_mpa: update.yield_strength_mpa.unwrap_or(self.yield_strength_mpa),
            description: match &update.description {
                Some(d) => Some(d.clone()),
                None => self.description.clone(),
            },
        }
    }
}

/// A user-entered material before it has a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDraft {
    pub name: String,
    pub density: f64,
    pub elastic_modulus_gpa: f64,
    pub yield_strength_mpa: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl MaterialDraft {
    /// Validate input parameters.
    pub fn validate(&self) -> StudioResult<()> {
        if self.name.trim().is_empty() {
            return Err(StudioError::invalid_input(
                "name",
                self.name.clone(),
                "Material name cannot be empty",
            ));
        }
        let numbers = [
            ("density", self.density),
            ("elastic_modulus_gpa", self.elastic_modulus_gpa),
            ("yield_strength_mpa", self.yield_strength_mpa),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(StudioError::invalid_input(field, value.to_string(), "Value must be a finite number"));
            }
        }
        Ok(())
    }

    /// Validate and assign a fresh key.
    pub fn into_material(self) -> StudioResult<Material> {
        self.validate()?;
        let description = self.description.filter(|d| !d.trim().is_empty());
        Ok(Material {
            id: MaterialId::generate(),
            name: self.name,
            density: self.density,
            elastic_modulus_gpa: self.elastic_modulus_gpa,
            yield_strength_mpa: self.yield_strength_mpa,
            description,
        })
    }
}

/// Partial update for a material; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub elastic_modulus_gpa: Option<f64>,
    #[serde(default)]
    pub yield_strength_mpa: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}
