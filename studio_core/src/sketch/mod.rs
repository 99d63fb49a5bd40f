//! # Sketch State
//!
//! The `Sketch` struct is the root container the host application edits:
//! the material library, the placed components, and a few settings.
//! Sketches serialize to `.sketch` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Sketch
//! ├── meta: SketchMeta (schema version, title, timestamps)
//! ├── settings: SketchSettings (view mode, default load magnitude)
//! ├── materials: Vec<Material> (library, order preserved)
//! └── components: Vec<StructuralComponent> (placement order preserved)
//! ```
//!
//! Sketches are never edited in place by the UI layer. Every edit is an
//! [`Action`] reduced by [`Sketch::apply`], which returns a new sketch and
//! leaves the old one untouched.
//!
//! ## Example
//!
//! ```rust
//! use studio_core::components::{ComponentKind, Position};
//! use studio_core::sketch::{Action, Sketch};
//!
//! let empty = Sketch::new("Warehouse bay");
//! let (sketch, beam_id) = empty
//!     .with_component(ComponentKind::Beam, Position::new(50.0, 50.0))
//!     .unwrap();
//!
//! assert!(empty.components.is_empty());
//! assert_eq!(sketch.components[0].name, "Beam 1");
//!
//! let sketch = sketch.apply(Action::AddLoad { component_id: beam_id }).unwrap();
//! let results = sketch.analyze();
//! assert_eq!(results.len(), 1);
//! ```

pub mod actions;

pub use actions::Action;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{compute, AnalysisResult, AnalysisSummary};
use crate::components::{ComponentKind, Position, StructuralComponent};
use crate::errors::{StudioError, StudioResult};
use crate::materials::{default_materials, Material, MaterialId};

/// Current schema version for .sketch files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Magnitude given to a freshly added load (kN)
pub const DEFAULT_LOAD_KN: f64 = 10.0;

/// Root sketch container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    pub meta: SketchMeta,

    #[serde(default)]
    pub settings: SketchSettings,

    pub materials: Vec<Material>,

    #[serde(default)]
    pub components: Vec<StructuralComponent>,
}

impl Sketch {
    /// Create an empty sketch seeded with the built-in material library.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Sketch {
            meta: SketchMeta {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                created: now,
                modified: now,
            },
            settings: SketchSettings::default(),
            materials: default_materials().to_vec(),
            components: Vec::new(),
        }
    }

    /// Look up a component by key.
    pub fn component(&self, id: &Uuid) -> Option<&StructuralComponent> {
        self.components.iter().find(|c| &c.id == id)
    }

    /// Look up a material by key. Duplicate keys resolve to the last entry,
    /// matching the analysis engine.
    pub fn material(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.iter().rev().find(|m| &m.id == id)
    }

    /// Number of components of one kind
    pub fn count_of_kind(&self, kind: ComponentKind) -> usize {
        self.components.iter().filter(|c| c.kind == kind).count()
    }

    /// Place a component and return the new sketch with the new key.
    pub fn with_component(&self, kind: ComponentKind, position: Position) -> StudioResult<(Sketch, Uuid)> {
        let next = self.apply(Action::AddComponent { kind, position })?;
        let id = next
            .components
            .last()
            .map(|c| c.id)
            .ok_or_else(|| StudioError::invalid_input("kind", kind.code(), "Component was not placed"))?;
        Ok((next, id))
    }

    /// Add a default load to a component and return the new sketch with the
    /// new load key.
    pub fn with_load(&self, component_id: Uuid) -> StudioResult<(Sketch, Uuid)> {
        let next = self.apply(Action::AddLoad { component_id })?;
        let id = next
            .component(&component_id)
            .and_then(|c| c.loads.last())
            .map(|l| l.id)
            .ok_or_else(|| StudioError::component_not_found(component_id))?;
        Ok((next, id))
    }

    /// Run the analysis engine over the current state.
    pub fn analyze(&self) -> Vec<AnalysisResult> {
        compute(&self.components, &self.materials)
    }

    /// Analyze and roll up.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::from_results(&self.analyze())
    }
}

impl Default for Sketch {
    fn default() -> Self {
        Sketch::new("Untitled sketch")
    }
}

/// Sketch metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub title: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// How the workspace is being viewed; shown in the report header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Plan2d,
    Perspective3d,
}

impl ViewMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Plan2d => "2D Plan",
            ViewMode::Perspective3d => "3D Perspective",
        }
    }
}

/// Per-sketch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchSettings {
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Magnitude of a freshly added load (kN)
    #[serde(default = "default_load_kn")]
    pub default_load_kn: f64,
}

fn default_load_kn() -> f64 {
    DEFAULT_LOAD_KN
}

impl Default for SketchSettings {
    fn default() -> Self {
        SketchSettings {
            view_mode: ViewMode::default(),
            default_load_kn: DEFAULT_LOAD_KN,
        }
    }
}
