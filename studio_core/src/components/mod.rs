//! # Structural Components
//!
//! A component is a wall, beam, column or support placed on the sketch
//! workspace. Geometry is stored exactly as entered, including zero or
//! negative values; the analysis engine is responsible for guarding its
//! denominators.
//!
//! ## Example
//!
//! ```rust
//! use studio_core::components::{ComponentKind, Position, StructuralComponent};
//!
//! let beam = StructuralComponent::placed(
//!     ComponentKind::Beam,
//!     "Beam 1",
//!     "steel-s355".into(),
//!     Position::new(50.0, 50.0),
//! );
//! assert_eq!(beam.width, 6.0);
//! assert_eq!(beam.height, 0.6);
//! assert!(beam.loads.is_empty());
//! ```

pub mod kind;

pub use kind::{ComponentKind, Constraint, Dimensions};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::loads::Load;
use crate::materials::MaterialId;

/// Placement on the workspace, in percent of its width/height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Clamp both coordinates into the workspace (0-100 %).
    pub fn clamped(self) -> Position {
        Position {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }
}

/// A structural component on the sketch.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "0b6d7c8e-8d0e-4b8e-a0d4-5e1f3c2b9a77",
///   "name": "Beam 1",
///   "kind": "beam",
///   "material_id": "steel-s355",
///   "width": 6.0,
///   "height": 0.6,
///   "depth": 0.4,
///   "rotation": 0.0,
///   "position": { "x": 50.0, "y": 50.0 },
///   "loads": [],
///   "constraint": "pinned"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralComponent {
    /// Identity key
    pub id: Uuid,

    /// Display name (e.g., "Beam 1")
    pub name: String,

    pub kind: ComponentKind,

    /// Material reference, resolved at analysis time. May dangle.
    pub material_id: MaterialId,

    /// Section width (m)
    pub width: f64,

    /// Section height (m)
    pub height: f64,

    /// Out-of-plane depth (m), display only
    pub depth: f64,

    /// Rotation in degrees, display only
    pub rotation: f64,

    pub position: Position,

    /// Applied loads; order is irrelevant to the analysis
    #[serde(default)]
    pub loads: Vec<Load>,

    pub constraint: Constraint,
}

impl StructuralComponent {
    /// Create a component with the defaults for its kind: default geometry
    /// and constraint, no rotation, no loads.
    pub fn placed(kind: ComponentKind, name: impl Into<String>, material_id: MaterialId, position: Position) -> Self {
        let dims = kind.default_dimensions();
        StructuralComponent {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            material_id,
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            rotation: 0.0,
            position,
            loads: Vec::new(),
            constraint: kind.default_constraint(),
        }
    }

    /// Builder-style helper to attach a load
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    /// Builder-style helper to set the section
    pub fn with_section(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn find_load(&self, load_id: &Uuid) -> Option<&Load> {
        self.loads.iter().find(|l| &l.id == load_id)
    }

    /// Apply a partial update, returning the patched component.
    ///
    /// A new position is clamped into the workspace.
    pub fn patched(&self, update: &ComponentUpdate) -> StructuralComponent {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(kind) = update.kind {
            next.kind = kind;
        }
        if let Some(material_id) = &update.material_id {
            next.material_id = material_id.clone();
        }
        if let Some(width) = update.width {
            next.width = width;
        }
        if let Some(height) = update.height {
            next.height = height;
        }
        if let Some(depth) = update.depth {
            next.depth = depth;
        }
        if let Some(rotation) = update.rotation {
            next.rotation = rotation;
        }
        if let Some(position) = update.position {
            next.position = position.clamped();
        }
        if let Some(constraint) = update.constraint {
            next.constraint = constraint;
        }
        next
    }
}

/// Partial update for a component; `None` leaves a field unchanged.
///
/// Loads are edited through their own actions, not through this patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<ComponentKind>,
    #[serde(default)]
    pub material_id: Option<MaterialId>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub constraint: Option<Constraint>,
}
