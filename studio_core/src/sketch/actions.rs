//! Sketch actions and their reducer.
//!
//! Each UI gesture maps to one [`Action`]. [`Sketch::apply`] validates the
//! keys it references and builds the next sketch; the input sketch is never
//! mutated.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::components::{ComponentKind, ComponentUpdate, Position, StructuralComponent};
use crate::errors::{StudioError, StudioResult};
use crate::loads::{Load, LoadDirection, LoadUpdate};
use crate::materials::{Material, MaterialId, MaterialUpdate};

use super::{Sketch, ViewMode};

/// Degrees added by the quick-rotate tool
pub const ROTATION_STEP_DEG: f64 = 15.0;

/// A discrete edit to a sketch.
///
/// ## JSON Format
///
/// ```json
/// { "action": "update_load",
///   "component_id": "0b6d7c8e-8d0e-4b8e-a0d4-5e1f3c2b9a77",
///   "load_id": "5f0c7c1e-2a47-4b53-9d8e-0e6f0d3f9a11",
///   "update": { "magnitude": 25.0, "direction": "shear" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Place a new component with its kind's defaults
    AddComponent { kind: ComponentKind, position: Position },
    /// Drag a component to a new position
    MoveComponent { component_id: Uuid, position: Position },
    /// Patch component properties
    UpdateComponent { component_id: Uuid, update: ComponentUpdate },
    /// Delete a component together with its loads
    RemoveComponent { component_id: Uuid },
    /// Rotate by [`ROTATION_STEP_DEG`]
    RotateComponent { component_id: Uuid },
    /// Flip fixed/pinned
    ToggleConstraint { component_id: Uuid },
    /// Append a default axial load
    AddLoad { component_id: Uuid },
    /// Patch one load
    UpdateLoad {
        component_id: Uuid,
        load_id: Uuid,
        update: LoadUpdate,
    },
    /// Delete one load
    RemoveLoad { component_id: Uuid, load_id: Uuid },
    /// Append a material to the library
    AddMaterial { material: Material },
    /// Patch a library material
    UpdateMaterial { material_id: MaterialId, update: MaterialUpdate },
    /// Delete a library material; components referencing it keep the key
    RemoveMaterial { material_id: MaterialId },
    /// Clear all components, keep the library
    ResetWorkspace,
    SetViewMode { mode: ViewMode },
}

impl Action {
    /// Snake-case action name, as serialized
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddComponent { .. } => "add_component",
            Action::MoveComponent { .. } => "move_component",
            Action::UpdateComponent { .. } => "update_component",
            Action::RemoveComponent { .. } => "remove_component",
            Action::RotateComponent { .. } => "rotate_component",
            Action::ToggleConstraint { .. } => "toggle_constraint",
            Action::AddLoad { .. } => "add_load",
            Action::UpdateLoad { .. } => "update_load",
            Action::RemoveLoad { .. } => "remove_load",
            Action::AddMaterial { .. } => "add_material",
            Action::UpdateMaterial { .. } => "update_material",
            Action::RemoveMaterial { .. } => "remove_material",
            Action::ResetWorkspace => "reset_workspace",
            Action::SetViewMode { .. } => "set_view_mode",
        }
    }
}

impl Sketch {
    /// Reduce one action into a new sketch.
    ///
    /// # Returns
    ///
    /// * `Ok(Sketch)` - The next state, with `meta.modified` bumped
    /// * `Err(StudioError::ComponentNotFound)` / `LoadNotFound` /
    ///   `MaterialNotFound` - The action references an unknown key
    /// * `Err(StudioError::DuplicateMaterial)` - Added material key is taken
    pub fn apply(&self, action: Action) -> StudioResult<Sketch> {
        debug!(action = action.name(), "applying sketch action");

        let mut next = self.clone();
        match action {
            Action::AddComponent { kind, position } => {
                let name = format!("{} {}", kind.display_name(), self.count_of_kind(kind) + 1);
                let material_id = self.materials.first().map(|m| m.id.clone()).unwrap_or_default();
                next.components
                    .push(StructuralComponent::placed(kind, name, material_id, position.clamped()));
            }
            Action::MoveComponent { component_id, position } => {
                next.component_mut(component_id)?.position = position.clamped();
            }
            Action::UpdateComponent { component_id, update } => {
                let component = next.component_mut(component_id)?;
                *component = component.patched(&update);
            }
            Action::RemoveComponent { component_id } => {
                next.component_mut(component_id)?;
                next.components.retain(|c| c.id != component_id);
            }
            Action::RotateComponent { component_id } => {
                let component = next.component_mut(component_id)?;
                component.rotation = (component.rotation + ROTATION_STEP_DEG) % 360.0;
            }
            Action::ToggleConstraint { component_id } => {
                let component = next.component_mut(component_id)?;
                component.constraint = component.constraint.toggled();
            }
            Action::AddLoad { component_id } => {
                let magnitude = self.settings.default_load_kn;
                let component = next.component_mut(component_id)?;
                let label = format!("Load {}", component.loads.len() + 1);
                component.loads.push(Load::new(label, magnitude, LoadDirection::Axial));
            }
            Action::UpdateLoad {
                component_id,
                load_id,
                update,
            } => {
                let component = next.component_mut(component_id)?;
                let load = component
                    .loads
                    .iter_mut()
                    .find(|l| l.id == load_id)
                    .ok_or_else(|| StudioError::load_not_found(component_id, load_id))?;
                *load = load.patched(&update);
            }
            Action::RemoveLoad { component_id, load_id } => {
                let component = next.component_mut(component_id)?;
                if component.find_load(&load_id).is_none() {
                    return Err(StudioError::load_not_found(component_id, load_id));
                }
                component.loads.retain(|l| l.id != load_id);
            }
            Action::AddMaterial { material } => {
                if self.materials.iter().any(|m| m.id == material.id) {
                    return Err(StudioError::DuplicateMaterial {
                        material_id: material.id.to_string(),
                    });
                }
                next.materials.push(material);
            }
            Action::UpdateMaterial { material_id, update } => {
                let mut found = false;
                for material in next.materials.iter_mut().filter(|m| m.id == material_id) {
                    *material = material.patched(&update);
                    found = true;
                }
                if !found {
                    return Err(StudioError::material_not_found(material_id));
                }
            }
            Action::RemoveMaterial { material_id } => {
                if !self.materials.iter().any(|m| m.id == material_id) {
                    return Err(StudioError::material_not_found(material_id));
                }
                next.materials.retain(|m| m.id != material_id);
            }
            Action::ResetWorkspace => {
                next.components.clear();
            }
            Action::SetViewMode { mode } => {
                next.settings.view_mode = mode;
            }
        }

        next.meta.modified = Utc::now();
        Ok(next)
    }

    /// Apply several actions in order, stopping at the first error.
    pub fn apply_all(&self, actions: impl IntoIterator<Item = Action>) -> StudioResult<Sketch> {
        actions
            .into_iter()
            .try_fold(self.clone(), |sketch, action| sketch.apply(action))
    }

    fn component_mut(&mut self, id: Uuid) -> StudioResult<&mut StructuralComponent> {
        self.components
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StudioError::component_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Constraint;

    fn sketch_with_beam() -> (Sketch, Uuid) {
        Sketch::new("Test")
            .with_component(ComponentKind::Beam, Position::new(50.0, 50.0))
            .unwrap()
    }

    #[test]
    fn test_add_component_defaults() {
        let (sketch, id) = sketch_with_beam();
        let beam = sketch.component(&id).unwrap();
        assert_eq!(beam.name, "Beam 1");
        assert_eq!(beam.material_id.as_str(), "concrete-c30");
        assert_eq!(beam.constraint, Constraint::Pinned);
        assert_eq!((beam.width, beam.height, beam.depth), (6.0, 0.6, 0.4));

        let (sketch, id2) = sketch
            .with_component(ComponentKind::Beam, Position::new(10.0, 10.0))
            .unwrap();
        assert_eq!(sketch.component(&id2).unwrap().name, "Beam 2");

        let (sketch, support) = sketch
            .with_component(ComponentKind::Support, Position::new(0.0, 0.0))
            .unwrap();
        let support = sketch.component(&support).unwrap();
        assert_eq!(support.name, "Support 1");
        assert_eq!(support.constraint, Constraint::Fixed);
    }

    #[test]
    fn test_add_component_without_materials_uses_empty_key() {
        let mut empty = Sketch::new("Bare");
        empty.materials.clear();
        let (sketch, id) = empty
            .with_component(ComponentKind::Wall, Position::new(5.0, 5.0))
            .unwrap();
        assert_eq!(sketch.component(&id).unwrap().material_id.as_str(), "");
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let (sketch, id) = sketch_with_beam();
        let before = sketch.clone();
        let after = sketch.apply(Action::AddLoad { component_id: id }).unwrap();
        assert_eq!(sketch, before);
        assert_eq!(after.component(&id).unwrap().loads.len(), 1);
    }

    #[test]
    fn test_move_and_update_clamp_position() {
        let (sketch, id) = sketch_with_beam();
        let moved = sketch
            .apply(Action::MoveComponent {
                component_id: id,
                position: Position::new(120.0, -5.0),
            })
            .unwrap();
        assert_eq!(moved.component(&id).unwrap().position, Position::new(100.0, 0.0));

        let updated = sketch
            .apply(Action::UpdateComponent {
                component_id: id,
                update: ComponentUpdate {
                    position: Some(Position::new(30.0, 200.0)),
                    height: Some(0.8),
                    ..Default::default()
                },
            })
            .unwrap();
        let c = updated.component(&id).unwrap();
        assert_eq!(c.position, Position::new(30.0, 100.0));
        assert_eq!(c.height, 0.8);
    }

    #[test]
    fn test_rotate_wraps() {
        let (mut sketch, id) = sketch_with_beam();
        for _ in 0..25 {
            sketch = sketch.apply(Action::RotateComponent { component_id: id }).unwrap();
        }
        // 25 * 15 = 375 -> 15
        assert_eq!(sketch.component(&id).unwrap().rotation, 15.0);
    }

    #[test]
    fn test_toggle_constraint() {
        let (sketch, id) = sketch_with_beam();
        let toggled = sketch.apply(Action::ToggleConstraint { component_id: id }).unwrap();
        assert_eq!(toggled.component(&id).unwrap().constraint, Constraint::Fixed);
        let back = toggled.apply(Action::ToggleConstraint { component_id: id }).unwrap();
        assert_eq!(back.component(&id).unwrap().constraint, Constraint::Pinned);
    }

    #[test]
    fn test_load_lifecycle() {
        let (sketch, id) = sketch_with_beam();
        let (sketch, load_id) = sketch.with_load(id).unwrap();
        let load = sketch.component(&id).unwrap().find_load(&load_id).unwrap();
        assert_eq!(load.label, "Load 1");
        assert_eq!(load.magnitude, 10.0);
        assert_eq!(load.direction, LoadDirection::Axial);

        let sketch = sketch
            .apply(Action::UpdateLoad {
                component_id: id,
                load_id,
                update: LoadUpdate {
                    magnitude: Some(100.0),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(sketch.component(&id).unwrap().loads[0].magnitude, 100.0);

        let (sketch, second) = sketch.with_load(id).unwrap();
        assert_eq!(sketch.component(&id).unwrap().find_load(&second).unwrap().label, "Load 2");

        let sketch = sketch.apply(Action::RemoveLoad { component_id: id, load_id }).unwrap();
        let loads = &sketch.component(&id).unwrap().loads;
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].id, second);
    }

    #[test]
    fn test_default_load_magnitude_from_settings() {
        let (mut sketch, id) = sketch_with_beam();
        sketch.settings.default_load_kn = 25.0;
        let (sketch, load_id) = sketch.with_load(id).unwrap();
        assert_eq!(sketch.component(&id).unwrap().find_load(&load_id).unwrap().magnitude, 25.0);
    }

    #[test]
    fn test_unknown_keys() {
        let (sketch, id) = sketch_with_beam();
        let ghost = Uuid::new_v4();

        let err = sketch.apply(Action::AddLoad { component_id: ghost }).unwrap_err();
        assert_eq!(err.error_code(), "COMPONENT_NOT_FOUND");

        let err = sketch
            .apply(Action::RemoveLoad {
                component_id: id,
                load_id: ghost,
            })
            .unwrap_err();
        assert_eq!(err, StudioError::load_not_found(id, ghost));

        let err = sketch
            .apply(Action::UpdateMaterial {
                material_id: MaterialId::new("unobtainium"),
                update: MaterialUpdate::default(),
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_remove_component_drops_its_loads() {
        let (sketch, id) = sketch_with_beam();
        let (sketch, _) = sketch.with_load(id).unwrap();
        let sketch = sketch.apply(Action::RemoveComponent { component_id: id }).unwrap();
        assert!(sketch.components.is_empty());
        assert!(sketch.analyze().is_empty());
    }

    #[test]
    fn test_material_actions() {
        let sketch = Sketch::new("Materials");
        let steel = sketch.materials[1].clone();
        let err = sketch
            .apply(Action::AddMaterial { material: steel.clone() })
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_MATERIAL");

        let mut custom = steel.clone();
        custom.id = MaterialId::new("custom");
        let sketch = sketch.apply(Action::AddMaterial { material: custom }).unwrap();
        assert_eq!(sketch.materials.len(), 5);

        let sketch = sketch
            .apply(Action::UpdateMaterial {
                material_id: MaterialId::new("custom"),
                update: MaterialUpdate {
                    yield_strength_mpa: Some(420.0),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(sketch.material(&MaterialId::new("custom")).unwrap().yield_strength_mpa, 420.0);
    }

    #[test]
    fn test_remove_material_leaves_dangling_reference() {
        let (sketch, id) = sketch_with_beam();
        let (sketch, _) = sketch.with_load(id).unwrap();
        let sketch = sketch
            .apply(Action::RemoveMaterial {
                material_id: MaterialId::new("concrete-c30"),
            })
            .unwrap();
        assert_eq!(sketch.component(&id).unwrap().material_id.as_str(), "concrete-c30");
        let results = sketch.analyze();
        // Capacity falls back to 1 MPa
        assert!((results[0].utilization - results[0].von_mises).abs() < 1e-15);
    }

    #[test]
    fn test_material_edit_reaches_analysis() {
        let (sketch, id) = sketch_with_beam();
        let (sketch, _) = sketch.with_load(id).unwrap();
        let before = sketch.analyze()[0].utilization;
        let sketch = sketch
            .apply(Action::UpdateMaterial {
                material_id: MaterialId::new("concrete-c30"),
                update: MaterialUpdate {
                    yield_strength_mpa: Some(60.0),
                    ..Default::default()
                },
            })
            .unwrap();
        let after = sketch.analyze()[0].utilization;
        assert!((after * 2.0 - before).abs() < 1e-15);
    }

    #[test]
    fn test_reset_keeps_materials() {
        let (sketch, _) = sketch_with_beam();
        let reset = sketch.apply_all([Action::ResetWorkspace, Action::SetViewMode { mode: ViewMode::Perspective3d }]);
        let reset = reset.unwrap();
        assert!(reset.components.is_empty());
        assert_eq!(reset.materials, sketch.materials);
        assert_eq!(reset.settings.view_mode, ViewMode::Perspective3d);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::UpdateLoad {
            component_id: Uuid::nil(),
            load_id: Uuid::nil(),
            update: LoadUpdate {
                direction: Some(LoadDirection::Shear),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"action\":\"update_load\""));
        let roundtrip: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, action);
        assert_eq!(Action::ResetWorkspace.name(), "reset_workspace");
    }
}
