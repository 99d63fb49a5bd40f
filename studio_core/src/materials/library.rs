//! Built-in material library offered to every new sketch.

use once_cell::sync::Lazy;

use super::{Material, MaterialId};

static DEFAULT_MATERIALS: Lazy<Vec<Material>> = Lazy::new(|| {
    vec![
        Material {
            id: MaterialId::new("concrete-c30"),
            name: "Concrete C30".to_string(),
            density: 2400.0,
            elastic_modulus_gpa: 30.0,
            yield_strength_mpa: 30.0,
            description: Some("Standard structural concrete for general purpose members.".to_string()),
        },
        Material {
            id: MaterialId::new("steel-s355"),
            name: "Structural Steel S355".to_string(),
            density: 7850.0,
            elastic_modulus_gpa: 200.0,
            yield_strength_mpa: 355.0,
            description: Some(
                "High strength steel for beams and columns with excellent ductility.".to_string(),
            ),
        },
        Material {
            id: MaterialId::new("timber-gl24"),
            name: "Glulam Timber GL24".to_string(),
            density: 450.0,
            elastic_modulus_gpa: 14.0,
            yield_strength_mpa: 24.0,
            description: Some(
                "Engineered timber laminate, lightweight with moderate stiffness.".to_string(),
            ),
        },
        Material {
            id: MaterialId::new("frp-plate"),
            name: "FRP Plate".to_string(),
            density: 1900.0,
            elastic_modulus_gpa: 45.0,
            yield_strength_mpa: 500.0,
            description: Some("Fiber reinforced polymer plate for retrofits and wraps.".to_string()),
        },
    ]
});

/// The built-in materials, in library order (concrete first).
pub fn default_materials() -> &'static [Material] {
    &DEFAULT_MATERIALS
}
