//! # Stress Engine
//!
//! Closed-form local stress on each component in isolation.
//!
//! ## Per-component procedure
//!
//! ```text
//! A      = max(b·h, 1e-4)                      m²
//! σ_ax   = ΣP_axial · 1000 / A / 1e6           MPa
//! τ      = ΣV · 1000 / A / 1e6                 MPa
//! σ_b    = 6 · ΣM · 1000 / (b·h² or 1e-4) / 1e6 MPa
//! σ      = σ_ax + σ_b
//! σ_vm   = √( max(σ,0)² + 3·max(τ,0)² )
//! U      = σ_vm / Fy          (Fy = 1 when the material is missing)
//! SF     = 1 / U              (∞ when U ≤ 0)
//! ```
//!
//! Non-finite σ, τ, σ_vm and U are reported as 0; a non-finite SF is
//! reported as the unbounded sentinel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::components::StructuralComponent;
use crate::loads::LoadTotals;
use crate::materials::{Material, MaterialId};
use crate::numeric::{
    clamp_non_negative, finite_or, finite_or_zero, floor_area, nonzero_or_min, UNBOUNDED_SAFETY_FACTOR,
};
use crate::units::{CubicMeters, KilonewtonMeters, Kilonewtons, Megapascals, NewtonMeters, Newtons, SquareMeters};

use super::utilization::UtilizationBand;

/// Capacity used when a component's material key resolves to nothing.
pub const MISSING_MATERIAL_CAPACITY_MPA: f64 = 1.0;

/// Derived stress metrics for one component.
///
/// ## JSON Example
///
/// ```json
/// {
///   "component_id": "0b6d7c8e-8d0e-4b8e-a0d4-5e1f3c2b9a77",
///   "axial_stress": 0.0278,
///   "shear_stress": 0.0,
///   "von_mises": 0.0278,
///   "utilization": 0.0000783,
///   "safety_factor": 12780.0
/// }
/// ```
///
/// An unbounded safety factor serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Key of the analyzed component
    pub component_id: Uuid,

    /// Axial stress including the superposed bending stress (MPa)
    pub axial_stress: f64,

    /// Shear stress (MPa), reported with its sign
    pub shear_stress: f64,

    /// Reduced von Mises stress (MPa)
    pub von_mises: f64,

    /// von Mises stress over yield strength
    pub utilization: f64,

    /// 1 / utilization, or [`UNBOUNDED_SAFETY_FACTOR`]
    #[serde(with = "crate::numeric::unbounded")]
    pub safety_factor: f64,
}

impl AnalysisResult {
    /// Display band for this result's utilization
    pub fn band(&self) -> UtilizationBand {
        UtilizationBand::classify(self.utilization)
    }

    /// Check if the component stays below yield (utilization < 1.0)
    pub fn passes(&self) -> bool {
        self.utilization < 1.0
    }

    /// True when no rated stress exists and the safety factor is the sentinel
    pub fn has_unbounded_safety_factor(&self) -> bool {
        self.safety_factor.is_infinite()
    }
}

/// Analyze every component against the material list.
///
/// Returns one result per component, in input order. Never fails: degenerate
/// geometry, dangling material keys and non-finite arithmetic are normalized.
/// When two materials share a key, the later one wins.
///
/// # Example
///
/// ```rust
/// use studio_core::analysis::compute;
/// use studio_core::components::{ComponentKind, Position, StructuralComponent};
/// use studio_core::loads::{Load, LoadDirection};
/// use studio_core::materials::default_materials;
///
/// let beam = StructuralComponent::placed(
///     ComponentKind::Beam,
///     "Beam 1",
///     "steel-s355".into(),
///     Position::new(50.0, 50.0),
/// )
/// .with_load(Load::new("P", 100.0, LoadDirection::Axial));
///
/// let results = compute(&[beam], default_materials());
/// assert_eq!(results.len(), 1);
/// assert!((results[0].axial_stress - 0.027_778).abs() < 1e-5);
/// ```
pub fn compute(components: &[StructuralComponent], materials: &[Material]) -> Vec<AnalysisResult> {
    let library: HashMap<&MaterialId, &Material> = materials.iter().map(|m| (&m.id, m)).collect();

    components
        .iter()
        .map(|component| analyze_component(component, library.get(&component.material_id).copied()))
        .collect()
}

/// Analyze a single component with its already-resolved material.
pub fn analyze_component(component: &StructuralComponent, material: Option<&Material>) -> AnalysisResult {
    let totals = LoadTotals::from_loads(&component.loads);
    let stresses = SectionStresses::of(component, &totals);

    let combined_axial = stresses.axial + stresses.bending;
    let shear = stresses.shear;

    let von_mises = (clamp_non_negative(combined_axial.0).powi(2) + 3.0 * clamp_non_negative(shear.0).powi(2)).sqrt();

    let capacity = material
        .map(|m| m.yield_strength_mpa)
        .unwrap_or(MISSING_MATERIAL_CAPACITY_MPA);
    let utilization = if capacity == 0.0 || capacity.is_nan() {
        0.0
    } else {
        von_mises / capacity
    };

    // Derived from the raw utilization: NaN lands on the sentinel, +∞ on 0.
    let safety_factor = if utilization > 0.0 {
        1.0 / utilization
    } else {
        UNBOUNDED_SAFETY_FACTOR
    };

    AnalysisResult {
        component_id: component.id,
        axial_stress: finite_or_zero(combined_axial.0),
        shear_stress: finite_or_zero(shear.0),
        von_mises: finite_or_zero(von_mises),
        utilization: finite_or_zero(utilization),
        safety_factor: finite_or(safety_factor, UNBOUNDED_SAFETY_FACTOR),
    }
}

/// Raw (unguarded) stress terms of a rectangular section.
struct SectionStresses {
    axial: Megapascals,
    shear: Megapascals,
    bending: Megapascals,
}

impl SectionStresses {
    fn of(component: &StructuralComponent, totals: &LoadTotals) -> Self {
        let area = SquareMeters(floor_area(component.width * component.height));
        // b·h², i.e. six times the elastic section modulus
        let modulus_basis = CubicMeters(nonzero_or_min(component.width * component.height.powi(2)));

        let axial_force = Newtons::from(Kilonewtons(totals.axial_kn));
        let shear_force = Newtons::from(Kilonewtons(totals.shear_kn));
        let moment = NewtonMeters::from(KilonewtonMeters(totals.moment_knm));

        SectionStresses {
            axial: (axial_force / area).into(),
            shear: (shear_force / area).into(),
            bending: (moment * 6.0 / modulus_basis).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, Position};
    use crate::loads::{Load, LoadDirection};
    use crate::numeric::MIN_AREA_M2;

    fn steel() -> Material {
        Material {
            id: MaterialId::new("steel-s355"),
            name: "Structural Steel S355".to_string(),
            density: 7850.0,
            elastic_modulus_gpa: 200.0,
            yield_strength_mpa: 355.0,
            description: None,
        }
    }

    fn component(kind: ComponentKind, loads: Vec<Load>) -> StructuralComponent {
        let mut c = StructuralComponent::placed(kind, "Test", MaterialId::new("steel-s355"), Position::new(50.0, 50.0));
        c.loads = loads;
        c
    }

    fn approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {} ± {}, got {}",
            expected,
            tol,
            actual
        );
    }

    #[test]
    fn test_no_loads_baseline() {
        let c = component(ComponentKind::Wall, vec![]);
        let result = analyze_component(&c, Some(&steel()));
        assert_eq!(result.component_id, c.id);
        assert_eq!(result.axial_stress, 0.0);
        assert_eq!(result.shear_stress, 0.0);
        assert_eq!(result.von_mises, 0.0);
        assert_eq!(result.utilization, 0.0);
        assert!(result.has_unbounded_safety_factor());
    }

    #[test]
    fn test_beam_axial_scenario() {
        // 6 x 0.6 beam, 100 kN axial on S355
        let c = component(ComponentKind::Beam, vec![Load::new("P", 100.0, LoadDirection::Axial)]);
        let result = analyze_component(&c, Some(&steel()));

        let expected_stress = 100.0 * 1000.0 / 3.6 / 1e6;
        approx(result.axial_stress, expected_stress, 1e-12);
        approx(result.axial_stress, 0.027_778, 1e-6);
        assert_eq!(result.shear_stress, 0.0);
        approx(result.von_mises, expected_stress, 1e-12);
        approx(result.utilization, expected_stress / 355.0, 1e-12);
        approx(result.utilization, 7.8247e-5, 1e-8);
        approx(result.safety_factor, 12_780.0, 0.5);
        assert!(result.safety_factor.is_finite());
    }

    #[test]
    fn test_column_bending_formula() {
        // 0.5 x 3 column, 50 kN·m: 6·50·1000 / (0.5·9) / 1e6
        let c = component(ComponentKind::Column, vec![Load::new("M", 50.0, LoadDirection::Moment)]);
        let result = analyze_component(&c, Some(&steel()));
        approx(result.axial_stress, 6.0 * 50.0 * 1000.0 / 4.5 / 1e6, 1e-12);
        approx(result.axial_stress, 0.066_667, 1e-6);
        approx(result.von_mises, result.axial_stress, 1e-15);
    }

    #[test]
    fn test_bending_superposes_on_axial() {
        let c = component(
            ComponentKind::Column,
            vec![
                Load::new("P", 150.0, LoadDirection::Axial),
                Load::new("M", 50.0, LoadDirection::Moment),
            ],
        );
        let result = analyze_component(&c, Some(&steel()));
        let axial = 150.0 * 1000.0 / 1.5 / 1e6;
        let bending = 6.0 * 50.0 * 1000.0 / 4.5 / 1e6;
        approx(result.axial_stress, axial + bending, 1e-12);
    }

    #[test]
    fn test_von_mises_combines_shear() {
        let c = component(
            ComponentKind::Column,
            vec![
                Load::new("P", 300.0, LoadDirection::Axial),
                Load::new("V", 150.0, LoadDirection::Shear),
            ],
        );
        let result = analyze_component(&c, Some(&steel()));
        // Area 1.5 m²: σ = 0.2 MPa, τ = 0.1 MPa
        approx(result.axial_stress, 0.2, 1e-12);
        approx(result.shear_stress, 0.1, 1e-12);
        approx(result.von_mises, (0.04_f64 + 3.0 * 0.01).sqrt(), 1e-12);
    }

    #[test]
    fn test_negative_shear_reported_raw_but_ignored_in_von_mises() {
        let c = component(
            ComponentKind::Column,
            vec![
                Load::new("P", 300.0, LoadDirection::Axial),
                Load::new("V", -150.0, LoadDirection::Shear),
            ],
        );
        let result = analyze_component(&c, Some(&steel()));
        approx(result.shear_stress, -0.1, 1e-12);
        // Only the axial term survives
        approx(result.von_mises, 0.2, 1e-12);
    }

    #[test]
    fn test_negative_combined_axial_clamped_in_von_mises() {
        let c = component(ComponentKind::Column, vec![Load::new("T", -300.0, LoadDirection::Axial)]);
        let result = analyze_component(&c, Some(&steel()));
        approx(result.axial_stress, -0.2, 1e-12);
        assert_eq!(result.von_mises, 0.0);
        assert_eq!(result.utilization, 0.0);
        assert!(result.has_unbounded_safety_factor());
    }

    #[test]
    fn test_zero_geometry_is_floored() {
        let mut c = component(
            ComponentKind::Beam,
            vec![
                Load::new("P", 1.0, LoadDirection::Axial),
                Load::new("V", 1.0, LoadDirection::Shear),
                Load::new("M", 1.0, LoadDirection::Moment),
            ],
        );
        c.width = 0.0;
        c.height = 0.0;
        let result = analyze_component(&c, Some(&steel()));
        // 1 kN over 1e-4 m² = 10 MPa for both axial and bending terms
        approx(result.axial_stress, 1000.0 / MIN_AREA_M2 / 1e6 + 6.0 * 1000.0 / MIN_AREA_M2 / 1e6, 1e-9);
        approx(result.shear_stress, 10.0, 1e-9);
        assert!(result.von_mises.is_finite());
        assert!(result.utilization.is_finite());
    }

    #[test]
    fn test_negative_geometry_keeps_negative_bending_denominator() {
        let mut c = component(ComponentKind::Beam, vec![Load::new("M", 1.0, LoadDirection::Moment)]);
        c.width = -1.0;
        c.height = 1.0;
        let result = analyze_component(&c, Some(&steel()));
        // Area floors to the minimum but b·h² = -1 passes through
        approx(result.axial_stress, -6.0 * 1000.0 / 1e6, 1e-12);
        assert_eq!(result.von_mises, 0.0);
    }

    #[test]
    fn test_undefined_area_reports_no_stress() {
        for (width, height) in [(f64::NAN, 1.0), (f64::INFINITY, 0.0)] {
            let c = component(ComponentKind::Beam, vec![Load::new("P", 100.0, LoadDirection::Axial)])
                .with_section(width, height);
            let result = analyze_component(&c, Some(&steel()));
            assert_eq!(result.axial_stress, 0.0);
            assert_eq!(result.shear_stress, 0.0);
            assert_eq!(result.von_mises, 0.0);
            assert_eq!(result.utilization, 0.0);
            assert!(result.has_unbounded_safety_factor());
            assert_eq!(result.band(), UtilizationBand::Low);
        }
    }

    #[test]
    fn test_missing_material_uses_unit_capacity() {
        let c = component(ComponentKind::Beam, vec![Load::new("P", 100.0, LoadDirection::Axial)]);
        let result = analyze_component(&c, None);
        approx(result.utilization, result.von_mises, 1e-15);
        assert!(result.utilization.is_finite());
    }

    #[test]
    fn test_zero_yield_gives_zero_utilization() {
        let mut weak = steel();
        weak.yield_strength_mpa = 0.0;
        let c = component(ComponentKind::Beam, vec![Load::new("P", 100.0, LoadDirection::Axial)]);
        let result = analyze_component(&c, Some(&weak));
        assert!(result.von_mises > 0.0);
        assert_eq!(result.utilization, 0.0);
        assert!(result.has_unbounded_safety_factor());
    }

    #[test]
    fn test_non_finite_loads_normalize() {
        let c = component(
            ComponentKind::Beam,
            vec![
                Load::new("Inf", f64::INFINITY, LoadDirection::Axial),
                Load::new("NegInf", f64::NEG_INFINITY, LoadDirection::Axial),
                Load::new("NaN", f64::NAN, LoadDirection::Shear),
            ],
        );
        let result = analyze_component(&c, Some(&steel()));
        assert_eq!(result.axial_stress, 0.0);
        assert_eq!(result.shear_stress, 0.0);
        assert_eq!(result.von_mises, 0.0);
        assert_eq!(result.utilization, 0.0);
        assert!(result.has_unbounded_safety_factor());
    }

    #[test]
    fn test_overflowing_stress_reports_zero_with_zero_safety() {
        let c = component(ComponentKind::Beam, vec![Load::new("Huge", 1e165, LoadDirection::Axial)]);
        let result = analyze_component(&c, Some(&steel()));
        // σ is finite, σ² overflows: von Mises and utilization are infinite pre-guard
        assert!(result.axial_stress.is_finite());
        assert_eq!(result.von_mises, 0.0);
        assert_eq!(result.utilization, 0.0);
        assert_eq!(result.safety_factor, 0.0);
    }

    #[test]
    fn test_compute_preserves_order_and_resolves_last_duplicate() {
        let mut strong = steel();
        strong.yield_strength_mpa = 710.0;
        let a = component(ComponentKind::Beam, vec![Load::new("P", 100.0, LoadDirection::Axial)]);
        let b = component(ComponentKind::Wall, vec![]);
        let results = compute(&[a.clone(), b.clone()], &[steel(), strong]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].component_id, a.id);
        assert_eq!(results[1].component_id, b.id);
        approx(results[0].utilization, results[0].von_mises / 710.0, 1e-15);
    }

    #[test]
    fn test_result_serialization() {
        let c = component(ComponentKind::Wall, vec![]);
        let result = analyze_component(&c, Some(&steel()));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"safety_factor\":null"));
        let roundtrip: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
