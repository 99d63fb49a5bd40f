//! # Text Report
//!
//! Plain-text snapshot of a sketch: header, material library, then one
//! block per component with its inputs and, when available, its analysis
//! result.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use studio_core::report::build_report;
//! use studio_core::sketch::Sketch;
//!
//! let sketch = Sketch::new("Empty");
//! let generated = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
//! let text = build_report(&sketch, &sketch.analyze(), generated);
//!
//! assert!(text.starts_with("Structural Design Summary\nMode: 2D Plan\n"));
//! assert!(text.contains("- Structural Steel S355: Density 7850 kg/m3, E 200 GPa, Yield 355 MPa"));
//! ```

use chrono::{DateTime, Utc};

use crate::analysis::AnalysisResult;
use crate::components::StructuralComponent;
use crate::loads::Load;
use crate::sketch::Sketch;

/// Assemble the report text.
///
/// Results are matched to components by key, so a component without a
/// result (e.g. a stale result set) simply omits its analysis lines.
pub fn build_report(sketch: &Sketch, results: &[AnalysisResult], generated_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Structural Design Summary".to_string());
    lines.push(format!("Mode: {}", sketch.settings.view_mode.display_name()));
    lines.push(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    lines.push(String::new());

    lines.push("Materials:".to_string());
    for material in &sketch.materials {
        lines.push(format!(
            "- {}: Density {} kg/m3, E {} GPa, Yield {} MPa",
            material.name, material.density, material.elastic_modulus_gpa, material.yield_strength_mpa
        ));
    }
    lines.push(String::new());

    lines.push("Components:".to_string());
    for component in &sketch.components {
        let result = results.iter().find(|r| r.component_id == component.id);
        push_component(&mut lines, component, result);
        lines.push(String::new());
    }

    lines.join("\n")
}

fn push_component(lines: &mut Vec<String>, component: &StructuralComponent, result: Option<&AnalysisResult>) {
    lines.push(format!(
        "- {} ({}) @ ({:.1}%, {:.1}%)",
        component.name, component.kind, component.position.x, component.position.y
    ));
    lines.push(format!(
        "  Geometry: {:.2}m x {:.2}m x {:.2}m",
        component.width, component.height, component.depth
    ));
    lines.push(format!("  Material: {}", component.material_id));
    lines.push(format!(
        "  Constraint: {}, Rotation: {:.0}°",
        component.constraint, component.rotation
    ));
    lines.push(format!("  Loads: {}", describe_loads(&component.loads)));

    if let Some(result) = result {
        lines.push(format!(
            "  Analysis: Axial {:.2} MPa, Shear {:.2} MPa, Von Mises {:.2} MPa",
            result.axial_stress, result.shear_stress, result.von_mises
        ));
        lines.push(format!(
            "  Utilization: {:.1}%, Safety Factor {}",
            result.utilization * 100.0,
            format_safety_factor(result.safety_factor)
        ));
    }
}

fn describe_loads(loads: &[Load]) -> String {
    if loads.is_empty() {
        return "None".to_string();
    }
    loads
        .iter()
        .map(|load| format!("{} ({:.1} kN {})", load.label, load.magnitude, load.direction))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Two decimals, or "Infinity" for the unbounded sentinel.
pub fn format_safety_factor(safety_factor: f64) -> String {
    if safety_factor.is_infinite() {
        "Infinity".to_string()
    } else {
        format!("{:.2}", safety_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, Position};
    use crate::loads::{LoadDirection, LoadUpdate};
    use crate::sketch::Action;
    use chrono::TimeZone;

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn loaded_beam_sketch() -> Sketch {
        let mut sketch = Sketch::new("Report");
        sketch.materials.retain(|m| m.id.as_str() == "steel-s355");
        let (sketch, id) = sketch
            .with_component(ComponentKind::Beam, Position::new(25.0, 75.5))
            .unwrap();
        let (sketch, load_id) = sketch.with_load(id).unwrap();
        sketch
            .apply(Action::UpdateLoad {
                component_id: id,
                load_id,
                update: LoadUpdate {
                    magnitude: Some(100.0),
                    direction: Some(LoadDirection::Axial),
                    ..Default::default()
                },
            })
            .unwrap()
    }

    #[test]
    fn test_full_report_layout() {
        let sketch = loaded_beam_sketch();
        let text = build_report(&sketch, &sketch.analyze(), generated());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Structural Design Summary");
        assert_eq!(lines[1], "Mode: 2D Plan");
        assert_eq!(lines[2], "Generated: 2025-06-01 12:00:00 UTC");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Materials:");
        assert_eq!(
            lines[5],
            "- Structural Steel S355: Density 7850 kg/m3, E 200 GPa, Yield 355 MPa"
        );
        assert_eq!(lines[7], "Components:");
        assert_eq!(lines[8], "- Beam 1 (beam) @ (25.0%, 75.5%)");
        assert_eq!(lines[9], "  Geometry: 6.00m x 0.60m x 0.40m");
        assert_eq!(lines[10], "  Material: steel-s355");
        assert_eq!(lines[11], "  Constraint: pinned, Rotation: 0°");
        assert_eq!(lines[12], "  Loads: Load 1 (100.0 kN axial)");
        assert_eq!(lines[13], "  Analysis: Axial 0.03 MPa, Shear 0.00 MPa, Von Mises 0.03 MPa");
        assert_eq!(lines[14], "  Utilization: 0.0%, Safety Factor 12780.00");
    }

    #[test]
    fn test_unloaded_component() {
        let (sketch, _) = Sketch::new("Bare")
            .with_component(ComponentKind::Support, Position::new(0.0, 0.0))
            .unwrap();
        let text = build_report(&sketch, &sketch.analyze(), generated());
        assert!(text.contains("  Loads: None"));
        assert!(text.contains("  Constraint: fixed, Rotation: 0°"));
        assert!(text.contains("Safety Factor Infinity"));
    }

    #[test]
    fn test_missing_result_omits_analysis_lines() {
        let sketch = loaded_beam_sketch();
        let text = build_report(&sketch, &[], generated());
        assert!(text.contains("- Beam 1 (beam)"));
        assert!(!text.contains("Analysis:"));
        assert!(!text.contains("Utilization:"));
    }

    #[test]
    fn test_perspective_mode_header() {
        let sketch = Sketch::new("3D")
            .apply(Action::SetViewMode {
                mode: crate::sketch::ViewMode::Perspective3d,
            })
            .unwrap();
        let text = build_report(&sketch, &[], generated());
        assert!(text.contains("Mode: 3D Perspective"));
    }

    #[test]
    fn test_format_safety_factor() {
        assert_eq!(format_safety_factor(f64::INFINITY), "Infinity");
        assert_eq!(format_safety_factor(1.23456), "1.23");
    }
}
