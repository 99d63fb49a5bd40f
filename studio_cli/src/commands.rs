//! CLI command implementations.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use studio_core::analysis::{AnalysisResult, AnalysisSummary};
use studio_core::components::{ComponentKind, ComponentUpdate, Position};
use studio_core::file_io::{load_sketch, load_sketch_with_lock_check, save_sketch, FileLock, SKETCH_EXTENSION};
use studio_core::loads::{LoadDirection, LoadUpdate};
use studio_core::materials::MaterialId;
use studio_core::report::{build_report, format_safety_factor};
use studio_core::sketch::{Action, Sketch};
use studio_core::{StudioError, StudioResult};

fn lock_owner() -> String {
    whoami::fallible::username().unwrap_or_else(|_| "studio".to_string())
}

/// Load, edit and save a sketch while holding its lock.
fn edit_sketch<T>(path: &Path, edit: impl FnOnce(&Sketch) -> StudioResult<(Sketch, T)>) -> StudioResult<(Sketch, T)> {
    let _lock = FileLock::acquire(path, lock_owner())?;
    let sketch = load_sketch(path)?;
    let (next, out) = edit(&sketch)?;
    save_sketch(&next, path)?;
    Ok((next, out))
}

/// Write a new sketch file. A path without an extension gets `.sketch`.
pub fn new_sketch(path: &Path, title: &str) -> StudioResult<()> {
    let path = match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension(SKETCH_EXTENSION),
    };
    let path = path.as_path();

    if path.exists() {
        return Err(StudioError::file_error(
            "create",
            path.display().to_string(),
            "File already exists",
        ));
    }

    let sketch = Sketch::new(title);
    save_sketch(&sketch, path)?;

    println!("Created {} ({} materials)", path.display(), sketch.materials.len());
    Ok(())
}

/// Place a component with its kind's defaults.
pub fn add_component(path: &Path, kind: ComponentKind, x: f64, y: f64) -> StudioResult<()> {
    let (sketch, id) = edit_sketch(path, |sketch| sketch.with_component(kind, Position::new(x, y)))?;

    if let Some(component) = sketch.component(&id) {
        println!(
            "Added {} at ({:.1}%, {:.1}%)",
            component.name, component.position.x, component.position.y
        );
        println!("  {}", component.kind.description());
    }
    println!("Key: {id}");
    Ok(())
}

/// Add a load and apply the requested overrides.
pub fn add_load(
    path: &Path,
    component_id: Uuid,
    magnitude: Option<f64>,
    direction: LoadDirection,
    label: Option<String>,
) -> StudioResult<()> {
    let (sketch, load_id) = edit_sketch(path, |sketch| {
        let (next, load_id) = sketch.with_load(component_id)?;
        let next = next.apply(Action::UpdateLoad {
            component_id,
            load_id,
            update: LoadUpdate {
                label,
                magnitude,
                direction: Some(direction),
            },
        })?;
        Ok((next, load_id))
    })?;

    let load = sketch
        .component(&component_id)
        .and_then(|c| c.find_load(&load_id))
        .ok_or_else(|| StudioError::load_not_found(component_id, load_id))?;
    println!(
        "Added {} ({} {} {})",
        load.label,
        load.magnitude,
        load.direction.unit(),
        load.direction
    );
    println!("Key: {load_id}");
    Ok(())
}

/// Print the per-component results and the summary.
pub fn analyze(path: &Path, json: bool) -> StudioResult<()> {
    let (sketch, lock) = load_sketch_with_lock_check(path)?;
    if let Some(lock) = lock {
        warn!(user = %lock.user_id, "sketch is being edited elsewhere, results may be stale");
    }

    let results = sketch.analyze();
    info!(components = results.len(), "analysis complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_results(&sketch, &results);
    Ok(())
}

/// Print the report, or write it to `output`.
pub fn report(path: &Path, output: Option<&Path>) -> StudioResult<()> {
    let sketch = load_sketch(path)?;
    let text = build_report(&sketch, &sketch.analyze(), Utc::now());

    match output {
        Some(out) => {
            std::fs::write(out, &text)
                .map_err(|e| StudioError::file_error("write", out.display().to_string(), e.to_string()))?;
            println!("Report written to: {}", out.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Build the reference sketch: a steel beam under 100 kN axial load and a
/// concrete column under a 50 kN·m moment.
pub fn demo() -> StudioResult<()> {
    let (sketch, beam) = Sketch::new("Demo").with_component(ComponentKind::Beam, Position::new(30.0, 40.0))?;
    let (sketch, beam_load) = sketch.with_load(beam)?;
    let (sketch, column) = sketch.with_component(ComponentKind::Column, Position::new(70.0, 40.0))?;
    let (sketch, column_load) = sketch.with_load(column)?;

    let sketch = sketch.apply_all([
        Action::UpdateComponent {
            component_id: beam,
            update: ComponentUpdate {
                material_id: Some(MaterialId::new("steel-s355")),
                ..Default::default()
            },
        },
        Action::UpdateLoad {
            component_id: beam,
            load_id: beam_load,
            update: LoadUpdate {
                magnitude: Some(100.0),
                ..Default::default()
            },
        },
        Action::UpdateLoad {
            component_id: column,
            load_id: column_load,
            update: LoadUpdate {
                label: Some("Eccentricity".to_string()),
                magnitude: Some(50.0),
                direction: Some(LoadDirection::Moment),
            },
        },
    ])?;

    let results = sketch.analyze();
    print_results(&sketch, &results);

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn print_results(sketch: &Sketch, results: &[AnalysisResult]) {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  {}", sketch.meta.title.to_uppercase());
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    if results.is_empty() {
        println!("No components.");
        return;
    }

    println!(
        "  {:<14} {:>10} {:>10} {:>10} {:>8} {:>10}  {}",
        "Component", "Axial", "Shear", "VonMises", "Util", "SF", "Band"
    );
    println!("  {:<14} {:>10} {:>10} {:>10} {:>8}", "", "MPa", "MPa", "MPa", "%");
    for result in results {
        let name = sketch
            .component(&result.component_id)
            .map_or("?", |c| c.name.as_str());
        println!(
            "  {:<14} {:>10.3} {:>10.3} {:>10.3} {:>8.1} {:>10}  {} {}",
            name,
            result.axial_stress,
            result.shear_stress,
            result.von_mises,
            result.utilization * 100.0,
            format_safety_factor(result.safety_factor),
            result.band(),
            status_icon(result.passes())
        );
    }

    let summary = AnalysisSummary::from_results(results);
    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!(
        "  OVERALL: {:.1}% ({}), max {:.1}%, {} critical",
        summary.overall_utilization * 100.0,
        summary.overall_band(),
        summary.max_utilization * 100.0,
        summary.critical_count
    );
    println!("  {}", utilization_bar(summary.overall_percent_capped()));
    println!("═══════════════════════════════════════════════════════════════════");
}

/// Forty-column bar for a 0-100 percentage.
fn utilization_bar(percent: f64) -> String {
    const WIDTH: usize = 40;
    let filled = ((percent.max(0.0) / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
