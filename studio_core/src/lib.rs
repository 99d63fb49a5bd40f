//! # studio_core - Structural Sketch Analysis Engine
//!
//! `studio_core` is the computational heart of Structural Studio: users
//! place walls, beams, columns and supports on a workspace, assign
//! materials and loads, and get live approximate stress metrics back. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: The analysis engine is a pure, total function
//! - **Explicit state**: Edits are actions reduced into new sketch values
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types for actions and file I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use studio_core::analysis::UtilizationBand;
//! use studio_core::components::{ComponentKind, Position};
//! use studio_core::loads::{LoadDirection, LoadUpdate};
//! use studio_core::sketch::{Action, Sketch};
//!
//! let (sketch, beam) = Sketch::new("Demo")
//!     .with_component(ComponentKind::Beam, Position::new(50.0, 50.0))
//!     .unwrap();
//! let (sketch, load) = sketch.with_load(beam).unwrap();
//! let sketch = sketch
//!     .apply(Action::UpdateLoad {
//!         component_id: beam,
//!         load_id: load,
//!         update: LoadUpdate { magnitude: Some(100.0), direction: Some(LoadDirection::Axial), ..Default::default() },
//!     })
//!     .unwrap();
//!
//! let results = sketch.analyze();
//! assert_eq!(results[0].band(), UtilizationBand::Low);
//! ```
//!
//! ## Modules
//!
//! - [`analysis`] - Stress engine, utilization bands, summary, memo cache
//! - [`components`] - Structural component types
//! - [`loads`] - Loads and per-direction totals
//! - [`materials`] - Material records and the built-in library
//! - [`sketch`] - Sketch state container and actions
//! - [`report`] - Plain-text report assembly
//! - [`numeric`] - Numeric-safety helpers and constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod analysis;
pub mod components;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod numeric;
pub mod report;
pub mod sketch;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{classify, compute, AnalysisResult, AnalysisSummary, UtilizationBand};
pub use components::{ComponentKind, Constraint, Position, StructuralComponent};
pub use errors::{StudioError, StudioResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_sketch, save_sketch, FileLock};
pub use loads::{Load, LoadDirection};
pub use materials::{Material, MaterialId};
pub use sketch::{Action, Sketch};
