//! # Structural Analysis
//!
//! The analysis engine maps `(components, materials)` to one
//! [`AnalysisResult`] per component. It is a pure, total function: no I/O,
//! no shared state, no errors. The host calls it again from scratch
//! whenever either input changes ([`AnalysisCache`] memoizes that call).
//!
//! What it is not: a finite-element solver. Components are checked in
//! isolation with closed-form rectangular-section formulas; connectivity,
//! load paths, buckling and dynamics are not modeled, and the boundary
//! constraint label is never read.
//!
//! ## Modules
//!
//! - [`engine`] - per-component stress, utilization and safety factor
//! - [`utilization`] - display bands for utilization values
//! - [`summary`] - whole-sketch roll-up
//! - [`cache`] - memoized recomputation

pub mod cache;
pub mod engine;
pub mod summary;
pub mod utilization;

pub use cache::AnalysisCache;
pub use engine::{analyze_component, compute, AnalysisResult, MISSING_MATERIAL_CAPACITY_MPA};
pub use summary::AnalysisSummary;
pub use utilization::{classify, UtilizationBand};
