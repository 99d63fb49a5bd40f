//! Memoized recomputation.
//!
//! The host recomputes the full result set whenever components or materials
//! change. [`AnalysisCache`] makes that trigger explicit: it remembers the
//! last inputs by value and only calls [`compute`] when they differ. There
//! is no incremental path; a miss recomputes everything.

use tracing::{debug, trace};

use crate::components::StructuralComponent;
use crate::materials::Material;

use super::engine::{compute, AnalysisResult};

#[derive(Debug, Clone)]
struct CacheEntry {
    components: Vec<StructuralComponent>,
    materials: Vec<Material>,
    results: Vec<AnalysisResult>,
}

/// Single-entry memo for [`compute`], keyed on the two input sequences.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return results for these inputs, recomputing only if they changed
    /// since the previous call.
    ///
    /// ```rust
    /// use studio_core::analysis::AnalysisCache;
    /// use studio_core::materials::default_materials;
    ///
    /// let mut cache = AnalysisCache::new();
    /// assert!(cache.get_or_compute(&[], default_materials()).is_empty());
    /// cache.get_or_compute(&[], default_materials());
    /// assert_eq!((cache.hits(), cache.misses()), (1, 1));
    /// ```
    pub fn get_or_compute(&mut self, components: &[StructuralComponent], materials: &[Material]) -> &[AnalysisResult] {
        let fresh = matches!(
            &self.entry,
            Some(e) if e.components.as_slice() == components && e.materials.as_slice() == materials
        );

        if fresh {
            self.hits += 1;
            trace!(hits = self.hits, "analysis cache hit");
        } else {
            self.misses += 1;
            debug!(
                components = components.len(),
                materials = materials.len(),
                "analysis inputs changed, recomputing"
            );
            self.entry = Some(CacheEntry {
                components: components.to_vec(),
                materials: materials.to_vec(),
                results: compute(components, materials),
            });
        }

        match &self.entry {
            Some(e) => &e.results,
            None => &[],
        }
    }

    /// Drop the remembered inputs; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
