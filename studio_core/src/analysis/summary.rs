//! Whole-sketch roll-up of per-component results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::AnalysisResult;
use super::utilization::UtilizationBand;

/// Aggregate view over a set of analysis results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Number of analyzed components
    pub component_count: usize,

    /// Mean utilization over all components (0 when there are none)
    pub overall_utilization: f64,

    /// Highest single utilization (0 when there are none)
    pub max_utilization: f64,

    /// Component with the highest utilization; first wins on ties
    pub governing_component: Option<Uuid>,

    /// Components at or above yield
    pub critical_count: usize,
}

impl AnalysisSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let component_count = results.len();
        let overall_utilization = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.utilization).sum::<f64>() / component_count as f64
        };

        let governing = results.iter().fold(None::<&AnalysisResult>, |best, r| match best {
            Some(b) if b.utilization >= r.utilization => Some(b),
            _ => Some(r),
        });

        AnalysisSummary {
            component_count,
            overall_utilization,
            max_utilization: governing.map_or(0.0, |r| r.utilization),
            governing_component: governing.map(|r| r.component_id),
            critical_count: results
                .iter()
                .filter(|r| r.band() == UtilizationBand::Critical)
                .count(),
        }
    }

    /// Band of the mean utilization
    pub fn overall_band(&self) -> UtilizationBand {
        UtilizationBand::classify(self.overall_utilization)
    }

    /// Mean utilization as a percentage capped at 100 (progress-bar width)
    pub fn overall_percent_capped(&self) -> f64 {
        (self.overall_utilization * 100.0).min(100.0)
    }
}
