//! Utilization bands for display.

use serde::{Deserialize, Serialize};

/// Display band of a utilization ratio.
///
/// Bands are closed-open: `[0.5, 0.8)` is medium, `[0.8, 1.0)` is high.
/// Anything below 0.5, including negatives, and any non-finite value is
/// low.
///
/// ```rust
/// use studio_core::analysis::UtilizationBand;
///
/// assert_eq!(UtilizationBand::classify(0.4999), UtilizationBand::Low);
/// assert_eq!(UtilizationBand::classify(0.5), UtilizationBand::Medium);
/// assert_eq!(UtilizationBand::classify(1.0), UtilizationBand::Critical);
/// assert_eq!(UtilizationBand::classify(f64::NAN), UtilizationBand::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationBand {
    Low,
    Medium,
    High,
    Critical,
}

impl UtilizationBand {
    pub const MEDIUM_THRESHOLD: f64 = 0.5;
    pub const HIGH_THRESHOLD: f64 = 0.8;
    pub const CRITICAL_THRESHOLD: f64 = 1.0;

    /// Classify a utilization ratio. Total over all `f64` values.
    pub fn classify(utilization: f64) -> UtilizationBand {
        if !utilization.is_finite() || utilization < Self::MEDIUM_THRESHOLD {
            UtilizationBand::Low
        } else if utilization < Self::HIGH_THRESHOLD {
            UtilizationBand::Medium
        } else if utilization < Self::CRITICAL_THRESHOLD {
            UtilizationBand::High
        } else {
            UtilizationBand::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UtilizationBand::Low => "low",
            UtilizationBand::Medium => "medium",
            UtilizationBand::High => "high",
            UtilizationBand::Critical => "critical",
        }
    }

    /// Display color (hex)
    pub fn color_hex(&self) -> &'static str {
        match self {
            UtilizationBand::Low => "#28a745",
            UtilizationBand::Medium => "#ffc107",
            UtilizationBand::High => "#fd7e14",
            UtilizationBand::Critical => "#dc3545",
        }
    }
}

impl std::fmt::Display for UtilizationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Shorthand for [`UtilizationBand::classify`].
pub fn classify(utilization: f64) -> UtilizationBand {
    UtilizationBand::classify(utilization)
}
