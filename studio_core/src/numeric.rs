//! # Numeric Safety
//!
//! Small helpers that keep the analysis engine total: every stress value it
//! reports is finite, and no denominator is zero. An undefined (NaN) area is
//! left undefined and ends up reported as zero stress.

/// Minimum cross-sectional area (m²) used in stress denominators.
pub const MIN_AREA_M2: f64 = 1e-4;

/// Newtons per kilonewton.
pub const N_PER_KN: f64 = 1000.0;

/// Pascals per megapascal.
pub const PA_PER_MPA: f64 = 1e6;

/// Safety factor reported when a component carries no rated stress.
pub const UNBOUNDED_SAFETY_FACTOR: f64 = f64::INFINITY;

/// Floor an area at [`MIN_AREA_M2`]. NaN passes through so the result
/// guards downstream report it as zero stress.
///
/// ```rust
/// use studio_core::numeric::{floor_area, MIN_AREA_M2};
///
/// assert_eq!(floor_area(3.6), 3.6);
/// assert_eq!(floor_area(0.0), MIN_AREA_M2);
/// assert_eq!(floor_area(-2.0), MIN_AREA_M2);
/// assert!(floor_area(f64::NAN).is_nan());
/// ```
pub fn floor_area(area: f64) -> f64 {
    if area.is_nan() {
        area
    } else {
        area.max(MIN_AREA_M2)
    }
}

/// Replace a zero (or NaN) denominator with [`MIN_AREA_M2`].
///
/// Unlike [`floor_area`] a negative value passes through unchanged.
pub fn nonzero_or_min(denominator: f64) -> f64 {
    if denominator == 0.0 || denominator.is_nan() {
        MIN_AREA_M2
    } else {
        denominator
    }
}

/// `max(x, 0)` that keeps NaN as NaN instead of swallowing it.
pub fn clamp_non_negative(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else {
        x.max(0.0)
    }
}

/// Return `x` if finite, otherwise `fallback`.
pub fn finite_or(x: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}

/// Return `x` if finite, otherwise `0.0`.
pub fn finite_or_zero(x: f64) -> f64 {
    finite_or(x, 0.0)
}

/// Serde adapter for a safety factor: the unbounded sentinel travels as
/// JSON `null` (JSON has no infinity) and comes back as the sentinel.
pub mod unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::UNBOUNDED_SAFETY_FACTOR;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.unwrap_or(UNBOUNDED_SAFETY_FACTOR))
    }
}
