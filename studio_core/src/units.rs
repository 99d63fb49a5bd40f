//! # Unit Types
//!
//! Type-safe wrappers for the SI units the analysis engine works in. These
//! are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Units
//!
//! - Length: meters (m)
//! - Area / section modulus basis: m², m³
//! - Force: kilonewtons (kN) as entered, newtons (N) internally
//! - Moment: kilonewton-meters (kN·m) as entered, newton-meters (N·m) internally
//! - Stress: pascals (Pa) internally, megapascals (MPa) as reported
//!
//! ## Example
//!
//! ```rust
//! use studio_core::units::{Kilonewtons, Megapascals, Newtons, SquareMeters};
//!
//! let force: Newtons = Kilonewtons(100.0).into();
//! let stress: Megapascals = (force / SquareMeters(3.6)).into();
//! assert!((stress.0 - 0.027_777_8).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::numeric::{N_PER_KN, PA_PER_MPA};

// ============================================================================
// Geometry
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume-dimensioned section property in cubic meters (e.g. b·h²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Force and Moment
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

/// Moment in newton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * N_PER_KN)
    }
}

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / N_PER_KN)
    }
}

impl From<KilonewtonMeters> for NewtonMeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMeters(knm.0 * N_PER_KN)
    }
}

// ============================================================================
// Stress
// ============================================================================

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / PA_PER_MPA)
    }
}

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * PA_PER_MPA)
    }
}

impl Div<SquareMeters> for Newtons {
    type Output = Pascals;
    fn div(self, rhs: SquareMeters) -> Pascals {
        Pascals(self.0 / rhs.0)
    }
}

impl Div<CubicMeters> for NewtonMeters {
    type Output = Pascals;
    fn div(self, rhs: CubicMeters) -> Pascals {
        Pascals(self.0 / rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(Newtons);
impl_arithmetic!(KilonewtonMeters);
impl_arithmetic!(NewtonMeters);
impl_arithmetic!(Pascals);
impl_arithmetic!(Megapascals);
