//! # Unit Types
//!
//! Type-safe wrappers for the units the estimator works in. Inputs arrive in
//! imperial units (feet, inches, square feet) because that is how residential
//! plots and members are specified on site; every quantity the engine
//! produces is metric.
//!
//! ## Conversion Factors
//!
//! - 1 ft = 0.3048 m
//! - 1 in = 0.0254 m
//! - 1 sqft = 0.092903 m²
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Feet, Inches, Meters};
//!
//! let depth: Meters = Feet(1.0).into();
//! assert!((depth.0 - 0.3048).abs() < 1e-12);
//!
//! let thickness: Meters = Inches(3.0).into();
//! assert!((thickness.0 - 0.0762).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Metres per foot
pub const FT_TO_M: f64 = 0.3048;

/// Metres per inch
pub const INCH_TO_M: f64 = 0.0254;

/// Square metres per square foot
pub const SQFT_TO_SQM: f64 = 0.092903;

// ============================================================================
// Imperial Units (inputs)
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

// ============================================================================
// Metric Units (outputs)
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * FT_TO_M)
    }
}

impl From<Inches> for Meters {
    fn from(inches: Inches) -> Self {
        Meters(inches.0 * INCH_TO_M)
    }
}

impl From<SqFt> for SqMeters {
    fn from(sqft: SqFt) -> Self {
        SqMeters(sqft.0 * SQFT_TO_SQM)
    }
}

impl Mul for Meters {
    type Output = SqMeters;
    fn mul(self, rhs: Meters) -> SqMeters {
        SqMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SqMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
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

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);
impl_arithmetic!(Meters);
impl_arithmetic!(SqMeters);
impl_arithmetic!(CubicMeters);

/// Round a value to a fixed number of decimal places.
///
/// Rounding is a presentation step: derivations run at full precision and
/// call this once when a quantity is stored in a snapshot.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
