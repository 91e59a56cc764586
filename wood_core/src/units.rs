//! # Unit Types
//!
//! Type-safe wrappers for the SI quantities used by the moisture calculations.
//! These are plain `f64` newtypes: JSON serialization stays a bare number and
//! there is no runtime overhead.
//!
//! ## Units
//!
//! - Length: metres (m)
//! - Volume: cubic metres (m³)
//! - Density: kilograms per cubic metre (kg/m³)
//! - Mass: kilograms (kg)
//! - Moisture content: percent of oven-dry mass (%)
//!
//! `Display` prints two decimals followed by the unit symbol, which is the
//! format results are reported in.
//!
//! ## Example
//!
//! ```rust
//! use wood_core::units::{CubicMeters, KgPerCubicMeter, Kilograms};
//!
//! let volume = CubicMeters(0.02);
//! let density = KgPerCubicMeter(500.0);
//! let mass: Kilograms = volume * density;
//! assert_eq!(mass.0, 10.0);
//! assert_eq!(mass.to_string(), "10.00 kg");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

// ============================================================================
// Geometry
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl CubicMeters {
    /// Volume of a rectangular prism
    pub fn of_prism(width: Meters, depth: Meters, length: Meters) -> Self {
        CubicMeters(width.0 * depth.0 * length.0)
    }
}

// ============================================================================
// Density and Mass
// ============================================================================

/// Density in kilograms per cubic metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerCubicMeter(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl Mul<KgPerCubicMeter> for CubicMeters {
    type Output = Kilograms;
    fn mul(self, rhs: KgPerCubicMeter) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Moisture
// ============================================================================

/// Moisture content as a percentage of oven-dry mass (12.5 means 12.5 %)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Fractional form (12.5 % -> 0.125)
    pub fn as_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

// ============================================================================
// Display
// ============================================================================

macro_rules! impl_display {
    ($type:ty, $symbol:expr) => {
        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2} {}", self.0, $symbol)
            }
        }
    };
}

impl_display!(Meters, "m");
impl_display!(CubicMeters, "m³");
impl_display!(KgPerCubicMeter, "kg/m³");
impl_display!(Kilograms, "kg");
impl_display!(Percent, "%");

macro_rules! impl_value {
    ($type:ty) => {
        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_value!(Meters);
impl_value!(CubicMeters);
impl_value!(KgPerCubicMeter);
impl_value!(Kilograms);
impl_value!(Percent);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prism_volume() {
        let volume = CubicMeters::of_prism(Meters(0.05), Meters(0.15), Meters(2.5));
        assert!((volume.0 - 0.01875).abs() < 1e-12);
    }

    #[test]
    fn test_volume_times_density() {
        let mass = CubicMeters(0.5) * KgPerCubicMeter(600.0);
        assert_eq!(mass, Kilograms(300.0));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(KgPerCubicMeter(557.0815).to_string(), "557.08 kg/m³");
        assert_eq!(Kilograms(10.4453).to_string(), "10.45 kg");
        assert_eq!(Percent(18.0).to_string(), "18.00 %");
    }

    #[test]
    fn test_raw_value() {
        assert_eq!(Kilograms(10.45).value(), 10.45);
        assert_eq!(CubicMeters::of_prism(Meters(1.0), Meters(2.0), Meters(3.0)).value(), 6.0);
    }

    #[test]
    fn test_serialization() {
        let density = KgPerCubicMeter(512.5);
        let json = serde_json::to_string(&density).unwrap();
        assert_eq!(json, "512.5");

        let roundtrip: KgPerCubicMeter = serde_json::from_str(&json).unwrap();
        assert_eq!(density, roundtrip);
    }
}
