//! # Element Geometry
//!
//! Rectangular prism dimensions of a structural element, in metres.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::units::{CubicMeters, Meters};
use crate::validation::require_non_negative;

/// Dimensions of a rectangular wood element.
///
/// Zero dimensions are legal (the element simply has no volume).
///
/// ## JSON Example
///
/// ```json
/// { "name": "Joist J-1", "width_m": 0.05, "depth_m": 0.15, "length_m": 2.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementGeometry {
    /// User label for this element (e.g., "Joist J-1")
    pub name: String,

    /// Width in metres
    pub width_m: f64,

    /// Depth in metres
    pub depth_m: f64,

    /// Length in metres
    pub length_m: f64,
}

impl ElementGeometry {
    /// Create a new element.
    pub fn new(name: impl Into<String>, width_m: f64, depth_m: f64, length_m: f64) -> Self {
        ElementGeometry {
            name: name.into(),
            width_m,
            depth_m,
            length_m,
        }
    }

    /// Validate that every dimension is finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("width_m", self.width_m),
            ("depth_m", self.depth_m),
            ("length_m", self.length_m),
        ] {
            require_non_negative(field, value, "Element dimensions must be non-negative")?;
        }
        Ok(())
    }

    /// Volume V = w·d·L
    pub fn volume(&self) -> CubicMeters {
        CubicMeters::of_prism(Meters(self.width_m), Meters(self.depth_m), Meters(self.length_m))
    }

    /// Volume in cubic metres as a raw number
    pub fn volume_m3(&self) -> f64 {
        self.volume().value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume() {
        let element = ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5);
        assert!((element.volume_m3() - 0.01875).abs() < 1e-12);
    }

    #[test]
    fn test_each_negative_dimension_named() {
        let cases = [
            (ElementGeometry::new("w", -0.05, 0.15, 2.0), "width_m"),
            (ElementGeometry::new("d", 0.05, -0.15, 2.0), "depth_m"),
            (ElementGeometry::new("l", 0.05, 0.15, -2.0), "length_m"),
        ];
        for (element, field) in cases {
            let err = element.validate().unwrap_err();
            assert_eq!(err.field(), field);
            assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        }
    }

    #[test]
    fn test_zero_dimensions_valid() {
        let element = ElementGeometry::new("flat", 0.0, 0.15, 2.5);
        assert!(element.validate().is_ok());
        assert_eq!(element.volume_m3(), 0.0);
    }
}
