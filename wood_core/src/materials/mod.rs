//! # Wood Materials
//!
//! A [`WoodMaterial`] is the set of physical properties the moisture
//! calculations need: oven-dry specific gravity and fibre saturation point.
//! Materials are immutable values; a parameter sweep builds a fresh material
//! for every specific gravity it evaluates.
//!
//! ## Example
//!
//! ```rust
//! use wood_core::materials::{WoodMaterial, WoodSpecies};
//!
//! let custom = WoodMaterial::new("Southern yellow pine", 0.55, 30.0);
//! let preset = WoodSpecies::SouthernPine.material();
//! assert_eq!(custom.specific_gravity, preset.specific_gravity);
//!
//! let denser = custom.with_specific_gravity(0.70);
//! assert_eq!(denser.specific_gravity, 0.70);
//! assert_eq!(custom.specific_gravity, 0.55);
//! ```

pub mod species;

pub use species::{WoodSpecies, TYPICAL_FIBRE_SATURATION_POINT};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::validation::require_non_negative;

/// Physical properties of a wood material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Southern Pine",
///   "specific_gravity": 0.55,
///   "fibre_saturation_point": 30.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoodMaterial {
    /// Descriptive name (e.g., "Southern Pine")
    pub name: String,

    /// Oven-dry specific gravity (density relative to water)
    pub specific_gravity: f64,

    /// Fibre saturation point as a percentage (e.g., 30.0)
    pub fibre_saturation_point: f64,
}

impl WoodMaterial {
    /// Create a new material.
    pub fn new(name: impl Into<String>, specific_gravity: f64, fibre_saturation_point: f64) -> Self {
        WoodMaterial {
            name: name.into(),
            specific_gravity,
            fibre_saturation_point,
        }
    }

    /// Copy of this material with a different specific gravity.
    pub fn with_specific_gravity(&self, specific_gravity: f64) -> Self {
        WoodMaterial {
            name: self.name.clone(),
            specific_gravity,
            fibre_saturation_point: self.fibre_saturation_point,
        }
    }

    /// Validate material properties.
    ///
    /// Both properties must be finite and non-negative. A zero fibre saturation
    /// point is accepted here; density models that divide by it reject it
    /// themselves.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative(
            "specific_gravity",
            self.specific_gravity,
            "Specific gravity must be non-negative",
        )?;
        require_non_negative(
            "fibre_saturation_point",
            self.fibre_saturation_point,
            "Fibre saturation point must be non-negative",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_fsp_rejected() {
        let material = WoodMaterial::new("Test", 0.7, -25.0);
        let err = material.validate().unwrap_err();
        assert_eq!(err.field(), "fibre_saturation_point");
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_negative_specific_gravity_rejected() {
        let material = WoodMaterial::new("Test", -0.1, 30.0);
        assert_eq!(material.validate().unwrap_err().field(), "specific_gravity");
    }

    #[test]
    fn test_zero_fsp_is_valid_material() {
        assert!(WoodMaterial::new("Test", 0.5, 0.0).validate().is_ok());
    }

    #[test]
    fn test_with_specific_gravity_keeps_other_fields() {
        let base = WoodMaterial::new("Oak", 0.6, 28.0);
        let varied = base.with_specific_gravity(0.8);
        assert_eq!(varied.name, "Oak");
        assert_eq!(varied.fibre_saturation_point, 28.0);
        assert_ne!(varied, base);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let material = WoodMaterial::new("Southern Pine", 0.55, 30.0);
        let json = serde_json::to_string(&material).unwrap();
        assert!(json.contains("fibre_saturation_point"));
        let roundtrip: WoodMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(material, roundtrip);
    }
}
