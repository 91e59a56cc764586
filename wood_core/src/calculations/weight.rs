//! # Element Weight at Moisture Content
//!
//! Mass of a rectangular wood element at a given moisture content:
//!
//! ```text
//! V = w · d · L            (m³)
//! W = V · ρ(mc)            (kg)
//! ```
//!
//! Density comes from [`crate::calculations::density`]; its validation errors
//! are passed through unchanged.
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use wood_core::calculations::weight::{calculate, WeightInput};
//! use wood_core::calculations::density::DensityModel;
//! use wood_core::geometry::ElementGeometry;
//! use wood_core::materials::WoodMaterial;
//!
//! let input = WeightInput {
//!     material: WoodMaterial::new("Southern Pine", 0.55, 30.0),
//!     element: ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5),
//!     moisture_content: 18.0,
//!     model: DensityModel::RatioForm,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Weight: {}", result.weight_kg);
//! assert!((result.weight_kg.0 - 10.45).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::density::{density_with_model, DensityModel};
use crate::errors::CalcResult;
use crate::geometry::ElementGeometry;
use crate::materials::WoodMaterial;
use crate::units::{CubicMeters, KgPerCubicMeter, Kilograms};
use crate::validation;

/// Weight of `element` made of `material` at `moisture_pct`, reference density model.
pub fn weight_at_moisture_content(
    material: &WoodMaterial,
    element: &ElementGeometry,
    moisture_pct: f64,
) -> CalcResult<f64> {
    weight_with_model(material, element, moisture_pct, DensityModel::RatioForm)
}

/// Weight of `element` made of `material` at `moisture_pct` using `model`.
pub fn weight_with_model(
    material: &WoodMaterial,
    element: &ElementGeometry,
    moisture_pct: f64,
    model: DensityModel,
) -> CalcResult<f64> {
    Ok(evaluate(material, element, moisture_pct, model)?.2.value())
}

/// Volume, density and weight in one pass.
fn evaluate(
    material: &WoodMaterial,
    element: &ElementGeometry,
    moisture_pct: f64,
    model: DensityModel,
) -> CalcResult<(CubicMeters, KgPerCubicMeter, Kilograms)> {
    validation::moisture_content(moisture_pct)?;
    element.validate()?;

    let volume = element.volume();
    let density = KgPerCubicMeter(density_with_model(material, moisture_pct, model)?);
    let weight = volume * density;
    trace!(volume_m3 = volume.0, weight_kg = weight.0, "weight evaluated");
    Ok((volume, density, weight))
}

/// Input parameters for a weight calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": { "name": "Southern Pine", "specific_gravity": 0.55, "fibre_saturation_point": 30.0 },
///   "element": { "name": "Pieza 1", "width_m": 0.05, "depth_m": 0.15, "length_m": 2.5 },
///   "moisture_content": 18.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightInput {
    /// Wood material
    pub material: WoodMaterial,

    /// Element dimensions
    pub element: ElementGeometry,

    /// Moisture content in percent
    pub moisture_content: f64,

    /// Density model (defaults to the ratio form)
    #[serde(default)]
    pub model: DensityModel,
}

impl WeightInput {
    /// JSON pointers of the fields that must be numbers
    pub const NUMERIC_FIELDS: [&'static str; 6] = [
        "/material/specific_gravity",
        "/material/fibre_saturation_point",
        "/element/width_m",
        "/element/depth_m",
        "/element/length_m",
        "/moisture_content",
    ];

    /// Build from an untyped JSON document, reporting non-numeric fields as `InvalidType`.
    pub fn from_json_value(value: serde_json::Value) -> CalcResult<Self> {
        validation::from_json_value(value, &Self::NUMERIC_FIELDS)
    }
}

/// Results from a weight calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_m3": 0.01875,
///   "density_kg_m3": 557.08,
///   "weight_kg": 10.45,
///   "model": "ratio_form"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightResult {
    /// Element volume in m³
    pub volume_m3: CubicMeters,

    /// Density at the requested moisture content, kg/m³
    pub density_kg_m3: KgPerCubicMeter,

    /// Element weight in kg
    pub weight_kg: Kilograms,

    /// Model used
    pub model: DensityModel,
}

/// Calculate weight for a [`WeightInput`].
pub fn calculate(input: &WeightInput) -> CalcResult<WeightResult> {
    debug!(
        material = %input.material.name,
        element = %input.element.name,
        moisture_pct = input.moisture_content,
        model = input.model.code(),
        "calculating weight"
    );
    let (volume, density, weight) =
        evaluate(&input.material, &input.element, input.moisture_content, input.model)?;
    Ok(WeightResult {
        volume_m3: volume,
        density_kg_m3: density,
        weight_kg: weight,
        model: input.model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pine() -> WoodMaterial {
        WoodMaterial::new("Southern Pine", 0.55, 30.0)
    }

    fn piece() -> ElementGeometry {
        ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5)
    }

    #[test]
    fn test_reference_scenario() {
        let input = WeightInput {
            material: pine(),
            element: piece(),
            moisture_content: 18.0,
            model: DensityModel::RatioForm,
        };
        let result = calculate(&input).unwrap();
        assert_relative_eq!(result.volume_m3.0, 0.01875, epsilon = 1e-12);
        assert!((result.density_kg_m3.0 - 557.08).abs() < 0.01);
        assert!((result.weight_kg.0 - 10.45).abs() < 0.01);
        assert_eq!(result.weight_kg.to_string(), "10.45 kg");
    }

    #[test]
    fn test_positive_weight() {
        let material = WoodMaterial::new("Test", 0.7, 25.0);
        let element = ElementGeometry::new("Test", 0.2, 0.05, 2.5);
        let weight = weight_at_moisture_content(&material, &element, 12.0).unwrap();
        assert!(weight > 0.0);
    }

    #[test]
    fn test_zero_width_gives_zero_weight() {
        let element = ElementGeometry::new("flat", 0.0, 0.15, 2.5);
        for mc in [0.0, 18.0, 60.0] {
            assert_eq!(weight_at_moisture_content(&pine(), &element, mc).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_negative_dimensions() {
        for element in [
            ElementGeometry::new("w", -0.05, 0.15, 2.0),
            ElementGeometry::new("d", 0.05, -0.15, 2.0),
            ElementGeometry::new("l", 0.05, 0.15, -2.0),
        ] {
            let err = weight_at_moisture_content(&pine(), &element, 10.0).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        }
    }

    #[test]
    fn test_negative_moisture_checked_first() {
        let element = ElementGeometry::new("w", -0.05, 0.15, 2.0);
        let err = weight_at_moisture_content(&pine(), &element, -5.0).unwrap_err();
        assert_eq!(err.field(), "moisture_content");
    }

    #[test]
    fn test_density_errors_propagate() {
        let material = WoodMaterial::new("Bad", 0.7, -25.0);
        let err = weight_at_moisture_content(&material, &piece(), 10.0).unwrap_err();
        assert_eq!(err.field(), "fibre_saturation_point");

        let zero_fsp = WoodMaterial::new("Zero", 0.5, 0.0);
        let err = weight_with_model(&zero_fsp, &piece(), 10.0, DensityModel::ShrinkageFactorForm).unwrap_err();
        assert_eq!(err.field(), "fibre_saturation_point");
    }

    #[test]
    fn test_doubling_length_doubles_weight() {
        let base = weight_at_moisture_content(&pine(), &piece(), 12.0).unwrap();
        let long = ElementGeometry::new("long", 0.05, 0.15, 5.0);
        let doubled = weight_at_moisture_content(&pine(), &long, 12.0).unwrap();
        assert_relative_eq!(doubled, 2.0 * base, epsilon = 1e-9);
    }

    #[test]
    fn test_input_from_json_invalid_dimension_type() {
        let value = serde_json::json!({
            "material": { "name": "Pine", "specific_gravity": 0.55, "fibre_saturation_point": 30.0 },
            "element": { "name": "E", "width_m": "wide", "depth_m": 0.15, "length_m": 2.5 },
            "moisture_content": 18.0
        });
        let err = WeightInput::from_json_value(value).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TYPE");
        assert_eq!(err.field(), "element/width_m");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = WeightInput {
            material: pine(),
            element: piece(),
            moisture_content: 18.0,
            model: DensityModel::ShrinkageFactorForm,
        };
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: WeightInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
