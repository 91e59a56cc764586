//! # Density at Moisture Content
//!
//! Density of wood (kg/m³) at a given moisture content, from its oven-dry
//! specific gravity and fibre saturation point.
//!
//! Below the fibre saturation point (FSP) added water is bound in the cell
//! walls and raises density. Above it the extra water is free water and the
//! calculation clamps moisture content to the FSP, so density plateaus.
//!
//! ## Models
//!
//! [`DensityModel::RatioForm`] is the reference model and the one used by
//! [`density_at_moisture_content`]:
//!
//! ```text
//! mc' = min(mc, FSP)
//! ρ   = G · ρw · (1 + mc'/100) / (1 + (FSP/100) · G)
//! ```
//!
//! [`DensityModel::ShrinkageFactorForm`] is the Wood Handbook shrinkage
//! approximation, kept for comparison:
//!
//! ```text
//! a = (FSP - mc) / FSP   for mc <= FSP, else 0
//! ρ = G / (1 + 0.265 · a · G) · ρw
//! ```
//!
//! The two models are different approximations and do not agree numerically.
//!
//! ## Example
//!
//! ```rust
//! use wood_core::calculations::density::density_at_moisture_content;
//! use wood_core::materials::WoodMaterial;
//!
//! let pine = WoodMaterial::new("Southern Pine", 0.55, 30.0);
//! let density = density_at_moisture_content(&pine, 18.0).unwrap();
//! assert!((density - 557.08).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{CalcError, CalcResult};
use crate::materials::WoodMaterial;
use crate::units::{KgPerCubicMeter, Percent};
use crate::validation;

/// Density of water (kg/m³)
pub const WATER_DENSITY_KG_M3: f64 = 1000.0;

/// Volumetric shrinkage coefficient in the shrinkage-factor model
pub const SHRINKAGE_COEFFICIENT: f64 = 0.265;

/// Formula used to compute density at a moisture content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityModel {
    /// Mass-ratio form with moisture clamped at the FSP (reference model)
    #[default]
    RatioForm,
    /// Shrinkage-factor form (Wood Handbook)
    ShrinkageFactorForm,
}

impl DensityModel {
    /// All models, for listing
    pub const ALL: [DensityModel; 2] = [DensityModel::RatioForm, DensityModel::ShrinkageFactorForm];

    /// Short identifier used on the command line and in JSON
    pub fn code(&self) -> &'static str {
        match self {
            DensityModel::RatioForm => "ratio_form",
            DensityModel::ShrinkageFactorForm => "shrinkage_factor_form",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "ratio" | "ratio_form" => Ok(DensityModel::RatioForm),
            "shrinkage" | "shrinkage_factor" | "shrinkage_factor_form" => {
                Ok(DensityModel::ShrinkageFactorForm)
            }
            _ => Err(CalcError::invalid_argument(
                "density_model",
                s,
                "Unknown density model; expected 'ratio_form' or 'shrinkage_factor_form'",
            )),
        }
    }

    /// Evaluate the model for already-validated inputs.
    fn evaluate(&self, specific_gravity: f64, fsp_pct: f64, moisture_pct: f64) -> CalcResult<f64> {
        let bound_moisture = Percent(moisture_pct.min(fsp_pct));
        match self {
            DensityModel::RatioForm => {
                let fsp = Percent(fsp_pct);
                Ok(specific_gravity * WATER_DENSITY_KG_M3 * (1.0 + bound_moisture.as_fraction())
                    / (1.0 + fsp.as_fraction() * specific_gravity))
            }
            DensityModel::ShrinkageFactorForm => {
                if fsp_pct == 0.0 {
                    return Err(CalcError::invalid_argument(
                        "fibre_saturation_point",
                        fsp_pct.to_string(),
                        "Fibre saturation point must be positive for the shrinkage-factor model",
                    ));
                }
                let shrinkage_fraction = (fsp_pct - bound_moisture.0) / fsp_pct;
                Ok(specific_gravity / (1.0 + SHRINKAGE_COEFFICIENT * shrinkage_fraction * specific_gravity)
                    * WATER_DENSITY_KG_M3)
            }
        }
    }
}

impl std::fmt::Display for DensityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DensityModel::RatioForm => write!(f, "Ratio form"),
            DensityModel::ShrinkageFactorForm => write!(f, "Shrinkage-factor form"),
        }
    }
}

/// Where the water sits at a given moisture content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureRegime {
    /// At or below the FSP: water is bound in the cell walls
    BoundWater,
    /// Above the FSP: extra water is free water in the cell cavities
    FreeWater,
}

impl MoistureRegime {
    /// Classify a moisture content against a fibre saturation point
    pub fn classify(moisture_pct: f64, fsp_pct: f64) -> Self {
        if moisture_pct > fsp_pct {
            MoistureRegime::FreeWater
        } else {
            MoistureRegime::BoundWater
        }
    }
}

/// Density of `material` at `moisture_pct` using the reference model.
pub fn density_at_moisture_content(material: &WoodMaterial, moisture_pct: f64) -> CalcResult<f64> {
    density_with_model(material, moisture_pct, DensityModel::RatioForm)
}

/// Density of `material` at `moisture_pct` using `model`.
///
/// Fails with `InvalidType` for NaN/infinite inputs and `InvalidArgument` for
/// negative moisture content, negative material properties, or a zero FSP
/// under the shrinkage-factor model.
pub fn density_with_model(material: &WoodMaterial, moisture_pct: f64, model: DensityModel) -> CalcResult<f64> {
    validation::moisture_content(moisture_pct)?;
    material.validate()?;
    let density = model.evaluate(material.specific_gravity, material.fibre_saturation_point, moisture_pct)?;
    trace!(
        specific_gravity = material.specific_gravity,
        moisture_pct,
        density,
        model = model.code(),
        "density evaluated"
    );
    Ok(density)
}

/// Input parameters for a density calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": { "name": "Southern Pine", "specific_gravity": 0.55, "fibre_saturation_point": 30.0 },
///   "moisture_content": 18.0,
///   "model": "ratio_form"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityInput {
    /// Wood material
    pub material: WoodMaterial,

    /// Moisture content in percent
    pub moisture_content: f64,

    /// Density model (defaults to the ratio form)
    #[serde(default)]
    pub model: DensityModel,
}

impl DensityInput {
    /// JSON pointers of the fields that must be numbers
    pub const NUMERIC_FIELDS: [&'static str; 3] = [
        "/material/specific_gravity",
        "/material/fibre_saturation_point",
        "/moisture_content",
    ];

    /// Build from an untyped JSON document, reporting non-numeric fields as `InvalidType`.
    pub fn from_json_value(value: serde_json::Value) -> CalcResult<Self> {
        validation::from_json_value(value, &Self::NUMERIC_FIELDS)
    }
}

/// Results from a density calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityResult {
    /// Density in kg/m³
    pub density_kg_m3: KgPerCubicMeter,

    /// Moisture content actually used by the model (clamped to the FSP), %
    pub effective_moisture_content: Percent,

    /// Bound-water or free-water regime at the requested moisture content
    pub regime: MoistureRegime,

    /// Model used
    pub model: DensityModel,
}

/// Calculate density for a [`DensityInput`].
pub fn calculate(input: &DensityInput) -> CalcResult<DensityResult> {
    debug!(
        material = %input.material.name,
        moisture_pct = input.moisture_content,
        model = input.model.code(),
        "calculating density"
    );
    let density = density_with_model(&input.material, input.moisture_content, input.model)?;
    let fsp = input.material.fibre_saturation_point;
    Ok(DensityResult {
        density_kg_m3: KgPerCubicMeter(density),
        effective_moisture_content: Percent(input.moisture_content.min(fsp)),
        regime: MoistureRegime::classify(input.moisture_content, fsp),
        model: input.model,
    })
}
