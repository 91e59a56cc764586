//! # Moisture Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Plain-number entry points ([`density_at_moisture_content`],
//! [`weight_at_moisture_content`]) are also exported for callers that only
//! need the scalar.
//!
//! ## Available Calculations
//!
//! - [`density`] - Density at a moisture content
//! - [`weight`] - Element weight at a moisture content
//! - [`sweep`] - Density or weight over a moisture × specific gravity grid

pub mod density;
pub mod sweep;
pub mod weight;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};

// Re-export commonly used types
pub use density::{density_at_moisture_content, DensityInput, DensityModel, DensityResult};
pub use sweep::{AxisRange, Resolution, SweepGrid, SweepInput, SweepMetric};
pub use weight::{weight_at_moisture_content, WeightInput, WeightResult};

/// Enum wrapper for all calculation types.
///
/// Serializes with a `"type"` discriminator so a single JSON document can
/// describe any calculation:
///
/// ```json
/// { "type": "Density", "material": { ... }, "moisture_content": 18.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Density at a moisture content
    Density(DensityInput),
    /// Element weight at a moisture content
    Weight(WeightInput),
    /// Grid sweep
    Sweep(SweepInput),
}

/// Result of running a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    /// Density result
    Density(DensityResult),
    /// Weight result
    Weight(WeightResult),
    /// Sweep grids
    Sweep(SweepGrid),
}

const SWEEP_NUMERIC_FIELDS: [&str; 9] = [
    "/material/specific_gravity",
    "/material/fibre_saturation_point",
    "/element/width_m",
    "/element/depth_m",
    "/element/length_m",
    "/moisture_range/min",
    "/moisture_range/max",
    "/specific_gravity_range/min",
    "/specific_gravity_range/max",
];

const SWEEP_COUNT_FIELDS: [(&str, &str); 2] = [
    ("/resolution/moisture_points", "resolution.moisture_points"),
    ("/resolution/specific_gravity_points", "resolution.specific_gravity_points"),
];

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Density(_) => "Density",
            CalculationItem::Weight(_) => "Weight",
            CalculationItem::Sweep(_) => "Sweep",
        }
    }

    /// Build from an untyped JSON document.
    ///
    /// Numeric fields of the tagged calculation are checked first so a value
    /// like `"moisture_content": "wet"` is reported as `InvalidType` against
    /// that field. Sweep resolution counts must be whole, non-negative numbers.
    pub fn from_json_value(value: Value) -> CalcResult<Self> {
        let numeric_fields: &[&str] = match value.get("type").and_then(Value::as_str) {
            Some("Density") => &DensityInput::NUMERIC_FIELDS,
            Some("Weight") => &WeightInput::NUMERIC_FIELDS,
            Some("Sweep") => &SWEEP_NUMERIC_FIELDS,
            _ => {
                return Err(CalcError::invalid_type(
                    "type",
                    value.get("type").map(Value::to_string).unwrap_or_else(|| "<missing>".to_string()),
                    "Calculation type must be one of \"Density\", \"Weight\", \"Sweep\"",
                ))
            }
        };
        if value.get("type").and_then(Value::as_str) == Some("Sweep") {
            for (pointer, field) in SWEEP_COUNT_FIELDS {
                if let Some(count) = value.pointer(pointer) {
                    crate::validation::count_from_json(field, count)?;
                }
            }
        }
        crate::validation::from_json_value(value, numeric_fields)
    }

    /// Run the calculation
    pub fn run(&self) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Density(input) => density::calculate(input).map(CalculationOutput::Density),
            CalculationItem::Weight(input) => weight::calculate(input).map(CalculationOutput::Weight),
            CalculationItem::Sweep(input) => sweep::calculate(input).map(CalculationOutput::Sweep),
        }
    }
}
