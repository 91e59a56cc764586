//! # Calculation Settings
//!
//! Defaults used when a caller does not specify them explicitly: density
//! model, sweep resolution and the default sweep ranges. Settings are plain
//! serde data and can be loaded from TOML; missing keys fall back to the
//! defaults.
//!
//! ```toml
//! density_model = "ratio_form"
//!
//! [resolution]
//! moisture_points = 100
//! specific_gravity_points = 100
//!
//! [moisture_range]
//! min = 0.0
//! max = 40.0
//!
//! [specific_gravity_range]
//! min = 0.3
//! max = 1.0
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::density::DensityModel;
use crate::calculations::sweep::{AxisRange, Resolution};
use crate::errors::CalcResult;

/// Default moisture content sweep range (%)
pub const DEFAULT_MOISTURE_RANGE: AxisRange = AxisRange::new(0.0, 40.0);

/// Default specific gravity sweep range
pub const DEFAULT_SPECIFIC_GRAVITY_RANGE: AxisRange = AxisRange::new(0.3, 1.0);

/// Calculation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Density model used when none is given
    pub density_model: DensityModel,

    /// Sweep points per axis
    pub resolution: Resolution,

    /// Default moisture content range for sweeps (%)
    pub moisture_range: AxisRange,

    /// Default specific gravity range for sweeps
    pub specific_gravity_range: AxisRange,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            density_model: DensityModel::default(),
            resolution: Resolution::default(),
            moisture_range: DEFAULT_MOISTURE_RANGE,
            specific_gravity_range: DEFAULT_SPECIFIC_GRAVITY_RANGE,
        }
    }
}

impl CalcSettings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Render settings as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate ranges and resolution.
    pub fn validate(&self) -> CalcResult<()> {
        self.resolution.validate()?;
        self.moisture_range.validate("moisture_range")?;
        self.specific_gravity_range.validate("specific_gravity_range")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CalcSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.resolution, Resolution::square(100));
        assert_eq!(settings.density_model, DensityModel::RatioForm);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = CalcSettings::from_toml_str(
            r#"
            density_model = "shrinkage_factor_form"

            [moisture_range]
            min = 5.0
            max = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.density_model, DensityModel::ShrinkageFactorForm);
        assert_eq!(settings.moisture_range, AxisRange::new(5.0, 60.0));
        assert_eq!(settings.specific_gravity_range, DEFAULT_SPECIFIC_GRAVITY_RANGE);
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = CalcSettings::default();
        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("ratio_form"));
        assert_eq!(CalcSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = CalcSettings::from_toml_str(
            r#"
            [resolution]
            moisture_points = 1
            specific_gravity_points = 100
            "#,
        )
        .unwrap();
        assert_eq!(settings.validate().unwrap_err().field(), "resolution.moisture_points");
    }

    #[test]
    fn test_unknown_model_fails_to_parse() {
        assert!(CalcSettings::from_toml_str("density_model = \"linear\"").is_err());
    }
}
