//! Species presets
//!
//! Nominal oven-dry specific gravities for common North American softwood
//! species groups (NDS Table 12.3.3A) with the conventional 30 % fibre
//! saturation point. Use [`WoodSpecies::material`] to get a [`WoodMaterial`].

use serde::{Deserialize, Serialize};

use super::WoodMaterial;
use crate::errors::{CalcError, CalcResult};

/// Fibre saturation point commonly assumed for softwoods (%)
pub const TYPICAL_FIBRE_SATURATION_POINT: f64 = 30.0;

/// Wood species groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodSpecies {
    /// Douglas Fir-Larch
    #[serde(rename = "DF-L")]
    DouglasFirLarch,
    /// Southern Pine
    #[serde(rename = "SP")]
    SouthernPine,
    /// Hem-Fir
    #[serde(rename = "HF")]
    HemFir,
    /// Spruce-Pine-Fir
    #[serde(rename = "SPF")]
    SprucePineFir,
    /// Douglas Fir-South
    #[serde(rename = "DF-S")]
    DouglasFirSouth,
}

impl WoodSpecies {
    /// All species, for listing
    pub const ALL: [WoodSpecies; 5] = [
        WoodSpecies::DouglasFirLarch,
        WoodSpecies::SouthernPine,
        WoodSpecies::HemFir,
        WoodSpecies::SprucePineFir,
        WoodSpecies::DouglasFirSouth,
    ];

    /// Short code (e.g., "DF-L", "SP")
    pub fn code(&self) -> &'static str {
        match self {
            WoodSpecies::DouglasFirLarch => "DF-L",
            WoodSpecies::SouthernPine => "SP",
            WoodSpecies::HemFir => "HF",
            WoodSpecies::SprucePineFir => "SPF",
            WoodSpecies::DouglasFirSouth => "DF-S",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "DF-L" | "DOUGLAS-FIR-LARCH" | "DFL" => Ok(WoodSpecies::DouglasFirLarch),
            "SP" | "SOUTHERN-PINE" | "SYP" => Ok(WoodSpecies::SouthernPine),
            "HF" | "HEM-FIR" => Ok(WoodSpecies::HemFir),
            "SPF" | "SPRUCE-PINE-FIR" => Ok(WoodSpecies::SprucePineFir),
            "DF-S" | "DOUGLAS-FIR-SOUTH" | "DFS" => Ok(WoodSpecies::DouglasFirSouth),
            _ => Err(CalcError::invalid_argument(
                "species",
                s,
                format!(
                    "Unknown species; expected one of {}",
                    WoodSpecies::ALL.map(|sp| sp.code()).join(", ")
                ),
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WoodSpecies::DouglasFirLarch => "Douglas Fir-Larch",
            WoodSpecies::SouthernPine => "Southern Pine",
            WoodSpecies::HemFir => "Hem-Fir",
            WoodSpecies::SprucePineFir => "Spruce-Pine-Fir",
            WoodSpecies::DouglasFirSouth => "Douglas Fir-South",
        }
    }

    /// Oven-dry specific gravity
    pub fn specific_gravity(&self) -> f64 {
        match self {
            WoodSpecies::DouglasFirLarch => 0.50,
            WoodSpecies::SouthernPine => 0.55,
            WoodSpecies::HemFir => 0.43,
            WoodSpecies::SprucePineFir => 0.42,
            WoodSpecies::DouglasFirSouth => 0.46,
        }
    }

    /// Material with this species' properties
    pub fn material(&self) -> WoodMaterial {
        WoodMaterial::new(
            self.display_name(),
            self.specific_gravity(),
            TYPICAL_FIBRE_SATURATION_POINT,
        )
    }
}

impl std::fmt::Display for WoodSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
