//! # wood_core - Wood Moisture Calculation Engine
//!
//! `wood_core` computes the density and weight of wood structural elements as
//! a function of moisture content, and sweeps those quantities over a
//! moisture content × specific gravity grid for plotting. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the rejected field
//!
//! ## Quick Start
//!
//! ```rust
//! use wood_core::{density_at_moisture_content, weight_at_moisture_content};
//! use wood_core::{ElementGeometry, WoodMaterial};
//!
//! let pine = WoodMaterial::new("Southern Pine", 0.55, 30.0);
//! let joist = ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5);
//!
//! let density = density_at_moisture_content(&pine, 18.0).unwrap();
//! let weight = weight_at_moisture_content(&pine, &joist, 18.0).unwrap();
//! println!("{density:.2} kg/m³, {weight:.2} kg");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Density, weight and sweep calculations
//! - [`materials`] - Wood material properties and species presets
//! - [`geometry`] - Element dimensions
//! - [`settings`] - Calculation defaults, loadable from TOML
//! - [`units`] - Type-safe unit wrappers
//! - [`validation`] - Range checks and untyped-input conversion
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{density_at_moisture_content, weight_at_moisture_content, CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use geometry::ElementGeometry;
pub use materials::{WoodMaterial, WoodSpecies};
pub use settings::CalcSettings;
