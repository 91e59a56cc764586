//! # Parameter Sweep
//!
//! Evaluates density or weight over a rectangular grid of moisture content ×
//! specific gravity, producing the three equally-shaped arrays a contour or
//! heatmap renderer expects.
//!
//! ## Layout
//!
//! Grids use meshgrid ("xy") indexing with shape `(sg_points, mc_points)`:
//!
//! ```text
//! moisture[[i, j]]          = mc[j]
//! specific_gravity[[i, j]]  = sg[i]
//! values[[i, j]]            = metric(mc[j], sg[i])
//! ```
//!
//! Both axes are linearly spaced with inclusive endpoints.
//!
//! ## Bounds
//!
//! The sweep evaluates exactly the ranges it is given. A caller that wants to
//! highlight a point outside the default ranges widens them first with
//! [`AxisRange::widened_to_include`].
//!
//! ## Example
//!
//! ```rust
//! use wood_core::calculations::sweep::{calculate, AxisRange, Resolution, SweepInput, SweepMetric};
//! use wood_core::calculations::density::DensityModel;
//! use wood_core::geometry::ElementGeometry;
//! use wood_core::materials::WoodMaterial;
//!
//! let input = SweepInput {
//!     material: WoodMaterial::new("Southern Pine", 0.55, 30.0),
//!     element: ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5),
//!     moisture_range: AxisRange::new(0.0, 40.0),
//!     specific_gravity_range: AxisRange::new(0.3, 1.0),
//!     resolution: Resolution::square(50),
//!     metric: SweepMetric::Weight,
//!     model: DensityModel::RatioForm,
//! };
//!
//! let grid = calculate(&input).unwrap();
//! assert_eq!(grid.shape(), (50, 50));
//! ```

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::density::{density_with_model, DensityModel};
use super::weight::weight_with_model;
use crate::errors::{CalcError, CalcResult};
use crate::geometry::ElementGeometry;
use crate::materials::WoodMaterial;
use crate::validation::require_finite;

/// Default number of points per axis
pub const DEFAULT_POINTS_PER_AXIS: usize = 100;

/// Minimum number of points per axis
pub const MIN_POINTS_PER_AXIS: usize = 2;

/// Largest number of points accepted along one axis
pub const MAX_POINTS_PER_AXIS: usize = 10_000;

/// Largest number of grid cells (rows × columns) accepted for one sweep
pub const MAX_GRID_POINTS: usize = 4_000_000;

/// Closed interval `[min, max]` along one sweep axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl AxisRange {
    /// Create a new range
    pub const fn new(min: f64, max: f64) -> Self {
        AxisRange { min, max }
    }

    /// Whether `value` lies within the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest range that contains both `self` and `value`.
    pub fn widened_to_include(&self, value: f64) -> Self {
        if self.contains(value) || !value.is_finite() {
            return *self;
        }
        let widened = AxisRange::new(self.min.min(value), self.max.max(value));
        debug!(
            value,
            from_min = self.min,
            from_max = self.max,
            to_min = widened.min,
            to_max = widened.max,
            "widened sweep range"
        );
        widened
    }

    /// Validate bounds. `field` names the axis in error messages.
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        require_finite(&format!("{field}.min"), self.min)?;
        require_finite(&format!("{field}.max"), self.max)?;
        if self.min < 0.0 {
            return Err(CalcError::invalid_argument(
                format!("{field}.min"),
                self.min.to_string(),
                "Range lower bound must be non-negative",
            ));
        }
        if self.min > self.max {
            return Err(CalcError::invalid_argument(
                field,
                format!("[{}, {}]", self.min, self.max),
                "Range lower bound must not exceed upper bound",
            ));
        }
        Ok(())
    }

    /// `points` evenly spaced values from `min` to `max` inclusive
    pub fn linspace(&self, points: usize) -> Array1<f64> {
        Array1::linspace(self.min, self.max, points)
    }
}

/// Number of grid points along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Points along the moisture content axis (columns)
    pub moisture_points: usize,
    /// Points along the specific gravity axis (rows)
    pub specific_gravity_points: usize,
}

impl Resolution {
    /// Same number of points on both axes
    pub const fn square(points: usize) -> Self {
        Resolution {
            moisture_points: points,
            specific_gravity_points: points,
        }
    }

    /// Validate the point counts before anything is allocated.
    ///
    /// Each axis needs between [`MIN_POINTS_PER_AXIS`] and
    /// [`MAX_POINTS_PER_AXIS`] points, and the whole grid at most
    /// [`MAX_GRID_POINTS`] cells.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, points) in [
            ("resolution.moisture_points", self.moisture_points),
            ("resolution.specific_gravity_points", self.specific_gravity_points),
        ] {
            if points < MIN_POINTS_PER_AXIS {
                return Err(CalcError::invalid_argument(
                    field,
                    points.to_string(),
                    format!("Each axis needs at least {MIN_POINTS_PER_AXIS} points"),
                ));
            }
            if points > MAX_POINTS_PER_AXIS {
                return Err(CalcError::invalid_argument(
                    field,
                    points.to_string(),
                    format!("Each axis allows at most {MAX_POINTS_PER_AXIS} points"),
                ));
            }
        }
        let cells = self.moisture_points.saturating_mul(self.specific_gravity_points);
        if cells > MAX_GRID_POINTS {
            return Err(CalcError::invalid_argument(
                "resolution",
                format!("{} x {}", self.specific_gravity_points, self.moisture_points),
                format!("A sweep allows at most {MAX_GRID_POINTS} grid points"),
            ));
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::square(DEFAULT_POINTS_PER_AXIS)
    }
}

/// Quantity evaluated at each grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMetric {
    /// Density in kg/m³
    Density,
    /// Element weight in kg
    Weight,
}

impl SweepMetric {
    /// Unit symbol for axis/colour-bar labels
    pub fn unit(&self) -> &'static str {
        match self {
            SweepMetric::Density => "kg/m³",
            SweepMetric::Weight => "kg",
        }
    }

    /// Label including the unit, e.g. "Density (kg/m³)"
    pub fn label(&self) -> String {
        match self {
            SweepMetric::Density => format!("Density ({})", self.unit()),
            SweepMetric::Weight => format!("Weight ({})", self.unit()),
        }
    }
}

/// Input parameters for a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepInput {
    /// Material template: its name and fibre saturation point are kept, its
    /// specific gravity is replaced by each grid row's value
    pub material: WoodMaterial,

    /// Element dimensions (only used for [`SweepMetric::Weight`], still validated)
    pub element: ElementGeometry,

    /// Moisture content range in percent (x axis)
    pub moisture_range: AxisRange,

    /// Specific gravity range (y axis)
    pub specific_gravity_range: AxisRange,

    /// Points per axis
    #[serde(default)]
    pub resolution: Resolution,

    /// Quantity to evaluate
    pub metric: SweepMetric,

    /// Density model
    #[serde(default)]
    pub model: DensityModel,
}

impl SweepInput {
    /// Validate ranges, resolution, template and element before any cell is evaluated.
    pub fn validate(&self) -> CalcResult<()> {
        self.moisture_range.validate("moisture_range")?;
        self.specific_gravity_range.validate("specific_gravity_range")?;
        self.resolution.validate()?;
        self.material
            .with_specific_gravity(self.specific_gravity_range.min)
            .validate()?;
        self.element.validate()?;
        Ok(())
    }
}

/// Sweep output: coordinate grids and the metric at each point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    /// Moisture content at each point (%)
    pub moisture: Array2<f64>,

    /// Specific gravity at each point
    pub specific_gravity: Array2<f64>,

    /// Metric value at each point
    pub values: Array2<f64>,

    /// Which metric `values` holds
    pub metric: SweepMetric,
}

impl SweepGrid {
    /// Grid shape as `(sg_points, mc_points)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Smallest value in the grid
    pub fn z_min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest value in the grid
    pub fn z_max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// CSV header row
    pub fn to_csv_header(&self) -> String {
        let metric = match self.metric {
            SweepMetric::Density => "density_kg_m3",
            SweepMetric::Weight => "weight_kg",
        };
        format!("moisture_content,specific_gravity,{metric}")
    }

    /// Long-format CSV, one row per grid point in row-major order
    pub fn to_csv(&self) -> String {
        let mut csv = self.to_csv_header();
        for ((mc, sg), value) in self
            .moisture
            .iter()
            .zip(self.specific_gravity.iter())
            .zip(self.values.iter())
        {
            csv.push('\n');
            csv.push_str(&format!("{mc},{sg},{value}"));
        }
        csv
    }
}

/// Evaluate the sweep described by `input`.
pub fn calculate(input: &SweepInput) -> CalcResult<SweepGrid> {
    input.validate()?;

    let mc_axis = input.moisture_range.linspace(input.resolution.moisture_points);
    let sg_axis = input
        .specific_gravity_range
        .linspace(input.resolution.specific_gravity_points);
    let shape = (sg_axis.len(), mc_axis.len());
    debug!(
        metric = ?input.metric,
        model = input.model.code(),
        rows = shape.0,
        cols = shape.1,
        "calculating sweep"
    );

    let moisture = Array2::from_shape_fn(shape, |(_, j)| mc_axis[j]);
    let specific_gravity = Array2::from_shape_fn(shape, |(i, _)| sg_axis[i]);

    let mut values = Array2::<f64>::zeros(shape);
    for (i, &sg) in sg_axis.iter().enumerate() {
        let material = input.material.with_specific_gravity(sg);
        for (j, &mc) in mc_axis.iter().enumerate() {
            values[[i, j]] = match input.metric {
                SweepMetric::Density => density_with_model(&material, mc, input.model)?,
                SweepMetric::Weight => weight_with_model(&material, &input.element, mc, input.model)?,
            };
        }
    }

    Ok(SweepGrid {
        moisture,
        specific_gravity,
        values,
        metric: input.metric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::density::density_at_moisture_content;
    use crate::calculations::weight::weight_at_moisture_content;
    use approx::assert_relative_eq;

    fn input(metric: SweepMetric) -> SweepInput {
        SweepInput {
            material: WoodMaterial::new("Southern Pine", 0.55, 30.0),
            element: ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5),
            moisture_range: AxisRange::new(0.0, 40.0),
            specific_gravity_range: AxisRange::new(0.3, 1.0),
            resolution: Resolution::default(),
            metric,
            model: DensityModel::RatioForm,
        }
    }

    #[test]
    fn test_default_shape() {
        let grid = calculate(&input(SweepMetric::Density)).unwrap();
        assert_eq!(grid.shape(), (100, 100));
        assert_eq!(grid.moisture.dim(), grid.values.dim());
        assert_eq!(grid.specific_gravity.dim(), grid.values.dim());
    }

    #[test]
    fn test_meshgrid_layout() {
        let mut sweep = input(SweepMetric::Density);
        sweep.resolution = Resolution {
            moisture_points: 5,
            specific_gravity_points: 3,
        };
        let grid = calculate(&sweep).unwrap();
        assert_eq!(grid.shape(), (3, 5));
        assert_eq!(grid.moisture[[0, 0]], 0.0);
        assert_eq!(grid.moisture[[2, 4]], 40.0);
        assert_eq!(grid.moisture[[1, 2]], 20.0);
        assert_relative_eq!(grid.specific_gravity[[0, 3]], 0.3, epsilon = 1e-12);
        assert_relative_eq!(grid.specific_gravity[[2, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(grid.specific_gravity[[1, 4]], 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_cells_match_point_calculators() {
        let density_grid = calculate(&input(SweepMetric::Density)).unwrap();
        let weight_grid = calculate(&input(SweepMetric::Weight)).unwrap();
        let template = WoodMaterial::new("Southern Pine", 0.55, 30.0);
        let element = ElementGeometry::new("Pieza 1", 0.05, 0.15, 2.5);

        for (i, j) in [(0, 0), (99, 99), (42, 17), (0, 99)] {
            let mc = density_grid.moisture[[i, j]];
            let material = template.with_specific_gravity(density_grid.specific_gravity[[i, j]]);
            assert_eq!(density_grid.values[[i, j]], density_at_moisture_content(&material, mc).unwrap());
            assert_eq!(
                weight_grid.values[[i, j]],
                weight_at_moisture_content(&material, &element, mc).unwrap()
            );
        }
    }

    #[test]
    fn test_z_bounds() {
        let grid = calculate(&input(SweepMetric::Density)).unwrap();
        // Lowest at the driest, lightest corner; highest at the wettest, densest one
        assert_eq!(grid.z_min(), grid.values[[0, 0]]);
        assert_eq!(grid.z_max(), grid.values[[99, 99]]);
        assert!(grid.z_min() > 0.0);
    }

    #[test]
    fn test_invalid_ranges() {
        let mut sweep = input(SweepMetric::Density);
        sweep.moisture_range = AxisRange::new(-5.0, 40.0);
        assert_eq!(calculate(&sweep).unwrap_err().field(), "moisture_range.min");

        let mut sweep = input(SweepMetric::Density);
        sweep.specific_gravity_range = AxisRange::new(1.0, 0.3);
        assert_eq!(calculate(&sweep).unwrap_err().field(), "specific_gravity_range");

        let mut sweep = input(SweepMetric::Density);
        sweep.moisture_range = AxisRange::new(0.0, f64::NAN);
        assert_eq!(calculate(&sweep).unwrap_err().error_code(), "INVALID_TYPE");
    }

    #[test]
    fn test_invalid_resolution() {
        let mut sweep = input(SweepMetric::Weight);
        sweep.resolution = Resolution::square(1);
        let err = calculate(&sweep).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert!(err.field().starts_with("resolution"));
    }

    #[test]
    fn test_oversized_resolution_rejected_before_allocation() {
        let mut sweep = input(SweepMetric::Density);
        sweep.resolution = Resolution {
            moisture_points: usize::MAX / 4,
            specific_gravity_points: 2,
        };
        let err = calculate(&sweep).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.field(), "resolution.moisture_points");

        sweep.resolution = Resolution::square(MAX_POINTS_PER_AXIS + 1);
        assert_eq!(calculate(&sweep).unwrap_err().field(), "resolution.moisture_points");
    }

    #[test]
    fn test_total_grid_points_limited() {
        let mut sweep = input(SweepMetric::Density);
        sweep.resolution = Resolution::square(MAX_POINTS_PER_AXIS);
        let err = calculate(&sweep).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.field(), "resolution");

        let largest = Resolution::square(2_000);
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_invalid_element_rejected_even_for_density() {
        let mut sweep = input(SweepMetric::Density);
        sweep.element = ElementGeometry::new("bad", 0.05, -0.15, 2.5);
        assert_eq!(calculate(&sweep).unwrap_err().field(), "depth_m");
    }

    #[test]
    fn test_shrinkage_model_zero_fsp_fails() {
        let mut sweep = input(SweepMetric::Density);
        sweep.material = WoodMaterial::new("Zero", 0.5, 0.0);
        sweep.model = DensityModel::ShrinkageFactorForm;
        assert_eq!(calculate(&sweep).unwrap_err().field(), "fibre_saturation_point");
    }

    #[test]
    fn test_widened_to_include() {
        let range = AxisRange::new(0.0, 40.0);
        assert_eq!(range.widened_to_include(18.0), range);
        assert_eq!(range.widened_to_include(55.0), AxisRange::new(0.0, 55.0));

        let sg = AxisRange::new(0.3, 1.0);
        assert_eq!(sg.widened_to_include(0.2), AxisRange::new(0.2, 1.0));
        assert_eq!(sg.widened_to_include(f64::NAN), sg);
    }

    #[test]
    fn test_degenerate_range_allowed() {
        let mut sweep = input(SweepMetric::Density);
        sweep.moisture_range = AxisRange::new(12.0, 12.0);
        sweep.resolution = Resolution::square(4);
        let grid = calculate(&sweep).unwrap();
        assert!(grid.moisture.iter().all(|&mc| mc == 12.0));
    }

    #[test]
    fn test_csv_export() {
        let mut sweep = input(SweepMetric::Density);
        sweep.resolution = Resolution {
            moisture_points: 3,
            specific_gravity_points: 2,
        };
        let grid = calculate(&sweep).unwrap();
        let csv = grid.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "moisture_content,specific_gravity,density_kg_m3");
        assert!(lines[1].starts_with("0,0.3,"));
        assert!(lines[3].starts_with("40,0.3,"));
    }

    #[test]
    fn test_serialization() {
        let mut sweep = input(SweepMetric::Weight);
        sweep.resolution = Resolution::square(3);
        let grid = calculate(&sweep).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains("\"metric\":\"weight\""));
        let roundtrip: SweepGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.shape(), (3, 3));
    }
}
