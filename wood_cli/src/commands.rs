//! CLI command implementations.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;
use wood_core::calculations::density::{self, DensityInput, DensityModel};
use wood_core::calculations::sweep::{self, SweepGrid, SweepInput, SweepMetric};
use wood_core::calculations::weight::{self, WeightInput};
use wood_core::materials::TYPICAL_FIBRE_SATURATION_POINT;
use wood_core::units::{Kilograms, KgPerCubicMeter, Percent};
use wood_core::validation::parse_numeric;
use wood_core::{CalcResult, CalcSettings, CalculationItem, CalculationOutput, ElementGeometry, WoodMaterial, WoodSpecies};

use crate::error::CliError;
use crate::{ElementArgs, FormatArg, MaterialArgs, MetricArg, PointArgs};

const DEFAULT_MATERIAL_NAME: &str = "Southern Pine";
const DEFAULT_SPECIFIC_GRAVITY: f64 = 0.55;

/// Everything the sweep command needs besides settings.
pub struct SweepRequest {
    pub material: MaterialArgs,
    pub element: ElementArgs,
    pub point: PointArgs,
    pub metric: MetricArg,
    pub format: FormatArg,
    pub points: Option<usize>,
}

/// Load settings from a TOML file, or use the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<CalcSettings, CliError> {
    let Some(path) = path else {
        return Ok(CalcSettings::default());
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = CalcSettings::from_toml_str(&text).map_err(|source| CliError::Settings {
        path: path.to_path_buf(),
        source,
    })?;
    settings.validate()?;
    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Build the material from a species preset and/or explicit values.
pub fn resolve_material(args: &MaterialArgs) -> CalcResult<WoodMaterial> {
    let base = match &args.species {
        Some(code) => WoodSpecies::from_str_flexible(code)?.material(),
        None => WoodMaterial::new(DEFAULT_MATERIAL_NAME, DEFAULT_SPECIFIC_GRAVITY, TYPICAL_FIBRE_SATURATION_POINT),
    };
    let specific_gravity = match &args.sg {
        Some(text) => parse_numeric("specific_gravity", text)?,
        None => base.specific_gravity,
    };
    let fibre_saturation_point = match &args.fsp {
        Some(text) => parse_numeric("fibre_saturation_point", text)?,
        None => base.fibre_saturation_point,
    };
    let name = args.name.clone().unwrap_or(base.name);
    Ok(WoodMaterial::new(name, specific_gravity, fibre_saturation_point))
}

/// Build the element from its dimension options.
pub fn resolve_element(args: &ElementArgs) -> CalcResult<ElementGeometry> {
    Ok(ElementGeometry::new(
        args.element_name.clone(),
        parse_numeric("width_m", &args.width)?,
        parse_numeric("depth_m", &args.depth)?,
        parse_numeric("length_m", &args.length)?,
    ))
}

fn resolve_model(args: &MaterialArgs, settings: &CalcSettings) -> CalcResult<DensityModel> {
    match &args.model {
        Some(text) => DensityModel::from_str_flexible(text),
        None => Ok(settings.density_model),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_material(material: &WoodMaterial, model: DensityModel) {
    println!("Material: {}", material.name);
    println!("  Specific gravity:          {:.2}", material.specific_gravity);
    println!("  Fibre saturation point:    {}", Percent(material.fibre_saturation_point));
    println!("  Density model:             {model}");
}

/// Density at a moisture content.
pub fn density(
    material_args: &MaterialArgs,
    point: &PointArgs,
    settings: &CalcSettings,
    json: bool,
) -> Result<(), CliError> {
    let input = DensityInput {
        material: resolve_material(material_args)?,
        moisture_content: parse_numeric("moisture_content", &point.mc)?,
        model: resolve_model(material_args, settings)?,
    };
    let result = density::calculate(&input)?;

    if json {
        return print_json(&result);
    }

    println!("═══════════════════════════════════════");
    println!("  DENSITY AT MOISTURE CONTENT");
    println!("═══════════════════════════════════════");
    print_material(&input.material, input.model);
    println!();
    println!(
        "Density at {}% moisture and {} specific gravity: {}",
        input.moisture_content, input.material.specific_gravity, result.density_kg_m3
    );
    println!("  Effective moisture:        {}", result.effective_moisture_content);
    println!("  Regime:                    {:?}", result.regime);
    Ok(())
}

/// Element weight at a moisture content.
pub fn weight(
    material_args: &MaterialArgs,
    element_args: &ElementArgs,
    point: &PointArgs,
    settings: &CalcSettings,
    json: bool,
) -> Result<(), CliError> {
    let input = WeightInput {
        material: resolve_material(material_args)?,
        element: resolve_element(element_args)?,
        moisture_content: parse_numeric("moisture_content", &point.mc)?,
        model: resolve_model(material_args, settings)?,
    };
    let result = weight::calculate(&input)?;

    if json {
        return print_json(&result);
    }

    println!("═══════════════════════════════════════");
    println!("  WEIGHT AT MOISTURE CONTENT");
    println!("═══════════════════════════════════════");
    print_material(&input.material, input.model);
    println!(
        "Element: {} ({} x {} x {} m)",
        input.element.name, input.element.width_m, input.element.depth_m, input.element.length_m
    );
    println!("  Volume:                    {:.5} m³", result.volume_m3.0);
    println!();
    println!(
        "Density at {}% moisture and {} specific gravity: {}",
        input.moisture_content, input.material.specific_gravity, result.density_kg_m3
    );
    println!(
        "Weight at {}% moisture and {} specific gravity: {}",
        input.moisture_content, input.material.specific_gravity, result.weight_kg
    );
    Ok(())
}

/// Highlighted point drawn on top of the contour plot.
#[derive(Debug, Serialize)]
pub struct PlotPoint {
    pub moisture_content: f64,
    pub specific_gravity: f64,
    pub value: f64,
}

/// Sweep output shaped for a contour renderer.
#[derive(Debug, Serialize)]
pub struct PlotData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub moisture_axis: Vec<f64>,
    pub specific_gravity_axis: Vec<f64>,
    /// Row `i` holds the values for `specific_gravity_axis[i]`
    pub values: Vec<Vec<f64>>,
    pub z_min: f64,
    pub z_max: f64,
    pub point: PlotPoint,
}

impl PlotData {
    pub fn from_grid(grid: &SweepGrid, point: PlotPoint) -> Self {
        let title = match grid.metric {
            SweepMetric::Density => "Density vs. Moisture Content and Specific Gravity",
            SweepMetric::Weight => "Weight vs. Moisture Content and Specific Gravity",
        };
        PlotData {
            title: title.to_string(),
            x_label: "Moisture Content (%)".to_string(),
            y_label: "Specific Gravity".to_string(),
            z_label: grid.metric.label(),
            moisture_axis: grid.moisture.row(0).to_vec(),
            specific_gravity_axis: grid.specific_gravity.column(0).to_vec(),
            values: grid.values.rows().into_iter().map(|row| row.to_vec()).collect(),
            z_min: grid.z_min(),
            z_max: grid.z_max(),
            point,
        }
    }
}

/// Build the sweep input, widening the default ranges so the point of interest is on the grid.
pub fn sweep_input(request: &SweepRequest, settings: &CalcSettings) -> CalcResult<(SweepInput, PlotPoint)> {
    let material = resolve_material(&request.material)?;
    let element = resolve_element(&request.element)?;
    let moisture_content = parse_numeric("moisture_content", &request.point.mc)?;
    let model = resolve_model(&request.material, settings)?;
    let metric = match request.metric {
        MetricArg::Density => SweepMetric::Density,
        MetricArg::Weight => SweepMetric::Weight,
    };

    let value = match metric {
        SweepMetric::Density => density::density_with_model(&material, moisture_content, model)?,
        SweepMetric::Weight => weight::weight_with_model(&material, &element, moisture_content, model)?,
    };
    let point = PlotPoint {
        moisture_content,
        specific_gravity: material.specific_gravity,
        value,
    };

    let resolution = match request.points {
        Some(points) => sweep::Resolution::square(points),
        None => settings.resolution,
    };
    let input = SweepInput {
        moisture_range: settings.moisture_range.widened_to_include(point.moisture_content),
        specific_gravity_range: settings.specific_gravity_range.widened_to_include(point.specific_gravity),
        material,
        element,
        resolution,
        metric,
        model,
    };
    Ok((input, point))
}

/// Sweep and export the grids.
pub fn sweep(request: &SweepRequest, settings: &CalcSettings, output: Option<&Path>) -> Result<(), CliError> {
    let (input, point) = sweep_input(request, settings)?;
    let grid = sweep::calculate(&input)?;

    let text = match request.format {
        FormatArg::Json => serde_json::to_string_pretty(&PlotData::from_grid(&grid, point))?,
        FormatArg::Csv => grid.to_csv(),
    };

    match output {
        Some(path) => {
            fs::write(path, &text).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            let (rows, cols) = grid.shape();
            println!(
                "Wrote {rows} x {cols} grid of {} to {} (range {:.2} to {:.2} {})",
                input.metric.label(),
                path.display(),
                grid.z_min(),
                grid.z_max(),
                input.metric.unit()
            );
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Run a calculation from a JSON document.
pub fn run_document(path: &Path, json: bool) -> Result<(), CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|source| CliError::InputJson {
        path: path.to_path_buf(),
        source,
    })?;
    let item = CalculationItem::from_json_value(value)?;
    info!(calc_type = item.calc_type(), path = %path.display(), "running document");
    let output = item.run()?;

    if json {
        return print_json(&output);
    }

    match output {
        CalculationOutput::Density(result) => {
            println!("Density: {}", result.density_kg_m3);
        }
        CalculationOutput::Weight(result) => {
            println!("Volume:  {:.5} m³", result.volume_m3.0);
            println!("Density: {}", result.density_kg_m3);
            println!("Weight:  {}", result.weight_kg);
        }
        CalculationOutput::Sweep(grid) => {
            let (rows, cols) = grid.shape();
            let (low, high) = match grid.metric {
                SweepMetric::Density => (
                    KgPerCubicMeter(grid.z_min()).to_string(),
                    KgPerCubicMeter(grid.z_max()).to_string(),
                ),
                SweepMetric::Weight => (Kilograms(grid.z_min()).to_string(), Kilograms(grid.z_max()).to_string()),
            };
            println!("Sweep: {rows} x {cols} grid, {low} to {high}");
        }
    }
    Ok(())
}

/// List species presets.
pub fn species(json: bool) -> Result<(), CliError> {
    let materials: Vec<(&str, WoodMaterial)> = WoodSpecies::ALL
        .iter()
        .map(|species| (species.code(), species.material()))
        .collect();

    if json {
        return print_json(&materials);
    }

    println!("{:<6} {:<20} {:>6} {:>8}", "Code", "Species", "SG", "FSP");
    for (code, material) in &materials {
        println!(
            "{:<6} {:<20} {:>6.2} {:>7.1}%",
            code, material.name, material.specific_gravity, material.fibre_saturation_point
        );
    }
    Ok(())
}

/// Print the active settings.
pub fn print_settings(settings: &CalcSettings) -> Result<(), CliError> {
    print!("{}", settings.to_toml_string()?);
    Ok(())
}
