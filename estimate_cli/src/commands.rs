use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use estimate_core::file_io::{load_rate_table, save_estimate, save_svg};
use estimate_core::{compute_layout, render_svg, BuildingInput, Estimate, InputSet, Plan, RateTable};
use tracing::{debug, info};

use crate::cli::{Commands, LayoutArgs, RatesArgs, RunArgs};
use crate::config::LayeredConfig;
use crate::output;

pub fn execute(command: Commands, config: &LayeredConfig) -> Result<()> {
    match command {
        Commands::Run(args) => run(args, config),
        Commands::Rates(args) => rates(args, config),
        Commands::Layout(args) => layout(args),
    }
}

/// Read a building input file.
///
/// Accepts either the typed record (`plot_length_ft`, ...) or a flat form
/// object (`plot_length`, ...) whose values are strings or numbers.
pub fn load_building_input(path: &Path) -> Result<BuildingInput> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Input file is not valid JSON: {}", path.display()))?;

    let typed = value.get("plot_length_ft").is_some();
    let input = if typed {
        let input: BuildingInput = serde_json::from_value(value)
            .with_context(|| format!("Invalid building input: {}", path.display()))?;
        input.validate()?;
        input
    } else {
        let set = InputSet::from_json(&value)?;
        BuildingInput::from_input_set(&set)?
    };

    debug!(path = %path.display(), typed, "loaded building input");
    Ok(input)
}

/// Rates from the configured file, or defaults when none is configured
fn resolve_rates(config: &LayeredConfig) -> Result<Option<RateTable>> {
    match &config.rates_file.value {
        Some(path) => {
            let table = load_rate_table(path)
                .with_context(|| format!("Failed to load rates from {}", path.display()))?;
            info!(path = %path.display(), source = %config.rates_file.source, "using rate file");
            Ok(Some(table))
        }
        None => Ok(None),
    }
}

fn run(args: RunArgs, config: &LayeredConfig) -> Result<()> {
    let input = load_building_input(&args.input)?;
    let rates = resolve_rates(config)?;
    let estimate = Estimate::run(&input, rates.as_ref()).context("Estimation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", output::format_summary(&estimate));
        if let Some(plan) = estimate.plan(args.plan.into()) {
            print!("{}", output::format_boq(plan));
        }
    }

    if let Some(dir) = &config.output_dir.value {
        write_outputs(&estimate, dir, config.write_svg.value)?;
        if !args.json {
            println!();
            println!("Saved estimate to {}", dir.display());
        }
    }

    Ok(())
}

/// Save `estimate.json` and, when enabled, one SVG per layout
pub fn write_outputs(estimate: &Estimate, dir: &Path, write_svg: bool) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    save_estimate(estimate, &dir.join("estimate.json"))?;

    if write_svg {
        for layout in &estimate.layouts {
            let path = dir.join(format!("{}.svg", layout.layout.code()));
            save_svg(layout, &path)?;
        }
    }

    info!(dir = %dir.display(), svg = write_svg, "wrote estimate outputs");
    Ok(())
}

fn rates(args: RatesArgs, config: &LayeredConfig) -> Result<()> {
    let base = resolve_rates(config)?.unwrap_or_default();
    let plan: Plan = args.plan.into();
    let applied = base.scaled_for(plan);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output::rates_json(&applied))?);
    } else {
        print!("{}", output::format_rates(&applied, plan));
        println!();
        for (key, value, source) in config.describe() {
            println!("  {key:<12} {value} ({source})");
        }
    }
    Ok(())
}

fn layout(args: LayoutArgs) -> Result<()> {
    let plan = compute_layout(args.length, args.width, args.floors, args.layout.into())?;
    println!("{}", render_svg(&plan));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use estimate_core::file_io::load_estimate;
    use tempfile::tempdir;

    #[test]
    fn test_load_flat_form_input() {
        logging::init_test();
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.json");
        let set = InputSet::from(&BuildingInput::example());
        let object: serde_json::Map<String, serde_json::Value> = set
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        fs::write(&path, serde_json::to_string(&object).unwrap()).unwrap();

        let input = load_building_input(&path).unwrap();
        assert_eq!(input, BuildingInput::example());
    }

    #[test]
    fn test_load_typed_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.json");
        fs::write(&path, serde_json::to_string(&BuildingInput::example()).unwrap()).unwrap();

        let input = load_building_input(&path).unwrap();
        assert_eq!(input.num_columns, 8);
    }

    #[test]
    fn test_invalid_input_surfaces_engine_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.json");
        fs::write(&path, r#"{ "plot_length": "30", "plot_width": "abc" }"#).unwrap();

        let err = load_building_input(&path).unwrap_err();
        let engine = err.downcast_ref::<estimate_core::EstimateError>().unwrap();
        assert_eq!(engine.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempdir().unwrap();
        let estimate = Estimate::run(&BuildingInput::example(), None).unwrap();
        write_outputs(&estimate, dir.path(), true).unwrap();

        assert!(dir.path().join("layout1.svg").exists());
        assert!(dir.path().join("layout2.svg").exists());
        let loaded = load_estimate(&dir.path().join("estimate.json")).unwrap();
        assert_eq!(loaded.meta.id, estimate.meta.id);
    }

    #[test]
    fn test_write_outputs_without_svg() {
        let dir = tempdir().unwrap();
        let estimate = Estimate::run(&BuildingInput::example(), None).unwrap();
        write_outputs(&estimate, dir.path(), false).unwrap();
        assert!(!dir.path().join("layout1.svg").exists());
    }
}
