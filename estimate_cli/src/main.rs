//! # Plinth CLI
//!
//! Command-line front end for `estimate_core`: loads a building input file,
//! a layered configuration and an optional rate file, runs the estimate and
//! prints or saves the results.

mod cli;
mod commands;
mod config;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use estimate_core::EstimateError;

use cli::{Cli, Commands};
use config::{CliConfigOverrides, LayeredConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = match &cli.command {
        Commands::Run(args) => CliConfigOverrides {
            rates_file: args.rates.clone(),
            output_dir: args.out.clone(),
            no_svg: args.no_svg,
            log_level: cli.log.clone(),
        },
        Commands::Rates(args) => CliConfigOverrides {
            rates_file: args.rates.clone(),
            log_level: cli.log.clone(),
            ..Default::default()
        },
        Commands::Layout(_) => CliConfigOverrides {
            log_level: cli.log.clone(),
            ..Default::default()
        },
    };

    let config = match LayeredConfig::resolve(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.log_level.value);

    match commands::execute(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(engine) = err.downcast_ref::<EstimateError>() {
                if let Ok(json) = serde_json::to_string_pretty(engine) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{json}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
