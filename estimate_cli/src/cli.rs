use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use estimate_core::{Layout, Plan};

/// Plinth - residential material and cost estimates
#[derive(Parser, Debug)]
#[command(name = "estimate")]
#[command(about = "Residential material quantity and cost estimator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./estimator.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "estimate_core=trace"
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute quantities, costs, BOQ and layouts for a building
    Run(RunArgs),

    /// Show the resolved rate table
    Rates(RatesArgs),

    /// Print a floor-plan layout as SVG
    Layout(LayoutArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Building input file (JSON)
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Rate file (TOML or JSON); overrides the configured one
    #[arg(long, value_name = "FILE")]
    pub rates: Option<PathBuf>,

    /// Directory to write estimate.json and layout SVGs into
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Plan whose BOQ is printed
    #[arg(long, default_value = "standard")]
    pub plan: PlanArg,

    /// Print the full estimate as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Do not write layout SVGs
    #[arg(long)]
    pub no_svg: bool,
}

#[derive(Args, Debug)]
pub struct RatesArgs {
    /// Rate file (TOML or JSON); overrides the configured one
    #[arg(long, value_name = "FILE")]
    pub rates: Option<PathBuf>,

    /// Show rates after this plan's scaling
    #[arg(long, default_value = "standard")]
    pub plan: PlanArg,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Plot length (ft)
    #[arg(long)]
    pub length: f64,

    /// Plot width (ft)
    #[arg(long)]
    pub width: f64,

    /// Number of floors
    #[arg(long, default_value_t = 1)]
    pub floors: u32,

    /// Layout: 1 (open concept) or 2 (separate rooms)
    #[arg(long, default_value = "1")]
    pub layout: LayoutArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlanArg {
    Economy,
    Standard,
    Premium,
}

impl From<PlanArg> for Plan {
    fn from(arg: PlanArg) -> Self {
        match arg {
            PlanArg::Economy => Plan::Economy,
            PlanArg::Standard => Plan::Standard,
            PlanArg::Premium => Plan::Premium,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// Open concept
    #[value(name = "1", alias = "layout1")]
    One,
    /// Separate rooms
    #[value(name = "2", alias = "layout2")]
    Two,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::One => Layout::OpenConcept,
            LayoutArg::Two => Layout::SeparateRooms,
        }
    }
}
