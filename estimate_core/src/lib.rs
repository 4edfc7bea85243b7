//! # estimate_core - Residential Material Estimation Engine
//!
//! `estimate_core` turns basic building dimensions (plot size, floors,
//! footing, column, beam, slab and wall sizes, finishes) into material
//! quantities, three priced plan variants, a bill of quantities and two
//! schematic floor plans. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions that take input and return fresh results
//! - **Validated at the edge**: raw input sets are rejected before any
//!   computation runs
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::{BuildingInput, Estimate, Plan};
//!
//! let estimate = Estimate::run(&BuildingInput::example(), None).unwrap();
//! let premium = estimate.plan(Plan::Premium).unwrap();
//! println!("Premium total: INR {:.2}", premium.cost.total_material_cost);
//! ```
//!
//! ## Modules
//!
//! - [`inputs`] - raw input sets and the validated building record
//! - [`calculations`] - quantities, plan variants, pricing, BOQ
//! - [`rates`] - unit rate tables and plan rate scaling
//! - [`layout`] - floor-plan layouts and SVG rendering
//! - [`estimate`] - the full pipeline and its serializable result
//! - [`standards`] - engineering constants and material enums
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types
//! - [`file_io`] - estimate files with atomic saves, rate files

pub mod calculations;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod inputs;
pub mod layout;
pub mod rates;
pub mod standards;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{BoqRow, CostResult, MaterialsSnapshot, Plan};
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{Estimate, EstimateMetadata, PlanEstimate};
pub use file_io::{load_estimate, load_rate_table, save_estimate};
pub use inputs::{BuildingInput, InputSet};
pub use layout::{compute_layout, render_svg, FloorPlanLayout, Layout};
pub use rates::{RateKey, RateTable};
