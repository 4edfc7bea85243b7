//! # Estimation Calculations
//!
//! The estimation engine, leaf-first:
//!
//! - [`quantities`] - building dimensions to base material quantities
//! - [`plan`] - economy/standard/premium variants of a snapshot
//! - [`cost`] - pricing a snapshot against a rate table
//! - [`boq`] - bill-of-quantities rows from a priced snapshot
//! - [`scaling`] - the shared scale-by-factor operation
//!
//! Every step is a pure function of its inputs and returns a fresh value:
//!
//! ```rust
//! use estimate_core::calculations::{assemble, adjust, calculate, price, Plan};
//! use estimate_core::inputs::BuildingInput;
//!
//! let base = calculate(&BuildingInput::example()).unwrap();
//! let economy = adjust(&base, Plan::Economy);
//! let cost = price(&economy, Plan::Economy, None);
//! let boq = assemble(&economy, &cost);
//! assert_eq!(boq.len(), 13);
//! ```

pub mod boq;
pub mod cost;
pub mod plan;
pub mod quantities;
pub mod scaling;

pub use boq::{assemble, boq_total, BoqRow, Unit};
pub use cost::{price, CategoryCosts, CostResult, CostSubtotals};
pub use plan::{adjust, Plan};
pub use quantities::{calculate, calculate_from_input_set, MaterialsSnapshot};
pub use scaling::{Scalable, ScaledField};
