//! # Estimate
//!
//! The `Estimate` struct is the root record of one estimation run: the input
//! it was computed from, the base quantities, each plan's quantities, cost
//! and BOQ, and both floor-plan layouts. Estimates serialize to JSON.
//!
//! ## Structure
//!
//! ```text
//! Estimate
//! ├── meta: EstimateMetadata (version, id, timestamp)
//! ├── input: BuildingInput
//! ├── base: MaterialsSnapshot
//! ├── plans: [PlanEstimate; economy, standard, premium]
//! │   └── materials, cost, boq
//! └── layouts: [FloorPlanLayout; layout1, layout2]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::Plan;
//! use estimate_core::estimate::Estimate;
//! use estimate_core::inputs::BuildingInput;
//!
//! let estimate = Estimate::run(&BuildingInput::example(), None).unwrap();
//! let standard = estimate.plan(Plan::Standard).unwrap();
//! assert_eq!(standard.boq.len(), 13);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculations::{adjust, assemble, calculate, price, BoqRow, CostResult, MaterialsSnapshot, Plan};
use crate::errors::EstimateResult;
use crate::inputs::{BuildingInput, InputSet};
use crate::layout::{compute_layout, FloorPlanLayout, Layout};
use crate::rates::RateTable;

/// Current schema version for estimate files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Estimate metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateMetadata {
    /// Schema version for compatibility checking
    pub version: String,
    pub id: Uuid,
    pub created: DateTime<Utc>,
}

impl EstimateMetadata {
    fn new() -> Self {
        EstimateMetadata {
            version: SCHEMA_VERSION.to_string(),
            id: Uuid::new_v4(),
            created: Utc::now(),
        }
    }
}

/// Quantities, cost and BOQ for one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEstimate {
    pub plan: Plan,
    pub materials: MaterialsSnapshot,
    pub cost: CostResult,
    pub boq: Vec<BoqRow>,
}

impl PlanEstimate {
    /// Adjust, price and assemble one plan from the base snapshot
    pub fn build(base: &MaterialsSnapshot, plan: Plan, rates: Option<&RateTable>) -> Self {
        let materials = adjust(base, plan);
        let cost = price(&materials, plan, rates);
        let boq = assemble(&materials, &cost);
        PlanEstimate {
            plan,
            materials,
            cost,
            boq,
        }
    }
}

/// Root estimate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub meta: EstimateMetadata,
    pub input: BuildingInput,
    /// Unadjusted quantities
    pub base: MaterialsSnapshot,
    /// One entry per plan, in `Plan::ALL` order
    pub plans: Vec<PlanEstimate>,
    /// One entry per layout, in `Layout::ALL` order
    pub layouts: Vec<FloorPlanLayout>,
}

impl Estimate {
    /// Run the full pipeline for a building.
    ///
    /// `rates: None` prices against the default rate table.
    pub fn run(input: &BuildingInput, rates: Option<&RateTable>) -> EstimateResult<Self> {
        let base = calculate(input)?;

        let plans = Plan::ALL
            .into_iter()
            .map(|plan| PlanEstimate::build(&base, plan, rates))
            .collect::<Vec<_>>();

        let layouts = Layout::ALL
            .into_iter()
            .map(|layout| compute_layout(input.plot_length_ft, input.plot_width_ft, input.num_floors, layout))
            .collect::<EstimateResult<Vec<_>>>()?;

        let estimate = Estimate {
            meta: EstimateMetadata::new(),
            input: input.clone(),
            base,
            plans,
            layouts,
        };

        info!(
            id = %estimate.meta.id,
            custom_rates = rates.is_some(),
            standard_total = estimate.plan(Plan::Standard).map(|p| p.cost.total_material_cost),
            "estimate complete"
        );

        Ok(estimate)
    }

    /// Parse a raw input set, then run the pipeline
    pub fn run_from_input_set(set: &InputSet, rates: Option<&RateTable>) -> EstimateResult<Self> {
        let input = BuildingInput::from_input_set(set)?;
        Self::run(&input, rates)
    }

    pub fn plan(&self, plan: Plan) -> Option<&PlanEstimate> {
        self.plans.iter().find(|p| p.plan == plan)
    }

    pub fn layout(&self, layout: Layout) -> Option<&FloorPlanLayout> {
        self.layouts.iter().find(|l| l.layout == layout)
    }
}
