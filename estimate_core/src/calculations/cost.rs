//! # Material Cost
//!
//! Prices a (plan-adjusted) [`MaterialsSnapshot`] against a [`RateTable`].
//!
//! The rate table is chosen first (explicit table, else defaults) and the
//! plan rate factor is applied to it afterwards, so a custom price list still
//! gets economy/premium scaling.
//!
//! ## Pricing Basis
//!
//! | Item      | Quantity                                   | Rate               |
//! |-----------|--------------------------------------------|--------------------|
//! | cement    | total bags                                 | `cement_per_bag`   |
//! | sand      | Σ sand m³ (or total kg ÷ 1600)             | `sand_per_m3`      |
//! | aggregate | aggregate m³ (or kg ÷ 1500)                | `aggregate_per_m3` |
//! | steel     | total kg                                   | `steel_per_kg`     |
//! | bricks    | count ÷ 100                                | `brick_per_100`    |
//! | tiles     | flooring m²                                | `tile_per_sqm`     |
//! | paint     | litres                                     | `paint_per_liter`  |
//! | plaster   | plaster m³                                 | `plaster_per_m3`   |

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::plan::Plan;
use super::quantities::MaterialsSnapshot;
use crate::rates::RateTable;
use crate::standards::{AGGREGATE_BULK_DENSITY_KG_M3, SAND_BULK_DENSITY_KG_M3};
use crate::units::round_dp;

/// Decimal places for money amounts
pub const MONEY_DP: u32 = 2;

/// Cost per priced material (INR, 2 dp)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryCosts {
    pub cement: f64,
    pub sand: f64,
    pub aggregate: f64,
    pub steel: f64,
    pub bricks: f64,
    pub tiles: f64,
    pub paint: f64,
    pub plaster: f64,
}

impl CategoryCosts {
    /// Labelled amounts in pricing order
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("cement", self.cement),
            ("sand", self.sand),
            ("aggregate", self.aggregate),
            ("steel", self.steel),
            ("bricks", self.bricks),
            ("tiles", self.tiles),
            ("paint", self.paint),
            ("plaster", self.plaster),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, v)| v).sum()
    }
}

/// Costs grouped by trade
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSubtotals {
    /// cement + sand + aggregate + steel
    pub structure: f64,
    /// bricks
    pub masonry: f64,
    /// tiles + paint + plaster
    pub finishing: f64,
}

/// Priced result for one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub plan: Plan,
    pub itemized: CategoryCosts,
    pub subtotals: CostSubtotals,
    /// Rates after plan scaling
    pub applied_rates: RateTable,
    pub total_material_cost: f64,
    /// `None` when the built-up area is zero
    pub cost_per_sqft: Option<f64>,
    pub total_built_area_sqft: f64,
}

/// Price a snapshot for a plan.
///
/// `rates: None` uses the default table.
pub fn price(snapshot: &MaterialsSnapshot, plan: Plan, rates: Option<&RateTable>) -> CostResult {
    let base = rates.copied().unwrap_or_default();
    let applied = base.scaled_for(plan);

    let sand = &snapshot.sand;
    let mut sand_m3 = sand.total_m3();
    if sand_m3 == 0.0 && sand.total_sand_kg > 0.0 {
        sand_m3 = sand.total_sand_kg / SAND_BULK_DENSITY_KG_M3;
    }

    let aggregate = &snapshot.aggregate;
    let mut aggregate_m3 = aggregate.concrete_aggregate_m3;
    if aggregate_m3 == 0.0 && aggregate.concrete_aggregate_kg > 0.0 {
        aggregate_m3 = aggregate.concrete_aggregate_kg / AGGREGATE_BULK_DENSITY_KG_M3;
    }

    let finishing = &snapshot.finishing;
    let itemized = CategoryCosts {
        cement: money(snapshot.cement.total_bags * applied.cement_per_bag),
        sand: money(sand_m3 * applied.sand_per_m3),
        aggregate: money(aggregate_m3 * applied.aggregate_per_m3),
        steel: money(snapshot.steel.total_steel_kg * applied.steel_per_kg),
        bricks: money(snapshot.masonry.brick_quantity / 100.0 * applied.brick_per_100),
        tiles: money(finishing.flooring_area_m2 * applied.tile_per_sqm),
        paint: money(finishing.paint_liters * applied.paint_per_liter),
        plaster: money(finishing.plaster_volume_m3 * applied.plaster_per_m3),
    };

    let subtotals = CostSubtotals {
        structure: money(itemized.cement + itemized.sand + itemized.aggregate + itemized.steel),
        masonry: itemized.bricks,
        finishing: money(itemized.tiles + itemized.paint + itemized.plaster),
    };

    let total = money(itemized.sum());
    let area = finishing.flooring_area_sqft;
    let cost_per_sqft = if area > 0.0 {
        Some(money(total / area))
    } else {
        None
    };

    debug!(plan = plan.code(), total, "priced materials");

    CostResult {
        plan,
        itemized,
        subtotals,
        applied_rates: applied,
        total_material_cost: total,
        cost_per_sqft,
        total_built_area_sqft: round_dp(area, 2),
    }
}

fn money(value: f64) -> f64 {
    round_dp(value, MONEY_DP)
}
