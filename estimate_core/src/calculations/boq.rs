//! # Bill of Quantities
//!
//! Joins a snapshot and its cost result into the 13 BOQ line items, always
//! in the same order. Concrete rows are informational: their cost is carried
//! by the cement, sand, aggregate and steel rows, so they have no rate or
//! amount.

use serde::{Deserialize, Serialize};

use super::cost::CostResult;
use super::quantities::{MaterialsSnapshot, FINE_VOLUME_DP};
use crate::units::round_dp;

/// Unit of a BOQ quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "m3")]
    CubicMeters,
    #[serde(rename = "m2")]
    SquareMeters,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "bags")]
    Bags,
    #[serde(rename = "nos")]
    Numbers,
    #[serde(rename = "liters")]
    Liters,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::CubicMeters => "m3",
            Unit::SquareMeters => "m2",
            Unit::Kilograms => "kg",
            Unit::Bags => "bags",
            Unit::Numbers => "nos",
            Unit::Liters => "liters",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One BOQ line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqRow {
    pub item: String,
    pub quantity: f64,
    pub unit: Unit,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
}

impl BoqRow {
    fn unpriced(item: &str, quantity: f64, unit: Unit) -> Self {
        BoqRow {
            item: item.to_string(),
            quantity,
            unit,
            rate: None,
            amount: None,
        }
    }

    fn priced(item: &str, quantity: f64, unit: Unit, rate: f64, amount: f64) -> Self {
        BoqRow {
            item: item.to_string(),
            quantity,
            unit,
            rate: Some(rate),
            amount: Some(amount),
        }
    }
}

/// Number of rows every BOQ has
pub const BOQ_ROW_COUNT: usize = 13;

/// Assemble the BOQ for a priced snapshot.
pub fn assemble(snapshot: &MaterialsSnapshot, cost: &CostResult) -> Vec<BoqRow> {
    let c = &snapshot.concrete;
    let rates = &cost.applied_rates;
    let items = &cost.itemized;
    let finishing = &snapshot.finishing;

    vec![
        BoqRow::unpriced("PCC (Plain Cement Concrete)", c.pcc_volume_m3, Unit::CubicMeters),
        BoqRow::unpriced("RCC Footing Concrete", c.footing_rcc_m3, Unit::CubicMeters),
        BoqRow::unpriced("RCC Column Concrete", c.column_rcc_m3, Unit::CubicMeters),
        BoqRow::unpriced("RCC Beam Concrete", c.beam_rcc_m3, Unit::CubicMeters),
        BoqRow::unpriced("RCC Slab Concrete", c.slab_rcc_m3, Unit::CubicMeters),
        BoqRow::priced("Cement", snapshot.cement.total_bags, Unit::Bags, rates.cement_per_bag, items.cement),
        BoqRow::priced(
            "Sand",
            round_dp(snapshot.sand.total_m3(), FINE_VOLUME_DP),
            Unit::CubicMeters,
            rates.sand_per_m3,
            items.sand,
        ),
        BoqRow::priced(
            "Aggregate",
            snapshot.aggregate.concrete_aggregate_m3,
            Unit::CubicMeters,
            rates.aggregate_per_m3,
            items.aggregate,
        ),
        BoqRow::priced(
            "Steel Reinforcement",
            snapshot.steel.total_steel_kg,
            Unit::Kilograms,
            rates.steel_per_kg,
            items.steel,
        ),
        BoqRow::priced(
            "Bricks",
            snapshot.masonry.brick_quantity,
            Unit::Numbers,
            rates.brick_per_100,
            items.bricks,
        ),
        BoqRow::priced(
            "Floor Tiles",
            finishing.flooring_area_m2,
            Unit::SquareMeters,
            rates.tile_per_sqm,
            items.tiles,
        ),
        BoqRow::priced("Paint", finishing.paint_liters, Unit::Liters, rates.paint_per_liter, items.paint),
        BoqRow::priced(
            "Plaster",
            finishing.plaster_volume_m3,
            Unit::CubicMeters,
            rates.plaster_per_m3,
            items.plaster,
        ),
    ]
}

/// Sum of the priced amounts
pub fn boq_total(rows: &[BoqRow]) -> f64 {
    round_dp(rows.iter().filter_map(|r| r.amount).sum(), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::cost::price;
    use crate::calculations::plan::{adjust, Plan};
    use crate::calculations::quantities::calculate;
    use crate::inputs::BuildingInput;

    fn boq_for(plan: Plan) -> (MaterialsSnapshot, CostResult, Vec<BoqRow>) {
        let snapshot = adjust(&calculate(&BuildingInput::example()).unwrap(), plan);
        let cost = price(&snapshot, plan, None);
        let rows = assemble(&snapshot, &cost);
        (snapshot, cost, rows)
    }

    #[test]
    fn test_fixed_row_order() {
        let (_, _, rows) = boq_for(Plan::Standard);
        assert_eq!(rows.len(), BOQ_ROW_COUNT);
        let items: Vec<&str> = rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(
            items,
            vec![
                "PCC (Plain Cement Concrete)",
                "RCC Footing Concrete",
                "RCC Column Concrete",
                "RCC Beam Concrete",
                "RCC Slab Concrete",
                "Cement",
                "Sand",
                "Aggregate",
                "Steel Reinforcement",
                "Bricks",
                "Floor Tiles",
                "Paint",
                "Plaster",
            ]
        );
    }

    #[test]
    fn test_concrete_rows_unpriced() {
        let (_, _, rows) = boq_for(Plan::Economy);
        for row in &rows[..5] {
            assert_eq!(row.unit, Unit::CubicMeters);
            assert!(row.rate.is_none() && row.amount.is_none(), "{}", row.item);
        }
        for row in &rows[5..] {
            assert!(row.rate.is_some() && row.amount.is_some(), "{}", row.item);
        }
    }

    #[test]
    fn test_boq_total_matches_cost_total() {
        for plan in Plan::ALL {
            let (_, cost, rows) = boq_for(plan);
            assert!((boq_total(&rows) - cost.total_material_cost).abs() < 0.005);
        }
    }

    #[test]
    fn test_sand_row_sums_volumes() {
        let (snapshot, _, rows) = boq_for(Plan::Standard);
        let sand = &snapshot.sand;
        let expected = round_dp(sand.concrete_sand_m3 + sand.brickwork_sand_m3 + sand.plaster_sand_m3, 3);
        assert_eq!(rows[6].quantity, expected);
        assert_eq!(rows[10].quantity, snapshot.finishing.flooring_area_m2);
    }

    #[test]
    fn test_assembly_deterministic() {
        let (_, _, a) = boq_for(Plan::Premium);
        let (_, _, b) = boq_for(Plan::Premium);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_serialization() {
        let (_, _, rows) = boq_for(Plan::Standard);
        let json = serde_json::to_value(&rows[5]).unwrap();
        assert_eq!(json["unit"], "bags");
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert!(json["rate"].is_null());
    }
}
