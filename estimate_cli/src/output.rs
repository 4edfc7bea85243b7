//! Plain-text report formatting.

use std::fmt::Write;

use estimate_core::calculations::quantities::total_concrete_m3;
use estimate_core::calculations::Plan;
use estimate_core::estimate::PlanEstimate;
use estimate_core::rates::{RateKey, RateTable};
use estimate_core::Estimate;

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// Per-plan totals, one row per plan
pub fn format_summary(estimate: &Estimate) -> String {
    let mut out = String::new();
    let input = &estimate.input;

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  MATERIAL ESTIMATE  {}", estimate.meta.id);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  Plot: {}ft × {}ft, {} floor(s), {} / {} / mortar {}",
        input.plot_length_ft,
        input.plot_width_ft,
        input.num_floors,
        input.structure_type.display_name(),
        input.concrete_grade,
        input.mortar_mix
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<10} {:>13} {:>10} {:>11} {:>10} {:>16} {:>12}",
        "Plan", "Concrete (m³)", "Cement", "Steel (kg)", "Bricks", "Total (INR)", "INR/sqft"
    );

    for plan in &estimate.plans {
        let m = &plan.materials;
        let per_sqft = plan
            .cost
            .cost_per_sqft
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:<10} {:>13.2} {:>10.0} {:>11.1} {:>10.0} {:>16.2} {:>12}",
            plan.plan.display_name(),
            total_concrete_m3(m).value(),
            m.cement.total_bags,
            m.steel.total_steel_kg,
            m.masonry.brick_quantity,
            plan.cost.total_material_cost,
            per_sqft
        );
    }
    let _ = writeln!(out, "{RULE}");
    out
}

/// BOQ table for one plan, with trade subtotals
pub fn format_boq(plan: &PlanEstimate) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "  BILL OF QUANTITIES ({})", plan.plan.display_name());
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  {:<30} {:>11} {:<7} {:>9} {:>12}",
        "Item", "Quantity", "Unit", "Rate", "Amount"
    );

    for row in &plan.boq {
        let rate = row.rate.map(|r| format!("{r:.2}")).unwrap_or_else(|| "-".to_string());
        let amount = row.amount.map(|a| format!("{a:.2}")).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:<30} {:>11.3} {:<7} {:>9} {:>12}",
            row.item,
            row.quantity,
            row.unit.symbol(),
            rate,
            amount
        );
    }

    let s = &plan.cost.subtotals;
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  {:<30} {:>42.2}", "Structure", s.structure);
    let _ = writeln!(out, "  {:<30} {:>42.2}", "Masonry", s.masonry);
    let _ = writeln!(out, "  {:<30} {:>42.2}", "Finishing", s.finishing);
    let _ = writeln!(out, "  {:<30} {:>42.2}", "TOTAL", plan.cost.total_material_cost);
    out
}

/// Rate table with units
pub fn format_rates(rates: &RateTable, plan: Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  RATES ({}, INR)", plan.display_name());
    let _ = writeln!(out, "{RULE}");
    for (key, value) in rates.entries() {
        let _ = writeln!(out, "  {:<20} {:>12.2}  per {}", key.code(), value, key.unit());
    }
    out
}

/// Rates as a JSON object keyed by rate key
pub fn rates_json(rates: &RateTable) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = RateKey::ALL
        .into_iter()
        .map(|key| (key.code().to_string(), serde_json::json!(rates.get(key))))
        .collect();
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::BuildingInput;

    #[test]
    fn test_summary_lists_every_plan() {
        let estimate = Estimate::run(&BuildingInput::example(), None).unwrap();
        let text = format_summary(&estimate);
        for plan in Plan::ALL {
            assert!(text.contains(plan.display_name()));
        }
        assert!(text.contains("M20"));
        // PCC + RCC for the base plan
        let base = total_concrete_m3(&estimate.base).value();
        assert!(text.contains(&format!("{base:.2}")));
    }

    #[test]
    fn test_boq_has_all_rows() {
        let estimate = Estimate::run(&BuildingInput::example(), None).unwrap();
        let plan = estimate.plan(Plan::Economy).unwrap();
        let text = format_boq(plan);
        for row in &plan.boq {
            assert!(text.contains(&row.item));
        }
        assert!(text.contains("TOTAL"));
    }

    #[test]
    fn test_rates_output() {
        let rates = RateTable::default();
        let text = format_rates(&rates, Plan::Standard);
        assert!(text.contains("cement_per_bag"));
        assert!(text.contains("420.00"));
        let json = rates_json(&rates);
        assert_eq!(json["plaster_per_m3"], 2000.0);
    }
}
