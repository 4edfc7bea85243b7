//! # Plan Variants
//!
//! Every estimate is presented at three quality tiers. A tier scales the
//! base quantities (economy builds allow more waste, premium builds less)
//! and, at pricing time, the unit rates.
//!
//! | Plan     | Quantity factor | Rate factor |
//! |----------|-----------------|-------------|
//! | Economy  | 1.08            | 0.90        |
//! | Standard | 1.00            | 1.00        |
//! | Premium  | 0.95            | 1.15        |
//!
//! Scaled fields are all of concrete, cement, sand, aggregate and steel,
//! plus the brick and floor-tile counts. Mortar, plaster, paint and floor
//! areas are carried over unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::quantities::MaterialsSnapshot;
use super::scaling::Scalable;
use crate::errors::{EstimateError, EstimateResult};

/// Quality tier of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Economy,
    #[default]
    Standard,
    Premium,
}

impl Plan {
    /// All plans in presentation order
    pub const ALL: [Plan; 3] = [Plan::Economy, Plan::Standard, Plan::Premium];

    pub fn code(&self) -> &'static str {
        match self {
            Plan::Economy => "economy",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
        }
    }

    pub fn from_code(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(Plan::Economy),
            "standard" => Ok(Plan::Standard),
            "premium" => Ok(Plan::Premium),
            _ => Err(EstimateError::invalid_input(
                "plan",
                s,
                "Expected economy, standard or premium",
            )),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Economy => "Economy",
            Plan::Standard => "Standard",
            Plan::Premium => "Premium",
        }
    }

    /// Multiplier applied to material quantities
    pub fn quantity_factor(&self) -> f64 {
        match self {
            Plan::Economy => 1.08,
            Plan::Standard => 1.0,
            Plan::Premium => 0.95,
        }
    }

    /// Multiplier applied to unit rates
    pub fn rate_factor(&self) -> f64 {
        match self {
            Plan::Economy => 0.90,
            Plan::Standard => 1.0,
            Plan::Premium => 1.15,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Produce the plan variant of a base snapshot.
///
/// The base snapshot is never modified; the result is an independent copy.
pub fn adjust(base: &MaterialsSnapshot, plan: Plan) -> MaterialsSnapshot {
    let mut adjusted = base.clone();
    if plan != Plan::Standard {
        adjusted.scale_by(plan.quantity_factor());
    }
    debug!(plan = plan.code(), factor = plan.quantity_factor(), "adjusted quantities");
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::quantities::calculate;
    use crate::inputs::BuildingInput;

    fn base() -> MaterialsSnapshot {
        calculate(&BuildingInput::example()).unwrap()
    }

    #[test]
    fn test_standard_is_identity() {
        let base = base();
        assert_eq!(adjust(&base, Plan::Standard), base);
    }

    #[test]
    fn test_base_not_mutated() {
        let base = base();
        let before = base.clone();
        let _ = adjust(&base, Plan::Economy);
        let _ = adjust(&base, Plan::Premium);
        assert_eq!(base, before);
    }

    fn scaled_values(mut snapshot: MaterialsSnapshot) -> Vec<f64> {
        let values = snapshot.scalable_fields().into_iter().map(|f| *f.value).collect();
        values
    }

    #[test]
    fn test_economy_standard_premium_ordering() {
        let base = base();
        let e = scaled_values(adjust(&base, Plan::Economy));
        let s = scaled_values(adjust(&base, Plan::Standard));
        let p = scaled_values(adjust(&base, Plan::Premium));
        assert!(!s.is_empty());
        assert_eq!(e.len(), s.len());
        assert_eq!(p.len(), s.len());
        for (i, ((e, s), p)) in e.iter().zip(&s).zip(&p).enumerate() {
            assert!(e >= s, "field {i}: economy {e} < standard {s}");
            assert!(s >= p, "field {i}: standard {s} < premium {p}");
        }
    }

    #[test]
    fn test_economy_values() {
        let base = base();
        let e = adjust(&base, Plan::Economy);
        // 1260 tiles × 1.08 = 1360.8
        assert_eq!(e.finishing.floor_tiles_qty, 1361.0);
        let expected = (base.steel.total_steel_kg * 1.08 * 10.0).round() / 10.0;
        assert_eq!(e.steel.total_steel_kg, expected);
    }

    #[test]
    fn test_unscaled_fields_carry_over() {
        let base = base();
        let p = adjust(&base, Plan::Premium);
        assert_eq!(p.masonry.mortar_volume_m3, base.masonry.mortar_volume_m3);
        assert_eq!(p.finishing.paint_liters, base.finishing.paint_liters);
        assert_eq!(p.finishing.plaster_volume_m3, base.finishing.plaster_volume_m3);
        assert_eq!(p.finishing.flooring_area_m2, base.finishing.flooring_area_m2);
    }

    #[test]
    fn test_adjusted_totals_stay_consistent() {
        let base = base();
        for plan in Plan::ALL {
            assert!(adjust(&base, plan).totals_consistent_within(6.0), "{plan}");
        }
    }

    #[test]
    fn test_plan_codes() {
        assert_eq!(Plan::from_code("Premium").unwrap(), Plan::Premium);
        assert!(Plan::from_code("luxury").is_err());
        assert_eq!(serde_json::to_string(&Plan::Economy).unwrap(), "\"economy\"");
    }
}
