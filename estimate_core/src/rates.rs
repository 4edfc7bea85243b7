//! # Rate Tables
//!
//! Unit prices (INR) for the eight priced materials. A table is resolved in
//! priority order: an explicit rate source overlays the built-in defaults,
//! and the plan rate factor is applied last, at pricing time.
//!
//! ## Default Rates
//!
//! | Key                | Unit        | Rate |
//! |--------------------|-------------|------|
//! | `cement_per_bag`   | 50 kg bag   | 420  |
//! | `sand_per_m3`      | m³          | 1200 |
//! | `aggregate_per_m3` | m³          | 900  |
//! | `steel_per_kg`     | kg          | 65   |
//! | `brick_per_100`    | 100 bricks  | 350  |
//! | `tile_per_sqm`     | m²          | 300  |
//! | `paint_per_liter`  | L           | 500  |
//! | `plaster_per_m3`   | m³          | 2000 |
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::plan::Plan;
//! use estimate_core::rates::{RateKey, RateTable};
//!
//! let economy = RateTable::default().scaled_for(Plan::Economy);
//! assert!((economy.get(RateKey::CementPerBag) - 378.0).abs() < 1e-9);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::plan::Plan;
use crate::calculations::scaling::{Scalable, ScaledField};
use crate::errors::{EstimateError, EstimateResult};

/// Built-in rates used when no rate source is supplied
pub static DEFAULT_RATES: Lazy<RateTable> = Lazy::new(|| RateTable {
    cement_per_bag: 420.0,
    sand_per_m3: 1200.0,
    aggregate_per_m3: 900.0,
    steel_per_kg: 65.0,
    brick_per_100: 350.0,
    tile_per_sqm: 300.0,
    paint_per_liter: 500.0,
    plaster_per_m3: 2000.0,
});

/// One of the eight priced rate keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKey {
    CementPerBag,
    SandPerM3,
    AggregatePerM3,
    SteelPerKg,
    BrickPer100,
    TilePerSqm,
    PaintPerLiter,
    PlasterPerM3,
}

impl RateKey {
    pub const ALL: [RateKey; 8] = [
        RateKey::CementPerBag,
        RateKey::SandPerM3,
        RateKey::AggregatePerM3,
        RateKey::SteelPerKg,
        RateKey::BrickPer100,
        RateKey::TilePerSqm,
        RateKey::PaintPerLiter,
        RateKey::PlasterPerM3,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RateKey::CementPerBag => "cement_per_bag",
            RateKey::SandPerM3 => "sand_per_m3",
            RateKey::AggregatePerM3 => "aggregate_per_m3",
            RateKey::SteelPerKg => "steel_per_kg",
            RateKey::BrickPer100 => "brick_per_100",
            RateKey::TilePerSqm => "tile_per_sqm",
            RateKey::PaintPerLiter => "paint_per_liter",
            RateKey::PlasterPerM3 => "plaster_per_m3",
        }
    }

    pub fn from_code(s: &str) -> EstimateResult<Self> {
        RateKey::ALL
            .into_iter()
            .find(|key| key.code() == s.trim())
            .ok_or_else(|| EstimateError::invalid_input("rate_key", s, "Unknown rate key"))
    }

    /// Pricing unit, for display
    pub fn unit(&self) -> &'static str {
        match self {
            RateKey::CementPerBag => "bag",
            RateKey::SandPerM3 | RateKey::AggregatePerM3 | RateKey::PlasterPerM3 => "m3",
            RateKey::SteelPerKg => "kg",
            RateKey::BrickPer100 => "100 nos",
            RateKey::TilePerSqm => "m2",
            RateKey::PaintPerLiter => "liter",
        }
    }

    /// Map a free-text material name from a price list to a rate key.
    ///
    /// Matching is case-insensitive substring search; the first rule that
    /// matches wins, so "Cement Plaster" maps to cement.
    pub fn from_material_name(name: &str) -> Option<RateKey> {
        const RULES: [(RateKey, &[&str]); 8] = [
            (RateKey::CementPerBag, &["cement"]),
            (RateKey::SandPerM3, &["sand"]),
            (RateKey::AggregatePerM3, &["aggregate", "gravel", "chips"]),
            (RateKey::SteelPerKg, &["steel", "rebar", "reinforcement"]),
            (RateKey::BrickPer100, &["brick"]),
            (RateKey::TilePerSqm, &["tile", "flooring"]),
            (RateKey::PaintPerLiter, &["paint", "coating"]),
            (RateKey::PlasterPerM3, &["plaster", "finish"]),
        ];

        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        RULES
            .iter()
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
            .map(|(key, _)| *key)
    }
}

impl std::fmt::Display for RateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unit prices for every priced material.
///
/// `Copy`, so a loaded table can be shared freely between plan pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub cement_per_bag: f64,
    pub sand_per_m3: f64,
    pub aggregate_per_m3: f64,
    pub steel_per_kg: f64,
    pub brick_per_100: f64,
    pub tile_per_sqm: f64,
    pub paint_per_liter: f64,
    pub plaster_per_m3: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        *DEFAULT_RATES
    }
}

impl RateTable {
    pub fn get(&self, key: RateKey) -> f64 {
        match key {
            RateKey::CementPerBag => self.cement_per_bag,
            RateKey::SandPerM3 => self.sand_per_m3,
            RateKey::AggregatePerM3 => self.aggregate_per_m3,
            RateKey::SteelPerKg => self.steel_per_kg,
            RateKey::BrickPer100 => self.brick_per_100,
            RateKey::TilePerSqm => self.tile_per_sqm,
            RateKey::PaintPerLiter => self.paint_per_liter,
            RateKey::PlasterPerM3 => self.plaster_per_m3,
        }
    }

    fn slot(&mut self, key: RateKey) -> &mut f64 {
        match key {
            RateKey::CementPerBag => &mut self.cement_per_bag,
            RateKey::SandPerM3 => &mut self.sand_per_m3,
            RateKey::AggregatePerM3 => &mut self.aggregate_per_m3,
            RateKey::SteelPerKg => &mut self.steel_per_kg,
            RateKey::BrickPer100 => &mut self.brick_per_100,
            RateKey::TilePerSqm => &mut self.tile_per_sqm,
            RateKey::PaintPerLiter => &mut self.paint_per_liter,
            RateKey::PlasterPerM3 => &mut self.plaster_per_m3,
        }
    }

    /// Set one rate, rejecting negative or non-finite prices
    pub fn set(&mut self, key: RateKey, value: f64) -> EstimateResult<()> {
        validate_rate(key, value)?;
        *self.slot(key) = value;
        Ok(())
    }

    /// Build a table from a complete key → rate map.
    ///
    /// # Errors
    ///
    /// * `MissingRateKey` - one of the eight keys is absent
    /// * `InvalidInput` - an unknown key, or a negative/non-finite rate
    pub fn from_map(map: &BTreeMap<String, f64>) -> EstimateResult<Self> {
        if let Some(unknown) = map.keys().find(|k| RateKey::from_code(k).is_err()) {
            return Err(EstimateError::invalid_input(unknown.as_str(), "", "Unknown rate key"));
        }

        let mut table = *DEFAULT_RATES;
        for key in RateKey::ALL {
            let value = map
                .get(key.code())
                .copied()
                .ok_or_else(|| EstimateError::missing_rate_key(key.code()))?;
            table.set(key, value)?;
        }
        Ok(table)
    }

    /// Copy of this table with some rates replaced
    pub fn with_overrides<'a>(
        &self,
        overrides: impl IntoIterator<Item = (&'a RateKey, &'a f64)>,
    ) -> EstimateResult<Self> {
        let mut table = *self;
        for (key, value) in overrides {
            table.set(*key, *value)?;
        }
        Ok(table)
    }

    /// Copy of this table with the plan rate factor applied
    pub fn scaled_for(&self, plan: Plan) -> Self {
        let mut table = *self;
        if plan != Plan::Standard {
            table.scale_by(plan.rate_factor());
        }
        table
    }

    /// Key → rate pairs in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (RateKey, f64)> + '_ {
        RateKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl Scalable for RateTable {
    fn scalable_fields(&mut self) -> Vec<ScaledField<'_>> {
        vec![
            ScaledField::exact(&mut self.cement_per_bag),
            ScaledField::exact(&mut self.sand_per_m3),
            ScaledField::exact(&mut self.aggregate_per_m3),
            ScaledField::exact(&mut self.steel_per_kg),
            ScaledField::exact(&mut self.brick_per_100),
            ScaledField::exact(&mut self.tile_per_sqm),
            ScaledField::exact(&mut self.paint_per_liter),
            ScaledField::exact(&mut self.plaster_per_m3),
        ]
    }
}

fn validate_rate(key: RateKey, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_input(
            key.code(),
            value.to_string(),
            "Rate must be a non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> BTreeMap<String, f64> {
        RateKey::ALL
            .into_iter()
            .map(|k| (k.code().to_string(), 100.0))
            .collect()
    }

    #[test]
    fn test_default_rates() {
        let t = RateTable::default();
        assert_eq!(t.cement_per_bag, 420.0);
        assert_eq!(t.sand_per_m3, 1200.0);
        assert_eq!(t.aggregate_per_m3, 900.0);
        assert_eq!(t.steel_per_kg, 65.0);
        assert_eq!(t.brick_per_100, 350.0);
        assert_eq!(t.tile_per_sqm, 300.0);
        assert_eq!(t.paint_per_liter, 500.0);
        assert_eq!(t.plaster_per_m3, 2000.0);
    }

    #[test]
    fn test_plan_scaling() {
        let base = RateTable::default();
        let economy = base.scaled_for(Plan::Economy);
        let premium = base.scaled_for(Plan::Premium);
        assert!((economy.steel_per_kg - 58.5).abs() < 1e-9);
        assert!((premium.plaster_per_m3 - 2300.0).abs() < 1e-9);
        assert_eq!(base.scaled_for(Plan::Standard), base);
    }

    #[test]
    fn test_from_map_complete() {
        let t = RateTable::from_map(&full_map()).unwrap();
        assert!(t.entries().all(|(_, v)| v == 100.0));
    }

    #[test]
    fn test_from_map_missing_key() {
        let mut map = full_map();
        map.remove("paint_per_liter");
        let err = RateTable::from_map(&map).unwrap_err();
        assert_eq!(err, EstimateError::missing_rate_key("paint_per_liter"));
        assert_eq!(err.error_code(), "MISSING_RATE_KEY");
    }

    #[test]
    fn test_from_map_unknown_key() {
        let mut map = full_map();
        map.insert("labour_per_day".to_string(), 800.0);
        let err = RateTable::from_map(&map).unwrap_err();
        assert_eq!(err.field(), Some("labour_per_day"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut t = RateTable::default();
        assert!(t.set(RateKey::SteelPerKg, -1.0).is_err());
        assert!(t.set(RateKey::SteelPerKg, f64::NAN).is_err());
        assert_eq!(t.steel_per_kg, 65.0);
    }

    #[test]
    fn test_overrides_keep_other_defaults() {
        let overrides = BTreeMap::from([(RateKey::CementPerBag, 450.0)]);
        let t = RateTable::default().with_overrides(&overrides).unwrap();
        assert_eq!(t.cement_per_bag, 450.0);
        assert_eq!(t.sand_per_m3, 1200.0);
    }

    #[test]
    fn test_material_name_mapping() {
        assert_eq!(RateKey::from_material_name("OPC Cement 53 Grade"), Some(RateKey::CementPerBag));
        assert_eq!(RateKey::from_material_name("River Sand"), Some(RateKey::SandPerM3));
        assert_eq!(RateKey::from_material_name("20mm Chips"), Some(RateKey::AggregatePerM3));
        assert_eq!(RateKey::from_material_name("TMT Rebar"), Some(RateKey::SteelPerKg));
        assert_eq!(RateKey::from_material_name("Red Bricks"), Some(RateKey::BrickPer100));
        assert_eq!(RateKey::from_material_name("Vitrified Flooring"), Some(RateKey::TilePerSqm));
        assert_eq!(RateKey::from_material_name("Emulsion Coating"), Some(RateKey::PaintPerLiter));
        assert_eq!(RateKey::from_material_name("Wall Finish"), Some(RateKey::PlasterPerM3));
        assert_eq!(RateKey::from_material_name("Labour"), None);
        assert_eq!(RateKey::from_material_name("  "), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        assert_eq!(RateKey::from_material_name("Cement Plaster"), Some(RateKey::CementPerBag));
        assert_eq!(RateKey::from_material_name("Sand Finish"), Some(RateKey::SandPerM3));
    }

    #[test]
    fn test_rate_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<RateTable>();
    }
}
