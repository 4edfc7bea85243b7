//! # Material Quantities
//!
//! Converts a [`BuildingInput`] into a [`MaterialsSnapshot`]: concrete
//! volumes, cement bags, sand and aggregate, reinforcement steel, bricks and
//! finishing materials.
//!
//! ## Method
//!
//! 1. **Concrete** - footing, PCC, column, beam and slab volumes from their
//!    imperial dimensions. RCC elements are totalled; PCC is kept apart.
//! 2. **Cement & mix** - cement content per m³ by grade, bagged at 50 kg.
//!    Sand and aggregate volumes follow the nominal volumetric mix and are
//!    converted to mass with bulk densities.
//! 3. **Mortar & plaster** - mortar is 10 % of wall volume at the selected
//!    mortar ratio. Plaster is always 1:3; 80 % of the wall face is plastered
//!    inside, the external run is plastered outside. Mortar, plaster and
//!    concrete bags are each rounded up separately.
//! 4. **Steel** - kg/m³ consumption rates per element.
//! 5. **Masonry** - wall volume over brick volume, no waste.
//! 6. **Finishing** - tiles with 5 % waste, paint at 10 m²/L/coat.
//!
//! All derivations run at full precision; values are rounded once, when the
//! snapshot is assembled.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::quantities::calculate;
//! use estimate_core::inputs::BuildingInput;
//!
//! let snapshot = calculate(&BuildingInput::example()).unwrap();
//! assert!(snapshot.cement.total_bags > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scaling::{Scalable, ScaledField};
use crate::errors::EstimateResult;
use crate::inputs::{BuildingInput, InputSet};
use crate::standards::{
    AGGREGATE_BULK_DENSITY_KG_M3, CEMENT_BAG_KG, CEMENT_BULK_DENSITY_KG_M3, INTERNAL_PLASTER_SHARE,
    MORTAR_SHARE_OF_WALL, PAINT_COVERAGE_M2_PER_LITRE, PLASTER_MIX, SAND_BULK_DENSITY_KG_M3,
    STEEL_USAGE_KG_PER_M3, TILE_WASTE_FACTOR,
};
use crate::units::{round_dp, CubicMeters, Feet, Inches, Meters, SqFt, SqMeters, SQFT_TO_SQM};

/// Decimal places for concrete volumes
pub const VOLUME_DP: u32 = 2;
/// Decimal places for sand/aggregate/mortar/plaster volumes
pub const FINE_VOLUME_DP: u32 = 3;
/// Decimal places for masses
pub const MASS_DP: u32 = 1;
/// Decimal places for bag and item counts
pub const COUNT_DP: u32 = 0;

/// Concrete volumes (m³)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcreteQuantities {
    pub pcc_volume_m3: f64,
    pub footing_rcc_m3: f64,
    pub column_rcc_m3: f64,
    pub beam_rcc_m3: f64,
    pub slab_rcc_m3: f64,
    /// footing + column + beam + slab (PCC excluded)
    pub total_rcc_m3: f64,
}

/// Cement demand (50 kg bags)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CementQuantities {
    pub for_concrete_bags: f64,
    pub for_mortar_bags: f64,
    pub for_plaster_bags: f64,
    pub total_bags: f64,
}

/// Fine aggregate by use
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SandQuantities {
    pub concrete_sand_m3: f64,
    pub concrete_sand_kg: f64,
    pub brickwork_sand_m3: f64,
    pub brickwork_sand_kg: f64,
    pub plaster_sand_m3: f64,
    pub plaster_sand_kg: f64,
    pub total_sand_kg: f64,
}

impl SandQuantities {
    /// Concrete + brickwork + plaster sand volume (m³)
    pub fn total_m3(&self) -> f64 {
        self.concrete_sand_m3 + self.brickwork_sand_m3 + self.plaster_sand_m3
    }
}

/// Coarse aggregate for concrete
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateQuantities {
    pub concrete_aggregate_m3: f64,
    pub concrete_aggregate_kg: f64,
    pub total_aggregate_kg: f64,
}

/// Reinforcement steel (kg)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SteelQuantities {
    pub footing_steel_kg: f64,
    pub column_steel_kg: f64,
    pub beam_steel_kg: f64,
    pub slab_steel_kg: f64,
    pub total_steel_kg: f64,
}

/// Brickwork
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MasonryQuantities {
    pub brick_quantity: f64,
    pub mortar_volume_m3: f64,
}

/// Finishes, plus the floor areas downstream pricing needs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinishingQuantities {
    pub floor_tiles_qty: f64,
    pub paint_liters: f64,
    pub plaster_volume_m3: f64,
    pub flooring_area_sqft: f64,
    pub flooring_area_m2: f64,
    pub tile_area_m2: f64,
}

/// Complete set of material quantities for one building (or one plan variant).
///
/// ## JSON Example (abbreviated)
///
/// ```json
/// {
///   "concrete": { "pcc_volume_m3": 0.91, "footing_rcc_m3": 3.62, "total_rcc_m3": 31.41 },
///   "cement": { "for_concrete_bags": 208.0, "total_bags": 268.0 },
///   "steel": { "total_steel_kg": 3345.2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialsSnapshot {
    pub concrete: ConcreteQuantities,
    pub cement: CementQuantities,
    pub sand: SandQuantities,
    pub aggregate: AggregateQuantities,
    pub steel: SteelQuantities,
    pub masonry: MasonryQuantities,
    pub finishing: FinishingQuantities,
}

impl MaterialsSnapshot {
    /// Check that every declared total matches the sum of its components.
    ///
    /// Components and totals are rounded independently, so they may drift by
    /// a few units in the last stored decimal; `ulps` bounds that drift.
    pub fn totals_consistent_within(&self, ulps: f64) -> bool {
        let c = &self.concrete;
        let cement = &self.cement;
        let s = &self.sand;
        let st = &self.steel;
        sums_match(
            c.total_rcc_m3,
            &[c.footing_rcc_m3, c.column_rcc_m3, c.beam_rcc_m3, c.slab_rcc_m3],
            VOLUME_DP,
            ulps,
        ) && sums_match(
            cement.total_bags,
            &[cement.for_concrete_bags, cement.for_mortar_bags, cement.for_plaster_bags],
            COUNT_DP,
            ulps,
        ) && sums_match(
            s.total_sand_kg,
            &[s.concrete_sand_kg, s.brickwork_sand_kg, s.plaster_sand_kg],
            MASS_DP,
            ulps,
        ) && sums_match(
            st.total_steel_kg,
            &[st.footing_steel_kg, st.column_steel_kg, st.beam_steel_kg, st.slab_steel_kg],
            MASS_DP,
            ulps,
        ) && sums_match(
            self.aggregate.total_aggregate_kg,
            &[self.aggregate.concrete_aggregate_kg],
            MASS_DP,
            ulps,
        )
    }

    /// True when no stored quantity is negative or non-finite
    pub fn all_non_negative(&self) -> bool {
        let mut copy = self.clone();
        let fields = copy.fields(true);
        fields.iter().all(|f| f.value.is_finite() && *f.value >= 0.0)
    }

    /// Quantities at their stored precision.
    ///
    /// Plan variants scale all of concrete, cement, sand, aggregate and
    /// steel, plus brick and floor-tile counts. `include_unscaled` adds the
    /// remaining masonry and finishing quantities.
    fn fields(&mut self, include_unscaled: bool) -> Vec<ScaledField<'_>> {
        let c = &mut self.concrete;
        let cement = &mut self.cement;
        let s = &mut self.sand;
        let a = &mut self.aggregate;
        let st = &mut self.steel;
        let m = &mut self.masonry;
        let f = &mut self.finishing;
        let mut fields = vec![
            ScaledField::rounded(&mut c.pcc_volume_m3, VOLUME_DP),
            ScaledField::rounded(&mut c.footing_rcc_m3, VOLUME_DP),
            ScaledField::rounded(&mut c.column_rcc_m3, VOLUME_DP),
            ScaledField::rounded(&mut c.beam_rcc_m3, VOLUME_DP),
            ScaledField::rounded(&mut c.slab_rcc_m3, VOLUME_DP),
            ScaledField::rounded(&mut c.total_rcc_m3, VOLUME_DP),
            ScaledField::rounded(&mut cement.for_concrete_bags, COUNT_DP),
            ScaledField::rounded(&mut cement.for_mortar_bags, COUNT_DP),
            ScaledField::rounded(&mut cement.for_plaster_bags, COUNT_DP),
            ScaledField::rounded(&mut cement.total_bags, COUNT_DP),
            ScaledField::rounded(&mut s.concrete_sand_m3, FINE_VOLUME_DP),
            ScaledField::rounded(&mut s.concrete_sand_kg, MASS_DP),
            ScaledField::rounded(&mut s.brickwork_sand_m3, FINE_VOLUME_DP),
            ScaledField::rounded(&mut s.brickwork_sand_kg, MASS_DP),
            ScaledField::rounded(&mut s.plaster_sand_m3, FINE_VOLUME_DP),
            ScaledField::rounded(&mut s.plaster_sand_kg, MASS_DP),
            ScaledField::rounded(&mut s.total_sand_kg, MASS_DP),
            ScaledField::rounded(&mut a.concrete_aggregate_m3, FINE_VOLUME_DP),
            ScaledField::rounded(&mut a.concrete_aggregate_kg, MASS_DP),
            ScaledField::rounded(&mut a.total_aggregate_kg, MASS_DP),
            ScaledField::rounded(&mut st.footing_steel_kg, MASS_DP),
            ScaledField::rounded(&mut st.column_steel_kg, MASS_DP),
            ScaledField::rounded(&mut st.beam_steel_kg, MASS_DP),
            ScaledField::rounded(&mut st.slab_steel_kg, MASS_DP),
            ScaledField::rounded(&mut st.total_steel_kg, MASS_DP),
            ScaledField::rounded(&mut m.brick_quantity, COUNT_DP),
            ScaledField::rounded(&mut f.floor_tiles_qty, COUNT_DP),
        ];
        if include_unscaled {
            fields.extend([
                ScaledField::rounded(&mut m.mortar_volume_m3, FINE_VOLUME_DP),
                ScaledField::rounded(&mut f.paint_liters, 2),
                ScaledField::rounded(&mut f.plaster_volume_m3, FINE_VOLUME_DP),
                ScaledField::rounded(&mut f.flooring_area_sqft, 2),
                ScaledField::rounded(&mut f.flooring_area_m2, FINE_VOLUME_DP),
                ScaledField::rounded(&mut f.tile_area_m2, 4),
            ]);
        }
        fields
    }
}

impl Scalable for MaterialsSnapshot {
    fn scalable_fields(&mut self) -> Vec<ScaledField<'_>> {
        self.fields(false)
    }
}

fn sums_match(total: f64, parts: &[f64], decimals: u32, ulps: f64) -> bool {
    let unit = 10f64.powi(-(decimals as i32));
    let sum: f64 = parts.iter().sum();
    (total - sum).abs() <= ulps * unit + 1e-9
}

/// Compute base material quantities for a validated building input.
///
/// # Returns
///
/// * `Ok(MaterialsSnapshot)` - rounded quantities
/// * `Err(EstimateError::InvalidInput)` - if the input fails validation
pub fn calculate(input: &BuildingInput) -> EstimateResult<MaterialsSnapshot> {
    input.validate()?;

    let floors = f64::from(input.num_floors);

    // === Concrete ===
    let footing_plan: SqMeters = Meters::from(Feet(input.footing_length_ft)) * Meters::from(Feet(input.footing_width_ft));
    let footing_count = f64::from(input.num_footings);
    let footing = footing_plan * Meters::from(Feet(input.footing_depth_ft)) * footing_count;
    let pcc = footing_plan * Meters::from(Inches(input.pcc_thickness_in)) * footing_count;

    let column_section = Meters::from(Inches(input.column_length_in)) * Meters::from(Inches(input.column_width_in));
    let column = column_section
        * Meters::from(Feet(input.column_height_ft))
        * (f64::from(input.num_columns) * floors);

    let beam_section = Meters::from(Inches(input.beam_width_in)) * Meters::from(Inches(input.beam_depth_in));
    let beam = beam_section * Meters::from(Feet(input.total_beam_length_ft)) * floors;

    let slab = SqMeters::from(SqFt(input.slab_area_sqft)) * Meters::from(Inches(input.slab_thickness_in)) * floors;

    let total_rcc = footing + column + beam + slab;
    let total_concrete = pcc + total_rcc;

    // === Cement & nominal mix ===
    let grade = input.concrete_grade;
    let cement_concrete_kg = total_concrete.value() * grade.cement_content_kg_per_m3();
    let (cement_part, sand_part, agg_part) = grade.mix_ratio();
    let mix_parts = cement_part + sand_part + agg_part;
    let concrete_sand = total_concrete * (sand_part / mix_parts);
    let concrete_agg = total_concrete * (agg_part / mix_parts);

    // === Walls, mortar, plaster ===
    let external_run = Meters::from(Feet(input.external_wall_length_ft)) * floors;
    let total_wall_run = (Meters::from(Feet(input.external_wall_length_ft))
        + Meters::from(Feet(input.internal_wall_length_ft)))
        * floors;
    let wall_height = Meters::from(Feet(input.wall_height_ft));
    let wall_volume = total_wall_run * Meters::from(Inches(input.wall_thickness_in)) * wall_height;

    let mortar = wall_volume * MORTAR_SHARE_OF_WALL;
    let (mortar_cement_part, mortar_sand_part) = input.mortar_mix.parts();
    let mortar_parts = mortar_cement_part + mortar_sand_part;
    let cement_mortar_kg = mortar.value() * (mortar_cement_part / mortar_parts) * CEMENT_BULK_DENSITY_KG_M3;
    let mortar_sand = mortar * (mortar_sand_part / mortar_parts);

    let plaster_area_internal = (total_wall_run * wall_height) * INTERNAL_PLASTER_SHARE;
    let plaster_area_external = external_run * wall_height;
    let plaster = plaster_area_internal * Meters::from(Inches(input.internal_plaster_thickness_in))
        + plaster_area_external * Meters::from(Inches(input.external_plaster_thickness_in));
    let (plaster_cement_part, plaster_sand_part) = PLASTER_MIX;
    let plaster_parts = plaster_cement_part + plaster_sand_part;
    let cement_plaster_kg = plaster.value() * (plaster_cement_part / plaster_parts) * CEMENT_BULK_DENSITY_KG_M3;
    let plaster_sand = plaster * (plaster_sand_part / plaster_parts);

    let bags_concrete = bags_for(cement_concrete_kg);
    let bags_mortar = bags_for(cement_mortar_kg);
    let bags_plaster = bags_for(cement_plaster_kg);

    let concrete_sand_kg = concrete_sand.value() * SAND_BULK_DENSITY_KG_M3;
    let mortar_sand_kg = mortar_sand.value() * SAND_BULK_DENSITY_KG_M3;
    let plaster_sand_kg = plaster_sand.value() * SAND_BULK_DENSITY_KG_M3;
    let concrete_agg_kg = concrete_agg.value() * AGGREGATE_BULK_DENSITY_KG_M3;

    // === Steel ===
    let usage = STEEL_USAGE_KG_PER_M3;
    let steel_footing = footing.value() * usage.footing;
    let steel_column = column.value() * usage.column;
    let steel_beam = beam.value() * usage.beam;
    let steel_slab = slab.value() * usage.slab;

    // === Masonry ===
    let brick_volume = input.brick.volume_m3();
    let bricks = if brick_volume > 0.0 {
        wall_volume.value() / brick_volume
    } else {
        0.0
    };

    // === Finishing ===
    let tile_area_sqft = Feet::from(Inches(f64::from(input.tile_size_in))).value().powi(2);
    let tiles = if tile_area_sqft > 0.0 {
        input.flooring_area_sqft / tile_area_sqft * TILE_WASTE_FACTOR
    } else {
        0.0
    };
    let paint_area = plaster_area_internal + plaster_area_external;
    let paint_liters = paint_area.value() * f64::from(input.paint_coats) / PAINT_COVERAGE_M2_PER_LITRE;

    debug!(
        total_concrete_m3 = total_concrete.value(),
        wall_volume_m3 = wall_volume.value(),
        grade = %grade,
        mortar = %input.mortar_mix,
        "computed base quantities"
    );

    let snapshot = MaterialsSnapshot {
        concrete: ConcreteQuantities {
            pcc_volume_m3: round_dp(pcc.value(), VOLUME_DP),
            footing_rcc_m3: round_dp(footing.value(), VOLUME_DP),
            column_rcc_m3: round_dp(column.value(), VOLUME_DP),
            beam_rcc_m3: round_dp(beam.value(), VOLUME_DP),
            slab_rcc_m3: round_dp(slab.value(), VOLUME_DP),
            total_rcc_m3: round_dp(total_rcc.value(), VOLUME_DP),
        },
        cement: CementQuantities {
            for_concrete_bags: bags_concrete,
            for_mortar_bags: bags_mortar,
            for_plaster_bags: bags_plaster,
            total_bags: bags_concrete + bags_mortar + bags_plaster,
        },
        sand: SandQuantities {
            concrete_sand_m3: round_dp(concrete_sand.value(), FINE_VOLUME_DP),
            concrete_sand_kg: round_dp(concrete_sand_kg, MASS_DP),
            brickwork_sand_m3: round_dp(mortar_sand.value(), FINE_VOLUME_DP),
            brickwork_sand_kg: round_dp(mortar_sand_kg, MASS_DP),
            plaster_sand_m3: round_dp(plaster_sand.value(), FINE_VOLUME_DP),
            plaster_sand_kg: round_dp(plaster_sand_kg, MASS_DP),
            total_sand_kg: round_dp(concrete_sand_kg + mortar_sand_kg + plaster_sand_kg, MASS_DP),
        },
        aggregate: AggregateQuantities {
            concrete_aggregate_m3: round_dp(concrete_agg.value(), FINE_VOLUME_DP),
            concrete_aggregate_kg: round_dp(concrete_agg_kg, MASS_DP),
            total_aggregate_kg: round_dp(concrete_agg_kg, MASS_DP),
        },
        steel: SteelQuantities {
            footing_steel_kg: round_dp(steel_footing, MASS_DP),
            column_steel_kg: round_dp(steel_column, MASS_DP),
            beam_steel_kg: round_dp(steel_beam, MASS_DP),
            slab_steel_kg: round_dp(steel_slab, MASS_DP),
            total_steel_kg: round_dp(steel_footing + steel_column + steel_beam + steel_slab, MASS_DP),
        },
        masonry: MasonryQuantities {
            brick_quantity: round_dp(bricks, COUNT_DP),
            mortar_volume_m3: round_dp(mortar.value(), FINE_VOLUME_DP),
        },
        finishing: FinishingQuantities {
            floor_tiles_qty: round_dp(tiles, COUNT_DP),
            paint_liters: round_dp(paint_liters, 2),
            plaster_volume_m3: round_dp(plaster.value(), FINE_VOLUME_DP),
            flooring_area_sqft: round_dp(input.flooring_area_sqft, 2),
            flooring_area_m2: round_dp(input.flooring_area_sqft * SQFT_TO_SQM, FINE_VOLUME_DP),
            tile_area_m2: round_dp(tile_area_sqft * SQFT_TO_SQM, 4),
        },
    };

    debug_assert!(snapshot.all_non_negative(), "negative quantity in base snapshot");
    debug_assert!(snapshot.totals_consistent_within(2.5), "snapshot totals drifted from components");

    Ok(snapshot)
}

/// Parse a raw input set and compute its quantities in one step.
pub fn calculate_from_input_set(set: &InputSet) -> EstimateResult<MaterialsSnapshot> {
    let input = BuildingInput::from_input_set(set)?;
    calculate(&input)
}

/// Whole 50 kg bags needed for a cement mass, rounded up
fn bags_for(cement_kg: f64) -> f64 {
    (cement_kg / CEMENT_BAG_KG).ceil()
}

/// Volume of concrete in the whole structure, PCC included (m³)
pub fn total_concrete_m3(snapshot: &MaterialsSnapshot) -> CubicMeters {
    CubicMeters(snapshot.concrete.pcc_volume_m3 + snapshot.concrete.total_rcc_m3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{ConcreteGrade, MortarMix};

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_footing_volume_reference_house() {
        let snapshot = calculate(&BuildingInput::example()).unwrap();
        // 8 × (4 × 0.3048) × (4 × 0.3048) × (1 × 0.3048) = 3.6246 m³
        let expected = 8.0 * (4.0 * 0.3048) * (4.0 * 0.3048) * (1.0 * 0.3048);
        assert!(approx(snapshot.concrete.footing_rcc_m3, expected, 0.005));
        assert_eq!(snapshot.concrete.footing_rcc_m3, 3.62);
    }

    #[test]
    fn test_reference_house_element_volumes() {
        let c = calculate(&BuildingInput::example()).unwrap().concrete;
        // PCC: 8 × 1.2192² × 0.0762 = 0.906
        assert_eq!(c.pcc_volume_m3, 0.91);
        // Columns: 8 × 2 × 0.3048² × 3.048 = 4.531
        assert_eq!(c.column_rcc_m3, 4.53);
        // Beams: 60.96 × 0.2286 × 0.3048 × 2 = 8.495
        assert_eq!(c.beam_rcc_m3, 8.5);
        // Slab: 111.4836 × 0.127 × 2 = 28.317
        assert_eq!(c.slab_rcc_m3, 28.32);
        assert!(approx(c.total_rcc_m3, 3.62 + 4.53 + 8.5 + 28.32, 0.02));
    }

    #[test]
    fn test_reference_house_totals_positive() {
        let s = calculate(&BuildingInput::example()).unwrap();
        assert!(s.cement.total_bags > 0.0);
        assert!(s.sand.total_sand_kg > 0.0);
        assert!(s.aggregate.total_aggregate_kg > 0.0);
        assert!(s.steel.total_steel_kg > 0.0);
        assert!(s.masonry.brick_quantity > 0.0);
        assert!(s.finishing.paint_liters > 0.0);
    }

    #[test]
    fn test_totals_equal_component_sums() {
        let s = calculate(&BuildingInput::example()).unwrap();
        assert!(s.totals_consistent_within(2.5));
        assert_eq!(
            s.cement.total_bags,
            s.cement.for_concrete_bags + s.cement.for_mortar_bags + s.cement.for_plaster_bags
        );
    }

    #[test]
    fn test_totals_hold_across_grades_and_mortars() {
        for grade in ConcreteGrade::ALL {
            for mortar in MortarMix::ALL {
                let mut input = BuildingInput::example();
                input.concrete_grade = grade;
                input.mortar_mix = mortar;
                let s = calculate(&input).unwrap();
                assert!(s.totals_consistent_within(2.5), "{grade} {mortar}");
                assert!(s.all_non_negative());
            }
        }
    }

    #[test]
    fn test_cement_bags_round_up_per_use() {
        let s = calculate(&BuildingInput::example()).unwrap();
        // 45.873 m³ × 320 kg / 50 kg = 293.59 bags
        assert_eq!(s.cement.for_concrete_bags, 294.0);
        assert_eq!(s.cement.for_mortar_bags.fract(), 0.0);
        assert_eq!(s.cement.for_plaster_bags.fract(), 0.0);
    }

    #[test]
    fn test_richer_grade_uses_more_cement_less_sand() {
        let mut m20 = BuildingInput::example();
        m20.concrete_grade = ConcreteGrade::M20;
        let mut m30 = BuildingInput::example();
        m30.concrete_grade = ConcreteGrade::M30;
        let a = calculate(&m20).unwrap();
        let b = calculate(&m30).unwrap();
        assert!(b.cement.for_concrete_bags > a.cement.for_concrete_bags);
        // M20 sand share 1.5/5.5 vs M30 0.75/3.25
        assert!(b.sand.concrete_sand_m3 < a.sand.concrete_sand_m3);
    }

    #[test]
    fn test_mortar_mix_changes_brickwork_only() {
        let mut lean = BuildingInput::example();
        lean.mortar_mix = MortarMix::OneToSix;
        let mut rich = BuildingInput::example();
        rich.mortar_mix = MortarMix::OneToThree;
        let a = calculate(&lean).unwrap();
        let b = calculate(&rich).unwrap();
        assert!(b.cement.for_mortar_bags > a.cement.for_mortar_bags);
        // Plaster stays 1:3 whatever the mortar
        assert_eq!(a.cement.for_plaster_bags, b.cement.for_plaster_bags);
        assert_eq!(a.sand.plaster_sand_m3, b.sand.plaster_sand_m3);
    }

    #[test]
    fn test_masonry_and_mortar() {
        let s = calculate(&BuildingInput::example()).unwrap();
        // Wall: 220 ft × 2 floors × 9 in × 10 ft = 134.11 m × 0.2286 × 3.048 = 93.45 m³
        let wall: f64 = 220.0 * 0.3048 * 2.0 * (9.0 * 0.0254) * (10.0 * 0.3048);
        let brick = 0.230 * 0.115 * 0.075;
        assert!(approx(s.masonry.brick_quantity, (wall / brick).round(), 0.5));
        assert!(approx(s.masonry.mortar_volume_m3, wall * 0.1, 0.001));
    }

    #[test]
    fn test_tiles_include_waste() {
        let s = calculate(&BuildingInput::example()).unwrap();
        // 1200 sqft of 1 sqft tiles + 5 %
        assert_eq!(s.finishing.floor_tiles_qty, 1260.0);
        assert_eq!(s.finishing.flooring_area_sqft, 1200.0);
        assert!(approx(s.finishing.flooring_area_m2, 111.484, 0.001));
        assert!(approx(s.finishing.tile_area_m2, 0.0929, 0.0001));
    }

    #[test]
    fn test_paint_from_plastered_area() {
        let s = calculate(&BuildingInput::example()).unwrap();
        let run = 220.0 * 0.3048 * 2.0;
        let h = 10.0 * 0.3048;
        let internal = run * h * 0.8;
        let external = 140.0 * 0.3048 * 2.0 * h;
        let expected = (internal + external) * 2.0 / 10.0;
        assert!(approx(s.finishing.paint_liters, expected, 0.01));
    }

    #[test]
    fn test_steel_rates_per_element() {
        let s = calculate(&BuildingInput::example()).unwrap();
        let footing = 8.0 * (4.0 * 0.3048_f64).powi(2) * 0.3048;
        assert!(approx(s.steel.footing_steel_kg, footing * 90.0, 0.05));
        assert!(s.steel.column_steel_kg > 0.0);
    }

    #[test]
    fn test_invalid_input_blocks_computation() {
        let mut input = BuildingInput::example();
        input.slab_thickness_in = 0.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("slab_thickness"));
    }

    #[test]
    fn test_input_set_path() {
        let set = InputSet::from(&BuildingInput::example());
        let a = calculate_from_input_set(&set).unwrap();
        let b = calculate(&BuildingInput::example()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_concrete_helper() {
        let s = calculate(&BuildingInput::example()).unwrap();
        let total = total_concrete_m3(&s);
        assert!(approx(total.value(), s.concrete.pcc_volume_m3 + s.concrete.total_rcc_m3, 1e-12));
    }
}
