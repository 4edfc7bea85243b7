//! # Building Inputs
//!
//! Two representations of the same data:
//!
//! - [`InputSet`] - the flat field-name → raw-value mapping an input form
//!   produces. Nothing in it is trusted.
//! - [`BuildingInput`] - the typed, validated record the calculator consumes.
//!
//! [`BuildingInput::from_input_set`] is the only bridge between them. It
//! rejects the whole set with [`EstimateError::InvalidInput`] as soon as one
//! field is missing, unparseable, non-positive, or outside its allowed set,
//! so no computation ever runs on partial data.
//!
//! ## Units
//!
//! Lengths and heights are in feet, thicknesses and member cross-sections in
//! inches, areas in square feet. Brick dimensions are the one exception and
//! are given in metres.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::inputs::{BuildingInput, InputSet};
//!
//! let reference = BuildingInput::example();
//! let set = InputSet::from(&reference);
//! let parsed = BuildingInput::from_input_set(&set).unwrap();
//! assert_eq!(parsed.num_floors, 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::standards::{ConcreteGrade, FootingType, MortarMix, StructureType, DEFAULT_BRICK_M};

/// Raw field-name → value mapping, as collected from a form or file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSet(BTreeMap<String, String>);

impl InputSet {
    /// Build a set from `(field, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        InputSet(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Build a set from a JSON object whose values are strings or numbers.
    pub fn from_json(value: &serde_json::Value) -> EstimateResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            EstimateError::invalid_input("input", value.to_string(), "Expected a JSON object of fields")
        })?;

        let mut fields = BTreeMap::new();
        for (key, raw) in object {
            let text = match raw {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(EstimateError::invalid_input(
                        key.as_str(),
                        other.to_string(),
                        "Expected a string or number",
                    ))
                }
            };
            fields.insert(key.clone(), text);
        }
        Ok(InputSet(fields))
    }

    /// Raw value for a field, trimmed; empty strings count as absent
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Brick dimensions in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickSize {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
}

impl BrickSize {
    /// Volume of one brick (m³)
    pub fn volume_m3(&self) -> f64 {
        self.length_m * self.width_m * self.height_m
    }
}

impl Default for BrickSize {
    fn default() -> Self {
        let (length_m, width_m, height_m) = DEFAULT_BRICK_M;
        BrickSize {
            length_m,
            width_m,
            height_m,
        }
    }
}

/// Validated building description.
///
/// ## JSON Example
///
/// ```json
/// {
///   "plot_length_ft": 30.0,
///   "plot_width_ft": 40.0,
///   "num_floors": 2,
///   "structure_type": "rcc_framed",
///   "footing_type": "isolated",
///   "concrete_grade": "m20",
///   "mortar_mix": "1:6"
/// }
/// ```
///
/// (abbreviated; every dimension field is required)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInput {
    // === Plot ===
    pub plot_length_ft: f64,
    pub plot_width_ft: f64,
    pub num_floors: u32,
    pub floor_height_ft: f64,
    pub structure_type: StructureType,

    // === Foundation ===
    pub footing_type: FootingType,
    pub num_footings: u32,
    pub footing_length_ft: f64,
    pub footing_width_ft: f64,
    pub footing_depth_ft: f64,
    /// PCC levelling course under each footing
    pub pcc_thickness_in: f64,

    // === Frame ===
    /// Columns per floor
    pub num_columns: u32,
    pub column_length_in: f64,
    pub column_width_in: f64,
    pub column_height_ft: f64,
    /// Beam run per floor
    pub total_beam_length_ft: f64,
    pub beam_width_in: f64,
    pub beam_depth_in: f64,
    /// Slab area per floor
    pub slab_area_sqft: f64,
    pub slab_thickness_in: f64,

    // === Walls ===
    /// External wall run per floor
    pub external_wall_length_ft: f64,
    /// Internal wall run per floor
    pub internal_wall_length_ft: f64,
    pub wall_thickness_in: f64,
    pub wall_height_ft: f64,
    pub internal_plaster_thickness_in: f64,
    pub external_plaster_thickness_in: f64,

    // === Finishes ===
    pub flooring_area_sqft: f64,
    /// Square tile edge length
    pub tile_size_in: u32,
    pub paint_coats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint_type: Option<String>,

    // === Materials ===
    #[serde(default)]
    pub concrete_grade: ConcreteGrade,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cement_type: Option<String>,
    #[serde(default)]
    pub mortar_mix: MortarMix,
    #[serde(default)]
    pub brick: BrickSize,
}

impl BuildingInput {
    /// Parse and validate a raw input set.
    ///
    /// `concrete_grade` and `mortar_mix` default to m20 and 1:6 when absent;
    /// a present but unknown value is rejected. Brick dimensions default to
    /// 230 × 115 × 75 mm.
    pub fn from_input_set(set: &InputSet) -> EstimateResult<Self> {
        let r = FieldReader { set };

        let input = BuildingInput {
            plot_length_ft: r.positive_f64("plot_length")?,
            plot_width_ft: r.positive_f64("plot_width")?,
            num_floors: r.positive_u32("num_floors")?,
            floor_height_ft: r.positive_f64("floor_height")?,
            structure_type: StructureType::from_code(r.required("structure_type")?)?,
            footing_type: FootingType::from_code(r.required("footing_type")?)?,
            num_footings: r.positive_u32("num_footings")?,
            footing_length_ft: r.positive_f64("footing_length")?,
            footing_width_ft: r.positive_f64("footing_width")?,
            footing_depth_ft: r.positive_f64("footing_depth")?,
            pcc_thickness_in: r.positive_f64("pcc_thickness")?,
            num_columns: r.positive_u32("num_columns")?,
            column_length_in: r.positive_f64("column_length")?,
            column_width_in: r.positive_f64("column_width")?,
            column_height_ft: r.positive_f64("column_height")?,
            total_beam_length_ft: r.positive_f64("total_beam_length")?,
            beam_width_in: r.positive_f64("beam_width")?,
            beam_depth_in: r.positive_f64("beam_depth")?,
            slab_area_sqft: r.positive_f64("slab_area")?,
            slab_thickness_in: r.positive_f64("slab_thickness")?,
            external_wall_length_ft: r.positive_f64("external_wall_length")?,
            internal_wall_length_ft: r.positive_f64("internal_wall_length")?,
            wall_thickness_in: r.positive_f64("wall_thickness")?,
            wall_height_ft: r.positive_f64("wall_height")?,
            internal_plaster_thickness_in: r.positive_f64("internal_plaster_thickness")?,
            external_plaster_thickness_in: r.positive_f64("external_plaster_thickness")?,
            flooring_area_sqft: r.positive_f64("flooring_area")?,
            tile_size_in: r.positive_u32("tile_size")?,
            paint_coats: r.positive_u32("paint_coats")?,
            paint_type: set.get("paint_type").map(str::to_string),
            concrete_grade: match set.get("concrete_grade") {
                Some(code) => ConcreteGrade::from_code(code)?,
                None => ConcreteGrade::default(),
            },
            cement_type: set.get("cement_type").map(str::to_string),
            mortar_mix: match set.get("mortar_mix") {
                Some(code) => MortarMix::from_code(code)?,
                None => MortarMix::default(),
            },
            brick: BrickSize {
                length_m: r.optional_positive_f64("brick_length_m", DEFAULT_BRICK_M.0)?,
                width_m: r.optional_positive_f64("brick_width_m", DEFAULT_BRICK_M.1)?,
                height_m: r.optional_positive_f64("brick_height_m", DEFAULT_BRICK_M.2)?,
            },
        };

        input.validate()?;
        Ok(input)
    }

    /// Validate a typed input (e.g. one deserialized straight from JSON).
    pub fn validate(&self) -> EstimateResult<()> {
        let dimensions = [
            ("plot_length", self.plot_length_ft),
            ("plot_width", self.plot_width_ft),
            ("floor_height", self.floor_height_ft),
            ("footing_length", self.footing_length_ft),
            ("footing_width", self.footing_width_ft),
            ("footing_depth", self.footing_depth_ft),
            ("pcc_thickness", self.pcc_thickness_in),
            ("column_length", self.column_length_in),
            ("column_width", self.column_width_in),
            ("column_height", self.column_height_ft),
            ("total_beam_length", self.total_beam_length_ft),
            ("beam_width", self.beam_width_in),
            ("beam_depth", self.beam_depth_in),
            ("slab_area", self.slab_area_sqft),
            ("slab_thickness", self.slab_thickness_in),
            ("external_wall_length", self.external_wall_length_ft),
            ("internal_wall_length", self.internal_wall_length_ft),
            ("wall_thickness", self.wall_thickness_in),
            ("wall_height", self.wall_height_ft),
            ("internal_plaster_thickness", self.internal_plaster_thickness_in),
            ("external_plaster_thickness", self.external_plaster_thickness_in),
            ("flooring_area", self.flooring_area_sqft),
            ("brick_length_m", self.brick.length_m),
            ("brick_width_m", self.brick.width_m),
            ("brick_height_m", self.brick.height_m),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a number greater than 0",
                ));
            }
        }

        let counts = [
            ("num_floors", self.num_floors),
            ("num_footings", self.num_footings),
            ("num_columns", self.num_columns),
            ("tile_size", self.tile_size_in),
            ("paint_coats", self.paint_coats),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be greater than 0",
                ));
            }
        }

        Ok(())
    }

    /// The 30 × 40 ft, two-storey RCC framed reference house.
    pub fn example() -> Self {
        BuildingInput {
            plot_length_ft: 30.0,
            plot_width_ft: 40.0,
            num_floors: 2,
            floor_height_ft: 10.0,
            structure_type: StructureType::RccFramed,
            footing_type: FootingType::Isolated,
            num_footings: 8,
            footing_length_ft: 4.0,
            footing_width_ft: 4.0,
            footing_depth_ft: 1.0,
            pcc_thickness_in: 3.0,
            num_columns: 8,
            column_length_in: 12.0,
            column_width_in: 12.0,
            column_height_ft: 10.0,
            total_beam_length_ft: 200.0,
            beam_width_in: 9.0,
            beam_depth_in: 12.0,
            slab_area_sqft: 1200.0,
            slab_thickness_in: 5.0,
            external_wall_length_ft: 140.0,
            internal_wall_length_ft: 80.0,
            wall_thickness_in: 9.0,
            wall_height_ft: 10.0,
            internal_plaster_thickness_in: 0.5,
            external_plaster_thickness_in: 0.75,
            flooring_area_sqft: 1200.0,
            tile_size_in: 12,
            paint_coats: 2,
            paint_type: None,
            concrete_grade: ConcreteGrade::M20,
            cement_type: None,
            mortar_mix: MortarMix::OneToSix,
            brick: BrickSize::default(),
        }
    }
}

impl From<&BuildingInput> for InputSet {
    fn from(input: &BuildingInput) -> Self {
        let mut pairs: Vec<(&str, String)> = vec![
            ("plot_length", input.plot_length_ft.to_string()),
            ("plot_width", input.plot_width_ft.to_string()),
            ("num_floors", input.num_floors.to_string()),
            ("floor_height", input.floor_height_ft.to_string()),
            ("structure_type", serde_code(&input.structure_type)),
            ("footing_type", serde_code(&input.footing_type)),
            ("num_footings", input.num_footings.to_string()),
            ("footing_length", input.footing_length_ft.to_string()),
            ("footing_width", input.footing_width_ft.to_string()),
            ("footing_depth", input.footing_depth_ft.to_string()),
            ("pcc_thickness", input.pcc_thickness_in.to_string()),
            ("num_columns", input.num_columns.to_string()),
            ("column_length", input.column_length_in.to_string()),
            ("column_width", input.column_width_in.to_string()),
            ("column_height", input.column_height_ft.to_string()),
            ("total_beam_length", input.total_beam_length_ft.to_string()),
            ("beam_width", input.beam_width_in.to_string()),
            ("beam_depth", input.beam_depth_in.to_string()),
            ("slab_area", input.slab_area_sqft.to_string()),
            ("slab_thickness", input.slab_thickness_in.to_string()),
            ("external_wall_length", input.external_wall_length_ft.to_string()),
            ("internal_wall_length", input.internal_wall_length_ft.to_string()),
            ("wall_thickness", input.wall_thickness_in.to_string()),
            ("wall_height", input.wall_height_ft.to_string()),
            ("internal_plaster_thickness", input.internal_plaster_thickness_in.to_string()),
            ("external_plaster_thickness", input.external_plaster_thickness_in.to_string()),
            ("flooring_area", input.flooring_area_sqft.to_string()),
            ("tile_size", input.tile_size_in.to_string()),
            ("paint_coats", input.paint_coats.to_string()),
            ("concrete_grade", input.concrete_grade.code().to_string()),
            ("mortar_mix", input.mortar_mix.code().to_string()),
            ("brick_length_m", input.brick.length_m.to_string()),
            ("brick_width_m", input.brick.width_m.to_string()),
            ("brick_height_m", input.brick.height_m.to_string()),
        ];
        if let Some(paint_type) = &input.paint_type {
            pairs.push(("paint_type", paint_type.clone()));
        }
        if let Some(cement_type) = &input.cement_type {
            pairs.push(("cement_type", cement_type.clone()));
        }
        InputSet::from_pairs(pairs)
    }
}

/// The serde wire code of a unit-like enum ("rcc_framed", "isolated", ...)
fn serde_code<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Typed accessors over an [`InputSet`] that produce field-tagged errors.
struct FieldReader<'a> {
    set: &'a InputSet,
}

impl<'a> FieldReader<'a> {
    fn required(&self, field: &str) -> EstimateResult<&'a str> {
        self.set
            .get(field)
            .ok_or_else(|| EstimateError::missing_field(field))
    }

    fn positive_f64(&self, field: &str) -> EstimateResult<f64> {
        let raw = self.required(field)?;
        parse_positive_f64(field, raw)
    }

    fn optional_positive_f64(&self, field: &str, default: f64) -> EstimateResult<f64> {
        match self.set.get(field) {
            Some(raw) => parse_positive_f64(field, raw),
            None => Ok(default),
        }
    }

    fn positive_u32(&self, field: &str) -> EstimateResult<u32> {
        let raw = self.required(field)?;
        let value: u32 = raw.parse().map_err(|_| {
            EstimateError::invalid_input(field, raw, "Must be a whole number")
        })?;
        if value == 0 {
            return Err(EstimateError::invalid_input(field, raw, "Must be greater than 0"));
        }
        Ok(value)
    }
}

fn parse_positive_f64(field: &str, raw: &str) -> EstimateResult<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|_| EstimateError::invalid_input(field, raw, "Must be a valid number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(EstimateError::invalid_input(field, raw, "Must be greater than 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_set() -> InputSet {
        InputSet::from(&BuildingInput::example())
    }

    fn with_field(field: &str, value: &str) -> InputSet {
        let mut pairs: Vec<(String, String)> = example_set()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.push((field.to_string(), value.to_string()));
        InputSet::from_pairs(pairs)
    }

    fn without_field(field: &str) -> InputSet {
        InputSet::from_pairs(example_set().iter().filter(|(k, _)| *k != field))
    }

    #[test]
    fn test_example_roundtrips_through_input_set() {
        let parsed = BuildingInput::from_input_set(&example_set()).unwrap();
        assert_eq!(parsed, BuildingInput::example());
    }

    #[test]
    fn test_missing_field_is_invalid_input() {
        let err = BuildingInput::from_input_set(&without_field("slab_area")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("slab_area"));
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let err = BuildingInput::from_input_set(&with_field("wall_height", "  ")).unwrap_err();
        assert_eq!(err.field(), Some("wall_height"));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = BuildingInput::from_input_set(&with_field("beam_depth", "twelve")).unwrap_err();
        assert_eq!(err.field(), Some("beam_depth"));
    }

    #[test]
    fn test_non_positive_rejected() {
        assert!(BuildingInput::from_input_set(&with_field("plot_width", "0")).is_err());
        assert!(BuildingInput::from_input_set(&with_field("pcc_thickness", "-3")).is_err());
        assert!(BuildingInput::from_input_set(&with_field("num_floors", "0")).is_err());
    }

    #[test]
    fn test_fractional_count_rejected() {
        let err = BuildingInput::from_input_set(&with_field("num_columns", "8.5")).unwrap_err();
        assert_eq!(err.field(), Some("num_columns"));
    }

    #[test]
    fn test_enum_outside_allowed_set() {
        let err = BuildingInput::from_input_set(&with_field("structure_type", "steel_frame")).unwrap_err();
        assert_eq!(err.field(), Some("structure_type"));
        let err = BuildingInput::from_input_set(&with_field("mortar_mix", "1:8")).unwrap_err();
        assert_eq!(err.field(), Some("mortar_mix"));
    }

    #[test]
    fn test_grade_and_mortar_default_when_absent() {
        let set = InputSet::from_pairs(
            example_set()
                .iter()
                .filter(|(k, _)| *k != "concrete_grade" && *k != "mortar_mix"),
        );
        let parsed = BuildingInput::from_input_set(&set).unwrap();
        assert_eq!(parsed.concrete_grade, ConcreteGrade::M20);
        assert_eq!(parsed.mortar_mix, MortarMix::OneToSix);
    }

    #[test]
    fn test_brick_override() {
        let parsed = BuildingInput::from_input_set(&with_field("brick_length_m", "0.19")).unwrap();
        assert_eq!(parsed.brick.length_m, 0.19);
        assert_eq!(parsed.brick.width_m, 0.115);
    }

    #[test]
    fn test_from_json_accepts_numbers_and_strings() {
        let json = serde_json::json!({
            "plot_length": 30,
            "plot_width": "40",
            "structure_type": "rcc_framed"
        });
        let set = InputSet::from_json(&json).unwrap();
        assert_eq!(set.get("plot_length"), Some("30"));
        assert_eq!(set.get("plot_width"), Some("40"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        let json = serde_json::json!({ "plot_length": [30] });
        assert!(InputSet::from_json(&json).is_err());
        assert!(InputSet::from_json(&serde_json::json!("not an object")).is_err());
    }

    #[test]
    fn test_typed_validation() {
        let mut input = BuildingInput::example();
        assert!(input.validate().is_ok());
        input.wall_thickness_in = f64::NAN;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_typed_json_roundtrip() {
        let input = BuildingInput::example();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"structure_type\": \"rcc_framed\""));
        let roundtrip: BuildingInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
