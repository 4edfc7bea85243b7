//! # Standards Table
//!
//! Civil-engineering constants the estimator relies on: bag size, bulk
//! densities, cement content and nominal mix ratios per concrete grade,
//! mortar ratios, steel consumption per structural element, and paint
//! coverage. Values follow common Indian Standard (IS) site practice.
//!
//! Everything here is plain data. Enumerated material choices
//! (grade, mortar mix, structure and footing type) live here too, so the
//! calculator never handles raw strings.

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Mass of one cement bag (kg)
pub const CEMENT_BAG_KG: f64 = 50.0;

/// Bulk density of cement, for mortar and plaster mass from volume (kg/m³)
pub const CEMENT_BULK_DENSITY_KG_M3: f64 = 1440.0;

/// Bulk density of sand (kg/m³)
pub const SAND_BULK_DENSITY_KG_M3: f64 = 1600.0;

/// Bulk density of coarse aggregate (kg/m³)
pub const AGGREGATE_BULK_DENSITY_KG_M3: f64 = 1500.0;

/// Paint coverage per litre per coat (m²)
pub const PAINT_COVERAGE_M2_PER_LITRE: f64 = 10.0;

/// Share of masonry volume taken by mortar joints and bedding
pub const MORTAR_SHARE_OF_WALL: f64 = 0.10;

/// Share of total wall length × height plastered on the inside
pub const INTERNAL_PLASTER_SHARE: f64 = 0.8;

/// Plaster mix (cement : sand), independent of the masonry mortar mix
pub const PLASTER_MIX: (f64, f64) = (1.0, 3.0);

/// Waste allowance applied to floor tile counts
pub const TILE_WASTE_FACTOR: f64 = 1.05;

/// Default brick dimensions in metres (length, width, height)
pub const DEFAULT_BRICK_M: (f64, f64, f64) = (0.230, 0.115, 0.075);

/// Steel consumption rates per structural element (kg of steel per m³ of concrete)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelUsage {
    pub footing: f64,
    pub column: f64,
    pub beam: f64,
    pub slab: f64,
}

/// Rule-of-thumb steel consumption used for every estimate
pub const STEEL_USAGE_KG_PER_M3: SteelUsage = SteelUsage {
    footing: 90.0,
    column: 130.0,
    beam: 120.0,
    slab: 100.0,
};

/// Nominal-mix concrete grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConcreteGrade {
    #[default]
    #[serde(rename = "m20")]
    M20,
    #[serde(rename = "m25")]
    M25,
    #[serde(rename = "m30")]
    M30,
}

impl ConcreteGrade {
    /// All grades for UI selection
    pub const ALL: [ConcreteGrade; 3] = [ConcreteGrade::M20, ConcreteGrade::M25, ConcreteGrade::M30];

    /// Input code ("m20", "m25", "m30")
    pub fn code(&self) -> &'static str {
        match self {
            ConcreteGrade::M20 => "m20",
            ConcreteGrade::M25 => "m25",
            ConcreteGrade::M30 => "m30",
        }
    }

    /// Parse a grade code, case-insensitive
    pub fn from_code(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "m20" => Ok(ConcreteGrade::M20),
            "m25" => Ok(ConcreteGrade::M25),
            "m30" => Ok(ConcreteGrade::M30),
            _ => Err(EstimateError::invalid_input(
                "concrete_grade",
                s,
                "Expected one of m20, m25, m30",
            )),
        }
    }

    /// Cement content per m³ of concrete (kg)
    pub fn cement_content_kg_per_m3(&self) -> f64 {
        match self {
            ConcreteGrade::M20 => 320.0,
            ConcreteGrade::M25 => 360.0,
            ConcreteGrade::M30 => 400.0,
        }
    }

    /// Volumetric nominal mix (cement : sand : aggregate)
    pub fn mix_ratio(&self) -> (f64, f64, f64) {
        match self {
            ConcreteGrade::M20 => (1.0, 1.5, 3.0),
            ConcreteGrade::M25 => (1.0, 1.0, 2.0),
            ConcreteGrade::M30 => (1.0, 0.75, 1.5),
        }
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

/// Masonry mortar mix (cement : sand)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MortarMix {
    #[default]
    #[serde(rename = "1:6")]
    OneToSix,
    #[serde(rename = "1:4")]
    OneToFour,
    #[serde(rename = "1:3")]
    OneToThree,
}

impl MortarMix {
    pub const ALL: [MortarMix; 3] = [MortarMix::OneToSix, MortarMix::OneToFour, MortarMix::OneToThree];

    pub fn code(&self) -> &'static str {
        match self {
            MortarMix::OneToSix => "1:6",
            MortarMix::OneToFour => "1:4",
            MortarMix::OneToThree => "1:3",
        }
    }

    pub fn from_code(s: &str) -> EstimateResult<Self> {
        match s.trim() {
            "1:6" => Ok(MortarMix::OneToSix),
            "1:4" => Ok(MortarMix::OneToFour),
            "1:3" => Ok(MortarMix::OneToThree),
            _ => Err(EstimateError::invalid_input(
                "mortar_mix",
                s,
                "Expected one of 1:6, 1:4, 1:3",
            )),
        }
    }

    /// Parts by volume (cement, sand)
    pub fn parts(&self) -> (f64, f64) {
        match self {
            MortarMix::OneToSix => (1.0, 6.0),
            MortarMix::OneToFour => (1.0, 4.0),
            MortarMix::OneToThree => (1.0, 3.0),
        }
    }
}

impl std::fmt::Display for MortarMix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Structural system of the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    #[default]
    RccFramed,
    LoadBearing,
}

impl StructureType {
    pub fn from_code(s: &str) -> EstimateResult<Self> {
        match s.trim() {
            "rcc_framed" => Ok(StructureType::RccFramed),
            "load_bearing" => Ok(StructureType::LoadBearing),
            _ => Err(EstimateError::invalid_input(
                "structure_type",
                s,
                "Expected rcc_framed or load_bearing",
            )),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StructureType::RccFramed => "RCC Framed",
            StructureType::LoadBearing => "Load Bearing",
        }
    }
}

/// Foundation footing arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootingType {
    #[default]
    Isolated,
    Combined,
}

impl FootingType {
    pub fn from_code(s: &str) -> EstimateResult<Self> {
        match s.trim() {
            "isolated" => Ok(FootingType::Isolated),
            "combined" => Ok(FootingType::Combined),
            _ => Err(EstimateError::invalid_input(
                "footing_type",
                s,
                "Expected isolated or combined",
            )),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FootingType::Isolated => "Isolated",
            FootingType::Combined => "Combined",
        }
    }
}
