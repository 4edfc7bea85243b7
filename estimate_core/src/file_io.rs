//! # File I/O Module
//!
//! Estimate and rate-table files:
//! - **Atomic saves**: write to `.tmp`, sync, verify, rename into place
//! - **Version validation**: estimate files must match the schema major/minor
//! - **Rate files**: TOML or JSON price lists overlaid on the default rates
//!
//! ## Rate File Format
//!
//! Two sections, both optional. Named keys win over material rows.
//!
//! ```toml
//! [rates]
//! cement_per_bag = 450.0
//! steel_per_kg = 72.0
//!
//! [[materials]]
//! name = "River Sand"
//! unit = "m3"
//! cost = 1350.0
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::estimate::Estimate;
//! use estimate_core::file_io::{load_rate_table, save_estimate};
//! use estimate_core::inputs::BuildingInput;
//! use std::path::Path;
//!
//! let rates = load_rate_table(Path::new("rates.toml"))?;
//! let estimate = Estimate::run(&BuildingInput::example(), Some(&rates))?;
//! save_estimate(&estimate, Path::new("estimate.json"))?;
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{EstimateError, EstimateResult};
use crate::estimate::{Estimate, SCHEMA_VERSION};
use crate::layout::{render_svg, FloorPlanLayout};
use crate::rates::{RateKey, RateTable, DEFAULT_RATES};

/// Serialization format of a rate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFormat {
    Toml,
    Json,
}

impl RateFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> EstimateResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(RateFormat::Toml),
            "json" => Ok(RateFormat::Json),
            _ => Err(EstimateError::file_error(
                "detect format",
                path.display().to_string(),
                "Rate files must end in .toml or .json",
            )),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RateDocument {
    #[serde(default)]
    rates: BTreeMap<String, f64>,
    #[serde(default)]
    materials: Vec<MaterialRow>,
}

#[derive(Debug, Deserialize)]
struct MaterialRow {
    name: String,
    #[serde(default)]
    unit: Option<String>,
    cost: f64,
}

/// Load a rate table from a TOML or JSON price list.
///
/// A missing file is not an error: the defaults are returned and a warning
/// is logged.
///
/// # Returns
///
/// * `Ok(RateTable)` - defaults overlaid with the file's rates
/// * `Err(EstimateError::FileError)` - unreadable file or unknown extension
/// * `Err(EstimateError::SerializationError)` - malformed contents
/// * `Err(EstimateError::InvalidInput)` - unknown key or negative rate
pub fn load_rate_table(path: &Path) -> EstimateResult<RateTable> {
    if !path.exists() {
        warn!(path = %path.display(), "rate file not found, using default rates");
        return Ok(*DEFAULT_RATES);
    }

    let format = RateFormat::from_path(path)?;
    let contents = fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))?;

    let table = parse_rate_table(&contents, format).map_err(|e| match e {
        EstimateError::SerializationError { reason } => {
            EstimateError::serialization(format!("Invalid rate file {}: {}", path.display(), reason))
        }
        other => other,
    })?;
    debug!(path = %path.display(), "loaded rate table");
    Ok(table)
}

/// Parse rate-file contents and overlay them on the defaults.
pub fn parse_rate_table(contents: &str, format: RateFormat) -> EstimateResult<RateTable> {
    let document: RateDocument = match format {
        RateFormat::Toml => toml::from_str(contents).map_err(|e| EstimateError::serialization(e.to_string()))?,
        RateFormat::Json => {
            serde_json::from_str(contents).map_err(|e| EstimateError::serialization(e.to_string()))?
        }
    };

    let mut overrides: BTreeMap<RateKey, f64> = BTreeMap::new();

    for row in &document.materials {
        match RateKey::from_material_name(&row.name) {
            Some(key) => {
                overrides.insert(key, row.cost);
            }
            None => warn!(
                material = %row.name,
                unit = row.unit.as_deref().unwrap_or(""),
                "no rate key matches material, row skipped"
            ),
        }
    }

    for (name, value) in &document.rates {
        let key = RateKey::from_code(name)
            .map_err(|_| EstimateError::invalid_input(name.as_str(), value.to_string(), "Unknown rate key"))?;
        overrides.insert(key, *value);
    }

    DEFAULT_RATES.with_overrides(&overrides)
}

/// Write bytes to a synced temporary file next to `path`; [`commit`] renames it into place.
fn write_temp(path: &Path, bytes: &[u8]) -> EstimateResult<PathBuf> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    Ok(tmp_path)
}

fn commit(tmp_path: &Path, path: &Path) -> EstimateResult<()> {
    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save an estimate as pretty JSON with atomic write semantics.
///
/// The temporary file is parsed back before the rename, so a truncated or
/// corrupt write never replaces an existing estimate.
pub fn save_estimate(estimate: &Estimate, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(estimate).map_err(|e| EstimateError::serialization(e.to_string()))?;

    let tmp_path = write_temp(path, json.as_bytes())?;

    let written = fs::read_to_string(&tmp_path).map_err(|e| {
        EstimateError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    if let Err(e) = serde_json::from_str::<Estimate>(&written) {
        let _ = fs::remove_file(&tmp_path);
        return Err(EstimateError::serialization(format!(
            "Verification of {} failed: {}",
            tmp_path.display(),
            e
        )));
    }

    commit(&tmp_path, path)?;
    debug!(path = %path.display(), id = %estimate.meta.id, "saved estimate");
    Ok(())
}

/// Load an estimate file.
///
/// # Returns
///
/// * `Ok(Estimate)` - successfully loaded estimate
/// * `Err(EstimateError::VersionMismatch)` - file version is incompatible
/// * `Err(EstimateError::SerializationError)` - invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_estimate(path: &Path) -> EstimateResult<Estimate> {
    let contents = fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))?;

    let estimate: Estimate = serde_json::from_str(&contents)
        .map_err(|e| EstimateError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&estimate.meta.version)?;

    Ok(estimate)
}

/// Render a layout and save it as an SVG file.
pub fn save_svg(layout: &FloorPlanLayout, path: &Path) -> EstimateResult<()> {
    let tmp_path = write_temp(path, render_svg(layout).as_bytes())?;
    commit(&tmp_path, path)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> EstimateResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
