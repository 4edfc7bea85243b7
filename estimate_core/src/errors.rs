//! # Error Types
//!
//! Structured error types for estimate_core. Every failure carries enough
//! context for a presentation layer to turn it into a user-facing message
//! without parsing strings.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_floors(num_floors: u32) -> EstimateResult<()> {
//!     if num_floors == 0 {
//!         return Err(EstimateError::invalid_input(
//!             "num_floors",
//!             num_floors.to_string(),
//!             "Floor count must be greater than 0",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input field is missing, non-numeric, non-positive, or outside its allowed set
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A supplied rate table omits one of the required rate keys
    #[error("Missing rate key: {key}")]
    MissingRateKey { key: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error for a field that was not supplied
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: String::new(),
            reason: "Required field is missing".to_string(),
        }
    }

    /// Create a MissingRateKey error
    pub fn missing_rate_key(key: impl Into<String>) -> Self {
        EstimateError::MissingRateKey { key: key.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        EstimateError::SerializationError {
            reason: reason.into(),
        }
    }

    /// The offending field name, for errors tied to a single input
    pub fn field(&self) -> Option<&str> {
        match self {
            EstimateError::InvalidInput { field, .. } => Some(field),
            EstimateError::MissingRateKey { key } => Some(key),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingRateKey { .. } => "MISSING_RATE_KEY",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
            EstimateError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_input("slab_area", "-5", "Must be greater than 0");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::missing_field("plot_length").error_code(), "INVALID_INPUT");
        assert_eq!(EstimateError::missing_rate_key("steel_per_kg").error_code(), "MISSING_RATE_KEY");
        assert_eq!(EstimateError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(EstimateError::missing_field("wall_height").field(), Some("wall_height"));
        assert_eq!(EstimateError::missing_rate_key("tile_per_sqm").field(), Some("tile_per_sqm"));
        assert_eq!(EstimateError::serialization("x").field(), None);
    }

    #[test]
    fn test_display_message() {
        let error = EstimateError::missing_rate_key("paint_per_liter");
        assert_eq!(error.to_string(), "Missing rate key: paint_per_liter");
    }
}
