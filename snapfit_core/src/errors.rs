//! # Error Types
//!
//! Structured error types for snapfit_core. Every variant serializes to a
//! tagged JSON object so the CLI (or any other front end) can report the
//! failure both as text and as data.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm == 0.0 {
//!         return Err(CalcError::invalid_geometry(vec!["length_mm".to_string()]));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for snapfit_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for snap-fit calculations and reference data access.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Beam length, thickness or width is zero
    #[error("Invalid geometry: {} must be non-zero", fields.join(", "))]
    InvalidGeometry { fields: Vec<String> },

    /// An input value could not be accepted (unparseable override, unknown label)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Shape key does not name a known snap-fit type
    #[error("Unknown snap-fit shape: {name}")]
    UnknownShape { name: String },

    /// Shape is known but has no calculation engine yet
    #[error("No calculation engine for {shape}")]
    ShapeNotImplemented { shape: String },

    /// A reference sheet is missing or malformed
    #[error("Reference data error in sheet '{sheet}': {reason}")]
    ReferenceData { sheet: String, reason: String },

    /// Material not found in the reference table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(fields: Vec<String>) -> Self {
        CalcError::InvalidGeometry { fields }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownShape error
    pub fn unknown_shape(name: impl Into<String>) -> Self {
        CalcError::UnknownShape { name: name.into() }
    }

    /// Create a ShapeNotImplemented error
    pub fn shape_not_implemented(shape: impl Into<String>) -> Self {
        CalcError::ShapeNotImplemented { shape: shape.into() }
    }

    /// Create a ReferenceData error
    pub fn reference_data(sheet: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReferenceData {
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownShape { .. } => "UNKNOWN_SHAPE",
            CalcError::ShapeNotImplemented { .. } => "SHAPE_NOT_IMPLEMENTED",
            CalcError::ReferenceData { .. } => "REFERENCE_DATA",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
