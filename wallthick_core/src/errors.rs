//! # Error Types
//!
//! Structured error types for wallthick_core. Every failure the engine can
//! report is a caller-input problem: a missing or malformed field, an unknown
//! material, or an arithmetic contract violation such as a fabrication
//! tolerance of 100 %. There are no transient errors and nothing is retried.
//!
//! ## Example
//!
//! ```rust
//! use wallthick_core::errors::{CalcError, CalcResult};
//!
//! fn validate_od(od_m: f64) -> CalcResult<()> {
//!     if od_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "D_o",
//!             od_m.to_string(),
//!             "Outside diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wallthick_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Several required fields are missing from an input record
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Material not found in the material table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A formula denominator evaluated to zero
    #[error("Divide by zero in {operation}: check {hint}")]
    DivisionByZero { operation: String, hint: String },

    /// No catalogue thickness is heavy enough for the governing thickness
    #[error("No standard wall thickness for OD {od_mm:.1} mm at or above {required_mm:.3} mm")]
    NoStandardThickness { od_mm: f64, required_mm: f64 },

    /// Calculation failed (formula outside its range of validity)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(operation: impl Into<String>, hint: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            operation: operation.into(),
            hint: hint.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
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

    /// True for errors caused by the input record rather than by the
    /// calculation itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::MissingFields { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::SerializationError { .. }
                | CalcError::FileError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MissingFields { .. } => "MISSING_FIELDS",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::NoStandardThickness { .. } => "NO_STANDARD_THICKNESS",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}
