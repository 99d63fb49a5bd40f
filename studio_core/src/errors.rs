//! # Error Types
//!
//! Structured error types for studio_core. The analysis engine itself never
//! fails; these errors come from sketch actions that reference unknown keys
//! or carry unusable input, and from sketch file I/O.
//!
//! ## Example
//!
//! ```rust
//! use studio_core::errors::{StudioError, StudioResult};
//!
//! fn validate_yield(yield_mpa: f64) -> StudioResult<()> {
//!     if !yield_mpa.is_finite() {
//!         return Err(StudioError::InvalidInput {
//!             field: "yield_strength_mpa".to_string(),
//!             value: yield_mpa.to_string(),
//!             reason: "Yield strength must be a number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for studio_core operations
pub type StudioResult<T> = Result<T, StudioError>;

/// Structured error type for sketch and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StudioError {
    /// An input value is unusable (empty name, NaN property, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No component with this key exists in the sketch
    #[error("Component not found: {component_id}")]
    ComponentNotFound { component_id: String },

    /// The component exists but has no load with this key
    #[error("Load not found: {load_id} on component {component_id}")]
    LoadNotFound {
        component_id: String,
        load_id: String,
    },

    /// No material with this key exists in the library
    #[error("Material not found: {material_id}")]
    MaterialNotFound { material_id: String },

    /// A material with this key is already in the library
    #[error("Duplicate material: {material_id}")]
    DuplicateMaterial { material_id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl StudioError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        StudioError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ComponentNotFound error
    pub fn component_not_found(component_id: impl ToString) -> Self {
        StudioError::ComponentNotFound {
            component_id: component_id.to_string(),
        }
    }

    /// Create a LoadNotFound error
    pub fn load_not_found(component_id: impl ToString, load_id: impl ToString) -> Self {
        StudioError::LoadNotFound {
            component_id: component_id.to_string(),
            load_id: load_id.to_string(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_id: impl ToString) -> Self {
        StudioError::MaterialNotFound {
            material_id: material_id.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        StudioError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        StudioError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StudioError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StudioError::InvalidInput { .. } => "INVALID_INPUT",
            StudioError::ComponentNotFound { .. } => "COMPONENT_NOT_FOUND",
            StudioError::LoadNotFound { .. } => "LOAD_NOT_FOUND",
            StudioError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            StudioError::DuplicateMaterial { .. } => "DUPLICATE_MATERIAL",
            StudioError::FileError { .. } => "FILE_ERROR",
            StudioError::FileLocked { .. } => "FILE_LOCKED",
            StudioError::SerializationError { .. } => "SERIALIZATION_ERROR",
            StudioError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::SerializationError { reason: e.to_string() }
    }
}
