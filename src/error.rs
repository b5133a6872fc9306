//! Custom error types for timesheet reporting
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Report and export failures map onto a
//! small taxonomy the front end can turn into client or server errors.

use thiserror::Error;

/// The main error type for timesheet operations
#[derive(Error, Debug)]
pub enum TimesheetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed identifier supplied by the caller
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Entity not found (or not visible to the requesting owner)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Unsupported export format
    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    /// Storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Writing export output failed
    #[error("Render error: {0}")]
    Render(String),

    /// Delivering a rendered artifact to the caller failed
    #[error("Transmission error: {0}")]
    Transmission(String),
}

impl TimesheetError {
    /// Create a "not found" error for clients
    pub fn client_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Client",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the failure was caused by the request rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidReference(_)
                | Self::NotFound { .. }
                | Self::InvalidFormat(_)
                | Self::Validation(_)
        )
    }
}

impl From<std::io::Error> for TimesheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TimesheetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for timesheet operations
pub type TimesheetResult<T> = Result<T, TimesheetError>;
