//! Core error types for DMS RS
//!
//! The taxonomy distinguishes malformed input (validation) from unresolved
//! references (not found) so callers can map them to distinct client-facing
//! error categories.

use thiserror::Error;

/// Core error type for all DMS operations
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DmsError {
    /// Build a not-found error for an entity looked up by id
    pub fn not_found(entity: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: value.into(),
        }
    }

    /// Build a validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// HTTP status code mapping for errors
impl DmsError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "bad_request",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }
}
