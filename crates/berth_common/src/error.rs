// --- File: crates/berth_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Berth errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for BerthError.
#[derive(Error, Debug)]
pub enum BerthError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BerthError {
    fn status_code(&self) -> u16 {
        match self {
            BerthError::ParseError(_) => 400,
            BerthError::ConfigError(_) => 500,
            BerthError::DatabaseError(_) => 500,
            BerthError::ConflictError(_) => 409,
            BerthError::NotFoundError(_) => 404,
            BerthError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<serde_json::Error> for BerthError {
    fn from(err: serde_json::Error) -> Self {
        BerthError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for BerthError {
    fn from(err: std::io::Error) -> Self {
        BerthError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BerthError {
    BerthError::ConfigError(message.to_string())
}

pub fn database_error<T: fmt::Display>(message: T) -> BerthError {
    BerthError::DatabaseError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BerthError {
    BerthError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> BerthError {
    BerthError::ConflictError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> BerthError {
    BerthError::InternalError(message.to_string())
}
