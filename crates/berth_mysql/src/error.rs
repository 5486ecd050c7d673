//! Error types for the MySQL plugin

use thiserror::Error;

/// Errors raised by the underlying driver.
///
/// Driver errors pass through this layer unchanged; the variants exist so
/// the narrow driver interface has one error currency regardless of which
/// driver implementation sits behind it.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Error from SQLx
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    /// The connection target could not be turned into driver options
    #[error("invalid connection target: {0}")]
    BadTarget(String),

    /// The connection has been ended and can no longer serve queries
    #[error("connection is closed")]
    ConnectionClosed,

    /// `get_connection` called on a single-connection client
    #[error("get_connection is only available on pool clients")]
    NotAPool,

    /// Errors from alternative driver implementations
    #[error("{0}")]
    Other(String),
}

/// Errors that abort a plugin registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Factory construction or the liveness probe failed. The driver's own
    /// error surfaces unchanged.
    #[error(transparent)]
    Configuration(#[from] DriverError),

    /// The default namespace slot is already occupied on this scope chain
    #[error("berth-mysql has already been registered")]
    AlreadyRegistered,

    /// The given instance name is already taken
    #[error("berth-mysql '{0}' instance name has already been registered")]
    NameAlreadyRegistered(String),

    /// The application configuration has no MySQL section
    #[error("MySQL configuration is missing")]
    MissingConfig,
}
