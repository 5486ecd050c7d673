//! Error types for the plugin host

use berth_common::services::BoxedError;
use thiserror::Error;

/// Errors raised by host operations themselves.
#[derive(Debug, Error)]
pub enum HostError {
    /// A decoration of this type is already visible in the scope chain
    #[error("decoration '{0}' has already been added")]
    DecorationExists(&'static str),
}

/// A plugin boot step failed.
///
/// Display forwards the plugin's own error unchanged; the failing plugin's
/// registered name stays available on the `plugin` field.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct BootError {
    /// Name the failing plugin was registered under
    pub plugin: String,
    #[source]
    pub source: BoxedError,
}

/// A close hook failed during shutdown.
///
/// Teardown failures are collected and reported; they never stop the
/// remaining hooks from running.
#[derive(Debug, Error)]
#[error("close hook '{hook}' failed: {source}")]
pub struct TeardownError {
    /// Name the failing hook was registered under
    pub hook: String,
    #[source]
    pub source: BoxedError,
}
