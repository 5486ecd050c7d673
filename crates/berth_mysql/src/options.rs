//! Registration option normalization.
//!
//! A [`MySqlConfig`] mixes two audiences: three control fields that steer the
//! registration (`type`, `name`, `deferred`) and the connection parameters the
//! driver consumes. [`normalize`] splits the two apart by destructuring the
//! whole config, so a control field can never leak into the driver's input.

use berth_config::MySqlConfig;

/// Which shape of client a registration produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// A single connection
    Connection,
    /// A connection pool (the default)
    Pool,
}

/// Which presentation of the client API a registration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Completion-callback presentation (the default)
    Callback,
    /// Deferred-result (awaitable) presentation
    Deferred,
}

/// The control fields stripped from the options before the driver sees them.
#[derive(Debug, Clone)]
pub(crate) struct ControlFields {
    pub(crate) kind: ClientKind,
    pub(crate) flavor: Flavor,
    pub(crate) name: Option<String>,
}

/// What gets handed to the driver factory.
#[derive(Debug, Clone)]
pub enum DriverTarget {
    /// A connection string, passed whole
    Url(String),
    /// Discrete connection parameters
    Settings(ConnectSettings),
}

/// Driver-facing connection parameters.
#[derive(Debug, Clone)]
pub struct ConnectSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: Option<String>,
    pub connection_limit: u32,
}

/// Split a raw config into control fields and the driver target.
///
/// Only the literal kind string `"connection"` selects the single-connection
/// branch; any other value, or none, selects a pool. A present
/// `connection_string` wins over the discrete fields.
pub(crate) fn normalize(config: MySqlConfig) -> (ControlFields, DriverTarget) {
    let MySqlConfig {
        kind,
        name,
        deferred,
        connection_string,
        host,
        port,
        user,
        password,
        database,
        connection_limit,
    } = config;

    let kind = match kind.as_deref() {
        Some("connection") => ClientKind::Connection,
        _ => ClientKind::Pool,
    };
    let flavor = if deferred {
        Flavor::Deferred
    } else {
        Flavor::Callback
    };
    let target = match connection_string {
        Some(url) => DriverTarget::Url(url),
        None => DriverTarget::Settings(ConnectSettings {
            host,
            port,
            user,
            password,
            database,
            connection_limit,
        }),
    };

    (ControlFields { kind, flavor, name }, target)
}
