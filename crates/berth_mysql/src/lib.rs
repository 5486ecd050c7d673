//! MySQL integration for Berth hosts.
//!
//! This crate registers a MySQL client (a single connection or a pool, in
//! either the completion-callback or the deferred-result presentation) on a
//! [`berth_host::Host`] scope, verifies it with a liveness probe before
//! anyone can reach it, attaches it to the host's namespace with collision
//! detection, and arms a close hook that releases it when the host shuts
//! down. SQL execution itself is delegated to the driver (SQLx) behind a
//! narrow trait seam.
//!
//! # Usage
//!
//! ```rust,no_run
//! use berth_config::MySqlConfig;
//! use berth_host::Host;
//!
//! async fn boot() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Host::new();
//!     host.register(
//!         "mysql",
//!         berth_mysql::plugin(MySqlConfig {
//!             connection_string: Some("mysql://root@localhost/mysql".into()),
//!             ..MySqlConfig::default()
//!         }),
//!     );
//!     host.ready().await?;
//!
//!     let client = berth_mysql::mysql(&host).expect("registered above");
//!     let output = client.query("SELECT 1 AS `ping`").await?;
//!     assert_eq!(output.value(0, "ping"), Some(&serde_json::json!(1)));
//!
//!     host.close().await;
//!     Ok(())
//! }
//! ```

mod builder;
mod lifecycle;

pub mod classify;
pub mod client;
pub mod driver;
pub mod error;
pub mod options;
pub mod plugin;
pub mod registrar;
pub mod sqlstring;
pub mod sqlx_driver;

// Re-export the plugin entry points and the client surface for ease of use
pub use classify::{
    is_callback_connection, is_callback_pool, is_deferred_connection, is_deferred_pool,
};
pub use client::MySqlClient;
pub use driver::{DriverConnection, DriverPool, MySqlDriver, QueryOutput, Row};
pub use error::{DriverError, RegistrationError};
pub use options::{ClientKind, ConnectSettings, DriverTarget, Flavor};
pub use plugin::{plugin, register, register_from_app_config, register_with_driver};
pub use registrar::{mysql, mysql_named, MySqlNamespace};
pub use sqlstring::{escape, escape_id, format};
pub use sqlx_driver::SqlxDriver;
