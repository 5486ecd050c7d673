//! Plugin entry points.
//!
//! Registration runs in a fixed order: normalize options, construct and
//! probe the client, attach it to the namespace, arm the close hook. A
//! failure at any step aborts only this registration; the host's boot
//! machinery reports it to the caller.

use std::sync::Arc;

use berth_common::services::BoxFuture;
use berth_config::{AppConfig, MySqlConfig};
use berth_host::Host;
use tracing::{debug, info};

use crate::builder::build_client;
use crate::driver::MySqlDriver;
use crate::error::RegistrationError;
use crate::sqlx_driver::SqlxDriver;
use crate::{lifecycle, options, registrar};

/// Register a MySQL client on the given host scope using the SQLx driver.
///
/// # Errors
///
/// Fails with a [`RegistrationError`]: a configuration error (factory or
/// probe failure, with the driver's error unchanged) or a namespace
/// collision.
pub async fn register(host: &Host, config: MySqlConfig) -> Result<(), RegistrationError> {
    register_with_driver(host, Arc::new(SqlxDriver::new()), config).await
}

/// Register a MySQL client built by the given driver.
///
/// This is the seam tests and alternative drivers plug into; see
/// [`register`] for the error contract.
pub async fn register_with_driver(
    host: &Host,
    driver: Arc<dyn MySqlDriver>,
    config: MySqlConfig,
) -> Result<(), RegistrationError> {
    let (control, target) = options::normalize(config);
    debug!(kind = ?control.kind, flavor = ?control.flavor, name = ?control.name, "registering MySQL client");

    let client = Arc::new(build_client(&driver, control.kind, control.flavor, &target).await?);

    if let Err(err) = registrar::attach(host, client.clone(), control.name.as_deref()) {
        // The client is live but has nowhere to be attached; release it
        // before reporting the collision.
        let _ = client.end().await;
        return Err(err);
    }
    lifecycle::bind(host, &client);

    info!(kind = ?control.kind, flavor = ?control.flavor, "MySQL client registered");
    Ok(())
}

/// Register from the application configuration's `mysql` section.
///
/// # Errors
///
/// Fails with [`RegistrationError::MissingConfig`] when the section is
/// absent; otherwise as [`register`].
pub async fn register_from_app_config(
    host: &Host,
    config: &AppConfig,
) -> Result<(), RegistrationError> {
    let mysql = config
        .mysql
        .clone()
        .ok_or(RegistrationError::MissingConfig)?;
    register(host, mysql).await
}

/// Package a registration as a host boot step.
///
/// ```rust,no_run
/// use berth_config::MySqlConfig;
/// use berth_host::Host;
///
/// # async fn boot() -> Result<(), Box<dyn std::error::Error>> {
/// let host = Host::new();
/// host.register("mysql", berth_mysql::plugin(MySqlConfig::default()));
/// host.ready().await?;
/// # Ok(())
/// # }
/// ```
pub fn plugin(
    config: MySqlConfig,
) -> impl FnOnce(Host) -> BoxFuture<'static, (), RegistrationError> + Send + 'static {
    move |host: Host| Box::pin(async move { register(&host, config).await })
}
