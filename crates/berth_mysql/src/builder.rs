//! Connection builder: construct a client and verify it before anyone sees it.
//!
//! The probe query is strictly ordered after factory construction and
//! strictly before namespace attachment, so an unverified handle is never
//! exposed. Any factory or probe error aborts the registration.

use std::sync::Arc;

use tracing::debug;

use crate::client::MySqlClient;
use crate::driver::{DriverConnection as _, DriverPool as _, MySqlDriver};
use crate::error::RegistrationError;
use crate::options::{ClientKind, DriverTarget, Flavor};

/// Pool creation is optimistic, so the probe is what surfaces a bad target.
const POOL_PROBE: &str = "SELECT 1";
/// Liveness probe for single connections.
const CONNECTION_PROBE: &str = "SELECT NOW()";

pub(crate) async fn build_client(
    driver: &Arc<dyn MySqlDriver>,
    kind: ClientKind,
    flavor: Flavor,
    target: &DriverTarget,
) -> Result<MySqlClient, RegistrationError> {
    match kind {
        ClientKind::Pool => {
            let pool = driver.create_pool(target)?;
            pool.query(POOL_PROBE).await?;
            debug!("pool probe succeeded");
            Ok(MySqlClient::from_pool(pool, flavor))
        }
        ClientKind::Connection => {
            let connection = driver.connect(target).await?;
            connection.query(CONNECTION_PROBE).await?;
            debug!("connection probe succeeded");
            Ok(MySqlClient::from_connection(connection, flavor))
        }
    }
}
