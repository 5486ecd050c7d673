//! Lifecycle binding: exactly one close hook per registered client.
//!
//! The hook routes through the presentation matching the client's flavor
//! (a completion callback bridged over a oneshot channel for the callback
//! flavor, a direct await for the deferred flavor) and reports failure to
//! the host's teardown-error channel. `MySqlClient::end` itself is
//! idempotent, so a hook that fires more than once stays harmless.

use std::sync::Arc;

use berth_host::Host;

use crate::client::MySqlClient;
use crate::error::DriverError;
use crate::options::Flavor;

pub(crate) fn bind(host: &Host, client: &Arc<MySqlClient>) {
    let client = client.clone();
    host.on_close("berth-mysql", move || async move {
        match client.flavor() {
            Flavor::Deferred => client.end().await,
            Flavor::Callback => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                client.end_with(move |result| {
                    let _ = tx.send(result);
                });
                match rx.await {
                    Ok(result) => result,
                    Err(_) => Err(DriverError::Other(
                        "end completion callback was dropped".to_string(),
                    )),
                }
            }
        }
    });
}
