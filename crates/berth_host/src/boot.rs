//! Queued plugin boot.
//!
//! Plugins are enqueued with [`Host::register`] and run by [`Host::ready`] in
//! registration order. The first failing plugin aborts the boot; its error is
//! reported unchanged through [`BootError`]. The host is not usable as a
//! booted instance until `ready` has resolved.

use std::future::Future;

use berth_common::services::{BoxFuture, BoxedError};
use tracing::{debug, info};

use crate::error::BootError;
use crate::scope::Host;

type PluginFn = Box<dyn FnOnce(Host) -> BoxFuture<'static, (), BoxedError> + Send>;

pub(crate) struct BootStep {
    pub(crate) name: String,
    pub(crate) scope: Host,
    pub(crate) run: PluginFn,
}

impl Host {
    /// Queue a plugin boot step on this scope.
    ///
    /// The plugin runs against the scope it was registered on when
    /// [`Host::ready`] drains the queue. Steps run in registration order
    /// across the whole host tree.
    pub fn register<F, Fut, E>(&self, name: &str, plugin: F)
    where
        F: FnOnce(Host) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let step = BootStep {
            name: name.to_string(),
            scope: self.clone(),
            run: Box::new(move |host| {
                Box::pin(async move { plugin(host).await.map_err(BoxedError::new) })
            }),
        };
        self.scope
            .shared
            .boot_queue
            .lock()
            .expect("boot queue lock poisoned")
            .push(step);
    }

    /// Run all queued plugins in registration order.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`BootError`] carrying the first failing plugin's
    /// error; later steps are left unrun.
    pub async fn ready(&self) -> Result<(), BootError> {
        loop {
            // Take one step at a time so a plugin may register further
            // plugins while booting.
            let step = {
                let mut queue = self
                    .scope
                    .shared
                    .boot_queue
                    .lock()
                    .expect("boot queue lock poisoned");
                if queue.is_empty() {
                    break;
                }
                queue.remove(0)
            };

            debug!(plugin = %step.name, "booting plugin");
            (step.run)(step.scope).await.map_err(|source| BootError {
                plugin: step.name.clone(),
                source,
            })?;
            debug!(plugin = %step.name, "plugin booted");
        }
        info!("host boot complete");
        Ok(())
    }
}
