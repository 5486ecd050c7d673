//! Host shutdown: close hooks and the teardown-error channel.
//!
//! Hooks registered with [`Host::on_close`] run when the host closes, in
//! reverse registration order. Each hook is awaited to completion before the
//! next runs; a failing hook is recorded as a [`TeardownError`] and the drain
//! continues. `close` is idempotent: a second call finds the hook list empty
//! and returns immediately.

use std::future::Future;
use std::sync::atomic::Ordering;

use berth_common::services::{BoxFuture, BoxedError};
use tracing::{debug, error, info};

use crate::error::TeardownError;
use crate::scope::Host;

pub(crate) struct CloseHook {
    pub(crate) name: String,
    pub(crate) run: Box<dyn FnOnce() -> BoxFuture<'static, (), BoxedError> + Send>,
}

impl Host {
    /// Register a teardown hook, run once when the host closes.
    ///
    /// Hooks registered anywhere in the scope tree share one list; the whole
    /// tree drains together.
    pub fn on_close<F, Fut, E>(&self, name: &str, hook: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let hook = CloseHook {
            name: name.to_string(),
            run: Box::new(move || Box::pin(async move { hook().await.map_err(BoxedError::new) })),
        };
        self.scope
            .shared
            .close_hooks
            .lock()
            .expect("close hook lock poisoned")
            .push(hook);
    }

    /// Close the host: drain all close hooks in reverse registration order.
    ///
    /// Every hook runs even when earlier ones fail; failures are logged and
    /// returned as the teardown-error channel. An already-closed host returns
    /// an empty list.
    pub async fn close(&self) -> Vec<TeardownError> {
        self.scope.shared.closed.store(true, Ordering::SeqCst);

        let mut hooks = {
            let mut guard = self
                .scope
                .shared
                .close_hooks
                .lock()
                .expect("close hook lock poisoned");
            std::mem::take(&mut *guard)
        };

        let mut failures = Vec::new();
        while let Some(hook) = hooks.pop() {
            debug!(hook = %hook.name, "running close hook");
            if let Err(source) = (hook.run)().await {
                let failure = TeardownError {
                    hook: hook.name,
                    source,
                };
                error!("{}", failure);
                failures.push(failure);
            }
        }
        info!("host closed");
        failures
    }

    /// Whether [`Host::close`] has been called on this host tree.
    pub fn is_closed(&self) -> bool {
        self.scope.shared.closed.load(Ordering::SeqCst)
    }
}
