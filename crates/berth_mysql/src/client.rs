//! The client handle attached to a host namespace.
//!
//! A [`MySqlClient`] records its kind (connection or pool) and flavor
//! (callback or deferred) as explicit tags at construction time. Each verb is
//! one internal operation with two thin presentations: the deferred flavor is
//! the `async fn` itself, the callback flavor (`*_with`) spawns the operation
//! and hands the outcome to a completion callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::driver::{DriverConnection, DriverPool, QueryOutput};
use crate::error::DriverError;
use crate::options::{ClientKind, Flavor};
use crate::sqlstring;
use serde_json::Value;

#[derive(Clone)]
pub(crate) enum Backend {
    Connection(Arc<dyn DriverConnection>),
    Pool(Arc<dyn DriverPool>),
}

/// A verified, ready-to-use database client.
///
/// Exclusively owned by the namespace slot it is attached to; queries may be
/// issued from anywhere the host scope is visible. The handle is never
/// mutated after attachment apart from the one-shot `end` guard.
pub struct MySqlClient {
    kind: ClientKind,
    flavor: Flavor,
    backend: Backend,
    ended: AtomicBool,
}

impl MySqlClient {
    pub(crate) fn from_pool(pool: Arc<dyn DriverPool>, flavor: Flavor) -> Self {
        MySqlClient {
            kind: ClientKind::Pool,
            flavor,
            backend: Backend::Pool(pool),
            ended: AtomicBool::new(false),
        }
    }

    pub(crate) fn from_connection(connection: Arc<dyn DriverConnection>, flavor: Flavor) -> Self {
        MySqlClient {
            kind: ClientKind::Connection,
            flavor,
            backend: Backend::Connection(connection),
            ended: AtomicBool::new(false),
        }
    }

    /// The client's kind tag, set at construction.
    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    /// The client's flavor tag, set at construction.
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// The underlying pool, when this is a pool client.
    pub fn pool(&self) -> Option<&Arc<dyn DriverPool>> {
        match &self.backend {
            Backend::Pool(pool) => Some(pool),
            Backend::Connection(_) => None,
        }
    }

    /// The underlying connection, when this is a single-connection client.
    pub fn connection(&self) -> Option<&Arc<dyn DriverConnection>> {
        match &self.backend {
            Backend::Connection(connection) => Some(connection),
            Backend::Pool(_) => None,
        }
    }

    // --- Synchronous string utilities (flavor independent) ---

    /// Render a SQL template with escaped values. See [`sqlstring::format`].
    pub fn format(&self, template: &str, values: &[Value]) -> String {
        sqlstring::format(template, values)
    }

    /// Escape a value for SQL interpolation. See [`sqlstring::escape`].
    pub fn escape(&self, value: &Value) -> String {
        sqlstring::escape(value)
    }

    /// Escape an identifier. See [`sqlstring::escape_id`].
    pub fn escape_id(&self, identifier: &str) -> String {
        sqlstring::escape_id(identifier)
    }

    // --- Query / execute ---

    /// Run a query, deferred presentation.
    pub async fn query(&self, sql: &str) -> Result<QueryOutput, DriverError> {
        match &self.backend {
            Backend::Pool(pool) => pool.query(sql).await,
            Backend::Connection(connection) => connection.query(sql).await,
        }
    }

    /// Run a query, callback presentation. The callback receives the outcome
    /// once the round-trip completes.
    pub fn query_with<F>(&self, sql: &str, callback: F)
    where
        F: FnOnce(Result<QueryOutput, DriverError>) + Send + 'static,
    {
        let backend = self.backend.clone();
        let sql = sql.to_string();
        tokio::spawn(async move {
            let result = match &backend {
                Backend::Pool(pool) => pool.query(&sql).await,
                Backend::Connection(connection) => connection.query(&sql).await,
            };
            callback(result);
        });
    }

    /// Execute a statement, deferred presentation. Returns affected rows.
    pub async fn execute(&self, sql: &str) -> Result<u64, DriverError> {
        match &self.backend {
            Backend::Pool(pool) => pool.execute(sql).await,
            Backend::Connection(connection) => connection.execute(sql).await,
        }
    }

    /// Execute a statement, callback presentation.
    pub fn execute_with<F>(&self, sql: &str, callback: F)
    where
        F: FnOnce(Result<u64, DriverError>) + Send + 'static,
    {
        let backend = self.backend.clone();
        let sql = sql.to_string();
        tokio::spawn(async move {
            let result = match &backend {
                Backend::Pool(pool) => pool.execute(&sql).await,
                Backend::Connection(connection) => connection.execute(&sql).await,
            };
            callback(result);
        });
    }

    /// Check a dedicated connection out of the pool.
    ///
    /// # Errors
    ///
    /// Fails with [`DriverError::NotAPool`] on a single-connection client.
    pub async fn get_connection(&self) -> Result<Arc<dyn DriverConnection>, DriverError> {
        match &self.backend {
            Backend::Pool(pool) => pool.get_connection().await,
            Backend::Connection(_) => Err(DriverError::NotAPool),
        }
    }

    // --- Teardown ---

    /// Release the connection or drain the pool, deferred presentation.
    ///
    /// Idempotent: only the first call reaches the driver.
    pub async fn end(&self) -> Result<(), DriverError> {
        if self.ended.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        match &self.backend {
            Backend::Pool(pool) => pool.end().await,
            Backend::Connection(connection) => connection.end().await,
        }
    }

    /// Release the connection or drain the pool, callback presentation.
    pub fn end_with<F>(&self, callback: F)
    where
        F: FnOnce(Result<(), DriverError>) + Send + 'static,
    {
        if self.ended.swap(true, Ordering::SeqCst) {
            callback(Ok(()));
            return;
        }
        let backend = self.backend.clone();
        tokio::spawn(async move {
            let result = match &backend {
                Backend::Pool(pool) => pool.end().await,
                Backend::Connection(connection) => connection.end().await,
            };
            callback(result);
        });
    }

    /// Whether the client can no longer serve queries.
    pub fn is_closed(&self) -> bool {
        match &self.backend {
            Backend::Pool(pool) => pool.is_closed(),
            Backend::Connection(_) => self.ended.load(Ordering::SeqCst),
        }
    }
}

impl std::fmt::Debug for MySqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlClient")
            .field("kind", &self.kind)
            .field("flavor", &self.flavor)
            .finish()
    }
}
