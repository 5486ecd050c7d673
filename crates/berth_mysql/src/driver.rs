//! The narrow driver interface.
//!
//! Everything below the plugin (SQL execution, pooling internals, the wire
//! protocol) belongs to the driver and is consumed through these traits.
//! Trait methods return boxed futures so drivers stay object safe and can be
//! swapped for test doubles, following the workspace's dependency-injection
//! convention.

use std::sync::Arc;

use berth_common::services::BoxFuture;
use serde_json::{Map, Value};

use crate::error::DriverError;
use crate::options::DriverTarget;

/// One result row: column name to decoded value.
pub type Row = Map<String, Value>;

/// The result of a query: field metadata plus decoded rows.
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    /// Column names, in select order
    pub columns: Vec<String>,
    /// Decoded rows
    pub rows: Vec<Row>,
}

impl QueryOutput {
    /// Convenience lookup of a single cell.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }
}

/// A single database connection.
pub trait DriverConnection: Send + Sync + std::fmt::Debug {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError>;

    /// Execute a statement, returning the number of affected rows.
    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError>;

    /// Release the connection. Implementations tolerate repeated calls.
    fn end(&self) -> BoxFuture<'_, (), DriverError>;
}

/// A connection pool.
pub trait DriverPool: Send + Sync {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError>;

    /// Execute a statement, returning the number of affected rows.
    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError>;

    /// Check a dedicated connection out of the pool. Ending the returned
    /// connection releases it back to the pool.
    fn get_connection(&self) -> BoxFuture<'_, Arc<dyn DriverConnection>, DriverError>;

    /// Drain the pool. Implementations tolerate repeated calls.
    fn end(&self) -> BoxFuture<'_, (), DriverError>;

    /// Whether the pool has been drained.
    fn is_closed(&self) -> bool;
}

/// The driver's client factory.
pub trait MySqlDriver: Send + Sync {
    /// Create a pool. Pool creation is synchronous and optimistic: it does
    /// not connect eagerly, so a bad target surfaces at the first query.
    fn create_pool(&self, target: &DriverTarget) -> Result<Arc<dyn DriverPool>, DriverError>;

    /// Establish a single connection (awaits the socket connect).
    fn connect(&self, target: &DriverTarget)
        -> BoxFuture<'static, Arc<dyn DriverConnection>, DriverError>;
}
