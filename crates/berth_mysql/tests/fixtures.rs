//! Test fixtures for the MySQL plugin tests.
//!
//! Provides a mock driver implementing the narrow driver interface, plus
//! factory functions for the registration configs the tests exercise. The
//! mock recognizes `SELECT <n> AS \`ping\`` queries and answers with a
//! matching row, so end-to-end tests can assert on real result data without
//! a database server.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use berth_common::services::BoxFuture;
use berth_config::MySqlConfig;
use berth_mysql::{
    DriverConnection, DriverError, DriverPool, DriverTarget, MySqlDriver, QueryOutput, Row,
};
use serde_json::json;

pub struct MockDriver {
    refuse: Option<String>,
    fail_end: Option<String>,
}

impl MockDriver {
    /// A driver whose clients connect and answer queries.
    pub fn healthy() -> Arc<dyn MySqlDriver> {
        Arc::new(MockDriver {
            refuse: None,
            fail_end: None,
        })
    }

    /// A driver that refuses connections the way a closed port does.
    pub fn refusing(host: &str, port: u16) -> Arc<dyn MySqlDriver> {
        Arc::new(MockDriver {
            refuse: Some(format!("connect ECONNREFUSED {}:{}", host, port)),
            fail_end: None,
        })
    }

    /// A driver whose clients connect but fail at teardown.
    pub fn failing_teardown(message: &str) -> Arc<dyn MySqlDriver> {
        Arc::new(MockDriver {
            refuse: None,
            fail_end: Some(message.to_string()),
        })
    }
}

impl MySqlDriver for MockDriver {
    fn create_pool(&self, _target: &DriverTarget) -> Result<Arc<dyn DriverPool>, DriverError> {
        // Pool creation is optimistic; a refusing driver only fails at the probe.
        Ok(Arc::new(MockPool {
            closed: AtomicBool::new(false),
            refuse: self.refuse.clone(),
            fail_end: self.fail_end.clone(),
        }))
    }

    fn connect(
        &self,
        _target: &DriverTarget,
    ) -> BoxFuture<'static, Arc<dyn DriverConnection>, DriverError> {
        let refuse = self.refuse.clone();
        let fail_end = self.fail_end.clone();
        Box::pin(async move {
            if let Some(message) = refuse {
                return Err(DriverError::Other(message));
            }
            Ok(Arc::new(MockConnection {
                ended: AtomicBool::new(false),
                fail_end,
            }) as Arc<dyn DriverConnection>)
        })
    }
}

pub struct MockPool {
    closed: AtomicBool,
    refuse: Option<String>,
    fail_end: Option<String>,
}

impl DriverPool for MockPool {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError> {
        Box::pin(async move {
            if let Some(message) = &self.refuse {
                return Err(DriverError::Other(message.clone()));
            }
            if self.is_closed() {
                return Err(DriverError::ConnectionClosed);
            }
            Ok(canned_output(sql))
        })
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError> {
        Box::pin(async move {
            self.query(sql).await?;
            Ok(0)
        })
    }

    fn get_connection(&self) -> BoxFuture<'_, Arc<dyn DriverConnection>, DriverError> {
        Box::pin(async move {
            if self.is_closed() {
                return Err(DriverError::ConnectionClosed);
            }
            Ok(Arc::new(MockConnection {
                ended: AtomicBool::new(false),
                fail_end: None,
            }) as Arc<dyn DriverConnection>)
        })
    }

    fn end(&self) -> BoxFuture<'_, (), DriverError> {
        Box::pin(async move {
            self.closed.store(true, Ordering::SeqCst);
            match &self.fail_end {
                Some(message) => Err(DriverError::Other(message.clone())),
                None => Ok(()),
            }
        })
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct MockConnection {
    ended: AtomicBool,
    fail_end: Option<String>,
}

impl std::fmt::Debug for MockConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockConnection").finish_non_exhaustive()
    }
}

impl DriverConnection for MockConnection {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError> {
        Box::pin(async move {
            if self.ended.load(Ordering::SeqCst) {
                return Err(DriverError::ConnectionClosed);
            }
            Ok(canned_output(sql))
        })
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError> {
        Box::pin(async move {
            self.query(sql).await?;
            Ok(0)
        })
    }

    fn end(&self) -> BoxFuture<'_, (), DriverError> {
        Box::pin(async move {
            self.ended.store(true, Ordering::SeqCst);
            match &self.fail_end {
                Some(message) => Err(DriverError::Other(message.clone())),
                None => Ok(()),
            }
        })
    }
}

/// Answer `SELECT <n> AS \`ping\`` with a matching row; everything else
/// (probes included) gets a single generic row.
fn canned_output(sql: &str) -> QueryOutput {
    let mut row = Row::new();
    if let Some(n) = parse_ping(sql) {
        row.insert("ping".to_string(), json!(n));
        QueryOutput {
            columns: vec!["ping".to_string()],
            rows: vec![row],
        }
    } else {
        row.insert("result".to_string(), json!(1));
        QueryOutput {
            columns: vec!["result".to_string()],
            rows: vec![row],
        }
    }
}

fn parse_ping(sql: &str) -> Option<i64> {
    let rest = sql.strip_prefix("SELECT ")?;
    let (number, tail) = rest.split_once(' ')?;
    if tail.trim() == "AS `ping`" {
        number.parse().ok()
    } else {
        None
    }
}

// --- Config factories ---

pub fn pool_config() -> MySqlConfig {
    MySqlConfig::default()
}

pub fn deferred_pool_config() -> MySqlConfig {
    MySqlConfig {
        deferred: true,
        ..MySqlConfig::default()
    }
}

pub fn connection_config() -> MySqlConfig {
    MySqlConfig {
        kind: Some("connection".to_string()),
        ..MySqlConfig::default()
    }
}

pub fn deferred_connection_config() -> MySqlConfig {
    MySqlConfig {
        kind: Some("connection".to_string()),
        deferred: true,
        ..MySqlConfig::default()
    }
}

pub fn named_config(name: &str) -> MySqlConfig {
    MySqlConfig {
        name: Some(name.to_string()),
        ..MySqlConfig::default()
    }
}
