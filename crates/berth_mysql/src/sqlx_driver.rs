//! Production driver backed by SQLx.
//!
//! Pools come from `MySqlPoolOptions::connect_lazy_with`, which creates the
//! pool without connecting; the builder's probe query is what first touches
//! the network. Single connections await the socket connect up front. Result
//! rows are decoded into JSON values by column type.

use std::sync::Arc;

use berth_common::services::BoxFuture;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use sqlx::mysql::{
    MySql, MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions, MySqlRow,
};
use sqlx::pool::PoolConnection;
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};
use tokio::sync::Mutex;

use crate::driver::{DriverConnection, DriverPool, MySqlDriver, QueryOutput};
use crate::error::DriverError;
use crate::options::DriverTarget;

/// The default driver implementation.
#[derive(Debug, Clone, Default)]
pub struct SqlxDriver;

impl SqlxDriver {
    pub fn new() -> Self {
        SqlxDriver
    }
}

impl MySqlDriver for SqlxDriver {
    fn create_pool(&self, target: &DriverTarget) -> Result<Arc<dyn DriverPool>, DriverError> {
        let options = connect_options(target)?;
        let limit = match target {
            DriverTarget::Settings(settings) => settings.connection_limit,
            DriverTarget::Url(_) => 10,
        };
        let pool = MySqlPoolOptions::new()
            .max_connections(limit)
            .connect_lazy_with(options);
        Ok(Arc::new(SqlxPool { pool }))
    }

    fn connect(
        &self,
        target: &DriverTarget,
    ) -> BoxFuture<'static, Arc<dyn DriverConnection>, DriverError> {
        let options = connect_options(target);
        Box::pin(async move {
            let connection = MySqlConnection::connect_with(&options?).await?;
            Ok(Arc::new(SqlxConnection {
                connection: Mutex::new(Some(connection)),
            }) as Arc<dyn DriverConnection>)
        })
    }
}

fn connect_options(target: &DriverTarget) -> Result<MySqlConnectOptions, DriverError> {
    match target {
        DriverTarget::Url(url) => url
            .parse::<MySqlConnectOptions>()
            .map_err(|err| DriverError::BadTarget(err.to_string())),
        DriverTarget::Settings(settings) => {
            let mut options = MySqlConnectOptions::new()
                .host(&settings.host)
                .port(settings.port)
                .username(&settings.user);
            if let Some(password) = &settings.password {
                options = options.password(password);
            }
            if let Some(database) = &settings.database {
                options = options.database(database);
            }
            Ok(options)
        }
    }
}

struct SqlxPool {
    pool: MySqlPool,
}

impl DriverPool for SqlxPool {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError> {
        Box::pin(async move {
            let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
            Ok(rows_to_output(&rows))
        })
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError> {
        Box::pin(async move {
            let done = sqlx::query(sql).execute(&self.pool).await?;
            Ok(done.rows_affected())
        })
    }

    fn get_connection(&self) -> BoxFuture<'_, Arc<dyn DriverConnection>, DriverError> {
        Box::pin(async move {
            let pooled = self.pool.acquire().await?;
            Ok(Arc::new(SqlxPooledConnection {
                connection: Mutex::new(Some(pooled)),
            }) as Arc<dyn DriverConnection>)
        })
    }

    fn end(&self) -> BoxFuture<'_, (), DriverError> {
        Box::pin(async move {
            self.pool.close().await;
            Ok(())
        })
    }

    fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// A single connection owned outright.
struct SqlxConnection {
    connection: Mutex<Option<MySqlConnection>>,
}

impl std::fmt::Debug for SqlxConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxConnection").finish_non_exhaustive()
    }
}

impl DriverConnection for SqlxConnection {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError> {
        Box::pin(async move {
            let mut guard = self.connection.lock().await;
            let connection = guard.as_mut().ok_or(DriverError::ConnectionClosed)?;
            let rows = sqlx::query(sql).fetch_all(&mut *connection).await?;
            Ok(rows_to_output(&rows))
        })
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError> {
        Box::pin(async move {
            let mut guard = self.connection.lock().await;
            let connection = guard.as_mut().ok_or(DriverError::ConnectionClosed)?;
            let done = sqlx::query(sql).execute(&mut *connection).await?;
            Ok(done.rows_affected())
        })
    }

    fn end(&self) -> BoxFuture<'_, (), DriverError> {
        Box::pin(async move {
            let taken = self.connection.lock().await.take();
            if let Some(connection) = taken {
                connection.close().await?;
            }
            Ok(())
        })
    }
}

/// A connection checked out of a pool; ending it releases it back.
struct SqlxPooledConnection {
    connection: Mutex<Option<PoolConnection<MySql>>>,
}

impl std::fmt::Debug for SqlxPooledConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxPooledConnection")
            .finish_non_exhaustive()
    }
}

impl DriverConnection for SqlxPooledConnection {
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, QueryOutput, DriverError> {
        Box::pin(async move {
            let mut guard = self.connection.lock().await;
            let pooled = guard.as_mut().ok_or(DriverError::ConnectionClosed)?;
            let rows = sqlx::query(sql).fetch_all(&mut **pooled).await?;
            Ok(rows_to_output(&rows))
        })
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, u64, DriverError> {
        Box::pin(async move {
            let mut guard = self.connection.lock().await;
            let pooled = guard.as_mut().ok_or(DriverError::ConnectionClosed)?;
            let done = sqlx::query(sql).execute(&mut **pooled).await?;
            Ok(done.rows_affected())
        })
    }

    fn end(&self) -> BoxFuture<'_, (), DriverError> {
        Box::pin(async move {
            drop(self.connection.lock().await.take());
            Ok(())
        })
    }
}

fn rows_to_output(rows: &[MySqlRow]) -> QueryOutput {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(|row| {
            row.columns()
                .iter()
                .enumerate()
                .map(|(index, column)| (column.name().to_string(), decode_cell(row, index)))
                .collect()
        })
        .collect();

    QueryOutput { columns, rows }
}

fn decode_cell(row: &MySqlRow, index: usize) -> Value {
    let Ok(raw) = row.try_get_raw(index) else {
        return Value::Null;
    };
    if raw.is_null() {
        return Value::Null;
    }

    let type_name = row.columns()[index].type_info().name();
    match type_name {
        "BOOLEAN" => row
            .try_get::<bool, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<i64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "YEAR" | "BIT" => row
            .try_get::<u64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "FLOAT" => row
            .try_get::<f32, _>(index)
            .map(|value| Value::from(f64::from(value)))
            .unwrap_or(Value::Null),
        "DOUBLE" => row
            .try_get::<f64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "DATE" => row
            .try_get::<NaiveDate, _>(index)
            .map(|value| Value::from(value.to_string()))
            .unwrap_or(Value::Null),
        "TIME" => row
            .try_get::<NaiveTime, _>(index)
            .map(|value| Value::from(value.to_string()))
            .unwrap_or(Value::Null),
        "DATETIME" => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|value| Value::from(value.to_string()))
            .unwrap_or(Value::Null),
        "TIMESTAMP" => row
            .try_get::<DateTime<Utc>, _>(index)
            .map(|value| Value::from(value.to_rfc3339()))
            .unwrap_or(Value::Null),
        "JSON" => row.try_get::<Value, _>(index).unwrap_or(Value::Null),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|bytes| Value::from(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null),
        // CHAR, VARCHAR, TEXT, ENUM, SET, DECIMAL and anything unanticipated
        _ => row
            .try_get::<String, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ConnectSettings;

    #[test]
    fn discrete_settings_build_connect_options() {
        let target = DriverTarget::Settings(ConnectSettings {
            host: "db.internal".to_string(),
            port: 3307,
            user: "app".to_string(),
            password: Some("secret".to_string()),
            database: Some("app_db".to_string()),
            connection_limit: 4,
        });
        assert!(connect_options(&target).is_ok());
    }

    #[test]
    fn a_garbage_connection_string_is_a_bad_target() {
        let target = DriverTarget::Url("definitely not a url".to_string());
        let err = connect_options(&target).unwrap_err();
        assert!(matches!(err, DriverError::BadTarget(_)));
    }

    #[test]
    fn a_mysql_url_parses() {
        let target = DriverTarget::Url("mysql://root@localhost/mysql".to_string());
        assert!(connect_options(&target).is_ok());
    }
}
