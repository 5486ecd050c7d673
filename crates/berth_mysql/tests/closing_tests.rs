//! End-to-end query and shutdown tests.

mod fixtures;

use berth_host::Host;
use berth_mysql::{
    mysql, register_with_driver, DriverConnection as _, DriverError, DriverPool as _,
};
use fixtures::{
    connection_config, deferred_connection_config, deferred_pool_config, pool_config, MockDriver,
};
use serde_json::json;

#[tokio::test]
async fn callback_pool_round_trip_and_shutdown() {
    let host = Host::new();
    register_with_driver(&host, MockDriver::healthy(), pool_config())
        .await
        .unwrap();

    let client = mysql(&host).unwrap();

    // Callback presentation: the completion callback carries the outcome.
    let (tx, rx) = tokio::sync::oneshot::channel();
    client.query_with("SELECT 1 AS `ping`", move |result| {
        let _ = tx.send(result);
    });
    let output = rx.await.unwrap().unwrap();
    assert_eq!(output.value(0, "ping"), Some(&json!(1)));

    let failures = host.close().await;
    assert!(failures.is_empty());
    assert!(client.is_closed());

    // No further queries succeed on the drained pool.
    let err = client.query("SELECT 2 AS `ping`").await.unwrap_err();
    assert!(matches!(err, DriverError::ConnectionClosed));
}

#[tokio::test]
async fn deferred_connection_round_trip() {
    let host = Host::new();
    register_with_driver(&host, MockDriver::healthy(), deferred_connection_config())
        .await
        .unwrap();

    let client = mysql(&host).unwrap();
    let output = client.query("SELECT 1 AS `ping`").await.unwrap();

    // Rows and field metadata both come back.
    let (rows, fields) = (&output.rows, &output.columns);
    assert_eq!(rows[0].get("ping"), Some(&json!(1)));
    assert!(!fields.is_empty());

    host.close().await;
    let err = client.query("SELECT 1 AS `ping`").await.unwrap_err();
    assert!(matches!(err, DriverError::ConnectionClosed));
}

#[tokio::test]
async fn deferred_pool_hands_out_dedicated_connections() {
    let host = Host::new();
    register_with_driver(&host, MockDriver::healthy(), deferred_pool_config())
        .await
        .unwrap();

    let client = mysql(&host).unwrap();

    let output = client.query("SELECT 1 AS `ping`").await.unwrap();
    assert_eq!(output.value(0, "ping"), Some(&json!(1)));

    let connection = client.get_connection().await.unwrap();
    let output = connection.query("SELECT 2 AS `ping`").await.unwrap();
    assert_eq!(output.value(0, "ping"), Some(&json!(2)));
    connection.end().await.unwrap();

    let output = client.query("SELECT 3 AS `ping`").await.unwrap();
    assert_eq!(output.value(0, "ping"), Some(&json!(3)));

    host.close().await;
    assert!(client.pool().unwrap().is_closed());
}

#[tokio::test]
async fn get_connection_is_pool_only() {
    let host = Host::new();
    register_with_driver(&host, MockDriver::healthy(), connection_config())
        .await
        .unwrap();

    let client = mysql(&host).unwrap();
    let err = client.get_connection().await.unwrap_err();
    assert!(matches!(err, DriverError::NotAPool));
}

#[tokio::test]
async fn teardown_failures_reach_the_shutdown_error_channel() {
    let host = Host::new();
    register_with_driver(
        &host,
        MockDriver::failing_teardown("pool drain timed out"),
        pool_config(),
    )
    .await
    .unwrap();

    let failures = host.close().await;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].hook, "berth-mysql");
    assert!(failures[0].to_string().contains("pool drain timed out"));
}

#[tokio::test]
async fn closing_twice_releases_the_client_once() {
    let host = Host::new();
    register_with_driver(&host, MockDriver::healthy(), deferred_pool_config())
        .await
        .unwrap();
    let client = mysql(&host).unwrap();

    assert!(host.close().await.is_empty());
    assert!(host.close().await.is_empty());
    assert!(client.is_closed());

    // A direct second end on the client is also a no-op.
    client.end().await.unwrap();
}

#[tokio::test]
async fn string_utilities_are_identical_across_all_four_flavors() {
    let configs = [
        pool_config(),
        deferred_pool_config(),
        connection_config(),
        deferred_connection_config(),
    ];

    for config in configs {
        let host = Host::new();
        register_with_driver(&host, MockDriver::healthy(), config)
            .await
            .unwrap();
        let client = mysql(&host).unwrap();

        assert_eq!(
            client.format("SELECT ? AS `now`", &[json!(1)]),
            "SELECT 1 AS `now`"
        );
        assert_eq!(client.escape(&json!("userId")), "'userId'");
        assert_eq!(client.escape_id("posts.date"), "`posts`.`date`");
    }
}
