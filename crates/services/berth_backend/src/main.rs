// File: services/berth_backend/src/main.rs
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use berth_common::{database_error, logging, not_found, BerthError, HttpStatusCode};
use berth_config::load_config;
use berth_host::Host;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

mod app_state;
use app_state::AppState;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    logging::init();

    // Boot the plugin host. The MySQL plugin only boots when the feature is
    // switched on and configured; a failed registration fails the boot.
    let host = Host::new();
    if berth_common::is_feature_enabled(config.use_mysql, config.mysql.as_ref()) {
        let mysql_config = config.mysql.clone().expect("mysql section checked above");
        host.register("mysql", berth_mysql::plugin(mysql_config));
    }

    if let Err(err) = host.ready().await {
        error!("host boot failed in plugin '{}': {}", err.plugin, err);
        std::process::exit(1);
    }

    let state = AppState {
        config: config.clone(),
        host: host.clone(),
    };

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Berth API!" }))
        .route("/health", get(health))
        .with_state(state);

    let app = Router::new().nest("/api", api_router);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Drain plugin resources before exiting; teardown failures are reported,
    // not fatal.
    for failure in host.close().await {
        error!("{}", failure);
    }
}

/// Liveness check that round-trips through the attached MySQL client.
async fn health(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let Some(client) = berth_mysql::mysql(&state.host) else {
        return Err(error_response(&not_found("no MySQL client registered")));
    };

    match client.query("SELECT 1 AS `ping`").await {
        Ok(output) => Ok(Json(serde_json::json!({
            "status": "ok",
            "ping": output.value(0, "ping"),
        }))),
        Err(err) => Err(error_response(&database_error(err))),
    }
}

fn error_response(err: &BerthError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
