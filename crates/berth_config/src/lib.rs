// --- File: crates/berth_config/src/lib.rs ---
//! Configuration loading for the Berth workspace.
//!
//! Configuration is layered: an optional `config/default` file, an optional
//! `config/{RUN_ENV}` override file, then `APP_`-prefixed environment
//! variables (with `__` as the section separator, e.g. `APP_SERVER__PORT`).
//! A `.env` file is loaded into the process environment once before the
//! first read.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;

pub mod models;
pub use models::{AppConfig, MySqlConfig, ServerConfig};

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// Uses a `OnceCell` so repeated calls (for instance from tests) load the
/// file at most once per process.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Load the application configuration.
///
/// # Errors
///
/// Returns a `ConfigError` if a configuration source is malformed or the
/// merged configuration does not deserialize into [`AppConfig`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
