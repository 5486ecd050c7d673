// --- File: crates/berth_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- MySQL Config ---
// The registration options for the MySQL plugin. The three control fields
// (`type`, `name`, `deferred`) steer the registration itself and are stripped
// before anything is handed to the driver; everything else is driver input.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct MySqlConfig {
    /// Client kind: `"connection"` for a single connection, anything else
    /// (including absent) selects a pool.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Optional namespace key. Absent means the default namespace slot.
    pub name: Option<String>,
    /// Selects the deferred-result flavor instead of the completion-callback
    /// flavor.
    pub deferred: bool,
    /// When present, passed whole to the driver instead of the discrete
    /// connection fields below.
    pub connection_string: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: Option<String>,
    pub connection_limit: u32,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        MySqlConfig {
            kind: None,
            name: None,
            deferred: false,
            connection_string: None,
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: None,
            database: None,
            connection_limit: 10,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // Server config is mandatory
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_mysql: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub mysql: Option<MySqlConfig>,
}
