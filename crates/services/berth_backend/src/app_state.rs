// File: services/berth_backend/src/app_state.rs
use berth_config::AppConfig;
use berth_host::Host;
use std::sync::Arc;

/// Application state that is shared across all routes.
///
/// Handlers reach the booted plugin host (and through it the attached
/// database client) and the loaded configuration from here; nothing else is
/// shared process-wide.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    ///
    /// Kept on the state so future handlers can read it without re-loading;
    /// nothing reads it yet beyond boot.
    #[allow(dead_code)]
    pub config: Arc<AppConfig>,

    /// The booted plugin host. Decorations attached during boot (such as the
    /// MySQL client) are resolved through this handle.
    pub host: Host,
}
