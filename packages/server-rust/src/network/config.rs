//! Configuration types for the Dashkit server.

use std::path::PathBuf;
use std::time::Duration;

/// Listener and HTTP-layer settings.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Allowed CORS origins. `"*"` allows any origin.
    pub cors_origins: Vec<String>,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
    /// How long shutdown waits for in-flight requests before giving up.
    pub drain_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            drain_timeout: Duration::from_secs(30),
        }
    }
}

/// Everything the server needs at startup.
///
/// Both paths are optional: without a dataset every collection is empty, and
/// without a preferences file the color mode lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub network: NetworkConfig,
    /// JSON dataset with `products`, `orders`, `users`, and `dataUsers`.
    pub data_path: Option<PathBuf>,
    /// JSON file the color-mode preference is persisted to.
    pub preferences_path: Option<PathBuf>,
}
