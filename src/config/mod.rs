// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Environment variable prefix, e.g. `DEVSERVE_SERVER__PORT=8000`
pub const ENV_PREFIX: &str = "DEVSERVE";

impl Config {
    /// Load configuration from defaults overlaid with `DEVSERVE_*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_prefix(ENV_PREFIX)
    }

    /// Load configuration using a custom environment variable prefix
    pub fn load_with_prefix(prefix: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.debug", true)?
            .set_default("logging.level", "debug")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    /// Listen address; IPv6 hosts may be given bare (`::1`) or bracketed (`[::1]`)
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.server.port))
            .map_err(|e| format!("Invalid address '{}': {e}", self.server.host))
    }
}
