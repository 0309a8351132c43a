//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `DATABASE_URL` — PostgreSQL target (default: local `orders` database)
/// - `EVENT_BUS_URL` — messaging channel connection string (no default)
/// - `EVENT_BUS_CHANNEL` — destination channel name (no default)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
///
/// `EVENT_BUS_URL` and `EVENT_BUS_CHANNEL` are required together; when
/// either is missing, event publishing is disabled without erroring.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub event_bus_url: Option<String>,
    pub event_bus_channel: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/orders".to_string()),
            event_bus_url: std::env::var("EVENT_BUS_URL").ok(),
            event_bus_channel: std::env::var("EVENT_BUS_CHANNEL").ok(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the event channel settings when both are configured.
    pub fn event_channel(&self) -> Option<(&str, &str)> {
        match (&self.event_bus_url, &self.event_bus_channel) {
            (Some(url), Some(channel)) => Some((url, channel)),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "postgres://localhost:5432/orders".to_string(),
            event_bus_url: None,
            event_bus_channel: None,
            log_level: "info".to_string(),
        }
    }
}
