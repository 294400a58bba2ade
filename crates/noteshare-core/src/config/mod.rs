//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section carries serde defaults so that an empty
//! configuration boots a working in-memory deployment.

pub mod app;
pub mod database;
pub mod grant;
pub mod logging;
pub mod realtime;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreBackend, StoreConfig};
pub use self::grant::GrantConfig;
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `NOTESHARE_`-prefixed environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Notification store backend selection.
    #[serde(default)]
    pub store: StoreConfig,
    /// Real-time WebSocket settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Access grant collaborator settings.
    #[serde(default)]
    pub grant: GrantConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with the `config/{env}.toml` overlay and
    /// environment variables such as `NOTESHARE_SERVER__PORT=9000`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NOTESHARE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config should parse");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.grant.endpoint.is_none());
        assert_eq!(config.grant.max_attempts, 3);
        assert_eq!(config.realtime.max_connections_per_user, 5);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [store]
            backend = "postgres"

            [grant]
            endpoint = "http://notes.internal"
            max_attempts = 5

            [logging]
            format = "pretty"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(config.grant.endpoint.as_deref(), Some("http://notes.internal"));
        assert_eq!(config.grant.max_attempts, 5);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = AppConfig::from_toml("[store]\nbackend = \"mongo\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
