//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and session cookie settings
//! - `database`: SQLite database settings
//! - `resolver`: per-call timeout of the route lookup
//! - `logging`: log filter and output format
//!
//! Geocoding and routing settings reuse the integration crate's
//! [`NominatimConfig`] and [`RoutingConfig`].
//!
//! Sources, later ones overriding earlier ones: built-in defaults, an
//! optional `config.toml` in the working directory, then environment
//! variables such as `ROUTE_OPTIMIZER_SERVER__PORT=8080`.

mod database;
mod logging;
mod resolver;
mod server;

use std::fmt;

use integration_routing::{NominatimConfig, RoutingConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use database::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use resolver::ResolverConfig;
pub use server::ServerConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "ROUTE_OPTIMIZER";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Nominatim geocoder
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// OSRM router
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem (optional) and the environment
    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file_stem).required(false))
            // e.g. ROUTE_OPTIMIZER_SERVER__PORT, ROUTE_OPTIMIZER_ROUTING__BASE_URL
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        if config.environment == Environment::Production && config.server.allowed_origins.is_empty()
        {
            warn!("No allowed CORS origins configured in production; cross-origin requests will be rejected");
        }
        Ok(config)
    }

    /// Check the configuration for values the server cannot run with
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.database.validate()?;
        self.geocoding.validate()?;
        self.routing.validate()?;
        self.resolver.validate()?;
        self.logging.validate()
    }

    /// Whether internal error details may be shown to API clients
    #[must_use]
    pub const fn expose_internal_errors(&self) -> bool {
        matches!(self.environment, Environment::Development)
    }

    /// Create a configuration suitable for testing
    ///
    /// Uses an in-memory database and disables Nominatim request spacing.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            database: DatabaseConfig::in_memory(),
            geocoding: NominatimConfig::for_testing(),
            routing: RoutingConfig::for_testing(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.resolver.call_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_parsing() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(
            "Development".parse::<Environment>(),
            Ok(Environment::Development)
        );
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn production_hides_internal_errors() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        assert!(!config.expose_internal_errors());
        assert!(AppConfig::default().expose_internal_errors());
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route-optimizer.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
environment = "production"

[server]
port = 8088

[routing]
base_url = "http://osrm.internal:5000"
profile = "driving"

[geocoding]
country_filter = "ke"
"#
        )
        .unwrap();

        let stem = dir.path().join("route-optimizer");
        let config = AppConfig::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.routing.base_url, "http://osrm.internal:5000");
        assert_eq!(config.geocoding.country_filter, "ke");
        assert_eq!(config.routing.timeout_secs, 10);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::load_from("/nonexistent/route-optimizer").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn validation_reports_first_problem() {
        let mut config = AppConfig::for_testing();
        config.resolver.call_timeout_secs = 0;
        assert!(config.validate().unwrap_err().contains("call_timeout_secs"));
    }

    #[test]
    fn for_testing_uses_memory_database() {
        let config = AppConfig::for_testing();
        assert_eq!(config.database.path, ":memory:");
        assert_eq!(config.geocoding.min_interval_ms, 0);
    }
}
