//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow any in development, none in production)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,

    /// Maximum body size for JSON and form requests in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_size_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_shutdown_timeout_secs() -> u64 {
    30
}

fn default_session_cookie_name() -> String {
    "route_optimizer_session".to_string()
}

const fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            session_cookie_name: default_session_cookie_name(),
            max_body_size_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("server.port must not be zero".to_string());
        }
        if self.session_cookie_name.trim().is_empty() {
            return Err("server.session_cookie_name must not be empty".to_string());
        }
        if self.max_body_size_bytes == 0 {
            return Err("server.max_body_size_bytes must be greater than zero".to_string());
        }
        Ok(())
    }
}
