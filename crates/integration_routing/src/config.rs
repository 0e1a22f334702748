//! Routing service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OSRM routing server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the OSRM HTTP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OSRM profile segment of the path (`driving`, `cycling`, `foot`)
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_profile() -> String {
    "driving".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("route-optimizer/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl RoutingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("routing.base_url must not be empty".to_string());
        }
        if self.profile.trim().is_empty() {
            return Err("routing.profile must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("routing.timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
