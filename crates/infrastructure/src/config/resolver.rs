//! Route lookup settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds applied by the route service to each outbound call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Timeout for each geocoding or routing call, in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

const fn default_call_timeout_secs() -> u64 {
    10
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.call_timeout_secs == 0 {
            return Err("resolver.call_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
