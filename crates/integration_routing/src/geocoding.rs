//! Nominatim geocoding client
//!
//! Converts free-form place names to coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) search API.
//!
//! Nominatim's usage policy allows at most one request per second, so calls
//! are spaced by `min_interval_ms`. Results are cached in memory for
//! `cache_ttl_secs`; both can be set to 0 when pointing at a private instance.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoLocation, Location};
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in seconds (0 to disable)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Comma-separated ISO country codes to restrict results (empty for none)
    #[serde(default)]
    pub country_filter: String,

    /// Minimum spacing between upstream requests in milliseconds (0 to disable)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Maximum number of matches requested
    #[serde(default = "default_limit")]
    pub limit: u8,

    /// User-Agent identifying this application, required by Nominatim
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_secs() -> u64 {
    3600
}

const fn default_min_interval_ms() -> u64 {
    1100
}

const fn default_limit() -> u8 {
    1
}

fn default_user_agent() -> String {
    concat!("route-optimizer/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            country_filter: String::new(),
            min_interval_ms: default_min_interval_ms(),
            limit: default_limit(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            cache_ttl_secs: 0,
            min_interval_ms: 0,
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
            return Err("geocoding.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("geocoding.timeout_secs must be greater than zero".to_string());
        }
        if self.limit == 0 {
            return Err("geocoding.limit must be greater than zero".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("geocoding.user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded upstream
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for a place; an empty vector means no match
    async fn search(&self, query: &str) -> Result<Vec<Location>, GeocodingError>;
}

/// Nominatim-based geocoding client with request spacing and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Vec<Location>>>,
    last_request: Arc<Mutex<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });

        let interval = Duration::from_millis(config.min_interval_ms);
        let start = Instant::now()
            .checked_sub(interval)
            .unwrap_or_else(Instant::now);

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(start)),
        })
    }

    /// Space upstream requests by at least `min_interval_ms`
    async fn rate_limit(&self) {
        if self.config.min_interval_ms == 0 {
            return;
        }
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < interval {
            let wait = interval.saturating_sub(elapsed);
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }

    /// Convert raw results, skipping entries with unusable coordinates
    fn convert_results(raw: Vec<NominatimResult>, query: &str) -> Vec<Location> {
        raw.into_iter()
            .filter_map(|r| {
                let lat = r.lat.parse::<f64>().ok()?;
                let lon = r.lon.parse::<f64>().ok()?;
                let coordinates = GeoLocation::new(lat, lon).ok()?;
                let name = r.display_name.unwrap_or_else(|| query.to_string());
                Some(Location::new(coordinates, name))
            })
            .collect()
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Location>, GeocodingError> {
        let query = query.trim();
        let cache_key = query.to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%query, "Geocoding cache hit");
                return Ok(hit);
            }
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.limit.to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Geocoding place");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let raw: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let matches = Self::convert_results(raw, query);
        debug!(%query, count = matches.len(), "Geocoded place");

        if let Some(cache) = self.cache.as_ref().filter(|_| !matches.is_empty()) {
            cache.insert(cache_key, matches.clone()).await;
        }
        Ok(matches)
    }
}

/// Raw Nominatim search result; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}
