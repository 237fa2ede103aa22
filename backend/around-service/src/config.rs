/// Configuration management for Around Service
///
/// Configuration is read once from environment variables at startup and then
/// handed to the components that need it. Nothing here is reloaded at runtime.
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Document store configuration
    pub store: StoreConfig,
    /// Search defaults
    pub search: SearchConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Elasticsearch,
    /// Process-local store, for running without a cluster
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elasticsearch" | "es" => Ok(StoreBackend::Elasticsearch),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Elasticsearch URL
    pub url: String,
    /// Index holding post documents
    pub post_index: String,
    /// Deadline applied to every store call made on behalf of a request
    pub request_timeout_ms: u64,
}

impl StoreConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Elasticsearch,
            url: "http://localhost:9200".to_string(),
            post_index: "around".to_string(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Search defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius used when a search request carries no `range`
    pub default_radius_km: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let backend = match std::env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::Elasticsearch,
        };

        if backend == StoreBackend::Memory && app_env.eq_ignore_ascii_case("production") {
            return Err("STORE_BACKEND=memory is not allowed in production".to_string());
        }

        let request_timeout_ms =
            parse_env_or_default("STORE_REQUEST_TIMEOUT_MS", default_request_timeout_ms())?;
        if request_timeout_ms == 0 {
            return Err("STORE_REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }

        let default_radius_km =
            parse_env_or_default("SEARCH_DEFAULT_RADIUS_KM", default_radius_km())?;
        if !default_radius_km.is_finite() || default_radius_km <= 0.0 {
            return Err(format!(
                "SEARCH_DEFAULT_RADIUS_KM must be a positive number, got {}",
                default_radius_km
            ));
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("AROUND_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("AROUND_SERVICE_PORT", 8080)?,
            },
            store: StoreConfig {
                backend,
                url: std::env::var("ELASTICSEARCH_URL")
                    .unwrap_or_else(|_| "http://localhost:9200".to_string()),
                post_index: std::env::var("ELASTICSEARCH_POST_INDEX")
                    .unwrap_or_else(|_| "around".to_string()),
                request_timeout_ms,
            },
            search: SearchConfig { default_radius_km },
        })
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_radius_km() -> f64 {
    200.0
}
