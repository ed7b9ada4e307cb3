//! Configuration for lotto-lab.

use serde::{Deserialize, Serialize};

use crate::lotto::API_BASE_URL;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Draw history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LottoConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
    /// Upper bound on the round scan when rebuilding the cache.
    #[serde(default = "default_max_round_guess")]
    pub max_round_guess: u32,
    /// Concurrent in-flight round queries.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

fn default_api_url() -> String {
    API_BASE_URL.to_string()
}

fn default_cache_path() -> String {
    "data/lotto_history_cache.json".to_string()
}

fn default_max_round_guess() -> u32 {
    2000
}

fn default_fetch_concurrency() -> usize {
    8
}

fn default_requests_per_minute() -> u32 {
    300
}

impl Default for LottoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            cache_path: default_cache_path(),
            max_round_guess: default_max_round_guess(),
            fetch_concurrency: default_fetch_concurrency(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

/// Number generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Blend between uniform (0.0) and historical frequency (1.0).
    #[serde(default = "default_weight_factor")]
    pub weight_factor: f64,
    /// Restrict frequency counting to the most recent N draws.
    #[serde(default)]
    pub recent_window: Option<usize>,
    /// Default number of sets per request.
    #[serde(default = "default_sets")]
    pub sets: usize,
}

fn default_weight_factor() -> f64 {
    0.5
}

fn default_sets() -> usize {
    5
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            weight_factor: default_weight_factor(),
            recent_window: None,
            sets: default_sets(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub lotto: LottoConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (LOTTO_SERVER_PORT, etc.)
            .add_source(
                config::Environment::with_prefix("LOTTO")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
