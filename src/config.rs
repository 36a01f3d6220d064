//! Configuration management for the study catalog server.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file. Nothing here writes to stdout, which MCP uses for communication.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Largest page of results a single search may return.
pub const MAX_RESULT_LIMIT: usize = 200;

/// Configuration for the study catalog server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend project URL (the REST API lives under `/rest/v1`)
    pub api_url: String,

    /// Backend API key, sent as `apikey` and bearer token
    pub api_key: String,

    /// User whose purchases and profile are shown, if any
    pub user_id: Option<String>,

    /// Snapshot cache TTL in seconds (default: 300)
    pub cache_ttl_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Default number of results per search (default: 50)
    pub max_search_results: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CATALOG_API_URL`: Backend project URL
    /// - `CATALOG_API_KEY`: API key
    ///
    /// Optional environment variables:
    /// - `CATALOG_USER_ID`: User for purchases and profile lookups
    /// - `CATALOG_CACHE_TTL_SECONDS`: Snapshot TTL (default: 300)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAX_SEARCH_RESULTS`: Default result limit, 1-200 (default: 50)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy never prints to stdout
        let _ = dotenvy::dotenv();

        let api_url = env::var("CATALOG_API_URL")
            .map_err(|_| ConfigError::MissingVar("CATALOG_API_URL".to_string()))?;

        let api_key = env::var("CATALOG_API_KEY")
            .map_err(|_| ConfigError::MissingVar("CATALOG_API_KEY".to_string()))?;

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "CATALOG_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CATALOG_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let user_id = env::var("CATALOG_USER_ID")
            .ok()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let cache_ttl_secs = Self::parse_env_u64("CATALOG_CACHE_TTL_SECONDS", 300)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let max_search_results = Self::parse_env_usize("MAX_SEARCH_RESULTS", 50)?;

        if max_search_results == 0 || max_search_results > MAX_RESULT_LIMIT {
            return Err(ConfigError::InvalidValue {
                var: "MAX_SEARCH_RESULTS".to_string(),
                reason: format!("Must be between 1 and {}", MAX_RESULT_LIMIT),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_url,
            api_key,
            user_id,
            cache_ttl_secs,
            request_timeout,
            max_search_results,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::new(),
            api_key: String::new(),
            user_id: None,
            cache_ttl_secs: 300,
            request_timeout: 10,
            max_search_results: 50,
            log_level: "error".to_string(),
        }
    }
}
