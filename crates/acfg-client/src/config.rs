//! Client configuration.
//!
//! Resolution order for every setting: explicit value (usually a CLI flag),
//! then environment variable, then built-in default.

use url::Url;

/// Server queried when neither a flag nor `ACFG_SERVER_URL` names one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Per-request timeout when neither a flag nor `ACFG_TIMEOUT_SECS` sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SERVER_URL_VAR: &str = "ACFG_SERVER_URL";
const TIMEOUT_SECS_VAR: &str = "ACFG_TIMEOUT_SECS";

/// Connection settings for the remote data API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server; endpoint paths are joined onto it.
    pub server_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for `server_url` with the default timeout.
    pub fn new(server_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            server_url: parse_url("server_url", server_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Merge explicit overrides with the environment and defaults.
    ///
    /// Variables consulted when an override is `None`:
    /// - `ACFG_SERVER_URL` (default: `http://localhost:8080`)
    /// - `ACFG_TIMEOUT_SECS` (default: 30)
    pub fn resolve(
        server_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let server_url = match server_url {
            Some(raw) => parse_url("--server-url", raw)?,
            None => env_url(SERVER_URL_VAR, DEFAULT_SERVER_URL)?,
        };
        let timeout_secs = match timeout_secs {
            Some(secs) => secs,
            None => env_timeout(TIMEOUT_SECS_VAR)?,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        Ok(Self {
            server_url,
            timeout_secs,
        })
    }
}

fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            format!("{raw} cannot be used as a base URL"),
        ));
    }
    Ok(url)
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn env_timeout(var: &str) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout(raw)),
        Err(_) => Ok(DEFAULT_TIMEOUT_SECS),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout (expected a positive number of seconds): {0}")]
    InvalidTimeout(String),
}
