//! Configuration module for CoinGuard
//!
//! All values come from the environment, with defaults from
//! utils/constants.rs.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    BLOCKCHAIN_INFO_BASE_URL, BLOCKCHAIR_BASE_URL, DEFAULT_DB_PATH, DEFAULT_HOST,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT,
};

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host
    pub host: String,

    /// Bind port (`PORT` wins over `COINGUARD_PORT`)
    pub port: u16,

    /// SQLite file for the snapshot cache
    pub db_path: PathBuf,

    /// Blockchair API base URL (primary provider)
    pub primary_url: String,

    /// blockchain.info base URL (fallback provider)
    pub fallback_url: String,

    /// Timeout applied to each provider call
    pub http_timeout: Duration,

    /// Key required by the registry update endpoint; `None` disables it
    pub admin_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            primary_url: BLOCKCHAIR_BASE_URL.to_string(),
            fallback_url: BLOCKCHAIN_INFO_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            admin_key: None,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let admin_key = std::env::var("COINGUARD_ADMIN_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if admin_key.is_some() {
            // Key is never logged
            info!("🔑 COINGUARD_ADMIN_KEY configured, registry updates enabled");
        }

        Self {
            host: std::env::var("COINGUARD_HOST").unwrap_or(defaults.host),
            port: env_parse("PORT")
                .or_else(|| env_parse("COINGUARD_PORT"))
                .unwrap_or(defaults.port),
            db_path: std::env::var("COINGUARD_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            primary_url: std::env::var("COINGUARD_PRIMARY_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.primary_url),
            fallback_url: std::env::var("COINGUARD_FALLBACK_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.fallback_url),
            http_timeout: env_parse::<u64>("COINGUARD_HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            admin_key,
        }
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::invalid_config(format!("Invalid bind address: {}", e)))
    }
}

/// Parse an env var, warning (not failing) on garbage
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("⚠️ Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.db_path, PathBuf::from("cache.db"));
        assert!(config.admin_key.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
            ..AppConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 9090);

        let bad = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}
