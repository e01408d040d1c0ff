//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (COMIC_PROXY_*)
//! 2. TOML config file (if COMIC_PROXY_CONFIG_FILE set)
//! 3. Built-in defaults

use std::net::SocketAddr;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (COMIC_PROXY_*)
/// 2. TOML config file (if COMIC_PROXY_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream base URL.
    ///
    /// Set via COMIC_PROXY_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for upstream requests.
    ///
    /// Set via COMIC_PROXY_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in milliseconds. Unset means no timeout.
    ///
    /// Set via COMIC_PROXY_TIMEOUT_MS environment variable.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Freshness window for cached comics, in seconds.
    ///
    /// Set via COMIC_PROXY_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Number of ids below the latest one scanned by search.
    ///
    /// Set via COMIC_PROXY_SEARCH_WINDOW environment variable.
    #[serde(default = "default_search_window")]
    pub search_window: u64,

    /// Address the HTTP server binds to.
    ///
    /// Set via COMIC_PROXY_HOST environment variable.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    ///
    /// Set via COMIC_PROXY_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Rate limit window for /api routes, in seconds.
    ///
    /// Set via COMIC_PROXY_RATE_LIMIT_WINDOW_SECS environment variable.
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,

    /// Requests allowed per client within one rate limit window.
    ///
    /// Set via COMIC_PROXY_RATE_LIMIT_MAX_REQUESTS environment variable.
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,
}

fn default_base_url() -> String {
    "https://xkcd.com".into()
}

fn default_user_agent() -> String {
    "comic-proxy/0.1".into()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_search_window() -> u64 {
    100
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_rate_limit_window_secs() -> u64 {
    15 * 60
}

fn default_rate_limit_max_requests() -> u32 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            search_window: default_search_window(),
            host: default_host(),
            port: default_port(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
            rate_limit_max_requests: default_rate_limit_max_requests(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Cache freshness window as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Rate limit window as Duration.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `host` is not an IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.host.parse().map_err(|_| ConfigError::Invalid {
            field: "host".into(),
            reason: format!("not an IP address: {}", self.host),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `COMIC_PROXY_`
    /// 2. TOML file from `COMIC_PROXY_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("COMIC_PROXY_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("COMIC_PROXY_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://xkcd.com");
        assert_eq!(config.user_agent, "comic-proxy/0.1");
        assert!(config.timeout_ms.is_none());
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.search_window, 100);
        assert_eq!(config.port, 3000);
        assert_eq!(config.rate_limit_window_secs, 900);
        assert_eq!(config.rate_limit_max_requests, 100);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig { timeout_ms: Some(2_500), ..Default::default() };
        assert_eq!(config.timeout(), Some(Duration::from_millis(2_500)));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.rate_limit_window(), Duration::from_secs(900));
        assert_eq!(AppConfig::default().timeout(), None);
    }

    #[test]
    fn test_listen_addr() {
        let config = AppConfig { host: "127.0.0.1".into(), port: 8080, ..Default::default() };
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8080");

        let config = AppConfig { host: "localhost".into(), ..Default::default() };
        assert!(matches!(config.listen_addr(), Err(ConfigError::Invalid { field, .. }) if field == "host"));
    }

    #[test]
    fn test_load_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("proxy.toml", "port = 4000\nsearch_window = 50\n")?;
            jail.set_env("COMIC_PROXY_CONFIG_FILE", "proxy.toml");
            jail.set_env("COMIC_PROXY_PORT", "5000");
            jail.set_env("COMIC_PROXY_CACHE_TTL_SECS", "60");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.port, 5000);
            assert_eq!(config.search_window, 50);
            assert_eq!(config.cache_ttl_secs, 60);
            assert_eq!(config.base_url, "https://xkcd.com");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("COMIC_PROXY_CACHE_TTL_SECS", "0");

            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));
            Ok(())
        });
    }
}
