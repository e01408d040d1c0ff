//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest accepted search window.
const MAX_SEARCH_WINDOW: u64 = 1_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is not an http(s) URL
    /// - `timeout_ms` is set to less than 100ms or more than 5 minutes
    /// - `cache_ttl_secs` is 0
    /// - `search_window` is 0 or exceeds 1000
    /// - rate limit window or budget is 0
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { field: "base_url".into(), reason: "must be an http(s) URL".into() });
        }

        if let Some(timeout_ms) = self.timeout_ms {
            if timeout_ms < 100 {
                return Err(ConfigError::Invalid {
                    field: "timeout_ms".into(),
                    reason: "must be at least 100ms".into(),
                });
            }
            if timeout_ms > 300_000 {
                return Err(ConfigError::Invalid {
                    field: "timeout_ms".into(),
                    reason: "must not exceed 5 minutes (300000ms)".into(),
                });
            }
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.search_window == 0 || self.search_window > MAX_SEARCH_WINDOW {
            return Err(ConfigError::Invalid {
                field: "search_window".into(),
                reason: format!("must be between 1 and {MAX_SEARCH_WINDOW}"),
            });
        }

        if self.rate_limit_window_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit_window_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.rate_limit_max_requests == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit_max_requests".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.search_window > 200 {
            tracing::warn!(
                search_window = self.search_window,
                "search_window above 200; uncached searches issue one upstream request per id"
            );
        }

        Ok(())
    }
}
