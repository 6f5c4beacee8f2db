//! Configuration for the restructuring engine
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound accepted for `max_pages`; larger trees are not edited interactively
const MAX_SUPPORTED_PAGES: usize = 10_000;

/// Environment variable names read by [`EngineConfig::from_env`]
pub const ENV_MAX_PAGES: &str = "PAGETREE_MAX_PAGES";
pub const ENV_SESSION_TTL_SECS: &str = "PAGETREE_SESSION_TTL_SECS";
pub const ENV_MAX_RETRIES: &str = "PAGETREE_MAX_RETRIES";
pub const ENV_RETRY_BASE_DELAY_MS: &str = "PAGETREE_RETRY_BASE_DELAY_MS";

/// Runtime settings shared by the service layer and executors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Largest tree accepted from a load
    pub max_pages: usize,

    /// Session lifetime, measured from creation
    pub session_ttl_secs: u64,

    /// Retries after the first attempt for transient move failures
    pub max_retries: usize,

    /// Backoff before the first retry, doubled on each further retry
    pub retry_base_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_pages: 500,
            session_ttl_secs: 30 * 60,
            max_retries: 2,
            retry_base_delay_ms: 300,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `PAGETREE_*` environment variables.
    ///
    /// Unset or unparsable variables fall back to the default value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_pages: parse_or(&lookup, ENV_MAX_PAGES, defaults.max_pages),
            session_ttl_secs: parse_or(&lookup, ENV_SESSION_TTL_SECS, defaults.session_ttl_secs),
            max_retries: parse_or(&lookup, ENV_MAX_RETRIES, defaults.max_retries),
            retry_base_delay_ms: parse_or(
                &lookup,
                ENV_RETRY_BASE_DELAY_MS,
                defaults.retry_base_delay_ms,
            ),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("max_pages must be greater than 0".to_string());
        }

        if self.max_pages > MAX_SUPPORTED_PAGES {
            return Err(format!(
                "max_pages cannot exceed {}",
                MAX_SUPPORTED_PAGES
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err("session_ttl_secs must be greater than 0".to_string());
        }

        if self.max_retries > 10 {
            return Err("max_retries cannot exceed 10".to_string());
        }

        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
