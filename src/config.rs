//! Runtime configuration loaded from the environment.

use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FETCH_DELAY_MS: u64 = 2000;

/// Deployment environment name, used to pick the log format.
///
/// Reads `APP_ENV`, then `ENVIRONMENT`, defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

/// Settings injected into the service at startup. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Simulated latency of every student data fetch.
    pub fetch_delay: Duration,
    /// Upper bound for each provider call. `None` disables the timeout.
    pub fetch_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            fetch_timeout: None,
        }
    }
}

impl AppConfig {
    /// Build from `PORT`, `FETCH_DELAY_MS` and `FETCH_TIMEOUT_MS`.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let fetch_delay = lookup("FETCH_DELAY_MS")
            .and_then(|d| d.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.fetch_delay);

        let fetch_timeout = lookup("FETCH_TIMEOUT_MS")
            .and_then(|t| t.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Self {
            port,
            fetch_delay,
            fetch_timeout,
        }
    }
}
