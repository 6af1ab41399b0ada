//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds a fetched page stays fresh in the URL cache
    pub url_cache_ttl: u64,
    /// Flush the backing store when a cache is constructed
    pub flush_on_init: bool,
    /// Append a failure marker to the outputs sequence when a tracked call fails
    pub record_failed_calls: bool,
    /// Interval in seconds between expired-entry sweeps of the in-memory store
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `URL_CACHE_TTL` - Page freshness in seconds (default: 10)
    /// - `FLUSH_ON_INIT` - Flush the store on cache construction (default: true)
    /// - `RECORD_FAILED_CALLS` - Record failure markers in history (default: false)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url_cache_ttl: env_parse("URL_CACHE_TTL").unwrap_or(defaults.url_cache_ttl),
            flush_on_init: env_parse("FLUSH_ON_INIT").unwrap_or(defaults.flush_on_init),
            record_failed_calls: env_parse("RECORD_FAILED_CALLS")
                .unwrap_or(defaults.record_failed_calls),
            sweep_interval: env_parse("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url_cache_ttl: 10,
            flush_on_init: true,
            record_failed_calls: false,
            sweep_interval: 1,
        }
    }
}
