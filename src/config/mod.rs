//! Environment-backed configuration.

use std::env;

use crate::services::upbit::DEFAULT_BASE_URL;

/// Default number of concurrent per-asset analyses.
pub const DEFAULT_WORKERS: usize = 5;
/// Default candle lookback: enough for the 200-day averages and the
/// 52-week low.
pub const DEFAULT_LOOKBACK_DAYS: usize = 252;

/// Deployment environment name, from `SEPASCAN_ENV`.
pub fn get_environment() -> String {
    env::var("SEPASCAN_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Knobs for one universe scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Concurrent in-flight analyses.
    pub workers: usize,
    /// Days of daily candles requested per symbol.
    pub lookback_days: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub upbit_base_url: String,
    pub scan: ScanConfig,
}

impl Config {
    /// Read configuration from the process environment, loading a local
    /// `.env` file first when present. Missing or unparsable variables
    /// fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: get_environment(),
            upbit_base_url: env::var("UPBIT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            scan: ScanConfig {
                workers: parse_env("SEPASCAN_WORKERS", DEFAULT_WORKERS),
                lookback_days: parse_env("SEPASCAN_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            upbit_base_url: DEFAULT_BASE_URL.to_string(),
            scan: ScanConfig::default(),
        }
    }
}

fn parse_env(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
