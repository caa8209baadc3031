//! Configuration module

use std::env;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_PREFIX, DEFAULT_RISK_THRESHOLD_HIGH,
    DEFAULT_RISK_THRESHOLD_MEDIUM, DEFAULT_TIMEOUT_SECS, EXPLAIN_PATH, SCORE_BATCH_PATH,
    SCORE_PATH,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Scoring service base URL
    pub api_base_url: String,

    /// Path prefix of the versioned API
    pub api_prefix: String,

    /// Key sent as `X-API-Key`, if any
    pub api_key: Option<String>,

    /// HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Risk thresholds used by the legend
    pub thresholds: RiskThresholds,

    /// Emit logs as JSON lines
    pub json_logs: bool,
}

/// Probability bounds of the medium and high tiers.
///
/// Display only: the service decides the tier, the console just explains it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: DEFAULT_RISK_THRESHOLD_MEDIUM,
            high: DEFAULT_RISK_THRESHOLD_HIGH,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_source(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_base_url: lookup("FRAUD_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),

            api_prefix: lookup("FRAUD_API_PREFIX")
                .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),

            // An empty key means "no key"
            api_key: lookup("FRAUD_API_KEY").filter(|k| !k.is_empty()),

            // Zero would time every request out immediately
            timeout_seconds: lookup("FRAUD_API_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),

            thresholds: RiskThresholds {
                medium: lookup("RISK_THRESHOLD_MEDIUM")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_RISK_THRESHOLD_MEDIUM),
                high: lookup("RISK_THRESHOLD_HIGH")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_RISK_THRESHOLD_HIGH),
            },

            json_logs: lookup("LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.api_base_url, self.api_prefix, path)
    }

    pub fn score_url(&self) -> String {
        self.endpoint(SCORE_PATH)
    }

    pub fn score_batch_url(&self) -> String {
        self.endpoint(SCORE_BATCH_PATH)
    }

    pub fn explain_url(&self) -> String {
        self.endpoint(EXPLAIN_PATH)
    }

    /// Health endpoint lives at the service root, outside the prefix
    pub fn health_url(&self) -> String {
        format!("{}/", self.api_base_url.trim_end_matches('/'))
    }
}
