use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validator;

pub use loader::load_config;
pub use validator::validate_config;

use crate::error::{AppError, Result};
use crate::fetch::RetryPolicy;

pub const DEFAULT_CHART_URL_TEMPLATE: &str =
    "https://charts2-node.finviz.com/chart.ashx?t={symbol}&tf=d&s=linear&ct=candle_stick&tm=d";

/// Delay unit for retry backoff; attempt `n` waits `n` times this.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Settings for one panel render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub stock_symbols: Vec<String>,
    pub chart_url_template: String,
    pub max_concurrent: usize,
    pub background_color: String,
    pub grid_spacing: u32,
    pub max_retries: u32,
    pub timeout_seconds: f64,
    pub debug_mode: bool,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_retry_base_delay_ms() -> u64 {
    DEFAULT_RETRY_BASE_DELAY_MS
}

impl GridConfig {
    pub fn builtin() -> Self {
        Self {
            stock_symbols: ["TSLA", "AAPL", "GOOGL", "MSFT", "AMZN", "NVDA"]
                .into_iter()
                .map(String::from)
                .collect(),
            chart_url_template: DEFAULT_CHART_URL_TEMPLATE.to_string(),
            max_concurrent: 6,
            background_color: "#1a1a1a".to_string(),
            grid_spacing: 2,
            max_retries: 2,
            timeout_seconds: 10.0,
            debug_mode: false,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        Ok(RetryPolicy {
            max_retries: self.max_retries,
            timeout: self.timeout()?,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
        })
    }

    /// Per-attempt timeout; fails for negative, NaN or unrepresentably large values.
    pub fn timeout(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.timeout_seconds).map_err(|err| {
            AppError::Config(format!(
                "timeoutSeconds {} is not a usable duration: {err}",
                self.timeout_seconds
            ))
        })
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
