use std::time::Duration;

use log::debug;
use tokio::time::{sleep, timeout};

use crate::chart::ChartImage;
use crate::error::{AppError, Result};

use super::ChartSource;

/// Attempt budget and pacing for a single chart download.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub timeout: Duration,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait inserted after failed attempt `attempt` (1-indexed).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Fetch `url`, retrying failed, empty or timed-out attempts up to `max_retries` times.
pub async fn fetch_with_retry<S>(
    source: &S,
    url: &str,
    symbol: &str,
    policy: &RetryPolicy,
) -> Result<ChartImage>
where
    S: ChartSource + ?Sized,
{
    let total = policy.total_attempts();

    for attempt in 1..=total {
        let failure = match timeout(policy.timeout, source.fetch(url, policy.timeout)).await {
            Ok(Ok(Some(image))) => return Ok(image),
            Ok(Ok(None)) => AppError::Decode {
                url: url.to_string(),
                reason: "response did not contain an image".to_string(),
            },
            Ok(Err(err)) => err,
            Err(_) => AppError::Timeout {
                url: url.to_string(),
                seconds: policy.timeout.as_secs_f64(),
            },
        };

        debug!("{symbol}: attempt {attempt}/{total} failed: {failure}");

        if attempt < total {
            sleep(policy.backoff(attempt)).await;
        }
    }

    Err(AppError::Fetch {
        symbol: symbol.to_string(),
        retries: policy.max_retries,
    })
}
