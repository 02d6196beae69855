use std::time::Duration;

use async_trait::async_trait;

use crate::chart::ChartImage;
use crate::error::Result;

pub mod http;
pub mod request;
pub mod retry;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpChartSource;
pub use request::chart_url;
pub use retry::{fetch_with_retry, RetryPolicy};
pub use scheduler::{ChartFetcher, ErrorEntry, ErrorLog, FetchBatch, FetchResult};

/// Default concurrency guard applied when downloading charts.
pub const CHART_CONCURRENCY_LIMIT: usize = 6;

/// Network capability used to download one chart.
///
/// `Ok(None)` means the transport succeeded but the body was not a usable image.
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Option<ChartImage>>;
}

#[inline]
pub fn ensure_concurrency_limit(limit: usize) -> usize {
    limit.max(1)
}
