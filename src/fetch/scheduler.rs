use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{error, warn};
use serde::Serialize;

use crate::chart::ChartImage;
use crate::error::Result;

use super::{
    chart_url, ensure_concurrency_limit, fetch_with_retry, ChartSource, RetryPolicy,
    CHART_CONCURRENCY_LIMIT,
};

/// Outcome for one requested symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub symbol: String,
    pub image: Option<ChartImage>,
    pub success: bool,
}

impl FetchResult {
    pub fn loaded(symbol: &str, image: ChartImage) -> Self {
        Self {
            symbol: symbol.to_string(),
            image: Some(image),
            success: true,
        }
    }

    pub fn failed(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            image: None,
            success: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub symbol: String,
    pub message: String,
}

/// Append-only record of the symbols that failed during one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    pub fn push(&mut self, symbol: &str, message: impl Into<String>) {
        self.entries.push(ErrorEntry {
            symbol: symbol.to_string(),
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }
}

/// Results in input order plus the failures collected on the way.
#[derive(Debug, Clone)]
pub struct FetchBatch {
    pub results: Vec<FetchResult>,
    pub errors: ErrorLog,
}

/// Downloads a batch of charts through a bounded pool.
pub struct ChartFetcher<S: ChartSource + ?Sized> {
    source: Arc<S>,
    url_template: String,
    policy: RetryPolicy,
    concurrency_limit: usize,
}

impl<S: ChartSource + ?Sized> ChartFetcher<S> {
    pub fn new(source: Arc<S>, url_template: impl Into<String>, policy: RetryPolicy) -> Self {
        Self::with_concurrency_limit(source, url_template, policy, CHART_CONCURRENCY_LIMIT)
    }

    pub fn with_concurrency_limit(
        source: Arc<S>,
        url_template: impl Into<String>,
        policy: RetryPolicy,
        concurrency_limit: usize,
    ) -> Self {
        Self {
            source,
            url_template: url_template.into(),
            policy,
            concurrency_limit: ensure_concurrency_limit(concurrency_limit),
        }
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Fetch every symbol with at most `concurrency_limit` downloads outstanding.
    ///
    /// Always yields one result per symbol, in the order the symbols were given.
    pub async fn fetch_all(&self, symbols: &[String]) -> FetchBatch {
        // Slots refill as soon as any download settles; completion order is arbitrary.
        let mut completions = stream::iter(symbols.iter().enumerate())
            .map(|(index, symbol)| async move { (index, self.fetch_one(symbol).await) })
            .buffer_unordered(self.concurrency_limit);

        let mut slots: Vec<Option<FetchResult>> = vec![None; symbols.len()];
        let mut errors = ErrorLog::default();

        while let Some((index, outcome)) = completions.next().await {
            let symbol = &symbols[index];
            let result = match outcome {
                Ok(image) => FetchResult::loaded(symbol, image),
                Err(err) => {
                    warn!("Chart for {symbol} unavailable: {err}");
                    errors.push(symbol, err.to_string());
                    FetchResult::failed(symbol)
                }
            };
            slots[index] = Some(result);
        }

        let results = slots
            .into_iter()
            .zip(symbols)
            .map(|(slot, symbol)| {
                slot.unwrap_or_else(|| {
                    debug_assert!(false, "scheduler produced no result for {symbol}");
                    error!("No fetch result recorded for {symbol}; rendering placeholder");
                    FetchResult::failed(symbol)
                })
            })
            .collect();

        FetchBatch { results, errors }
    }

    async fn fetch_one(&self, symbol: &str) -> Result<ChartImage> {
        let url = chart_url(&self.url_template, symbol);
        fetch_with_retry(&*self.source, &url, symbol, &self.policy).await
    }
}
