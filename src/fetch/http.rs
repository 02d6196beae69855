use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::chart::ChartImage;
use crate::error::{AppError, Context, Result};

use super::ChartSource;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Downloads chart images over HTTP and decodes them in memory.
pub struct HttpChartSource {
    client: Client,
}

impl HttpChartSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to construct chart HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChartSource for HttpChartSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Option<ChartImage>> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::message(format!(
                "Chart request to {} failed with status {}",
                url, status
            )));
        }

        let body = response.bytes().await?;
        match ChartImage::decode(&body) {
            Ok(image) => Ok(Some(image)),
            Err(err) => {
                debug!("Chart body from {url} ({} bytes) did not decode: {err}", body.len());
                Ok(None)
            }
        }
    }
}
