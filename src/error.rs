use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("stock count must be between 1 and 6, got {count}")]
    InvalidCount { count: usize },
    #[error("failed to load chart for {symbol} (retried {retries} times)")]
    Fetch { symbol: String, retries: u32 },
    #[error("no usable image in response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: f64 },
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}
