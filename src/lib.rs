pub mod app;
pub mod canvas;
pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod render;

pub use error::{AppError, Result};
