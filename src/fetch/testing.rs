use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use image::{Rgba, RgbaImage};

use crate::chart::ChartImage;
use crate::error::{AppError, Result};

use super::ChartSource;

#[derive(Clone, Copy)]
enum Behaviour {
    FailTimes(u32),
    Absent,
}

/// In-memory chart source with per-URL scripted failures, delays and instrumentation.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    behaviours: HashMap<String, Behaviour>,
    delays: HashMap<String, Duration>,
    attempts: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_always(self, url: &str) -> Self {
        self.fail_times(url, u32::MAX)
    }

    pub(crate) fn fail_times(mut self, url: &str, times: u32) -> Self {
        self.behaviours
            .insert(url.to_string(), Behaviour::FailTimes(times));
        self
    }

    pub(crate) fn absent(mut self, url: &str) -> Self {
        self.behaviours.insert(url.to_string(), Behaviour::Absent);
        self
    }

    pub(crate) fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub(crate) fn attempts(&self, url: &str) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn total_attempts(&self) -> u32 {
        self.attempts.lock().unwrap().values().sum()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Deterministic 4x3 image whose colour depends on the URL.
    pub(crate) fn image_for(url: &str) -> ChartImage {
        let shade = url.bytes().fold(0u8, |acc, b| acc.wrapping_add(b));
        ChartImage::from_rgba(RgbaImage::from_pixel(4, 3, Rgba([shade, 0, 0, 255])))
    }
}

#[async_trait]
impl ChartSource for ScriptedSource {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<Option<ChartImage>> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let entry = attempts.entry(url.to_string()).or_default();
            *entry += 1;
            *entry
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        match self.behaviours.get(url) {
            Some(Behaviour::FailTimes(times)) if attempt <= *times => Err(AppError::message(
                format!("scripted failure {attempt} for {url}"),
            )),
            Some(Behaviour::Absent) => Ok(None),
            _ => Ok(Some(Self::image_for(url))),
        }
    }
}
