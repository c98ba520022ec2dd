//! Journey data loading.
//!
//! A `JourneySource` produces the raw document; `JourneyLoader` wraps
//! any source with a per-attempt timeout and a bounded exponential
//! backoff. Only `LoadError::Network` is retried: a malformed document
//! will not fix itself by asking again.

use crate::{
    config::LoaderConfig,
    error::LoadError,
    journey::{parse_journey, DayRecord},
};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can hand back the journey document as text.
pub trait JourneySource {
    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<String, LoadError>>;
}

/// `GET {url}` over HTTP.
pub struct HttpJourneySource {
    client: reqwest::Client,
    url: String,
}

impl HttpJourneySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into() }
    }
}

impl JourneySource for HttpJourneySource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(format!("GET {}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Network(format!("GET {} returned {status}", self.url)));
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Network(format!("reading body of {}: {e}", self.url)))
    }
}

/// A journey document on local disk.
pub struct FileJourneySource {
    path: PathBuf,
}

impl FileJourneySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl JourneySource for FileJourneySource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Network(format!("Cannot read {}: {e}", self.path.display())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            multiplier: config.backoff_multiplier.max(1.0),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }

    /// Delay before retrying after failed attempt number `attempt` (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let millis = self.initial_backoff.as_millis() as f64 * self.multiplier.powi(exponent);
        Duration::from_millis(millis.min(self.max_backoff.as_millis() as f64) as u64)
    }
}

pub struct JourneyLoader<S> {
    source: S,
    policy: RetryPolicy,
}

impl<S: JourneySource> JourneyLoader<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch and validate the journey, retrying transient failures.
    /// Records come back in source order.
    pub async fn load(&self) -> Result<Vec<DayRecord>, LoadError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let fetched = match tokio::time::timeout(self.policy.timeout, self.source.fetch()).await {
                Ok(result) => result,
                Err(_) => Err(LoadError::Network(format!(
                    "timed out after {} ms",
                    self.policy.timeout.as_millis()
                ))),
            };

            match fetched.and_then(|body| parse_journey(&body)) {
                Ok(records) => {
                    log::info!(
                        "loaded {} day record(s) from {} (attempt {attempt})",
                        records.len(),
                        self.source.describe()
                    );
                    return Ok(records);
                }
                Err(err) if err.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff_after(attempt);
                    log::warn!(
                        "attempt {attempt}/{} for {} failed: {err}; retrying in {} ms",
                        self.policy.max_attempts,
                        self.source.describe(),
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(LoadError::Network(cause)) => {
                    return Err(LoadError::Network(format!(
                        "gave up after {attempt} attempt(s): {cause}"
                    )));
                }
                Err(malformed) => return Err(malformed),
            }
        }
    }
}
