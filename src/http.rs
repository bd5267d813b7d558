//! Page fetching with rate limiting and exponential backoff.
//!
//! Providers never talk to `reqwest` directly. They go through the
//! [`PageFetcher`] trait so the transport can be swapped out in tests.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: Core trait, `url -> (status, body)`
//! - [`HttpPageFetcher`]: `reqwest` client with a timeout, a User-Agent and a
//!   minimum interval between requests
//! - [`RetryFetch`]: Decorator that retries transient failures
//!
//! # Retry Strategy
//!
//! - Network errors, `429` and `5xx` responses are retried
//! - Any other status (including `404`) is handed back immediately
//! - Exponential backoff from the configured base delay, capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::config::Config;
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Status and body of a fetched page.
///
/// Non-success statuses are ordinary pages, not errors; callers decide what
/// to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// `true` for a plain `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Error for a fetch that produced no response at all.
///
/// `Send + Sync` so lookups can run on spawned tasks.
pub type FetchError = Box<dyn Error + Send + Sync>;

/// Trait for async page retrieval.
pub trait PageFetcher {
    /// Fetch `url` on behalf of `caller` (a provider name, used for logging).
    ///
    /// # Returns
    ///
    /// The page status and body, or an error when no response was obtained
    /// at all (DNS, connect, timeout, broken body).
    async fn fetch_page(&self, url: &str, caller: &str) -> Result<FetchedPage, FetchError>;
}

/// `reqwest`-backed [`PageFetcher`].
///
/// Requests from one instance are spaced at least `min_interval` apart.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    min_interval: StdDuration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpPageFetcher {
    /// Build a client from the timeout, User-Agent and spacing in `config`.
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            min_interval: config.min_request_interval(),
            last_request: Mutex::new(None),
        })
    }

    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Rate limiting request");
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl fmt::Debug for HttpPageFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPageFetcher")
            .field("min_interval", &self.min_interval)
            .finish()
    }
}

impl PageFetcher for HttpPageFetcher {
    #[instrument(level = "debug", skip_all, fields(%url, %caller))]
    async fn fetch_page(&self, url: &str, caller: &str) -> Result<FetchedPage, FetchError> {
        self.wait_turn().await;

        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(FetchedPage { status, body })
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`PageFetcher`].
///
/// # Backoff Strategy
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
///
/// Once `max_retries` is exhausted the last outcome is returned unchanged,
/// whether that is a `503` page or a transport error.
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: PageFetcher,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    fn backoff(&self, attempt: usize) -> StdDuration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1) as u32)
            .unwrap_or(u32::MAX);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + StdDuration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

/// Statuses worth another attempt: rate limiting and server-side failures.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

impl<T> PageFetcher for RetryFetch<T>
where
    T: PageFetcher,
{
    #[instrument(level = "debug", skip_all, fields(%url, %caller))]
    async fn fetch_page(&self, url: &str, caller: &str) -> Result<FetchedPage, FetchError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let outcome = self.inner.fetch_page(url, caller).await;
            let reason = match &outcome {
                Ok(page) if is_retryable_status(page.status) => {
                    Some(format!("status {}", page.status))
                }
                Ok(_) => None,
                Err(e) => Some(truncate_for_log(&e.to_string(), 200)),
            };
            let Some(reason) = reason else {
                return outcome;
            };

            attempt += 1;
            if attempt > self.max_retries {
                warn!(
                    attempt,
                    max = self.max_retries,
                    elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                    %reason,
                    "fetch_page() exhausted retries"
                );
                return outcome;
            }

            let delay = self.backoff(attempt);
            warn!(
                attempt,
                max = self.max_retries,
                ?delay,
                %reason,
                "fetch_page() attempt failed; backing off"
            );
            drop(outcome);
            sleep(delay).await;
        }
    }
}

/// Build the production fetcher described by `config`.
pub fn build_fetcher(config: &Config) -> Result<RetryFetch<HttpPageFetcher>, Box<dyn Error>> {
    let http = HttpPageFetcher::new(config)?;
    Ok(RetryFetch::new(
        http,
        config.max_retries,
        config.retry_base_delay(),
    ))
}
