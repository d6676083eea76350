//! Condition polling.
//!
//! The one synchronization primitive in the suite: poll a condition until
//! it holds or the budget expires. Page and scenario code never sleeps a
//! fixed duration to mask an asynchronous update.

use crate::result::{SuiteError, SuiteResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as a Duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as a Duration
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Poll `condition` until it returns `Ok(true)` or `options.timeout` expires.
///
/// A condition returning `Err` aborts the wait immediately; `Ok(false)`
/// schedules another poll after the interval.
///
/// # Errors
///
/// Returns [`SuiteError::Timeout`] when the budget expires, or the
/// condition's own error.
pub async fn wait_until<F, Fut>(
    options: WaitOptions,
    waited_for: &str,
    mut condition: F,
) -> SuiteResult<WaitResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<bool>>,
{
    let start = Instant::now();
    loop {
        if condition().await? {
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                waited_for: waited_for.to_string(),
            });
        }
        if start.elapsed() >= options.timeout() {
            return Err(SuiteError::Timeout {
                ms: options.timeout_ms,
                waited_for: waited_for.to_string(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Like [`wait_until`], but timeout is a normal outcome: `Ok(true)` when the
/// condition held, `Ok(false)` when the budget expired.
///
/// Used for probes where absence is an answer, not an error (e.g. "did a
/// success toast appear?").
pub async fn poll_for<F, Fut>(options: WaitOptions, mut condition: F) -> SuiteResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<bool>>,
{
    let start = Instant::now();
    loop {
        if condition().await? {
            return Ok(true);
        }
        if start.elapsed() >= options.timeout() {
            return Ok(false);
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}
