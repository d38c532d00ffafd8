//! Candidate URL verification
//!
//! File-type classification happens before any network call; the liveness
//! probe itself is a HEAD with bounded retry. A candidate that fails
//! verification is a normal outcome, never an error.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::catalog::platform::Platform;
use crate::resolver::fetcher::HttpFetcher;

/// Retry behavior for liveness probes.
///
/// Passed in explicitly so tests can inject a zero-delay or single-attempt
/// policy. One policy applies uniformly to every probe on both acquisition
/// paths.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no backoff.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Backoff before retry number `attempt` (1-based), doubling from the
    /// base delay and capped at the maximum.
    fn delay_for(&self, attempt: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        doubled.min(self.max_delay)
    }
}

/// Checks whether a URL's file type is acceptable for a platform.
///
/// Only the final dot-segment counts as the extension, so `foo.tar.gz`
/// classifies as `gz`, not `tar.gz`. Multi-part extensions are deliberately
/// not special-cased: the platform extension lists were written against
/// this rule and changing it would invalidate them.
pub fn is_acceptable_file_type(url: &str, platform: &Platform) -> bool {
    let extension = url.rsplit('.').next().unwrap_or(url).to_lowercase();
    platform.file_types.contains(&extension.as_str())
}

/// Issues liveness probes against candidate URLs.
pub struct Verifier {
    fetcher: Arc<dyn HttpFetcher>,
    retry: RetryPolicy,
}

impl Verifier {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, retry: RetryPolicy) -> Self {
        Self { fetcher, retry }
    }

    /// Probes a URL and returns true iff the final response status is 200.
    ///
    /// Transport errors are retried with backoff up to the policy's attempt
    /// budget; a response that does arrive is taken as definitive, so
    /// non-200 statuses are not retried.
    pub async fn verify_live(&self, url: &str) -> bool {
        for attempt in 1..=self.retry.max_attempts {
            match self.fetcher.head_status(url).await {
                Ok(200) => {
                    debug!("download link is live: {url}");
                    return true;
                }
                Ok(status) => {
                    warn!("download link is not live: {url}, status: {status}");
                    return false;
                }
                Err(e) => {
                    warn!(
                        "probe failed (attempt {attempt}/{}): {url}: {e}",
                        self.retry.max_attempts
                    );
                    if attempt < self.retry.max_attempts {
                        sleep(self.retry.delay_for(attempt)).await;
                    }
                }
            }
        }
        false
    }
}
