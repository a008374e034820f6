//! Readiness wait: poll the health endpoint until the service answers.

use std::time::Duration;

use mailprobe_domain::RequestSpec;

use crate::execute_request::ExecuteRequest;
use crate::ports::HttpClient;

/// Default number of polls before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

/// Default pause between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed-interval polling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Maximum number of polls.
    pub max_attempts: u32,
    /// Pause between two polls.
    pub interval: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Use case polling a health request until it returns HTTP 200.
///
/// Transport errors and non-200 statuses are tolerated and retried. There
/// is no pause after the last attempt, so a service that never answers
/// costs `(max_attempts - 1) * interval` plus the request timeouts.
pub struct WaitForService<C: HttpClient> {
    execute: ExecuteRequest<C>,
    policy: ReadinessPolicy,
}

impl<C: HttpClient> WaitForService<C> {
    /// Creates the use case.
    pub const fn new(execute: ExecuteRequest<C>, policy: ReadinessPolicy) -> Self {
        Self { execute, policy }
    }

    /// Polls `health` until it succeeds or the attempts run out.
    ///
    /// Returns true as soon as one poll gets HTTP 200, false if none did.
    pub async fn wait(&self, health: &RequestSpec) -> bool {
        for attempt in 1..=self.policy.max_attempts {
            match self.execute.execute(health).await {
                Ok(response) if response.status == 200 => {
                    tracing::info!(attempt, url = %health.url, "service is ready");
                    return true;
                }
                Ok(response) => {
                    tracing::debug!(attempt, status = response.status, "service not ready yet");
                }
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "service unreachable");
                }
            }

            if attempt < self.policy.max_attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        tracing::warn!(
            attempts = self.policy.max_attempts,
            url = %health.url,
            "service did not become ready"
        );
        false
    }
}
