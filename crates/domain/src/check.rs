//! Named checks, their outcomes, and the summary of a whole run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::base_url::BaseUrl;
use crate::contract::{HEALTH_PATH, LOGIN_PATH, LoginRequest};
use crate::error::DomainResult;
use crate::expectation::{Expectation, ExpectationResult};
use crate::request::{DEFAULT_TIMEOUT_MS, RequestSpec};

/// Latency ceiling for the health round trip, in milliseconds.
pub const DEFAULT_MAX_LATENCY_MS: u64 = 2_000;

/// Address the service must accept.
pub const DEFAULT_VALID_EMAIL: &str = "test@example.com";

/// Address the service must reject.
pub const DEFAULT_INVALID_EMAIL: &str = "invalid-email";

/// A named request plus the expectations its response must meet, checked
/// in order up to the first miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Display name used in PASS/FAIL lines.
    pub name: String,
    /// Request to send.
    pub request: RequestSpec,
    /// Expectations on the response.
    pub expectations: Vec<Expectation>,
}

/// Parameters of the standard EmailService suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSettings {
    /// Service root.
    pub base_url: BaseUrl,
    /// Per-request timeout.
    pub timeout_ms: u64,
    /// Exclusive latency ceiling for the health round trip.
    pub max_latency_ms: u64,
    /// Address expected to log in.
    pub valid_email: String,
    /// Address expected to be rejected.
    pub invalid_email: String,
}

impl Default for SuiteSettings {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_latency_ms: DEFAULT_MAX_LATENCY_MS,
            valid_email: DEFAULT_VALID_EMAIL.to_string(),
            invalid_email: DEFAULT_INVALID_EMAIL.to_string(),
        }
    }
}

impl SuiteSettings {
    /// The health request every check and the readiness wait share.
    #[must_use]
    pub fn health_request(&self, name: &str) -> RequestSpec {
        RequestSpec::get(name, self.base_url.endpoint(HEALTH_PATH))
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }

    fn login_request(&self, name: &str, email: &str) -> DomainResult<RequestSpec> {
        let request = RequestSpec::post_json(
            name,
            self.base_url.endpoint(LOGIN_PATH),
            &LoginRequest::new(email),
        )?;
        Ok(request
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms))
    }

    /// Builds the ordered standard checks: health, valid login, invalid
    /// login, latency.
    ///
    /// # Errors
    ///
    /// Returns an error if a login body cannot be encoded.
    pub fn standard_checks(&self) -> DomainResult<Vec<Check>> {
        let check = |name: &str, request, expectations| Check {
            name: name.to_string(),
            request,
            expectations,
        };

        Ok(vec![
            check(
                "Health check",
                self.health_request("Health check"),
                vec![Expectation::Status { code: 200 }, Expectation::Healthy],
            ),
            check(
                "Valid login",
                self.login_request("Valid login", &self.valid_email)?,
                vec![
                    Expectation::Status { code: 200 },
                    Expectation::LoginSuccess { success: true },
                ],
            ),
            check(
                "Invalid login",
                self.login_request("Invalid login", &self.invalid_email)?,
                vec![
                    Expectation::Status { code: 400 },
                    Expectation::LoginSuccess { success: false },
                ],
            ),
            check(
                "Latency check",
                self.health_request("Latency check"),
                vec![
                    Expectation::Status { code: 200 },
                    Expectation::FasterThan {
                        max_ms: self.max_latency_ms,
                    },
                ],
            ),
        ])
    }
}

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Check name.
    pub name: String,
    /// Whether every expectation held.
    pub passed: bool,
    /// Transport error or the first missed expectation's reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Round-trip time of the request.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// Expectations evaluated before the first miss; empty when no
    /// response arrived.
    #[serde(default)]
    pub expectations: Vec<ExpectationResult>,
}

impl CheckOutcome {
    /// Builds an outcome from evaluated expectations.
    #[must_use]
    pub fn evaluated(
        name: impl Into<String>,
        expectations: Vec<ExpectationResult>,
        duration: Duration,
    ) -> Self {
        let error = expectations
            .iter()
            .find(|r| !r.met)
            .map(|r| r.reason.clone().unwrap_or_else(|| r.expectation.describe()));
        Self {
            name: name.into(),
            passed: error.is_none(),
            error,
            duration,
            expectations,
        }
    }

    /// Builds an outcome for a request that produced no response.
    #[must_use]
    pub fn request_failed(
        name: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.into()),
            duration,
            expectations: Vec::new(),
        }
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Target of the run.
    pub base_url: BaseUrl,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// False if the readiness wait gave up; no checks ran in that case.
    pub service_ready: bool,
    /// Outcomes in execution order.
    pub outcomes: Vec<CheckOutcome>,
    /// Number of checks run.
    pub total: usize,
    /// Number of checks passed.
    pub passed: usize,
    /// Number of checks failed.
    pub failed: usize,
}

impl RunSummary {
    /// Summarises a run whose checks executed.
    #[must_use]
    pub fn new(base_url: BaseUrl, started_at: DateTime<Utc>, outcomes: Vec<CheckOutcome>) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed).count();
        Self {
            base_url,
            started_at,
            service_ready: true,
            outcomes,
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Summarises a run aborted because the service never became ready.
    #[must_use]
    pub const fn not_ready(base_url: BaseUrl, started_at: DateTime<Utc>) -> Self {
        Self {
            base_url,
            started_at,
            service_ready: false,
            outcomes: Vec::new(),
            total: 0,
            passed: 0,
            failed: 0,
        }
    }

    /// True iff the service was ready and every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.service_ready && self.failed == 0
    }

    /// Process exit status for calling automation.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
