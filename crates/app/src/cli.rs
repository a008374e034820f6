//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use mailprobe_application::{DEFAULT_MAX_ATTEMPTS, ReadinessPolicy};
use mailprobe_domain::{
    BaseUrl, DEFAULT_BASE_URL, DEFAULT_INVALID_EMAIL, DEFAULT_MAX_LATENCY_MS, DEFAULT_VALID_EMAIL,
    SuiteSettings,
};
use mailprobe_infrastructure::ReportFormat;

/// Integration checks for the EmailService API.
///
/// Every option can also be set through the environment variable shown in
/// its help text; flags win over the environment.
#[derive(Debug, Parser)]
#[command(name = "mailprobe", version, about)]
pub struct Args {
    /// Root URL of the service under test.
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: BaseUrl,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        env = "TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Maximum number of health polls before giving up.
    #[arg(long, env = "WAIT_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub wait_attempts: u32,

    /// Pause between health polls, in milliseconds.
    #[arg(long, env = "WAIT_INTERVAL_MS", default_value_t = 1_000)]
    pub wait_interval_ms: u64,

    /// Run the checks immediately without waiting for the service.
    ///
    /// The environment variable takes any truthy value such as `1` or `yes`.
    #[arg(
        long,
        env = "SKIP_WAIT",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub skip_wait: bool,

    /// Exclusive latency ceiling for the health round trip, in milliseconds.
    #[arg(long, env = "MAX_LATENCY_MS", default_value_t = DEFAULT_MAX_LATENCY_MS)]
    pub max_latency_ms: u64,

    /// Address the service must accept.
    #[arg(long, env = "VALID_EMAIL", default_value = DEFAULT_VALID_EMAIL)]
    pub valid_email: String,

    /// Address the service must reject.
    #[arg(long, env = "INVALID_EMAIL", default_value = DEFAULT_INVALID_EMAIL)]
    pub invalid_email: String,

    /// Report format: text or json.
    #[arg(long, env = "REPORT_FORMAT", default_value = "text")]
    pub report: ReportFormat,
}

impl Args {
    /// Settings for the standard suite.
    #[must_use]
    pub fn suite_settings(&self) -> SuiteSettings {
        SuiteSettings {
            base_url: self.base_url.clone(),
            timeout_ms: self.timeout.saturating_mul(1_000),
            max_latency_ms: self.max_latency_ms,
            valid_email: self.valid_email.clone(),
            invalid_email: self.invalid_email.clone(),
        }
    }

    /// Readiness policy, or `None` when the wait is skipped.
    #[must_use]
    pub const fn readiness(&self) -> Option<ReadinessPolicy> {
        if self.skip_wait {
            None
        } else {
            Some(ReadinessPolicy {
                max_attempts: self.wait_attempts,
                interval: Duration::from_millis(self.wait_interval_ms),
            })
        }
    }
}
