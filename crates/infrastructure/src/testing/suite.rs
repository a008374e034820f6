//! Sequential execution of checks against a live service.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use mailprobe_application::{ExecuteRequest, HttpClient, ReadinessPolicy, WaitForService};
use mailprobe_domain::{Check, CheckOutcome, DomainError, RunSummary, SuiteSettings};
use thiserror::Error;

use super::evaluate;
use crate::report::Reporter;

/// Errors that abort a run before its summary is complete.
///
/// Check failures are never errors; they are recorded in the summary.
#[derive(Debug, Error)]
pub enum RunError {
    /// The checks could not be built.
    #[error("invalid suite: {0}")]
    Suite(#[from] DomainError),

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

/// Runs checks one after another over a shared HTTP client.
pub struct SuiteRunner<C: HttpClient> {
    execute: ExecuteRequest<C>,
}

impl<C: HttpClient> SuiteRunner<C> {
    /// Creates a suite runner over `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self {
            execute: ExecuteRequest::new(client),
        }
    }

    /// Sends the check's request and evaluates its expectations.
    ///
    /// A transport failure becomes a failed outcome; it never aborts.
    pub async fn run_check(&self, check: &Check) -> CheckOutcome {
        let start = Instant::now();
        match self.execute.execute(&check.request).await {
            Ok(response) => {
                let results = evaluate(&check.expectations, &response);
                CheckOutcome::evaluated(&check.name, results, response.duration)
            }
            Err(e) => CheckOutcome::request_failed(&check.name, e.to_string(), start.elapsed()),
        }
    }

    /// Runs `checks` in order, reporting each outcome as it completes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the reporter fails.
    pub async fn run_checks(
        &self,
        checks: &[Check],
        reporter: &mut dyn Reporter,
    ) -> io::Result<Vec<CheckOutcome>> {
        let mut outcomes = Vec::with_capacity(checks.len());
        for check in checks {
            let outcome = self.run_check(check).await;
            if outcome.passed {
                tracing::debug!(check = %outcome.name, "check passed");
            } else {
                tracing::warn!(
                    check = %outcome.name,
                    error = outcome.error.as_deref().unwrap_or_default(),
                    "check failed"
                );
            }
            reporter.check_finished(&outcome)?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Runs the standard suite: optional readiness wait, then every check.
    ///
    /// When `readiness` is set and the service never answers, no check is
    /// run and the summary is marked not ready.
    ///
    /// # Errors
    ///
    /// Returns an error if the checks cannot be built or the reporter fails.
    pub async fn run(
        &self,
        settings: &SuiteSettings,
        readiness: Option<ReadinessPolicy>,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, RunError> {
        let started_at = Utc::now();
        let checks = settings.standard_checks()?;

        reporter.run_started(&settings.base_url)?;

        if let Some(policy) = readiness {
            reporter.waiting(&policy)?;
            let wait = WaitForService::new(self.execute.clone(), policy);
            if !wait.wait(&settings.health_request("Readiness")).await {
                let summary = RunSummary::not_ready(settings.base_url.clone(), started_at);
                reporter.run_finished(&summary)?;
                return Ok(summary);
            }
        }

        let outcomes = self.run_checks(&checks, reporter).await?;
        let summary = RunSummary::new(settings.base_url.clone(), started_at, outcomes);
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "run finished"
        );
        reporter.run_finished(&summary)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use mailprobe_application::{HttpClientError, HttpFuture};
    use mailprobe_domain::{HttpMethod, RequestSpec, ResponseSpec};
    use pretty_assertions::assert_eq;

    type Route = fn(&RequestSpec) -> Result<(u16, &'static str, u64), HttpClientError>;

    /// Answers requests from a routing function and records what it saw.
    struct FakeService {
        route: Route,
        seen: Mutex<Vec<String>>,
    }

    impl FakeService {
        fn new(route: Route) -> Arc<Self> {
            Arc::new(Self {
                route,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl HttpClient for FakeService {
        fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(format!("{} {}", request.method, request.url));
            }
            let reply = (self.route)(request).map(|(status, body, millis)| {
                ResponseSpec::new(status, body.as_bytes(), Duration::from_millis(millis))
            });
            Box::pin(async move { reply })
        }
    }

    fn is_valid_login(request: &RequestSpec) -> bool {
        request
            .json_body
            .as_deref()
            .is_some_and(|body| body.contains("test@example.com"))
    }

    fn healthy(request: &RequestSpec) -> Result<(u16, &'static str, u64), HttpClientError> {
        match request.method {
            HttpMethod::Get => Ok((200, r#"{"status":"Healthy"}"#, 15)),
            HttpMethod::Post if is_valid_login(request) => {
                Ok((200, r#"{"success":true,"message":"ok"}"#, 20))
            }
            HttpMethod::Post => Ok((400, r#"{"success":false,"message":"invalid email"}"#, 20)),
        }
    }

    /// Collects events for assertions.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Reporter for Recorder {
        fn run_started(&mut self, base_url: &mailprobe_domain::BaseUrl) -> io::Result<()> {
            self.events.push(format!("start {base_url}"));
            Ok(())
        }

        fn waiting(&mut self, _policy: &ReadinessPolicy) -> io::Result<()> {
            self.events.push("waiting".to_string());
            Ok(())
        }

        fn check_finished(&mut self, outcome: &CheckOutcome) -> io::Result<()> {
            let verdict = if outcome.passed { "PASS" } else { "FAIL" };
            self.events.push(format!("{verdict} {}", outcome.name));
            Ok(())
        }

        fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
            self.events
                .push(format!("done {}/{}", summary.passed, summary.total));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_all_checks_pass_against_healthy_service() {
        let service = FakeService::new(healthy);
        let runner = SuiteRunner::new(Arc::clone(&service));
        let mut recorder = Recorder::default();

        let summary = runner
            .run(&SuiteSettings::default(), None, &mut recorder)
            .await;

        assert!(matches!(summary, Ok(ref s) if s.all_passed() && s.total == 4));
        assert_eq!(
            recorder.events,
            vec![
                "start http://localhost:8080",
                "PASS Health check",
                "PASS Valid login",
                "PASS Invalid login",
                "PASS Latency check",
                "done 4/4",
            ]
        );
        assert_eq!(
            service.seen(),
            vec![
                "GET http://localhost:8080/api/health",
                "POST http://localhost:8080/api/auth/login",
                "POST http://localhost:8080/api/auth/login",
                "GET http://localhost:8080/api/health",
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        fn broken_login(request: &RequestSpec) -> Result<(u16, &'static str, u64), HttpClientError> {
            match request.method {
                HttpMethod::Get => Ok((200, r#"{"Status":"Healthy"}"#, 2_500)),
                HttpMethod::Post => Err(HttpClientError::Timeout { timeout_ms: 10_000 }),
            }
        }

        let runner = SuiteRunner::new(FakeService::new(broken_login));
        let mut recorder = Recorder::default();

        let summary = match runner
            .run(&SuiteSettings::default(), None, &mut recorder)
            .await
        {
            Ok(summary) => summary,
            Err(e) => panic!("run aborted: {e}"),
        };
        assert_eq!((summary.passed, summary.failed), (1, 3));
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(
            summary.outcomes[1].error.as_deref(),
            Some("request timed out after 10000ms")
        );
        assert_eq!(
            summary.outcomes[3].error.as_deref(),
            Some("Response took 2.50s, expected < 2000ms")
        );
        assert_eq!(recorder.events.last().map(String::as_str), Some("done 1/4"));
    }

    #[tokio::test]
    async fn test_status_mismatch_names_expected_and_actual() {
        fn accepts_everything(
            request: &RequestSpec,
        ) -> Result<(u16, &'static str, u64), HttpClientError> {
            match request.method {
                HttpMethod::Get => Ok((200, r#"{"status":"Healthy"}"#, 1)),
                HttpMethod::Post => Ok((200, r#"{"success":true}"#, 1)),
            }
        }

        let runner = SuiteRunner::new(FakeService::new(accepts_everything));
        let checks = SuiteSettings::default().standard_checks().unwrap_or_default();

        let outcome = runner.run_check(&checks[2]).await;
        assert!(!outcome.passed);
        assert_eq!(outcome.error.as_deref(), Some("Expected status = 400, got 200"));
        assert_eq!(outcome.expectations.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_ready_skips_checks() {
        fn down(_request: &RequestSpec) -> Result<(u16, &'static str, u64), HttpClientError> {
            Err(HttpClientError::ConnectionRefused {
                host: "localhost".to_string(),
                port: 8080,
            })
        }

        let service = FakeService::new(down);
        let runner = SuiteRunner::new(Arc::clone(&service));
        let mut recorder = Recorder::default();
        let policy = ReadinessPolicy {
            max_attempts: 3,
            interval: Duration::from_secs(1),
        };

        let summary = runner
            .run(&SuiteSettings::default(), Some(policy), &mut recorder)
            .await;

        assert!(matches!(summary, Ok(ref s) if !s.service_ready && s.exit_code() == 1));
        assert_eq!(service.seen().len(), 3);
        assert_eq!(
            recorder.events,
            vec!["start http://localhost:8080", "waiting", "done 0/0"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_service_runs_checks_after_wait() {
        let service = FakeService::new(healthy);
        let runner = SuiteRunner::new(Arc::clone(&service));
        let mut recorder = Recorder::default();

        let summary = runner
            .run(
                &SuiteSettings::default(),
                Some(ReadinessPolicy::default()),
                &mut recorder,
            )
            .await;

        assert!(matches!(summary, Ok(ref s) if s.all_passed()));
        assert_eq!(service.seen().len(), 5);
    }
}
