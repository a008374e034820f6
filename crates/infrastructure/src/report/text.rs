//! Console transcript.

use std::io::{self, Write};

use mailprobe_application::ReadinessPolicy;
use mailprobe_domain::{BaseUrl, CheckOutcome, RunSummary};

use super::Reporter;

const RULE: &str = "--------------------------------------------------";

/// Writes one PASS/FAIL line per check and a closing summary line.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn run_started(&mut self, base_url: &BaseUrl) -> io::Result<()> {
        writeln!(self.out, "Running integration tests on {base_url}")?;
        writeln!(self.out, "{RULE}")
    }

    fn waiting(&mut self, policy: &ReadinessPolicy) -> io::Result<()> {
        writeln!(
            self.out,
            "Waiting for service (up to {} attempts, {:.2}s apart)",
            policy.max_attempts,
            policy.interval.as_secs_f64()
        )
    }

    fn check_finished(&mut self, outcome: &CheckOutcome) -> io::Result<()> {
        if outcome.passed {
            writeln!(
                self.out,
                "PASS: {} ({:.2}s)",
                outcome.name,
                outcome.duration.as_secs_f64()
            )
        } else {
            writeln!(
                self.out,
                "FAIL: {} - {}",
                outcome.name,
                outcome.error.as_deref().unwrap_or("failed")
            )
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        if !summary.service_ready {
            writeln!(self.out, "FAIL: Service failed to become ready")?;
            writeln!(self.out, "{RULE}")?;
            writeln!(self.out, "FAILED: service at {} is not ready", summary.base_url)?;
            return self.out.flush();
        }

        writeln!(self.out, "{RULE}")?;
        if summary.all_passed() {
            writeln!(self.out, "SUCCESS: All {} tests passed", summary.total)?;
        } else {
            writeln!(
                self.out,
                "FAILED: {}/{} tests failed",
                summary.failed, summary.total
            )?;
        }
        self.out.flush()
    }
}
