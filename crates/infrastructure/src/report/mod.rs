//! Run reporting.
//!
//! A [`Reporter`] receives run events as they happen. [`TextReporter`]
//! prints the PASS/FAIL console transcript; [`JsonReporter`] writes the
//! final [`RunSummary`] as JSON.

mod json;
mod text;

use std::io;
use std::str::FromStr;

use mailprobe_application::ReadinessPolicy;
use mailprobe_domain::{BaseUrl, CheckOutcome, RunSummary};

pub use json::JsonReporter;
pub use text::TextReporter;

/// Receives run events in order.
pub trait Reporter {
    /// The run is starting against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn run_started(&mut self, base_url: &BaseUrl) -> io::Result<()> {
        let _ = base_url;
        Ok(())
    }

    /// The readiness wait is starting.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn waiting(&mut self, policy: &ReadinessPolicy) -> io::Result<()> {
        let _ = policy;
        Ok(())
    }

    /// One check finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn check_finished(&mut self, outcome: &CheckOutcome) -> io::Result<()> {
        let _ = outcome;
        Ok(())
    }

    /// The run finished, successfully or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Line-oriented PASS/FAIL transcript.
    #[default]
    Text,
    /// The run summary as a JSON document.
    Json,
}

impl ReportFormat {
    /// Builds the reporter for this format writing to `out`.
    pub fn reporter<'a, W: io::Write + 'a>(self, out: W) -> Box<dyn Reporter + 'a> {
        match self {
            Self::Text => Box::new(TextReporter::new(out)),
            Self::Json => Box::new(JsonReporter::new(out)),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{other}' (expected text or json)")),
        }
    }
}
