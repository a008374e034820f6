//! Mailprobe - Main Entry Point
//!
//! Waits for the EmailService to come up, runs the integration checks in
//! order and exits 0 only if every check passed.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mailprobe_infrastructure::{ReqwestHttpClient, SuiteRunner};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Configuration errors exit 1 like any other failure; help and version exit 0.
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &cli::Args) -> anyhow::Result<u8> {
    let settings = args.suite_settings();
    let client = ReqwestHttpClient::new().context("failed to build HTTP client")?;
    let runner = SuiteRunner::new(Arc::new(client));

    let mut reporter = args.report.reporter(std::io::stdout());
    let summary = runner
        .run(&settings, args.readiness(), reporter.as_mut())
        .await
        .context("integration run failed")?;

    Ok(summary.exit_code())
}
