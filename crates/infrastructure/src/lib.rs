//! Mailprobe Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest-backed HTTP client, the expectation
//! evaluator, suite orchestration and run reporting.

pub mod adapters;
pub mod report;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use report::{JsonReporter, ReportFormat, Reporter, TextReporter};
pub use testing::{RunError, SuiteRunner, evaluate};
