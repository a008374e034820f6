//! Mailprobe Domain - Core types
//!
//! This crate defines the domain model for the Mailprobe integration test
//! runner: the service contract, requests, responses, expectations, checks
//! and run summaries. All types here are pure Rust with no I/O dependencies.

pub mod base_url;
pub mod check;
pub mod contract;
pub mod error;
pub mod expectation;
pub mod request;
pub mod response;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use check::{
    Check, CheckOutcome, DEFAULT_INVALID_EMAIL, DEFAULT_MAX_LATENCY_MS, DEFAULT_VALID_EMAIL,
    RunSummary, SuiteSettings,
};
pub use contract::{HEALTH_PATH, HEALTHY, HealthResponse, LOGIN_PATH, LoginRequest, LoginResponse};
pub use error::{DomainError, DomainResult};
pub use expectation::{Expectation, ExpectationResult};
pub use request::{DEFAULT_TIMEOUT_MS, Header, HttpMethod, RequestSpec};
pub use response::ResponseSpec;
