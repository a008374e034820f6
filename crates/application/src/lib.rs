//! Mailprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration

pub mod execute_request;
pub mod ports;
pub mod use_cases;

pub use execute_request::ExecuteRequest;
pub use ports::{HttpClient, HttpClientError, HttpFuture};
pub use use_cases::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, ReadinessPolicy, WaitForService,
};
