//! Outbound HTTP port.

use std::future::Future;
use std::pin::Pin;

use mailprobe_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Why an exchange produced no response.
///
/// Each of these fails the check that issued the request without
/// evaluating its expectations; during the readiness wait they only count
/// as a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// No complete response within the request's timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Nothing is listening on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// A connection could not be set up (DNS, TLS, reset).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL is not usable.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Sends requests to the service under test.
///
/// One instance serves the whole run, so implementations should pool
/// connections.
pub trait HttpClient: Send + Sync {
    /// Sends `request` and reads the whole response body.
    ///
    /// The response duration covers sending the request and reading the
    /// body.
    ///
    /// # Errors
    ///
    /// Returns an error when no response arrived.
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_>;
}
