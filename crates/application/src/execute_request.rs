//! Execute Request Use Case
//!
//! Sends one request through the `HttpClient` port and traces the exchange.

use std::sync::Arc;

use mailprobe_domain::{RequestSpec, ResponseSpec};

use crate::ports::{HttpClient, HttpClientError};

/// Sends requests for the checks and the readiness wait.
///
/// Requests are built from a validated base URL, so no further URL checks
/// happen here; adapter failures are passed through unchanged.
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Clone for ExecuteRequest<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Wraps a shared client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Sends `request`, logging it and its result at `debug`.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when no response arrived.
    pub async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        tracing::debug!(
            check = %request.name,
            method = %request.method,
            url = %request.url,
            timeout_ms = request.timeout_ms,
            "sending request"
        );

        let result = self.client.execute(request).await;
        match &result {
            Ok(response) => tracing::debug!(
                check = %request.name,
                status = response.status,
                elapsed = %response.elapsed_display(),
                "response received"
            ),
            Err(e) => tracing::debug!(check = %request.name, error = %e, "no response"),
        }
        result
    }
}
