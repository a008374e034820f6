//! One outgoing request.

use serde::Serialize;

use super::HttpMethod;
use crate::error::{DomainError, DomainResult};

/// Timeout applied when none is configured, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Extra header sent with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Everything the HTTP adapter needs to send one request.
///
/// A request carries either no body or a JSON document; the adapter sets
/// `Content-Type: application/json` for the latter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Name of the check that issues the request, for logs.
    pub name: String,
    /// Verb.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: String,
    /// Extra headers, in sending order.
    pub headers: Vec<Header>,
    /// Encoded JSON body, if any.
    pub json_body: Option<String>,
    /// Bound on the whole exchange, body included.
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// A body-less GET.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            json_body: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// A POST whose body is `payload` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Encode` if `payload` cannot be serialized.
    pub fn post_json<T: Serialize>(
        name: impl Into<String>,
        url: impl Into<String>,
        payload: &T,
    ) -> DomainResult<Self> {
        let body = serde_json::to_string(payload).map_err(|e| DomainError::Encode {
            payload: std::any::type_name::<T>(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            method: HttpMethod::Post,
            json_body: Some(body),
            ..Self::get(name, url)
        })
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Replaces the timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
