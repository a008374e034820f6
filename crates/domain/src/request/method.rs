//! HTTP verbs used by the checks.

use std::fmt;

/// Verb of an outgoing request. The service only exposes a GET health route
/// and a POST login route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Reads the health endpoint.
    Get,
    /// Submits a login.
    Post,
}

impl HttpMethod {
    /// Canonical upper-case token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
