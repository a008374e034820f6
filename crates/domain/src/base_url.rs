//! Root address of the service under test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default target: the local docker-compose deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// A validated `http`/`https` base URL.
///
/// Endpoint URLs are formed by appending an absolute path, so a path prefix
/// in the base (e.g. `http://host/email`) is kept. Query strings and
/// fragments are refused since a path cannot follow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBaseUrl` if the value is empty,
    /// unparsable, not `http`/`https`, has no host, or carries a query or
    /// fragment.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let refuse = |reason: String| DomainError::InvalidBaseUrl {
            input: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(refuse("empty".to_string()));
        }

        let url = Url::parse(trimmed).map_err(|e| refuse(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(refuse(format!("scheme '{}' is not http or https", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(refuse("no host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(refuse("query strings and fragments are not allowed".to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the absolute URL of `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(DEFAULT_BASE_URL.to_string())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BaseUrl {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<BaseUrl> for String {
    fn from(value: BaseUrl) -> Self {
        value.0
    }
}
