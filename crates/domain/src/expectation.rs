//! What a check expects of its response, and how each expectation fared.

use serde::{Deserialize, Serialize};

use crate::contract::HEALTHY;

/// One condition a response must meet.
///
/// Payload expectations decode the body into the typed contract payloads,
/// so the JSON field names live in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// The response has exactly this status code.
    Status {
        /// Required code.
        code: u16,
    },
    /// The body is a health payload reporting the healthy sentinel.
    Healthy,
    /// The body is a login payload whose `success` flag has this value.
    LoginSuccess {
        /// Required flag.
        success: bool,
    },
    /// The exchange finished strictly below the ceiling.
    FasterThan {
        /// Exclusive ceiling in milliseconds.
        max_ms: u64,
    },
}

impl Expectation {
    /// Short human-readable form, e.g. `status 200`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Status { code } => format!("status {code}"),
            Self::Healthy => format!("status field is \"{HEALTHY}\""),
            Self::LoginSuccess { success } => format!("success is {success}"),
            Self::FasterThan { max_ms } => format!("responds in under {max_ms}ms"),
        }
    }
}

/// How one expectation fared against a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectationResult {
    /// What was expected.
    pub expectation: Expectation,
    /// Whether it held.
    pub met: bool,
    /// Observed value, when one could be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<String>,
    /// Why it did not hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ExpectationResult {
    /// The expectation held; `observed` is what was seen.
    #[must_use]
    pub fn met(expectation: Expectation, observed: impl Into<String>) -> Self {
        Self {
            expectation,
            met: true,
            observed: Some(observed.into()),
            reason: None,
        }
    }

    /// The expectation did not hold.
    #[must_use]
    pub fn missed(
        expectation: Expectation,
        observed: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            expectation,
            met: false,
            observed,
            reason: Some(reason.into()),
        }
    }
}
