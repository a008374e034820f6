//! Payloads and endpoints exposed by the EmailService under test.

use serde::{Deserialize, Serialize};

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/api/health";

/// Login endpoint path.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Status value reported by a healthy service.
pub const HEALTHY: &str = "Healthy";

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Address to log in with.
    pub email: String,
}

impl LoginRequest {
    /// Creates a login request for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Response of `POST /api/auth/login`.
///
/// `success` is true with HTTP 200 for a syntactically valid address and
/// false with HTTP 400 otherwise. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the login was accepted.
    pub success: bool,
    /// Optional explanation from the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status, `"Healthy"` when up. Some deployments send `Status`.
    #[serde(alias = "Status")]
    pub status: String,
}

impl HealthResponse {
    /// Returns true if the reported status is the healthy sentinel.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}
