//! Errors raised while turning configuration into checks.

use thiserror::Error;

/// Configuration the runner cannot act on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The base URL cannot address the service.
    #[error("invalid base URL '{input}': {reason}")]
    InvalidBaseUrl {
        /// Value as given.
        input: String,
        /// Why it was refused.
        reason: String,
    },

    /// A request payload could not be encoded.
    #[error("cannot encode {payload} as JSON: {reason}")]
    Encode {
        /// Payload being encoded.
        payload: &'static str,
        /// Encoder message.
        reason: String,
    },
}

/// Shorthand for results carrying a [`DomainError`].
pub type DomainResult<T> = Result<T, DomainError>;
