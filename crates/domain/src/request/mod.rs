//! Requests the checks send.

mod method;
mod spec;

pub use method::HttpMethod;
pub use spec::{DEFAULT_TIMEOUT_MS, Header, RequestSpec};
