//! Application use cases (business logic orchestration).

mod wait_for_service;

pub use wait_for_service::*;
