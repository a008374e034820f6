//! Check execution: expectation evaluation and the sequential suite runner.

mod evaluate;
mod suite;

pub use evaluate::evaluate;
pub use suite::{RunError, SuiteRunner};
