//! Application-level configuration.
//!
//! - [`ExecutionParams`] - retry behaviour of external calls during a run
//! - [`RetryPolicy`] - bounded retry with exponential backoff for transient failures

pub mod execution_params;

pub use execution_params::{ExecutionParams, RetryPolicy};
