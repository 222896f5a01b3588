//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - language models that moderate or participate
//! - [`task::Task`] - the validated task that opens a discussion
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod string;
pub mod task;
