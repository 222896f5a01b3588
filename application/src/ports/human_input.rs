//! Human input port.
//!
//! After every participant turn the moderator is asked whether the human
//! should be consulted. When it says yes and a [`HumanInputPort`] is
//! attached to the run, the returned text is appended to the discussion as
//! a user message. Human contributions are not rounds.
//!
//! # Built-in Implementations
//!
//! - [`NoHumanInput`] - never contributes anything

use async_trait::async_trait;
use roundtable_domain::HistorySnapshot;
use thiserror::Error;

/// Failure while collecting human input.
///
/// These errors represent failures of the input channel, not a decision
/// of the human to stay silent (which is `Ok(None)`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HumanInputError {
    /// User cancelled the operation (e.g., via Ctrl+C or end of input).
    #[error("Operation cancelled")]
    Cancelled,
    /// Input/output error (e.g., terminal read failure).
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Port for asking the human for a contribution.
#[async_trait]
pub trait HumanInputPort: Send + Sync {
    /// Ask for input. `Ok(None)` means the human had nothing to add.
    async fn request_input(&self, history: &HistorySnapshot)
    -> Result<Option<String>, HumanInputError>;
}

/// Never contributes anything.
pub struct NoHumanInput;

#[async_trait]
impl HumanInputPort for NoHumanInput {
    async fn request_input(
        &self,
        _history: &HistorySnapshot,
    ) -> Result<Option<String>, HumanInputError> {
        Ok(None)
    }
}
