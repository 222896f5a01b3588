//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are invariant violations detected while building or mutating
/// domain values. They never come from I/O.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Task cannot be empty")]
    EmptyTask,

    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("max_rounds must be a positive integer")]
    InvalidMaxRounds,

    #[error("Invalid participant id '{0}': ids must be non-empty and contain no whitespace")]
    InvalidParticipantId(String),

    #[error("Participant '{0}' is registered more than once")]
    DuplicateParticipant(String),

    #[error("At least one participant is required")]
    NoParticipants,

    #[error("Round limit of {max} would be exceeded")]
    RoundLimitExceeded { max: usize },

    #[error("Invalid run phase transition: {from} -> {to}")]
    InvalidPhaseTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl DomainError {
    /// Check if this error comes from a malformed configuration value
    /// (as opposed to a bookkeeping violation during a run)
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            DomainError::RoundLimitExceeded { .. } | DomainError::InvalidPhaseTransition { .. }
        )
    }
}
