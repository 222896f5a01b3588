//! Types for the group chat use case.

use crate::manager::ManagerError;
use crate::ports::human_input::HumanInputError;
use crate::ports::llm_gateway::GatewayError;
use roundtable_domain::{
    ConversationHistory, DecisionParseError, DomainError, Message, RunConfig, Task,
    TerminationReason,
};
use thiserror::Error;

/// Input for the group chat use case
#[derive(Debug, Clone)]
pub struct RunGroupChatInput {
    /// Opening request, seeded as the first user message
    pub task: Task,
    pub config: RunConfig,
}

impl RunGroupChatInput {
    pub fn new(task: Task, config: RunConfig) -> Self {
        Self { task, config }
    }
}

/// Outcome of a completed discussion
#[derive(Debug, Clone)]
pub struct GroupChatResult {
    /// Closing summary, authored by the moderator
    pub summary: Message,
    /// Why the moderator summarized the way it did
    pub reason: String,
    /// Why the discussion ended
    pub termination: TerminationReason,
    /// Number of participant turns
    pub rounds: usize,
    /// The full discussion, starting with the task
    pub history: ConversationHistory,
}

impl GroupChatResult {
    /// The closing summary, dropping everything else
    pub fn into_message(self) -> Message {
        self.summary
    }
}

/// Why a discussion could not be completed
#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("Unknown participant '{id}' selected (available: {})", .available.join(", "))]
    UnknownParticipant { id: String, available: Vec<String> },

    #[error(transparent)]
    DecisionParse(#[from] DecisionParseError),

    #[error("Cannot summarize an empty history")]
    EmptyHistory,

    #[error("Model call failed: {0}")]
    Capability(#[from] GatewayError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Human input failed: {0}")]
    HumanInput(#[from] HumanInputError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<ManagerError> for OrchestrationError {
    fn from(e: ManagerError) -> Self {
        match e {
            ManagerError::Parse(e) => OrchestrationError::DecisionParse(e),
            ManagerError::Gateway(e) => OrchestrationError::Capability(e),
            ManagerError::EmptyHistory => OrchestrationError::EmptyHistory,
        }
    }
}

impl OrchestrationError {
    /// Short machine-readable name, used in conversation logs
    pub fn code(&self) -> &'static str {
        match self {
            OrchestrationError::UnknownParticipant { .. } => "unknown_participant",
            OrchestrationError::DecisionParse(_) => "decision_parse",
            OrchestrationError::EmptyHistory => "empty_history",
            OrchestrationError::Capability(_) => "capability",
            OrchestrationError::InvalidConfiguration(_) => "invalid_configuration",
            OrchestrationError::Cancelled => "cancelled",
            OrchestrationError::HumanInput(_) => "human_input",
            OrchestrationError::Domain(_) => "domain",
        }
    }
}

/// A failed run, with everything that was said before the failure.
///
/// The partial history is for diagnostics only. No summary is produced for
/// a failed discussion.
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct RunGroupChatError {
    pub kind: OrchestrationError,
    pub history: ConversationHistory,
}

impl RunGroupChatError {
    pub fn new(kind: OrchestrationError, history: ConversationHistory) -> Self {
        Self { kind, history }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, OrchestrationError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_participant_lists_available() {
        let err = OrchestrationError::UnknownParticipant {
            id: "Ghost".into(),
            available: vec!["Farmer".into(), "Developer".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown participant 'Ghost' selected (available: Farmer, Developer)"
        );
        assert_eq!(err.code(), "unknown_participant");
    }

    #[test]
    fn test_manager_errors_convert() {
        let err: OrchestrationError = ManagerError::EmptyHistory.into();
        assert!(matches!(err, OrchestrationError::EmptyHistory));

        let err: OrchestrationError = ManagerError::Gateway(GatewayError::Timeout).into();
        assert!(matches!(err, OrchestrationError::Capability(GatewayError::Timeout)));
    }
}
