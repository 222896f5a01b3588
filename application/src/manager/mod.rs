//! Group chat managers: the moderator's decision policies.
//!
//! The orchestrator consults a [`GroupChatManager`] at four points of the
//! discussion loop. Which policy answers is chosen when the use case is
//! constructed:
//!
//! - [`LlmGroupChatManager`] asks a moderator model, composing the
//!   [`TerminationEvaluator`], [`SpeakerSelector`] and [`ResultFilter`]
//! - [`RoundRobinManager`] is rule-based and never calls a model
//!
//! Managers only ever see a [`HistorySnapshot`]. Every prompt they build is
//! a disposable copy of it.

mod llm;
mod query;
mod result_filter;
mod round_robin;
mod selection;
mod termination;

pub use llm::LlmGroupChatManager;
pub use result_filter::ResultFilter;
pub use round_robin::RoundRobinManager;
pub use selection::SpeakerSelector;
pub use termination::TerminationEvaluator;

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use roundtable_domain::{
    BooleanDecision, DecisionParseError, HistorySnapshot, ParticipantRegistry, SelectionDecision,
    SummaryDecision,
};
use thiserror::Error;

/// Errors raised by a manager's decision operations
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error(transparent)]
    Parse(#[from] DecisionParseError),

    #[error("Moderator model call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Cannot summarize an empty history")]
    EmptyHistory,
}

/// The moderator of a group chat.
#[async_trait]
pub trait GroupChatManager: Send + Sync {
    /// Whether the human should be asked for input after the latest turn.
    async fn should_request_user_input(
        &self,
        history: &HistorySnapshot,
    ) -> Result<BooleanDecision, ManagerError>;

    /// Whether the discussion on `topic` has reached a conclusion.
    async fn should_terminate(
        &self,
        history: &HistorySnapshot,
        topic: &str,
    ) -> Result<BooleanDecision, ManagerError>;

    /// Who speaks next.
    ///
    /// The returned id is not guaranteed to be a member of `participants`;
    /// the orchestrator checks membership.
    async fn select_next_agent(
        &self,
        history: &HistorySnapshot,
        participants: &ParticipantRegistry,
        topic: &str,
    ) -> Result<SelectionDecision, ManagerError>;

    /// Closing summary of the whole discussion.
    async fn filter_results(
        &self,
        history: &HistorySnapshot,
        topic: &str,
    ) -> Result<SummaryDecision, ManagerError>;
}
