//! Application layer for roundtable
//!
//! This crate contains the group chat use case, the moderator's decision
//! services, port definitions and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod manager;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{ExecutionParams, RetryPolicy};
pub use manager::{
    GroupChatManager, LlmGroupChatManager, ManagerError, ResultFilter, RoundRobinManager,
    SpeakerSelector, TerminationEvaluator,
};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    human_input::{HumanInputError, HumanInputPort, NoHumanInput},
    llm_gateway::{GatewayError, LlmGateway},
    observer::{NoObserver, ObserverFn, TurnObserver},
    participant::Participant,
};
pub use use_cases::run_group_chat::{
    GroupChatResult, OrchestrationError, ParticipantRoster, RunGroupChatError, RunGroupChatInput,
    RunGroupChatUseCase,
};
