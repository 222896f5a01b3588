//! Domain layer for roundtable
//!
//! This crate contains the core types of a moderated group discussion.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Group chat
//!
//! A group chat is a discussion between a fixed set of participants, driven
//! turn by turn by an orchestrator:
//!
//! - **ConversationHistory**: the append-only record of every turn
//! - **HistorySnapshot**: the read-only copy handed to anything that is not
//!   the orchestrator (participants, decision services, observers)
//! - **Decisions**: the tagged outcomes of the moderator's policies
//!   (terminate? who speaks next? what is the result?)
//!
//! ## Rounds
//!
//! Every participant turn is one round. The configured maximum is a hard cap
//! that ends the discussion no matter what the moderator decides.

pub mod config;
pub mod conversation;
pub mod core;
pub mod decision;
pub mod orchestration;
pub mod participant;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use conversation::{
    entities::{Author, Message},
    history::{ConversationHistory, HistorySnapshot},
};
pub use core::{error::DomainError, model::Model, task::Task};
pub use decision::{
    parsing::{DecisionParseError, ReplyShape, StructuredReply, parse_structured_reply},
    value_objects::{BooleanDecision, Decision, SelectionDecision, SummaryDecision},
};
pub use orchestration::{
    entities::{RoundState, RunPhase},
    value_objects::{CapPrecedence, RunConfig, TerminationReason},
};
pub use participant::{
    entities::{ParticipantId, ParticipantProfile},
    registry::ParticipantRegistry,
};
pub use prompt::FramingPrompt;
pub use session::entities::{ChatRequest, PromptMessage, ResponseFormat, Role};
