//! Conversation domain.
//!
//! - [`entities::Message`] - one immutable turn of the discussion
//! - [`history::ConversationHistory`] - the append-only record owned by the orchestrator
//! - [`history::HistorySnapshot`] - the read-only copy everyone else receives

pub mod entities;
pub mod history;
