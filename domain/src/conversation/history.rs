//! Conversation history and snapshots

use super::entities::{Author, Message};
use crate::core::task::Task;
use crate::session::entities::{PromptMessage, Role};
use std::sync::Arc;

/// Ordered, append-only record of a discussion.
///
/// Owned by exactly one orchestrator run. There is no API to remove,
/// reorder or edit a message; other components receive a
/// [`HistorySnapshot`] instead of a reference to this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Create a history seeded with the task as a single user message
    pub fn new(task: &Task) -> Self {
        let mut history = Self {
            messages: Vec::new(),
        };
        history.append(Role::User, Author::User, task.content());
        history
    }

    /// Append a message and return it.
    ///
    /// The sequence index is the message's position in the history.
    pub fn append(&mut self, role: Role, author: Author, content: impl Into<String>) -> &Message {
        let index = self.messages.len() as u64;
        self.messages
            .push(Message::new(index, role, author, content.into()));
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of turns produced by participants
    pub fn participant_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.is_participant_turn())
            .count()
    }

    pub fn has_participant_turns(&self) -> bool {
        self.messages.iter().any(Message::is_participant_turn)
    }

    /// Take a point-in-time, read-only copy
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            messages: Arc::from(self.messages.as_slice()),
        }
    }
}

/// Read-only, point-in-time copy of a [`ConversationHistory`].
///
/// Later appends to the history are not visible through an existing
/// snapshot. Cloning is cheap (shared buffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    messages: Arc<[Message]>,
}

impl HistorySnapshot {
    /// Snapshot with no messages (only meaningful in tests and edge-case checks)
    pub fn empty() -> Self {
        Self {
            messages: Arc::from(Vec::<Message>::new()),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Last turn produced by a participant, if any
    pub fn last_participant_turn(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_participant_turn())
    }

    /// Disposable request copy of the snapshot.
    ///
    /// Callers may prepend or append framing messages to the returned vector;
    /// it shares nothing with the canonical history.
    pub fn to_prompt_messages(&self) -> Vec<PromptMessage> {
        self.messages.iter().map(Message::to_prompt_message).collect()
    }

    /// Transient copy wrapped in the given framing: `system` first, `instruction` last
    pub fn framed(&self, system: impl Into<String>, instruction: impl Into<String>) -> Vec<PromptMessage> {
        let mut messages = Vec::with_capacity(self.len() + 2);
        messages.push(PromptMessage::system(system));
        messages.extend(self.to_prompt_messages());
        messages.push(PromptMessage::user(instruction));
        messages
    }
}
