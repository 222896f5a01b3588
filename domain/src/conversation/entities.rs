//! Conversation entities

use crate::participant::entities::ParticipantId;
use crate::session::entities::{PromptMessage, Role};
use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Author {
    System,
    /// The human (or host process) that posed the task
    User,
    Participant(ParticipantId),
    /// The group chat manager, when it speaks for the whole discussion
    Moderator,
}

impl Author {
    pub fn participant_id(&self) -> Option<&ParticipantId> {
        match self {
            Author::Participant(id) => Some(id),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Author::System => "system",
            Author::User => "user",
            Author::Participant(id) => id.as_str(),
            Author::Moderator => "moderator",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One turn of the discussion (Entity)
///
/// Immutable: fields are only readable. Messages are created by
/// [`ConversationHistory`](super::history::ConversationHistory) when appended,
/// which is what assigns the sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    index: u64,
    role: Role,
    author: Author,
    content: String,
}

impl Message {
    pub(crate) fn new(index: u64, role: Role, author: Author, content: String) -> Self {
        Self {
            index,
            role,
            author,
            content,
        }
    }

    /// A moderator-authored assistant message placed at `index`.
    ///
    /// Used for the closing summary, which is returned to the caller but
    /// never appended to the history.
    pub fn moderator_summary(index: u64, content: impl Into<String>) -> Self {
        Self::new(index, Role::Assistant, Author::Moderator, content.into())
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this turn was produced by a participant
    pub fn is_participant_turn(&self) -> bool {
        matches!(self.author, Author::Participant(_))
    }

    /// Convert to a request message, tagging participant turns with the speaker name
    pub fn to_prompt_message(&self) -> PromptMessage {
        let msg = PromptMessage {
            role: self.role,
            name: None,
            content: self.content.clone(),
        };
        match &self.author {
            Author::Participant(id) => msg.with_name(id.as_str()),
            _ => msg,
        }
    }
}
