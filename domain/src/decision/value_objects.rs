//! Decision value objects

use crate::conversation::entities::Message;
use crate::participant::entities::ParticipantId;
use serde::{Deserialize, Serialize};

/// Outcome of a decision query: a value the orchestrator acts on and a
/// human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision<T> {
    pub value: T,
    pub reason: String,
}

impl<T> Decision<T> {
    pub fn new(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: reason.into(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decision<U> {
        Decision {
            value: f(self.value),
            reason: self.reason,
        }
    }
}

/// Termination and user-input decisions
pub type BooleanDecision = Decision<bool>;

/// Next-speaker decision
pub type SelectionDecision = Decision<ParticipantId>;

/// Closing summary of a discussion
pub type SummaryDecision = Decision<Message>;
