//! Participant port
//!
//! A participant is a black box that, given a read-only view of the
//! discussion so far, produces the text of its next contribution.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use roundtable_domain::{HistorySnapshot, ParticipantId, ParticipantProfile};

/// A member of the group chat.
///
/// The orchestrator wraps the returned text into an assistant message
/// authored by [`Participant::id`] and appends it to the canonical history.
/// Implementations never see the canonical history itself.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Unique name, used by the moderator to address this participant.
    fn id(&self) -> &ParticipantId;

    /// Free-text description shown to the speaker selector.
    fn description(&self) -> &str;

    /// Produce the next contribution.
    async fn generate(&self, history: &HistorySnapshot) -> Result<String, GatewayError>;

    fn profile(&self) -> ParticipantProfile {
        ParticipantProfile::new(self.id().clone(), self.description())
    }
}
