//! Rule-based moderator

use super::termination::NO_USER_INPUT_REASON;
use super::{GroupChatManager, ManagerError};
use async_trait::async_trait;
use roundtable_domain::{
    BooleanDecision, Decision, HistorySnapshot, Message, ParticipantRegistry, SelectionDecision,
    SummaryDecision,
};

/// A moderator that needs no model.
///
/// Participants speak in registry order, starting over after the last one.
/// The discussion only ends at the round cap, and the closing summary is the
/// last participant turn (or the task itself when nobody has spoken).
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinManager;

impl RoundRobinManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GroupChatManager for RoundRobinManager {
    async fn should_request_user_input(
        &self,
        _history: &HistorySnapshot,
    ) -> Result<BooleanDecision, ManagerError> {
        Ok(Decision::new(false, NO_USER_INPUT_REASON))
    }

    async fn should_terminate(
        &self,
        _history: &HistorySnapshot,
        _topic: &str,
    ) -> Result<BooleanDecision, ManagerError> {
        Ok(Decision::new(
            false,
            "Round robin discussions run until the round limit.",
        ))
    }

    async fn select_next_agent(
        &self,
        history: &HistorySnapshot,
        participants: &ParticipantRegistry,
        _topic: &str,
    ) -> Result<SelectionDecision, ManagerError> {
        let next = history
            .last_participant_turn()
            .and_then(|m| m.author().participant_id())
            .and_then(|id| participants.position(id))
            .map_or(0, |pos| (pos + 1) % participants.len());

        let profile = &participants.profiles()[next];
        Ok(Decision::new(
            profile.id.clone(),
            format!("Turn {} of the rotation.", next + 1),
        ))
    }

    async fn filter_results(
        &self,
        history: &HistorySnapshot,
        _topic: &str,
    ) -> Result<SummaryDecision, ManagerError> {
        let last = history
            .last_participant_turn()
            .or_else(|| history.messages().first())
            .ok_or(ManagerError::EmptyHistory)?;

        let reason = match last.author().participant_id() {
            Some(id) => format!("Closing words of {id}."),
            None => "No participant has spoken.".to_string(),
        };
        Ok(Decision::new(
            Message::moderator_summary(history.len() as u64, last.content()),
            reason,
        ))
    }
}
