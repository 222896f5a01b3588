//! Speaker selector

use super::ManagerError;
use super::query::StructuredQuery;
use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use roundtable_domain::{
    Decision, DecisionParseError, FramingPrompt, HistorySnapshot, Model, ParticipantId,
    ParticipantRegistry, ReplyShape, SelectionDecision,
};
use std::sync::Arc;

/// Asks the moderator model which participant should speak next.
///
/// The selector only checks that the reply names a well-formed participant
/// id. Whether that id belongs to the discussion is up to the caller.
#[derive(Clone)]
pub struct SpeakerSelector {
    query: StructuredQuery,
}

impl SpeakerSelector {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: ExecutionParams) -> Self {
        Self {
            query: StructuredQuery::new(gateway, model, params),
        }
    }

    pub(crate) fn from_query(query: StructuredQuery) -> Self {
        Self { query }
    }

    pub async fn select(
        &self,
        history: &HistorySnapshot,
        participants: &ParticipantRegistry,
        topic: &str,
    ) -> Result<SelectionDecision, ManagerError> {
        let messages = history.framed(
            FramingPrompt::selection(topic, &participants.render_descriptions()),
            FramingPrompt::selection_instruction(),
        );
        let reply = self
            .query
            .ask::<String>(messages, ReplyShape::Selection)
            .await?;

        let id = ParticipantId::new(reply.result.trim()).map_err(|e| DecisionParseError {
            shape: ReplyShape::Selection,
            detail: e.to_string(),
            raw: reply.result.clone(),
        })?;
        Ok(Decision::new(id, reply.reason))
    }
}
