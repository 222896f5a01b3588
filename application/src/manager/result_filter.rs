//! Result filter

use super::ManagerError;
use super::query::StructuredQuery;
use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use roundtable_domain::{
    Decision, FramingPrompt, HistorySnapshot, Message, Model, ReplyShape, SummaryDecision,
};
use std::sync::Arc;

/// Asks the moderator model for the closing summary of the discussion.
///
/// The summary is returned as a moderator-authored assistant message placed
/// right after the last message of the history. It is not appended.
#[derive(Clone)]
pub struct ResultFilter {
    query: StructuredQuery,
}

impl ResultFilter {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: ExecutionParams) -> Self {
        Self {
            query: StructuredQuery::new(gateway, model, params),
        }
    }

    pub(crate) fn from_query(query: StructuredQuery) -> Self {
        Self { query }
    }

    pub async fn summarize(
        &self,
        history: &HistorySnapshot,
        topic: &str,
    ) -> Result<SummaryDecision, ManagerError> {
        if history.is_empty() {
            return Err(ManagerError::EmptyHistory);
        }

        let messages = history.framed(
            FramingPrompt::result_filter(topic),
            FramingPrompt::result_filter_instruction(),
        );
        let reply = self
            .query
            .ask::<String>(messages, ReplyShape::Summary)
            .await?;

        let summary = Message::moderator_summary(history.len() as u64, reply.result);
        Ok(Decision::new(summary, reply.reason))
    }
}
