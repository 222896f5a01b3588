//! Termination evaluator

use super::ManagerError;
use super::query::StructuredQuery;
use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use roundtable_domain::{BooleanDecision, Decision, FramingPrompt, HistorySnapshot, Model, ReplyShape};
use std::sync::Arc;

/// Reason given when the human is not consulted
pub const NO_USER_INPUT_REASON: &str = "This group chat manager does not require user input.";

/// Asks the moderator model whether the discussion has reached a conclusion.
#[derive(Clone)]
pub struct TerminationEvaluator {
    query: StructuredQuery,
}

impl TerminationEvaluator {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: ExecutionParams) -> Self {
        Self {
            query: StructuredQuery::new(gateway, model, params),
        }
    }

    pub(crate) fn from_query(query: StructuredQuery) -> Self {
        Self { query }
    }

    pub async fn evaluate(
        &self,
        history: &HistorySnapshot,
        topic: &str,
    ) -> Result<BooleanDecision, ManagerError> {
        let messages = history.framed(
            FramingPrompt::termination(topic),
            FramingPrompt::termination_instruction(),
        );
        let reply = self.query.ask::<bool>(messages, ReplyShape::Boolean).await?;
        Ok(Decision::new(reply.result, reply.reason))
    }

    /// Human input is never requested.
    pub fn requires_user_input(&self, _history: &HistorySnapshot) -> BooleanDecision {
        Decision::new(false, NO_USER_INPUT_REASON)
    }
}
