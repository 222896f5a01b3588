//! Moderator backed by a language model

use super::query::StructuredQuery;
use super::{GroupChatManager, ManagerError, ResultFilter, SpeakerSelector, TerminationEvaluator};
use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use roundtable_domain::{
    BooleanDecision, HistorySnapshot, Model, ParticipantRegistry, SelectionDecision,
    SummaryDecision,
};
use std::sync::Arc;
use tracing::info;

/// A moderator that asks one model for every decision.
#[derive(Clone)]
pub struct LlmGroupChatManager {
    model: Model,
    termination: TerminationEvaluator,
    selection: SpeakerSelector,
    result_filter: ResultFilter,
}

impl LlmGroupChatManager {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: ExecutionParams) -> Self {
        let query = StructuredQuery::new(gateway, model.clone(), params);
        Self {
            model,
            termination: TerminationEvaluator::from_query(query.clone()),
            selection: SpeakerSelector::from_query(query.clone()),
            result_filter: ResultFilter::from_query(query),
        }
    }

    /// The moderator model
    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[async_trait]
impl GroupChatManager for LlmGroupChatManager {
    async fn should_request_user_input(
        &self,
        history: &HistorySnapshot,
    ) -> Result<BooleanDecision, ManagerError> {
        Ok(self.termination.requires_user_input(history))
    }

    async fn should_terminate(
        &self,
        history: &HistorySnapshot,
        topic: &str,
    ) -> Result<BooleanDecision, ManagerError> {
        let decision = self.termination.evaluate(history, topic).await?;
        info!(
            "Termination check: {} ({})",
            decision.value, decision.reason
        );
        Ok(decision)
    }

    async fn select_next_agent(
        &self,
        history: &HistorySnapshot,
        participants: &ParticipantRegistry,
        topic: &str,
    ) -> Result<SelectionDecision, ManagerError> {
        let decision = self.selection.select(history, participants, topic).await?;
        info!("Next speaker: {} ({})", decision.value, decision.reason);
        Ok(decision)
    }

    async fn filter_results(
        &self,
        history: &HistorySnapshot,
        topic: &str,
    ) -> Result<SummaryDecision, ManagerError> {
        self.result_filter.summarize(history, topic).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RetryPolicy;
    use crate::ports::llm_gateway::GatewayError;
    use crate::test_support::{ScriptedGateway, seeded_history};
    use roundtable_domain::{PromptMessage, ResponseFormat, Role};
    use std::time::Duration;

    fn manager(gateway: Arc<ScriptedGateway>, model: Model, params: ExecutionParams) -> LlmGroupChatManager {
        LlmGroupChatManager::new(gateway, model, params)
    }

    fn fast_params() -> ExecutionParams {
        ExecutionParams::default().with_retry(
            RetryPolicy::default()
                .with_max_attempts(3)
                .with_backoff(Duration::ZERO, Duration::ZERO),
        )
    }

    #[tokio::test]
    async fn test_parse_retry_sends_corrective_instruction() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok("I think we should keep going.".to_string()),
            Ok(r#"{"result": false, "reason": "Keep going"}"#.to_string()),
        ]));
        let history = seeded_history("Please start the discussion.").snapshot();

        let decision = manager(gateway.clone(), Model::Gpt4o, fast_params())
            .should_terminate(&history, "Taxes")
            .await
            .unwrap();
        assert!(!decision.value);

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        // first request: system, seed, instruction
        assert_eq!(requests[0].messages.len(), 3);
        // retry adds the bad reply and the correction
        let retry = &requests[1].messages;
        assert_eq!(retry.len(), 5);
        assert_eq!(
            retry[3],
            PromptMessage::assistant("I think we should keep going.")
        );
        assert_eq!(retry[4].role, Role::User);
        assert!(retry[4].content.contains("could not be used"));
    }

    #[tokio::test]
    async fn test_parse_retries_exhausted_is_fatal() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok("not json".to_string()),
            Ok("still not json".to_string()),
            Ok(r#"{"result": true, "reason": "too late"}"#.to_string()),
        ]));
        let history = seeded_history("Please start the discussion.").snapshot();

        let err = manager(gateway.clone(), Model::Gpt4o, fast_params().with_parse_retries(1))
            .should_terminate(&history, "Taxes")
            .await
            .unwrap_err();
        match err {
            ManagerError::Parse(e) => assert_eq!(e.raw, "still not json"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(gateway.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::Timeout),
            Err(GatewayError::ServiceUnavailable("503".into())),
            Ok(r#"{"result": "Farmer", "reason": "first"}"#.to_string()),
        ]));
        let history = seeded_history("Please start the discussion.").snapshot();
        let registry = crate::test_support::registry(&["Farmer"]);

        let decision = manager(gateway.clone(), Model::Gpt4o, fast_params())
            .select_next_agent(&history, &registry, "Taxes")
            .await
            .unwrap();
        assert_eq!(decision.value, "Farmer");
        assert_eq!(gateway.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::RequestFailed("401 unauthorized".into())),
            Ok(r#"{"result": true, "reason": "unused"}"#.to_string()),
        ]));
        let history = seeded_history("Please start the discussion.").snapshot();

        let err = manager(gateway.clone(), Model::Gpt4o, fast_params())
            .should_terminate(&history, "Taxes")
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::Gateway(GatewayError::RequestFailed(_))));
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_response_format_follows_model_capability() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok(r#"{"result": false, "reason": "a"}"#.to_string()),
            Ok(r#"{"result": false, "reason": "b"}"#.to_string()),
        ]));
        let history = seeded_history("Please start the discussion.").snapshot();

        manager(gateway.clone(), Model::Gpt4o, fast_params())
            .should_terminate(&history, "Taxes")
            .await
            .unwrap();
        manager(gateway.clone(), Model::O3Mini, fast_params())
            .should_terminate(&history, "Taxes")
            .await
            .unwrap();

        let requests = gateway.requests();
        assert!(matches!(
            &requests[0].response_format,
            ResponseFormat::JsonObject { name, .. } if name == "boolean_result"
        ));
        assert_eq!(requests[1].response_format, ResponseFormat::Text);
    }

    #[tokio::test]
    async fn test_user_input_needs_no_model_call() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let history = seeded_history("Please start the discussion.").snapshot();

        let decision = manager(gateway.clone(), Model::Gpt4o, fast_params())
            .should_request_user_input(&history)
            .await
            .unwrap();
        assert!(!decision.value);
        assert!(gateway.requests().is_empty());
    }
}
