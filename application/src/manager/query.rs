//! Structured decision query shared by the LLM-backed decision services.

use super::ManagerError;
use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use roundtable_domain::{
    ChatRequest, FramingPrompt, Model, PromptMessage, ReplyShape, ResponseFormat,
    StructuredReply, parse_structured_reply,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends a framed copy of the history to the moderator model and parses the
/// `{result, reason}` reply.
///
/// Transient gateway failures are retried per the [`RetryPolicy`](crate::RetryPolicy).
/// Unparsable replies are retried `parse_retries` times: the bad reply and
/// a corrective instruction are appended to the transient copy and the
/// request is sent again.
#[derive(Clone)]
pub(crate) struct StructuredQuery {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    params: ExecutionParams,
}

impl StructuredQuery {
    pub(crate) fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: ExecutionParams) -> Self {
        Self {
            gateway,
            model,
            params,
        }
    }

    fn response_format(&self, shape: ReplyShape) -> ResponseFormat {
        if self.model.supports_structured_output() {
            ResponseFormat::JsonObject {
                name: shape.as_str().to_string(),
                schema: shape.schema(),
            }
        } else {
            ResponseFormat::Text
        }
    }

    pub(crate) async fn ask<T: DeserializeOwned>(
        &self,
        mut messages: Vec<PromptMessage>,
        shape: ReplyShape,
    ) -> Result<StructuredReply<T>, ManagerError> {
        let mut parse_failures = 0;
        loop {
            let request = ChatRequest::new(messages.clone())
                .with_response_format(self.response_format(shape));
            debug!(
                "Sending {} query to {} ({} messages, {} chars)",
                shape,
                self.model,
                request.messages.len(),
                request.content_len()
            );

            let raw = self
                .params
                .retry
                .run(shape.as_str(), || self.gateway.complete(&self.model, &request))
                .await?;

            match parse_structured_reply::<T>(&raw, shape) {
                Ok(reply) => return Ok(reply),
                Err(e) if parse_failures < self.params.parse_retries => {
                    parse_failures += 1;
                    warn!(
                        "{} (retry {}/{})",
                        e, parse_failures, self.params.parse_retries
                    );
                    messages.push(PromptMessage::assistant(raw));
                    messages.push(PromptMessage::user(FramingPrompt::corrective_instruction(&e)));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
