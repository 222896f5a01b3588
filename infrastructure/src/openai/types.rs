//! Wire types of the chat completions API and conversions from domain types.

use roundtable_domain::{ChatRequest, PromptMessage, ResponseFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// ─── Domain → Wire ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest<'a> {
    /// Omitted for Azure, where the deployment in the URL selects the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl<'a> From<&'a PromptMessage> for WireMessage<'a> {
    fn from(msg: &'a PromptMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
            name: msg.name.as_deref().map(sanitize_name),
        }
    }
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: Option<&'a str>, request: &'a ChatRequest) -> Self {
        Self {
            model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            response_format: convert_response_format(&request.response_format),
        }
    }
}

/// The API only accepts `[A-Za-z0-9_-]{1,64}` as a message name.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

pub(crate) fn convert_response_format(format: &ResponseFormat) -> Option<Value> {
    match format {
        ResponseFormat::Text => None,
        ResponseFormat::JsonObject { name, schema } => Some(json!({
            "type": "json_schema",
            "json_schema": {
                "name": name,
                "strict": true,
                "schema": schema,
            }
        })),
    }
}

// ─── Wire → Domain ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
    pub refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// Pull the human-readable message out of an error body, if it has one.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
