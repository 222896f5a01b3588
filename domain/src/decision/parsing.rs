//! Structured reply parsing for moderator decisions.
//!
//! Decision queries ask the model for a JSON object of the form
//! `{"result": ..., "reason": "..."}`. Models do not always comply exactly,
//! so the parser accepts:
//!
//! 1. A bare JSON object
//! 2. A reply wrapped in a markdown code fence
//! 3. A JSON object surrounded by prose (first `{` to last `}`)
//!
//! Anything else is a [`DecisionParseError`]. Parsing never panics and never
//! guesses a value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// The expected shape of a decision reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyShape {
    /// `{"result": bool, "reason": string}`
    Boolean,
    /// `{"result": participant-id, "reason": string}`
    Selection,
    /// `{"result": string, "reason": string}`
    Summary,
}

impl ReplyShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyShape::Boolean => "boolean_result",
            ReplyShape::Selection => "selection_result",
            ReplyShape::Summary => "summary_result",
        }
    }

    /// Human-readable example of the expected object, used in prompts
    pub fn hint(&self) -> &'static str {
        match self {
            ReplyShape::Boolean => r#"{"result": true or false, "reason": "<why>"}"#,
            ReplyShape::Selection => r#"{"result": "<participant name>", "reason": "<why>"}"#,
            ReplyShape::Summary => r#"{"result": "<summary text>", "reason": "<why>"}"#,
        }
    }

    /// JSON schema for providers that support schema-constrained output
    pub fn schema(&self) -> Value {
        let result_type = match self {
            ReplyShape::Boolean => "boolean",
            ReplyShape::Selection | ReplyShape::Summary => "string",
        };
        json!({
            "type": "object",
            "properties": {
                "result": { "type": result_type },
                "reason": { "type": "string" }
            },
            "required": ["result", "reason"],
            "additionalProperties": false
        })
    }
}

impl std::fmt::Display for ReplyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded decision reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructuredReply<T> {
    pub result: T,
    #[serde(default)]
    pub reason: String,
}

/// A decision reply could not be parsed into its expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not parse {shape} reply: {detail}")]
pub struct DecisionParseError {
    pub shape: ReplyShape,
    pub detail: String,
    /// The raw model output, kept for diagnostics
    pub raw: String,
}

impl DecisionParseError {
    fn new(shape: ReplyShape, detail: impl Into<String>, raw: &str) -> Self {
        Self {
            shape,
            detail: detail.into(),
            raw: raw.to_string(),
        }
    }
}

/// Parse a model reply into a [`StructuredReply`].
///
/// # Examples
///
/// ```
/// use roundtable_domain::{parse_structured_reply, ReplyShape};
///
/// let reply = parse_structured_reply::<bool>(
///     r#"{"result": false, "reason": "Only one perspective so far"}"#,
///     ReplyShape::Boolean,
/// )
/// .unwrap();
/// assert!(!reply.result);
/// assert_eq!(reply.reason, "Only one perspective so far");
/// ```
pub fn parse_structured_reply<T: DeserializeOwned>(
    raw: &str,
    shape: ReplyShape,
) -> Result<StructuredReply<T>, DecisionParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DecisionParseError::new(shape, "empty response", raw));
    }

    // Whole reply first, so backticks inside a string value are left alone
    if let Ok(reply) = serde_json::from_str::<StructuredReply<T>>(trimmed) {
        return Ok(reply);
    }

    let candidate = extract_json_object(trimmed)
        .ok_or_else(|| DecisionParseError::new(shape, "no JSON object found", raw))?;

    serde_json::from_str::<StructuredReply<T>>(candidate)
        .map_err(|e| DecisionParseError::new(shape, e.to_string(), raw))
}

/// Locate the JSON object in a reply, tolerating a wrapping code fence and prose
fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_code_fence(text).unwrap_or(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Body of a reply that is wrapped in a markdown fence, if it is one
fn strip_code_fence(text: &str) -> Option<&str> {
    let after_open = text.strip_prefix("```")?;
    // Skip an optional language tag on the fence line
    let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_open[body_start..];
    let close = body.rfind("```")?;
    Some(body[..close].trim())
}
