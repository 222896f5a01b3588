//! Framing prompts for the moderator's decision queries
//!
//! Every decision query wraps a disposable copy of the history in a
//! system framing message (which embeds the topic) and a closing user
//! instruction. None of these messages ever enter the canonical history.

use crate::decision::parsing::{DecisionParseError, ReplyShape};

/// Templates for the three moderator decisions
pub struct FramingPrompt;

impl FramingPrompt {
    /// System framing for the termination query
    pub fn termination(topic: &str) -> String {
        format!(
            r#"You are mediator that guides a discussion on the topic of '{topic}'.
You need to determine if the discussion has reached a conclusion.
If you would like to end the discussion, respond with true. Otherwise, respond with false.

{}"#,
            Self::json_shape_hint(ReplyShape::Boolean)
        )
    }

    /// Closing instruction for the termination query
    pub fn termination_instruction() -> &'static str {
        "Determine if the discussion should end."
    }

    /// System framing for the speaker selection query
    ///
    /// `participants` is one `Name: description` line per participant.
    pub fn selection(topic: &str, participants: &str) -> String {
        format!(
            r#"You are mediator that guides a discussion on the topic of '{topic}'.
You need to select the next participant to speak.
Here are the names and descriptions of the participants:
{participants}

Respond with the name of exactly one participant from the list above.
{}"#,
            Self::json_shape_hint(ReplyShape::Selection)
        )
    }

    /// Closing instruction for the speaker selection query
    pub fn selection_instruction() -> &'static str {
        "Now select the next participant to speak."
    }

    /// System framing for the result filter
    pub fn result_filter(topic: &str) -> String {
        format!(
            r#"You are mediator that guides a discussion on the topic of '{topic}'.
You have just concluded the discussion.
Please summarize the discussion and provide a closing statement.

{}"#,
            Self::json_shape_hint(ReplyShape::Summary)
        )
    }

    /// Closing instruction for the result filter
    pub fn result_filter_instruction() -> &'static str {
        "Please summarize the discussion."
    }

    /// Output contract appended to every framing prompt
    pub fn json_shape_hint(shape: ReplyShape) -> String {
        format!(
            "Reply with a single JSON object and nothing else, in the form: {}",
            shape.hint()
        )
    }

    /// Follow-up instruction after a reply that could not be parsed
    pub fn corrective_instruction(error: &DecisionParseError) -> String {
        format!(
            r#"Your previous reply could not be used ({}).
{}"#,
            error.detail,
            Self::json_shape_hint(error.shape)
        )
    }
}
