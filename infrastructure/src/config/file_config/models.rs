//! Model selection from TOML (`[models]` section)

use roundtable_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model selection from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// moderator = "gpt-4o"      # termination, selection and summary decisions
/// participant = "gpt-4o"    # participants without their own `model`
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub moderator: Option<String>,
    pub participant: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    pub(crate) fn parse_model(field: &str, value: Option<&String>) -> (Model, Vec<ConfigIssue>) {
        match value {
            None => (Model::default(), Vec::new()),
            Some(s) if s.trim().is_empty() => (
                Model::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: field.to_string(),
                    },
                    format!("{}: model name cannot be empty", field),
                )],
            ),
            // unknown names become Model::Custom
            Some(s) => (Model::from(s.trim()), Vec::new()),
        }
    }

    pub fn parse_moderator(&self) -> (Model, Vec<ConfigIssue>) {
        Self::parse_model("models.moderator", self.moderator.as_ref())
    }

    pub fn parse_participant(&self) -> (Model, Vec<ConfigIssue>) {
        Self::parse_model("models.participant", self.participant.as_ref())
    }
}
