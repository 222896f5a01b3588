//! Participant definitions from TOML (`[[participants]]` tables)

use super::models::FileModelsConfig;
use roundtable_domain::{ConfigIssue, ConfigIssueCode, Model, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One participant from TOML
///
/// # Example
///
/// ```toml
/// [[participants]]
/// name = "Farmer"
/// description = "A rural farmer from Southeast Asia."
/// instructions = "You're a farmer from Southeast Asia. ..."
/// model = "gpt-4o"   # optional, defaults to [models].participant
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantConfig {
    pub name: String,
    /// Shown to the moderator when it picks the next speaker
    pub description: String,
    /// System prompt of the participant
    pub instructions: String,
    pub model: Option<String>,
}

impl FileParticipantConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            instructions: instructions.into(),
            model: None,
        }
    }

    /// Model for this participant, falling back to `default`.
    pub fn parse_model(&self, default: &Model) -> Model {
        match &self.model {
            Some(m) if !m.trim().is_empty() => Model::from(m.trim()),
            _ => default.clone(),
        }
    }
}

/// Check names, uniqueness and per-participant model names.
pub(crate) fn validate_participants(participants: &[FileParticipantConfig]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (i, p) in participants.iter().enumerate() {
        if let Err(e) = ParticipantId::new(p.name.as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidParticipantName {
                    name: p.name.clone(),
                },
                format!("participants[{}].name: {}", i, e),
            ));
        } else if !seen.insert(p.name.as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateParticipant {
                    name: p.name.clone(),
                },
                format!("participants[{}]: '{}' is defined more than once", i, p.name),
            ));
        }

        if p.description.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyField {
                    field: format!("participants[{}].description", i),
                },
                format!(
                    "participants[{}].description is empty; the moderator will only see the name '{}'",
                    i, p.name
                ),
            ));
        }

        let field = format!("participants[{}].model", i);
        issues.extend(FileModelsConfig::parse_model(&field, p.model.as_ref()).1);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str) -> FileParticipantConfig {
        FileParticipantConfig::new(name, format!("{name} description"), "Be yourself.")
    }

    #[test]
    fn test_valid_participants() {
        let issues = validate_participants(&[participant("Farmer"), participant("TaxiDriver")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_invalid_and_duplicate_names() {
        let issues = validate_participants(&[
            participant("Taxi Driver"),
            participant("Farmer"),
            participant("Farmer"),
        ]);
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::InvalidParticipantName { .. }
        ));
        assert_eq!(
            issues[1].code,
            ConfigIssueCode::DuplicateParticipant {
                name: "Farmer".to_string()
            }
        );
    }

    #[test]
    fn test_empty_description_is_a_warning() {
        let mut p = participant("Farmer");
        p.description = String::new();
        let issues = validate_participants(&[p]);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_model_fallback() {
        let mut p = participant("Farmer");
        assert_eq!(p.parse_model(&Model::Gpt41), Model::Gpt41);
        p.model = Some("gpt-4o-mini".to_string());
        assert_eq!(p.parse_model(&Model::Gpt41), Model::Gpt4oMini);
    }
}
