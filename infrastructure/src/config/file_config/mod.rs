//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application and
//! domain types by the `to_*` / `parse_*` helpers.

mod discussion;
mod logging;
mod models;
mod participants;
mod provider;
mod retry;

pub use discussion::{
    DEFAULT_MAX_ROUNDS, DEFAULT_TASK, DEFAULT_TOPIC, FileDiscussionConfig, ManagerKind,
};
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use participants::FileParticipantConfig;
pub use provider::{FileProviderConfig, OPENAI_BASE_URL, ProviderConfigError, ProviderKind};
pub use retry::FileRetryConfig;

use super::presets::default_personas;
use roundtable_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Topic, task and round cap
    pub discussion: FileDiscussionConfig,
    /// Moderator and default participant models
    pub models: FileModelsConfig,
    /// Chat completions endpoint
    pub provider: FileProviderConfig,
    /// Failure handling for model calls
    pub retry: FileRetryConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
    /// Participants; the built-in personas are used when empty
    pub participants: Vec<FileParticipantConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.discussion.validate());
        issues.extend(self.models.parse_moderator().1);
        issues.extend(self.models.parse_participant().1);
        issues.extend(self.provider.validate());
        issues.extend(self.retry.validate());
        issues.extend(participants::validate_participants(&self.participants));

        issues
    }

    /// Configured participants, or the built-in personas when none are configured.
    pub fn effective_participants(&self) -> Vec<FileParticipantConfig> {
        if self.participants.is_empty() {
            default_personas()
        } else {
            self.participants.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{CapPrecedence, Model};
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[discussion]
topic = "Should cities ban cars?"
task = "Open the debate."
max_rounds = 6
cap_precedence = "before_evaluator"
manager = "round_robin"

[models]
moderator = "gpt-4.1"
participant = "gpt-4o-mini"

[provider]
kind = "azure"
base_url = "https://example.openai.azure.com"
api_key_env = "AZURE_OPENAI_API_KEY"

[retry]
max_attempts = 4
parse_retries = 2

[logging]
conversation_log = "logs/cars.jsonl"

[[participants]]
name = "Cyclist"
description = "Commutes by bike every day."
instructions = "You love bikes."

[[participants]]
name = "Trucker"
description = "Drives freight across the country."
instructions = "You depend on roads."
model = "gpt-4.1"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discussion.topic, "Should cities ban cars?");
        assert_eq!(config.discussion.max_rounds, 6);
        assert_eq!(
            config.discussion.parse_cap_precedence().0,
            CapPrecedence::BeforeEvaluator
        );
        assert_eq!(config.discussion.parse_manager().0, ManagerKind::RoundRobin);
        assert_eq!(config.models.parse_moderator().0, Model::Gpt41);
        assert_eq!(config.provider.parse_kind(), Ok(ProviderKind::Azure));
        assert_eq!(config.provider.api_version, "2024-10-21");
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.retry.initial_backoff_ms, 500);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("logs/cars.jsonl"))
        );
        assert_eq!(config.participants.len(), 2);
        assert_eq!(config.participants[1].model.as_deref(), Some("gpt-4.1"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[discussion]
max_rounds = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discussion.max_rounds, 3);
        // Defaults should apply
        assert_eq!(config.discussion.topic, DEFAULT_TOPIC);
        assert_eq!(config.discussion.task, DEFAULT_TASK);
        assert!(config.participants.is_empty());
        assert_eq!(config.effective_participants().len(), 8);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[discussion]
topic = ""
max_rounds = 0

[[participants]]
name = "Farmer"
description = "a"

[[participants]]
name = "Farmer"
description = "b"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
    }

    #[test]
    fn test_serializes_back_to_toml() {
        let config = FileConfig {
            participants: default_personas(),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
