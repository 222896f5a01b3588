//! Discussion settings from TOML (`[discussion]` section)

use roundtable_domain::{CapPrecedence, ConfigIssue, ConfigIssueCode, DomainError, RunConfig};
use serde::{Deserialize, Serialize};

/// Default topic of the sample discussion
pub const DEFAULT_TOPIC: &str = "How should your government approach taxation?";
/// Default opening request
pub const DEFAULT_TASK: &str = "Please start the discussion.";
/// Default hard cap on participant turns
pub const DEFAULT_MAX_ROUNDS: usize = 10;
/// Caps above this are accepted with a warning
pub const LARGE_ROUND_CAP: usize = 50;

/// Which moderator drives the discussion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagerKind {
    /// Decisions are made by the moderator model
    #[default]
    Llm,
    /// Fixed rotation, no model calls for decisions
    RoundRobin,
}

impl ManagerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagerKind::Llm => "llm",
            ManagerKind::RoundRobin => "round_robin",
        }
    }
}

impl std::str::FromStr for ManagerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "llm" => Ok(ManagerKind::Llm),
            "round_robin" | "roundrobin" => Ok(ManagerKind::RoundRobin),
            other => Err(format!("unknown manager '{}'", other)),
        }
    }
}

/// Discussion settings from TOML
///
/// # Example
///
/// ```toml
/// [discussion]
/// topic = "How should your government approach taxation?"
/// task = "Please start the discussion."
/// max_rounds = 10
/// cap_precedence = "after_evaluator"   # or "before_evaluator"
/// manager = "llm"                      # or "round_robin"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    pub topic: String,
    pub task: String,
    pub max_rounds: usize,
    pub cap_precedence: String,
    pub manager: String,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            task: DEFAULT_TASK.to_string(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            cap_precedence: CapPrecedence::default().as_str().to_string(),
            manager: ManagerKind::default().as_str().to_string(),
        }
    }
}

impl FileDiscussionConfig {
    /// Parse `cap_precedence`, falling back to the default on unknown values.
    pub fn parse_cap_precedence(&self) -> (CapPrecedence, Vec<ConfigIssue>) {
        match self.cap_precedence.parse::<CapPrecedence>() {
            Ok(p) => (p, Vec::new()),
            Err(e) => (
                CapPrecedence::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "discussion.cap_precedence".to_string(),
                        value: self.cap_precedence.clone(),
                        valid_values: vec![
                            "after_evaluator".to_string(),
                            "before_evaluator".to_string(),
                        ],
                    },
                    format!("discussion.cap_precedence: {}", e),
                )],
            ),
        }
    }

    /// Parse `manager`, falling back to the model-backed moderator on unknown values.
    pub fn parse_manager(&self) -> (ManagerKind, Vec<ConfigIssue>) {
        match self.manager.parse::<ManagerKind>() {
            Ok(kind) => (kind, Vec::new()),
            Err(e) => (
                ManagerKind::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "discussion.manager".to_string(),
                        value: self.manager.clone(),
                        valid_values: vec!["llm".to_string(), "round_robin".to_string()],
                    },
                    format!("discussion.manager: {}", e),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.topic.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyField {
                    field: "discussion.topic".to_string(),
                },
                "discussion.topic cannot be empty",
            ));
        }
        if self.task.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyField {
                    field: "discussion.task".to_string(),
                },
                "discussion.task cannot be empty",
            ));
        }

        if self.max_rounds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "discussion.max_rounds".to_string(),
                    value: 0,
                },
                "discussion.max_rounds must be at least 1",
            ));
        } else if self.max_rounds > LARGE_ROUND_CAP {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::LargeRoundCap {
                    max_rounds: self.max_rounds,
                },
                format!(
                    "discussion.max_rounds = {} allows a very long (and costly) discussion",
                    self.max_rounds
                ),
            ));
        }

        issues.extend(self.parse_cap_precedence().1);
        issues.extend(self.parse_manager().1);
        issues
    }

    /// Build the validated run configuration.
    pub fn to_run_config(&self) -> Result<RunConfig, DomainError> {
        Ok(RunConfig::new(self.topic.clone(), self.max_rounds)?
            .with_cap_precedence(self.parse_cap_precedence().0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sample_discussion() {
        let config = FileDiscussionConfig::default();
        assert_eq!(config.topic, DEFAULT_TOPIC);
        assert_eq!(config.task, DEFAULT_TASK);
        assert_eq!(config.max_rounds, 10);
        assert!(config.validate().is_empty());

        let run = config.to_run_config().unwrap();
        assert_eq!(run.max_rounds().get(), 10);
        assert_eq!(run.cap_precedence(), CapPrecedence::AfterEvaluator);
    }

    #[test]
    fn test_zero_rounds_is_an_error() {
        let config = FileDiscussionConfig {
            max_rounds: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(config.to_run_config().is_err());
    }

    #[test]
    fn test_large_round_cap_is_a_warning() {
        let config = FileDiscussionConfig {
            max_rounds: 200,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::LargeRoundCap { max_rounds: 200 }
        );
    }

    #[test]
    fn test_enum_values() {
        let config = FileDiscussionConfig {
            cap_precedence: "before-evaluator".to_string(),
            manager: "round-robin".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_cap_precedence().0, CapPrecedence::BeforeEvaluator);
        assert_eq!(config.parse_manager().0, ManagerKind::RoundRobin);
        assert!(config.validate().is_empty());

        let config = FileDiscussionConfig {
            manager: "dictator".to_string(),
            ..Default::default()
        };
        let (kind, issues) = config.parse_manager();
        assert_eq!(kind, ManagerKind::Llm);
        assert!(issues[0].is_error());
    }
}
