//! Structured configuration issues.
//!
//! Configuration is validated in the infrastructure layer (where the file
//! format lives), but the issue vocabulary is shared so that the CLI can
//! report problems without knowing where they came from.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required text field is empty.
    EmptyField { field: String },
    /// A numeric field is outside its valid range.
    OutOfRange { field: String, value: i64 },
    /// An enum-like string field has an unknown value.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A participant name is not a valid speaker id.
    InvalidParticipantName { name: String },
    /// Two participants share a name.
    DuplicateParticipant { name: String },
    /// The round cap is unusually high.
    LargeRoundCap { max_rounds: usize },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_constructors() {
        let issue = ConfigIssue::error(
            ConfigIssueCode::EmptyField {
                field: "discussion.topic".into(),
            },
            "discussion.topic must not be empty",
        );
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: discussion.topic must not be empty");

        let warning = ConfigIssue::warning(
            ConfigIssueCode::LargeRoundCap { max_rounds: 99 },
            "discussion.max_rounds is very high",
        );
        assert!(!warning.is_error());
    }
}
