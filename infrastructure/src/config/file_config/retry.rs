//! Retry settings from TOML (`[retry]` section)

use roundtable_application::{ExecutionParams, RetryPolicy};
use roundtable_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry settings from TOML
///
/// # Example
///
/// ```toml
/// [retry]
/// max_attempts = 3          # per model call, transient failures only
/// initial_backoff_ms = 500
/// max_backoff_ms = 8000
/// parse_retries = 1         # corrective re-asks for unparsable decisions
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub parse_retries: usize,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_attempts: params.retry.max_attempts,
            initial_backoff_ms: params.retry.initial_backoff.as_millis() as u64,
            max_backoff_ms: params.retry.max_backoff.as_millis() as u64,
            parse_retries: params.parse_retries,
        }
    }
}

impl FileRetryConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        let retry = RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_backoff(
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );
        ExecutionParams::default()
            .with_retry(retry)
            .with_parse_retries(self.parse_retries)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "retry.max_attempts".to_string(),
                    value: 0,
                },
                "retry.max_attempts must be at least 1",
            ));
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "retry.max_backoff_ms".to_string(),
                    value: self.max_backoff_ms as i64,
                },
                "retry.max_backoff_ms is below retry.initial_backoff_ms and will be raised to it",
            ));
        }
        issues
    }
}
