//! Task value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The task that opens a discussion (Value Object)
///
/// Becomes the seed message of the conversation history, so it must carry
/// some text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Task {
    content: String,
}

impl Task {
    /// Create a new task, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyTask);
        }
        Ok(Self { content })
    }

    /// Get the task content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Task {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Task::new(value)
    }
}

impl TryFrom<&str> for Task {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Task::new(value)
    }
}

impl From<Task> for String {
    fn from(task: Task) -> Self {
        task.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Please start the discussion.").unwrap();
        assert_eq!(task.content(), "Please start the discussion.");
    }

    #[test]
    fn test_empty_task_rejected() {
        assert_eq!(Task::new(""), Err(DomainError::EmptyTask));
        assert_eq!(Task::new("  \n "), Err(DomainError::EmptyTask));
    }

    #[test]
    fn test_task_serde_validates() {
        let task: Task = serde_json::from_str(r#""Discuss taxation""#).unwrap();
        assert_eq!(task.content(), "Discuss taxation");
        assert!(serde_json::from_str::<Task>(r#""   ""#).is_err());
    }
}
