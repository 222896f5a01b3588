//! Orchestration value objects - run configuration and termination reasons.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Which check runs first when both the hard cap and the moderator's
/// termination decision could end a discussion in the same iteration.
///
/// The cap is enforced under both policies; only the order (and therefore
/// whether the termination query is still made at the cap) differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPrecedence {
    /// Ask the moderator first, then apply the cap. A positive decision at
    /// the cap is reported as the moderator's reason.
    #[default]
    AfterEvaluator,
    /// Apply the cap first; the moderator is not asked once the cap is hit.
    BeforeEvaluator,
}

impl CapPrecedence {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapPrecedence::AfterEvaluator => "after_evaluator",
            CapPrecedence::BeforeEvaluator => "before_evaluator",
        }
    }
}

impl std::str::FromStr for CapPrecedence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "after_evaluator" | "after" => Ok(CapPrecedence::AfterEvaluator),
            "before_evaluator" | "before" => Ok(CapPrecedence::BeforeEvaluator),
            other => Err(format!("unknown cap precedence '{}'", other)),
        }
    }
}

/// Configuration accepted at run start
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    topic: String,
    max_rounds: NonZeroUsize,
    cap_precedence: CapPrecedence,
}

impl RunConfig {
    /// Create a config, rejecting an empty topic and a zero round cap
    pub fn new(topic: impl Into<String>, max_rounds: usize) -> Result<Self, DomainError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(DomainError::EmptyTopic);
        }
        let max_rounds = NonZeroUsize::new(max_rounds).ok_or(DomainError::InvalidMaxRounds)?;
        Ok(Self {
            topic,
            max_rounds,
            cap_precedence: CapPrecedence::default(),
        })
    }

    pub fn with_cap_precedence(mut self, precedence: CapPrecedence) -> Self {
        self.cap_precedence = precedence;
        self
    }

    /// Text inserted into every framing prompt
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn max_rounds(&self) -> NonZeroUsize {
        self.max_rounds
    }

    pub fn cap_precedence(&self) -> CapPrecedence {
        self.cap_precedence
    }
}

/// Why a discussion stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum TerminationReason {
    /// The moderator decided the discussion reached a conclusion
    Decided(String),
    /// The configured hard cap was hit
    RoundLimit,
}

impl TerminationReason {
    pub fn is_round_limit(&self) -> bool {
        matches!(self, TerminationReason::RoundLimit)
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Decided(reason) => f.write_str(reason),
            TerminationReason::RoundLimit => f.write_str("round limit reached"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_validation() {
        let config = RunConfig::new("Taxation", 10).unwrap();
        assert_eq!(config.topic(), "Taxation");
        assert_eq!(config.max_rounds().get(), 10);
        assert_eq!(config.cap_precedence(), CapPrecedence::AfterEvaluator);

        assert_eq!(RunConfig::new(" ", 3), Err(DomainError::EmptyTopic));
        assert_eq!(
            RunConfig::new("Taxation", 0),
            Err(DomainError::InvalidMaxRounds)
        );
    }

    #[test]
    fn test_cap_precedence_parse() {
        assert_eq!(
            "before-evaluator".parse::<CapPrecedence>(),
            Ok(CapPrecedence::BeforeEvaluator)
        );
        assert_eq!(
            "AFTER_EVALUATOR".parse::<CapPrecedence>(),
            Ok(CapPrecedence::AfterEvaluator)
        );
        assert!("sometimes".parse::<CapPrecedence>().is_err());
    }

    #[test]
    fn test_round_limit_display() {
        assert_eq!(TerminationReason::RoundLimit.to_string(), "round limit reached");
        assert_eq!(
            TerminationReason::Decided("Consensus reached".into()).to_string(),
            "Consensus reached"
        );
    }
}
