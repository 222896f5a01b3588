//! Orchestration domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Round counter of one run
///
/// Invariant: `round <= max_rounds`. [`advance`](Self::advance) refuses to
/// move past the cap, so the cap holds no matter what a policy decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    round: usize,
    max_rounds: NonZeroUsize,
}

impl RoundState {
    pub fn new(max_rounds: NonZeroUsize) -> Self {
        Self {
            round: 0,
            max_rounds,
        }
    }

    /// Completed participant turns so far
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds.get()
    }

    /// Whether the hard cap has been reached
    pub fn is_exhausted(&self) -> bool {
        self.round >= self.max_rounds.get()
    }

    pub fn remaining(&self) -> usize {
        self.max_rounds.get() - self.round
    }

    /// Record one completed participant turn
    pub fn advance(&mut self) -> Result<usize, DomainError> {
        if self.is_exhausted() {
            return Err(DomainError::RoundLimitExceeded {
                max: self.max_rounds.get(),
            });
        }
        self.round += 1;
        Ok(self.round)
    }
}

/// Phase of a group chat run
///
/// ```text
/// Running ──► Terminating ──► Done
///    │             │
///    └─────────────┴──► Failed
/// ```
///
/// `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Running,
    Terminating,
    Done,
    Failed,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Running => "running",
            RunPhase::Terminating => "terminating",
            RunPhase::Done => "done",
            RunPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed)
    }

    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Running, RunPhase::Terminating)
                | (RunPhase::Terminating, RunPhase::Done)
                | (RunPhase::Running, RunPhase::Failed)
                | (RunPhase::Terminating, RunPhase::Failed)
        )
    }

    /// Move to `next`, rejecting transitions the machine does not allow
    pub fn transition(&mut self, next: RunPhase) -> Result<(), DomainError> {
        if !self.can_transition_to(next) {
            return Err(DomainError::InvalidPhaseTransition {
                from: self.as_str(),
                to: next.as_str(),
            });
        }
        *self = next;
        Ok(())
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
