//! Participant registry

use super::entities::{ParticipantId, ParticipantProfile};
use crate::core::error::DomainError;

/// The fixed set of eligible speakers for one run.
///
/// Keeps registration order, which is also the order participants are
/// listed to the moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRegistry {
    profiles: Vec<ParticipantProfile>,
}

impl ParticipantRegistry {
    /// Build a registry, rejecting an empty set and duplicate ids
    pub fn new(profiles: Vec<ParticipantProfile>) -> Result<Self, DomainError> {
        if profiles.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.id == profile.id) {
                return Err(DomainError::DuplicateParticipant(profile.id.to_string()));
            }
        }
        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ParticipantProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Position of a participant in registration order
    pub fn position(&self, id: &ParticipantId) -> Option<usize> {
        self.profiles.iter().position(|p| &p.id == id)
    }

    pub fn profiles(&self) -> &[ParticipantProfile] {
        &self.profiles
    }

    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.profiles.iter().map(|p| &p.id)
    }

    /// Ordered id → description pairs
    pub fn descriptions(&self) -> impl Iterator<Item = (&ParticipantId, &str)> {
        self.profiles.iter().map(|p| (&p.id, p.description.as_str()))
    }

    /// One `Id: description` line per participant
    pub fn render_descriptions(&self) -> String {
        self.descriptions()
            .map(|(id, description)| format!("{}: {}", id, description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
