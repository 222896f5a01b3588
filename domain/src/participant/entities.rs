//! Participant value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a participant (Value Object)
///
/// Unique within a run. Ids are used verbatim as speaker names in prompts,
/// so they must be non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidParticipantId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ParticipantId::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl PartialEq<str> for ParticipantId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ParticipantId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What the moderator knows about a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    /// Text used in speaker selection prompts
    pub description: String,
}

impl ParticipantProfile {
    pub fn new(id: ParticipantId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert_eq!(ParticipantId::new("Farmer").unwrap().as_str(), "Farmer");
        assert_eq!(ParticipantId::new("Spiritual_Leader").unwrap(), "Spiritual_Leader");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(ParticipantId::new("").is_err());
        assert!(ParticipantId::new("Taxi Driver").is_err());
        assert!(ParticipantId::new("Farmer\n").is_err());
    }

    #[test]
    fn test_id_deserialize_validates() {
        let id: ParticipantId = serde_json::from_str(r#""Artist""#).unwrap();
        assert_eq!(id, "Artist");
        assert!(serde_json::from_str::<ParticipantId>(r#""""#).is_err());
    }
}
