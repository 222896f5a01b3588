//! The participants taking part in one discussion.

use super::types::OrchestrationError;
use crate::ports::participant::Participant;
use roundtable_domain::{ParticipantId, ParticipantRegistry};
use std::sync::Arc;

/// Participants of a group chat, together with the registry the moderator
/// selects from.
///
/// Built once per run and read-only afterwards.
#[derive(Clone)]
pub struct ParticipantRoster {
    participants: Vec<Arc<dyn Participant>>,
    registry: ParticipantRegistry,
}

impl ParticipantRoster {
    /// Fails with [`OrchestrationError::InvalidConfiguration`] when the list
    /// is empty or two participants share a name.
    pub fn new(participants: Vec<Arc<dyn Participant>>) -> Result<Self, OrchestrationError> {
        let registry = ParticipantRegistry::new(participants.iter().map(|p| p.profile()).collect())
            .map_err(|e| OrchestrationError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            participants,
            registry,
        })
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Arc<dyn Participant>> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participant names, in roster order
    pub fn names(&self) -> Vec<String> {
        self.registry.ids().map(|id| id.to_string()).collect()
    }
}

impl std::fmt::Debug for ParticipantRoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticipantRoster")
            .field("participants", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedParticipant;

    fn participant(name: &str) -> Arc<dyn Participant> {
        Arc::new(ScriptedParticipant::talker(name))
    }

    #[test]
    fn test_roster_lookup() {
        let roster = ParticipantRoster::new(vec![participant("Farmer"), participant("Artist")]).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.names(), ["Farmer", "Artist"]);

        let artist = ParticipantId::new("Artist").unwrap();
        assert_eq!(roster.get(&artist).unwrap().id(), &artist);
        assert!(roster.get(&ParticipantId::new("Ghost").unwrap()).is_none());
    }

    #[test]
    fn test_empty_roster_is_invalid() {
        let err = ParticipantRoster::new(vec![]).unwrap_err();
        assert!(matches!(err, OrchestrationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_duplicate_names_are_invalid() {
        let err = ParticipantRoster::new(vec![participant("Farmer"), participant("Farmer")])
            .unwrap_err();
        match err {
            OrchestrationError::InvalidConfiguration(msg) => assert!(msg.contains("Farmer")),
            other => panic!("expected invalid configuration, got {other:?}"),
        }
    }
}
