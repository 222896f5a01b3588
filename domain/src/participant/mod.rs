//! Participants of a group chat.
//!
//! - [`entities::ParticipantId`] - validated speaker identifier
//! - [`entities::ParticipantProfile`] - id plus the description shown to the moderator
//! - [`registry::ParticipantRegistry`] - the fixed set of eligible speakers

pub mod entities;
pub mod registry;
