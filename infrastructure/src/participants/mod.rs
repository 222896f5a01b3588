//! Participants backed by a chat completion model

mod llm_participant;

pub use llm_participant::LlmParticipant;
