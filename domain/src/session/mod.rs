//! Language-model request shapes.
//!
//! - [`entities::Role`] - role tag of a message
//! - [`entities::PromptMessage`] - a role-tagged message sent to a model
//! - [`entities::ChatRequest`] - a complete request (messages + response format)

pub mod entities;
