//! Prompt templates for moderator decision queries

pub mod template;

pub use template::FramingPrompt;
