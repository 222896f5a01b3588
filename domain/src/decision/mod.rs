//! Moderator decisions.
//!
//! - [`value_objects::Decision`] - a machine-usable value plus its justification
//! - [`parsing`] - turning a model's reply into a structured decision

pub mod parsing;
pub mod value_objects;
