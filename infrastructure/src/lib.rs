//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the chat completions gateway, model-backed
//! participants, the JSONL conversation log and configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod participants;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDiscussionConfig, FileParticipantConfig, FileProviderConfig,
    ManagerKind, ProviderConfigError, ProviderKind, default_personas,
};
pub use logging::JsonlConversationLogger;
pub use openai::{ApiStyle, OpenAiGateway, OpenAiGatewayConfig};
pub use participants::LlmParticipant;
