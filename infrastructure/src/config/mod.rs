//! Configuration file loading for roundtable
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./roundtable.toml` or `./.roundtable.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/roundtable/config.toml`
//! 4. Fallback: `~/.config/roundtable/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod presets;

pub use file_config::{
    DEFAULT_MAX_ROUNDS, DEFAULT_TASK, DEFAULT_TOPIC, FileConfig, FileDiscussionConfig,
    FileLoggingConfig, FileModelsConfig, FileParticipantConfig, FileProviderConfig,
    FileRetryConfig, ManagerKind, OPENAI_BASE_URL, ProviderConfigError, ProviderKind,
};
pub use loader::ConfigLoader;
pub use presets::default_personas;
