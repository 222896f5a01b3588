//! Logging settings from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging settings from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// conversation_log = "logs/roundtable.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every decision and turn (disabled when unset)
    pub conversation_log: Option<PathBuf>,
}
