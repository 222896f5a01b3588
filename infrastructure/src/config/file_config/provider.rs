//! Chat completion provider settings from TOML (`[provider]` section)

use roundtable_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Base URL used for `kind = "openai"` when none is configured
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Wire dialect of the chat completions endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Azure,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Azure => "azure",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "azure" | "azure_openai" | "azure-openai" => Ok(ProviderKind::Azure),
            other => Err(format!("unknown provider kind '{}'", other)),
        }
    }
}

/// Errors resolving provider settings into a usable connection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderConfigError {
    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("provider.base_url is required for kind = \"{0}\"")]
    MissingBaseUrl(&'static str),

    #[error("{0}")]
    InvalidKind(String),
}

/// Provider settings from TOML
///
/// # Example
///
/// ```toml
/// [provider]
/// kind = "azure"
/// base_url = "https://my-resource.openai.azure.com"
/// api_key_env = "AZURE_OPENAI_API_KEY"
/// api_version = "2024-10-21"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub kind: String,
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Azure only
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default().as_str().to_string(),
            base_url: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_version: "2024-10-21".to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileProviderConfig {
    pub fn parse_kind(&self) -> Result<ProviderKind, ProviderConfigError> {
        self.kind.parse().map_err(ProviderConfigError::InvalidKind)
    }

    /// Base URL with any trailing slash removed.
    pub fn resolved_base_url(&self) -> Result<String, ProviderConfigError> {
        let kind = self.parse_kind()?;
        match (&self.base_url, kind) {
            (Some(url), _) if !url.trim().is_empty() => {
                Ok(url.trim().trim_end_matches('/').to_string())
            }
            (_, ProviderKind::OpenAi) => Ok(OPENAI_BASE_URL.to_string()),
            (_, ProviderKind::Azure) => Err(ProviderConfigError::MissingBaseUrl(kind.as_str())),
        }
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ProviderConfigError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderConfigError::MissingApiKey(self.api_key_env.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        match self.parse_kind() {
            Err(e) => issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnumValue {
                    field: "provider.kind".to_string(),
                    value: self.kind.clone(),
                    valid_values: vec!["openai".to_string(), "azure".to_string()],
                },
                format!("provider.kind: {}", e),
            )),
            Ok(_) => {
                if let Err(e) = self.resolved_base_url() {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyField {
                            field: "provider.base_url".to_string(),
                        },
                        e.to_string(),
                    ));
                }
            }
        }

        if self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyField {
                    field: "provider.api_key_env".to_string(),
                },
                "provider.api_key_env cannot be empty",
            ));
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "provider.timeout_secs".to_string(),
                    value: 0,
                },
                "provider.timeout_secs cannot be 0",
            ));
        }

        issues
    }
}
