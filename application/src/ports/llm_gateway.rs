//! LLM Gateway port
//!
//! Defines the interface for communicating with chat-completion providers.
//! One call takes a fully assembled [`ChatRequest`] and returns the reply text.

use async_trait::async_trait;
use roundtable_domain::{ChatRequest, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed.
    ///
    /// Timeouts, dropped connections, rate limiting and server-side (5xx)
    /// failures are transient. Malformed requests, unknown models and
    /// unreadable responses are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_)
                | GatewayError::RateLimited(_)
                | GatewayError::ServiceUnavailable(_)
                | GatewayError::Timeout
        )
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a chat request to `model` and return the text of the reply.
    async fn complete(&self, model: &Model, request: &ChatRequest) -> Result<String, GatewayError>;
}
