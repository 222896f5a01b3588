//! Chat completions gateway (OpenAI and Azure OpenAI)
//!
//! Implements the [`LlmGateway`](roundtable_application::LlmGateway) port
//! over HTTP with `reqwest`.

mod gateway;
mod types;

pub use gateway::{ApiStyle, OpenAiGateway, OpenAiGatewayConfig};
