//! HTTP gateway for chat completions

use super::types::{CompletionRequest, CompletionResponse, error_message};
use crate::config::{FileProviderConfig, ProviderConfigError, ProviderKind};
use async_trait::async_trait;
use reqwest::StatusCode;
use roundtable_application::ports::llm_gateway::{GatewayError, LlmGateway};
use roundtable_domain::{ChatRequest, Model};
use std::time::Duration;
use tracing::debug;

/// URL layout and authentication of the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStyle {
    /// `{base}/chat/completions`, bearer token, model in the body
    OpenAi,
    /// `{base}/openai/deployments/{model}/chat/completions?api-version=…`,
    /// `api-key` header, model name is the deployment name
    Azure { api_version: String },
}

/// Connection settings for [`OpenAiGateway`]
#[derive(Debug, Clone)]
pub struct OpenAiGatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub style: ApiStyle,
    pub timeout: Duration,
}

impl OpenAiGatewayConfig {
    /// Resolve `[provider]` settings, reading the API key from the environment.
    pub fn from_provider(provider: &FileProviderConfig) -> Result<Self, ProviderConfigError> {
        let style = match provider.parse_kind()? {
            ProviderKind::OpenAi => ApiStyle::OpenAi,
            ProviderKind::Azure => ApiStyle::Azure {
                api_version: provider.api_version.clone(),
            },
        };
        Ok(Self {
            base_url: provider.resolved_base_url()?,
            api_key: provider.api_key()?,
            style,
            timeout: provider.timeout(),
        })
    }
}

/// [`LlmGateway`] over the chat completions HTTP API
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: OpenAiGatewayConfig,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiGatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("roundtable/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub(crate) fn endpoint(&self, model: &Model) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match &self.config.style {
            ApiStyle::OpenAi => format!("{}/chat/completions", base),
            ApiStyle::Azure { api_version } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base,
                model.as_str(),
                api_version
            ),
        }
    }

    fn body<'a>(&self, model: &'a Model, request: &'a ChatRequest) -> CompletionRequest<'a> {
        let model = match self.config.style {
            ApiStyle::OpenAi => Some(model.as_str()),
            ApiStyle::Azure { .. } => None,
        };
        CompletionRequest::new(model, request)
    }
}

/// Map an unsuccessful HTTP status to a gateway error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let detail = format!("{} {}", status.as_u16(), error_message(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(detail),
        s if s.is_server_error() => GatewayError::ServiceUnavailable(detail),
        _ => GatewayError::RequestFailed(detail),
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Text of the first choice.
pub(crate) fn first_choice_text(response: CompletionResponse) -> Result<String, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;
    match (choice.message.content, choice.message.refusal) {
        (Some(content), _) => Ok(content),
        (None, Some(refusal)) => Err(GatewayError::InvalidResponse(format!(
            "model refused: {}",
            refusal
        ))),
        (None, None) => Err(GatewayError::InvalidResponse(
            "response has no content".to_string(),
        )),
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, model: &Model, request: &ChatRequest) -> Result<String, GatewayError> {
        let url = self.endpoint(model);
        debug!(
            "POST {} ({} messages, {} chars)",
            url,
            request.messages.len(),
            request.content_len()
        );

        let builder = self.client.post(&url).json(&self.body(model, request));
        let builder = match self.config.style {
            ApiStyle::OpenAi => builder.bearer_auth(&self.config.api_key),
            ApiStyle::Azure { .. } => builder.header("api-key", &self.config.api_key),
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed = response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        first_choice_text(parsed)
    }
}
