//! LLM client trait and provider implementations.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

use super::types::{
    ChatRole, CompletionRequest, CompletionResponse, Provider, StopReason, TokenUsage,
};

/// LLM client trait for chat completions.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Complete a prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider for this client.
    fn provider(&self) -> Provider;
}

/// Configuration for LLM clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key
    pub api_key: String,
    /// Base URL override
    pub base_url: Option<String>,
    /// Default model
    pub default_model: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            default_model: None,
            timeout_secs: 15,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Build a reqwest client with an explicit request timeout.
///
/// Proxy auto-detection can fail in sandboxed environments; retry without
/// proxies before giving up on the builder.
pub(crate) fn build_http_client(timeout: Duration, user_agent: Option<&str>) -> Result<Client> {
    let builder = || {
        let b = Client::builder().timeout(timeout);
        match user_agent {
            Some(ua) => b.user_agent(ua.to_string()),
            None => b,
        }
    };

    builder()
        .build()
        .or_else(|_| builder().no_proxy().build())
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Anthropic Claude client.
pub struct AnthropicClient {
    config: ClientConfig,
    http: Client,
}

impl AnthropicClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    const API_VERSION: &'static str = "2023-06-01";

    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(Duration::from_secs(config.timeout_secs), None)?;
        Ok(Self { config, http })
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(Self::DEFAULT_BASE_URL)
    }
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<AnthropicContent>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

async fn read_body(response: reqwest::Response, provider: Provider) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::LLM(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        if let Ok(error) = serde_json::from_str::<ApiError>(&body) {
            return Err(Error::LLM(format!(
                "{} API error ({}): {}",
                provider, status, error.error.message
            )));
        }
        return Err(Error::LLM(format!(
            "{} API error ({}): {}",
            provider, status, body
        )));
    }

    Ok(body)
}

#[async_trait]
impl LLMClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = request
            .model
            .or(self.config.default_model.clone())
            .unwrap_or_else(|| Provider::Anthropic.default_model().to_string());

        let messages = request
            .messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .map(|m| WireMessage {
                role: match m.role {
                    ChatRole::Assistant => "assistant".to_string(),
                    _ => "user".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let api_request = AnthropicRequest {
            model,
            messages,
            max_tokens: request.max_tokens.unwrap_or(512),
            system: request.system,
            temperature: request.temperature,
        };

        let url = format!("{}/v1/messages", self.base_url());

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::LLM(format!("HTTP request failed: {}", e)))?;

        let body = read_body(response, Provider::Anthropic).await?;
        let api_response: AnthropicResponse = serde_json::from_str(&body)
            .map_err(|e| Error::LLM(format!("Failed to parse response: {}", e)))?;

        let content = api_response
            .content
            .iter()
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        let stop_reason = api_response.stop_reason.as_deref().map(|r| match r {
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        });

        Ok(CompletionResponse {
            id: api_response.id,
            model: api_response.model,
            content,
            stop_reason,
            usage: TokenUsage {
                input_tokens: api_response.usage.input_tokens,
                output_tokens: api_response.usage.output_tokens,
            },
            timestamp: Utc::now(),
        })
    }

    fn provider(&self) -> Provider {
        Provider::Anthropic
    }
}

/// OpenAI client.
pub struct OpenAIClient {
    config: ClientConfig,
    http: Client,
}

impl OpenAIClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";

    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(Duration::from_secs(config.timeout_secs), None)?;
        Ok(Self { config, http })
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(Self::DEFAULT_BASE_URL)
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    id: String,
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: OpenAIUsage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = request
            .model
            .or(self.config.default_model.clone())
            .unwrap_or_else(|| Provider::OpenAI.default_model().to_string());

        let mut messages: Vec<WireMessage> = Vec::new();

        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        for m in &request.messages {
            messages.push(WireMessage {
                role: match m.role {
                    ChatRole::User => "user".to_string(),
                    ChatRole::Assistant => "assistant".to_string(),
                    ChatRole::System => "system".to_string(),
                },
                content: m.content.clone(),
            });
        }

        let api_request = OpenAIRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.base_url());

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::LLM(format!("HTTP request failed: {}", e)))?;

        let body = read_body(response, Provider::OpenAI).await?;
        let api_response: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| Error::LLM(format!("Failed to parse response: {}", e)))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::LLM("No choices in response".to_string()))?;

        let stop_reason = choice.finish_reason.as_deref().map(|r| match r {
            "length" => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        });

        Ok(CompletionResponse {
            id: api_response.id,
            model: api_response.model,
            content: choice.message.content,
            stop_reason,
            usage: TokenUsage {
                input_tokens: api_response.usage.prompt_tokens,
                output_tokens: api_response.usage.completion_tokens,
            },
            timestamp: Utc::now(),
        })
    }

    fn provider(&self) -> Provider {
        Provider::OpenAI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("key")
            .with_base_url("http://localhost:9999")
            .with_default_model("gpt-4o-mini")
            .with_timeout(3);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999"));
    }

    #[test]
    fn test_base_url_override() {
        let client =
            OpenAIClient::new(ClientConfig::new("key").with_base_url("http://127.0.0.1:1")).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1");
        assert_eq!(client.provider(), Provider::OpenAI);

        let client = AnthropicClient::new(ClientConfig::new("key")).unwrap();
        assert_eq!(client.base_url(), AnthropicClient::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_openai_response_parsing() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "{\"score\": 80}"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 5}
        }"#;
        let parsed: OpenAIResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "{\"score\": 80}");
        assert_eq!(parsed.usage.prompt_tokens, 12);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_llm_error() {
        // Port 1 on loopback refuses connections.
        let client = OpenAIClient::new(
            ClientConfig::new("key")
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(2),
        )
        .unwrap();
        let err = client
            .complete(CompletionRequest::new().with_message(ChatMessage::user("hi")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LLM(_)));
    }
}
