//! Optional reasoning service that judges whether evidence supports a claim.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::ReasoningConfig;
use crate::error::{Error, Result};
use crate::llm::{
    AnthropicClient, ChatMessage, ClientConfig, CompletionRequest, LLMClient, OpenAIClient,
    Provider,
};

/// A support judgement returned by a reasoning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportJudgement {
    /// 0-100, how well the context supports the claim
    pub score: f64,
    /// Short rationale
    pub reasoning: String,
}

/// Given context text and a claim, return a support score or fail.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    async fn judge_support(&self, context: &str, claim: &str) -> Result<SupportJudgement>;
}

/// [`ReasoningService`] backed by a chat-completion [`LLMClient`].
pub struct LlmReasoningService {
    client: Arc<dyn LLMClient>,
    model: Option<String>,
    timeout: Duration,
}

impl LlmReasoningService {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            model: None,
            timeout: Duration::from_secs(15),
        }
    }

    /// Build the provider client named by `config`.
    pub fn from_config(config: &ReasoningConfig) -> Result<Self> {
        let client_config = client_config(config);
        let client: Arc<dyn LLMClient> = match config.provider {
            Provider::Anthropic => Arc::new(AnthropicClient::new(client_config)?),
            Provider::OpenAI => Arc::new(OpenAIClient::new(client_config)?),
        };

        Ok(Self::new(client).with_timeout(Duration::from_secs(config.timeout_secs)))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, context: &str, claim: &str) -> CompletionRequest {
        let mut request = CompletionRequest::new()
            .with_system(SYSTEM_PROMPT)
            .with_message(ChatMessage::user(format!(
                "## Source content\n{}\n\n## Claim\n{}",
                context, claim
            )))
            .with_max_tokens(300)
            .with_temperature(0.0);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }
        request
    }
}

/// The configured model becomes the client's default; requests carry no
/// model unless [`LlmReasoningService::with_model`] overrides it.
fn client_config(config: &ReasoningConfig) -> ClientConfig {
    let mut client_config =
        ClientConfig::new(config.api_key.clone()).with_timeout(config.timeout_secs);
    if let Some(url) = &config.base_url {
        client_config = client_config.with_base_url(url.clone());
    }
    if let Some(model) = &config.model {
        client_config = client_config.with_default_model(model.clone());
    }
    client_config
}

const SYSTEM_PROMPT: &str = r#"You are a fact-checking assistant. Decide whether the claim is supported by the source content.

Respond with a single JSON object and nothing else:
{"score": <number 0-100>, "reasoning": "<one or two sentences>"}

A score of 100 means the source states the claim directly. A score of 0 means the source does not support it or contradicts it."#;

#[async_trait]
impl ReasoningService for LlmReasoningService {
    async fn judge_support(&self, context: &str, claim: &str) -> Result<SupportJudgement> {
        let request = self.build_request(context, claim);

        let response = tokio::time::timeout(self.timeout, self.client.complete(request))
            .await
            .map_err(|_| Error::timeout(self.timeout.as_millis() as u64))??;

        debug!(
            model = %response.model,
            tokens = response.usage.total(),
            "Reasoning service responded"
        );

        parse_judgement(&response.content)
    }
}

#[derive(Deserialize)]
struct RawJudgement {
    score: f64,
    #[serde(default)]
    reasoning: String,
}

/// Parse a `{score, reasoning}` object out of free-form model output.
///
/// Text around the outermost braces (code fences, preambles) is ignored. A
/// score outside 0-100 is rejected.
pub fn parse_judgement(content: &str) -> Result<SupportJudgement> {
    let json = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(Error::reasoning(format!(
                "No JSON object in response: {}",
                content.chars().take(80).collect::<String>()
            )))
        }
    };

    let raw: RawJudgement = serde_json::from_str(json)
        .map_err(|e| Error::reasoning(format!("Malformed judgement: {}", e)))?;

    if !raw.score.is_finite() || !(0.0..=100.0).contains(&raw.score) {
        return Err(Error::reasoning(format!("Score out of range: {}", raw.score)));
    }

    Ok(SupportJudgement {
        score: raw.score,
        reasoning: raw.reasoning.trim().to_string(),
    })
}
