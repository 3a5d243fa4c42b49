//! Minimal LLM client used by the reasoning service.
//!
//! Only chat completion is needed: the proximity verifier asks a model
//! whether a passage is supported by fetched context.
//!
//! ## Example
//!
//! ```rust,ignore
//! use veritas_core::llm::{AnthropicClient, ChatMessage, ClientConfig, CompletionRequest, LLMClient};
//!
//! let client = AnthropicClient::new(ClientConfig::new("your-api-key"))?;
//! let request = CompletionRequest::new().with_message(ChatMessage::user("Hello"));
//! let response = client.complete(request).await?;
//! ```

mod client;
mod types;

pub(crate) use client::build_http_client;
pub use client::{AnthropicClient, ClientConfig, LLMClient, OpenAIClient};
pub use types::{
    ChatMessage, ChatRole, CompletionRequest, CompletionResponse, Provider, StopReason,
    TokenUsage,
};
