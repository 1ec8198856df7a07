//! Chat completion providers.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use async_trait::async_trait;

use crate::ProviderError;

pub use anthropic::AnthropicChat;
pub use gemini::GeminiChat;
pub use openai::OpenAiChat;

/// One turn of conversation history passed to a chat model.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// `"user"`, `"assistant"`, or `"system"`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Capability contract for chat completion.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the conversation history (plus an optional system prompt) and
    /// return the assistant's reply text.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<String, ProviderError>;
}
