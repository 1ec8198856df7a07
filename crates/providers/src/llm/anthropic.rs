//! Anthropic messages API client.

use async_trait::async_trait;
use serde_json::json;

use crate::llm::{ChatMessage, ChatModel};
use crate::ProviderError;

const PROVIDER: &str = "anthropic";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Chat model backed by the Anthropic `/v1/messages` endpoint.
///
/// Unlike the OpenAI-style APIs, the system prompt travels in a
/// top-level `system` field rather than as a message role.
pub struct AnthropicChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicChat {
    pub fn new(api_key: String) -> Self {
        AnthropicChat {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for AnthropicChat {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<String, ProviderError> {
        let payload_messages: Vec<_> = messages
            .iter()
            .map(|msg| json!({ "role": msg.role, "content": msg.content }))
            .collect();

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "system": system_prompt.unwrap_or(""),
                "messages": payload_messages,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        body["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "missing content[0].text".to_string(),
            })
    }
}
