//! OpenAI chat-completions client.

use async_trait::async_trait;
use serde_json::json;

use crate::llm::{ChatMessage, ChatModel};
use crate::ProviderError;

const PROVIDER: &str = "openai";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat model backed by the OpenAI `/v1/chat/completions` endpoint.
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(api_key: String) -> Self {
        OpenAiChat {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut payload_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(prompt) = system_prompt {
            payload_messages.push(json!({ "role": "system", "content": prompt }));
        }
        for msg in messages {
            payload_messages.push(json!({ "role": msg.role, "content": msg.content }));
        }

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
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
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "missing choices[0].message.content".to_string(),
            })
    }
}
