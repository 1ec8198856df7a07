//! Google Gemini generateContent client.

use async_trait::async_trait;
use serde_json::json;

use crate::llm::{ChatMessage, ChatModel};
use crate::ProviderError;

const PROVIDER: &str = "gemini";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Chat model backed by the Gemini `generateContent` endpoint.
pub struct GeminiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiChat {
    pub fn new(api_key: String) -> Self {
        GeminiChat {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl ChatModel for GeminiChat {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<String, ProviderError> {
        // Gemini calls the assistant role "model" and has no system role in
        // contents; the system prompt rides in system_instruction.
        let contents: Vec<_> = messages
            .iter()
            .map(|msg| {
                let role = if msg.role == "assistant" { "model" } else { "user" };
                json!({ "role": role, "parts": [{ "text": msg.content }] })
            })
            .collect();

        let mut payload = json!({ "contents": contents });
        if let Some(prompt) = system_prompt {
            payload["system_instruction"] = json!({ "parts": [{ "text": prompt }] });
        }

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "missing candidates[0].content.parts[0].text".to_string(),
            })
    }
}
