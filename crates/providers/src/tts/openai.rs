//! OpenAI speech synthesis client.

use async_trait::async_trait;
use serde_json::json;

use crate::tts::TextToSpeech;
use crate::ProviderError;

const PROVIDER: &str = "openai";

/// Synthesis backed by the OpenAI `/v1/audio/speech` endpoint.
pub struct OpenAiTts {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiTts {
    pub fn new(api_key: String) -> Self {
        OpenAiTts {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl TextToSpeech for OpenAiTts {
    async fn synthesize(
        &self,
        text: &str,
        _language: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .post("https://api.openai.com/v1/audio/speech")
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": "tts-1",
                "input": text,
                "voice": voice,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
