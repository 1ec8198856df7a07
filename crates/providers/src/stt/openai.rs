//! OpenAI Whisper transcription client.

use async_trait::async_trait;
use reqwest::multipart;

use crate::stt::SpeechToText;
use crate::ProviderError;

const PROVIDER: &str = "openai";

/// Transcription backed by the OpenAI `/v1/audio/transcriptions` endpoint.
pub struct OpenAiStt {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiStt {
    pub fn new(api_key: String) -> Self {
        OpenAiStt {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl SpeechToText for OpenAiStt {
    async fn transcribe(&self, audio: &[u8], language: &str) -> Result<String, ProviderError> {
        let part = multipart::Part::bytes(audio.to_vec()).file_name("audio.wav");
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", "whisper-1")
            .text("language", language.to_string());

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        body["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "missing text field".to_string(),
            })
    }
}
