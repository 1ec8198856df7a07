//! SarvamAI transcription client.

use async_trait::async_trait;
use reqwest::multipart;

use crate::stt::SpeechToText;
use crate::ProviderError;

const PROVIDER: &str = "sarvam";

/// Transcription backed by the Sarvam `speech-to-text` endpoint.
pub struct SarvamStt {
    client: reqwest::Client,
    api_key: String,
}

impl SarvamStt {
    pub fn new(api_key: String) -> Self {
        SarvamStt {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl SpeechToText for SarvamStt {
    async fn transcribe(&self, audio: &[u8], language: &str) -> Result<String, ProviderError> {
        let part = multipart::Part::bytes(audio.to_vec()).file_name("audio.wav");
        let form = multipart::Form::new()
            .part("file", part)
            .text("language_code", language.to_string());

        let response = self
            .client
            .post("https://api.sarvam.ai/speech-to-text")
            .header("api-subscription-key", &self.api_key)
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
        body["transcript"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "missing transcript field".to_string(),
            })
    }
}
