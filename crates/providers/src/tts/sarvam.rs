//! SarvamAI speech synthesis client.

use async_trait::async_trait;
use base64::Engine;
use serde_json::json;

use crate::tts::TextToSpeech;
use crate::ProviderError;

const PROVIDER: &str = "sarvam";

/// Synthesis backed by the Sarvam `text-to-speech` endpoint.
///
/// Sarvam returns base64-encoded audio in the JSON body rather than raw
/// bytes, so the payload is decoded before being handed back.
pub struct SarvamTts {
    client: reqwest::Client,
    api_key: String,
}

impl SarvamTts {
    pub fn new(api_key: String) -> Self {
        SarvamTts {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl TextToSpeech for SarvamTts {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .post("https://api.sarvam.ai/text-to-speech")
            .header("api-subscription-key", &self.api_key)
            .json(&json!({
                "text": text,
                "target_language_code": language,
                "speaker": voice,
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
        let encoded = body["audios"][0].as_str().ok_or_else(|| {
            ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "missing audios[0]".to_string(),
            }
        })?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: format!("invalid base64 audio: {e}"),
            })
    }
}
