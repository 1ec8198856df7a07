//! Hume.ai prosody analysis client.
//!
//! Emotion detection is strictly best-effort: every failure mode (missing
//! key, transport error, unexpected payload) collapses to `None` so a chat
//! exchange never fails because the emotion provider is down.

use reqwest::multipart;

use crate::emotion::{EmotionResult, EmotionScore};

const BASE_URL: &str = "https://api.hume.ai/v0";

/// Detects emotions from voice audio via the Hume.ai API.
pub struct HumeClient {
    client: reqwest::Client,
    api_key: String,
}

impl HumeClient {
    pub fn new(api_key: String) -> Self {
        HumeClient {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Analyze audio for emotional content. Returns `None` when the
    /// analysis is unavailable for any reason.
    pub async fn detect_from_audio(&self, audio: &[u8]) -> Option<EmotionResult> {
        let part = multipart::Part::bytes(audio.to_vec()).file_name("audio.wav");
        let form = multipart::Form::new()
            .part("file", part)
            .text("models", r#"{"prosody": {}}"#);

        let response = self
            .client
            .post(format!("{BASE_URL}/batch/jobs"))
            .header("X-Hume-Api-Key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "hume prosody request rejected");
            return None;
        }

        let body: serde_json::Value = response.json().await.ok()?;
        parse_predictions(&body)
    }
}

/// Extract the top emotions from a prediction payload.
fn parse_predictions(body: &serde_json::Value) -> Option<EmotionResult> {
    let predictions = body["predictions"].as_array()?;

    let emotions: Vec<EmotionScore> = predictions
        .iter()
        .take(5)
        .map(|pred| EmotionScore {
            emotion: pred["name"].as_str().unwrap_or("unknown").to_string(),
            score: pred["score"].as_f64().unwrap_or(0.0),
        })
        .collect();

    let dominant = emotions
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))?
        .clone();

    Some(EmotionResult {
        dominant_emotion: dominant.emotion,
        confidence: dominant.score,
        emotions,
    })
}
