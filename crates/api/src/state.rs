use std::sync::Arc;

use dearai_providers::emotion::HumeClient;
use dearai_providers::llm::{AnthropicChat, ChatModel, GeminiChat, OpenAiChat};
use dearai_providers::stt::{OpenAiStt, SarvamStt, SpeechToText};
use dearai_providers::tts::{OpenAiTts, SarvamTts, TextToSpeech};

use crate::config::{ProvidersConfig, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dearai_db::DbPool,
    /// Server configuration (JWT settings, timeouts).
    pub config: Arc<ServerConfig>,
    /// External provider clients, built once at startup.
    pub providers: Arc<Providers>,
}

/// The set of external provider clients the chat flows depend on.
///
/// Constructed once from configuration and passed into request-scoped
/// logic by handle; there are no provider globals.
pub struct Providers {
    pub chat: Arc<dyn ChatModel>,
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
    /// Emotion detection is optional; `None` when no API key is configured.
    pub emotion: Option<HumeClient>,
}

impl Providers {
    /// Build provider clients from configuration.
    ///
    /// Fails fast on an unrecognized provider name so misconfiguration is
    /// caught at startup, not on the first request.
    pub fn from_config(config: &ProvidersConfig) -> anyhow::Result<Self> {
        let chat: Arc<dyn ChatModel> = match config.llm_provider.as_str() {
            "openai" => Arc::new(OpenAiChat::new(config.openai_api_key.clone())),
            "anthropic" => Arc::new(AnthropicChat::new(config.anthropic_api_key.clone())),
            "gemini" => Arc::new(GeminiChat::new(config.gemini_api_key.clone())),
            other => anyhow::bail!("Unknown LLM provider: {other}"),
        };

        let stt: Arc<dyn SpeechToText> = match config.stt_provider.as_str() {
            "openai" => Arc::new(OpenAiStt::new(config.openai_api_key.clone())),
            "sarvam" => Arc::new(SarvamStt::new(config.sarvam_api_key.clone())),
            other => anyhow::bail!("Unknown STT provider: {other}"),
        };

        let tts: Arc<dyn TextToSpeech> = match config.tts_provider.as_str() {
            "openai" => Arc::new(OpenAiTts::new(config.openai_api_key.clone())),
            "sarvam" => Arc::new(SarvamTts::new(config.sarvam_api_key.clone())),
            other => anyhow::bail!("Unknown TTS provider: {other}"),
        };

        let emotion = config.hume_api_key.clone().map(HumeClient::new);

        Ok(Providers {
            chat,
            stt,
            tts,
            emotion,
        })
    }
}
