//! Speech-to-text providers.

pub mod openai;
pub mod sarvam;

use async_trait::async_trait;

use crate::ProviderError;

pub use openai::OpenAiStt;
pub use sarvam::SarvamStt;

/// Capability contract for audio transcription.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe raw audio bytes to text.
    async fn transcribe(&self, audio: &[u8], language: &str) -> Result<String, ProviderError>;
}
