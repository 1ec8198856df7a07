//! Text-to-speech providers.

pub mod openai;
pub mod sarvam;

use async_trait::async_trait;

use crate::ProviderError;

pub use openai::OpenAiTts;
pub use sarvam::SarvamTts;

/// Capability contract for speech synthesis.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize spoken audio for the given text. Returns encoded audio
    /// bytes in whatever container the provider produces; the payload is
    /// passed through to the client untouched.
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ProviderError>;
}
