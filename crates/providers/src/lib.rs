//! HTTP clients for the external providers the companion depends on.
//!
//! Each capability is an `async_trait` contract with one implementing
//! variant per backing provider:
//!
//! - [`llm::ChatModel`] -- chat completion (OpenAI, Gemini).
//! - [`stt::SpeechToText`] -- audio transcription (OpenAI, Sarvam).
//! - [`tts::TextToSpeech`] -- speech synthesis (OpenAI, Sarvam).
//! - [`emotion::HumeClient`] -- best-effort emotion detection from audio.
//!
//! Implementations are constructed once at process startup and handed to
//! request-scoped logic as explicit dependencies; nothing in this crate is
//! a global.

pub mod emotion;
pub mod error;
pub mod llm;
pub mod stt;
pub mod tts;

pub use error::ProviderError;
