//! Emotion detection from voice audio.

pub mod hume;

pub use hume::HumeClient;

use serde::Serialize;

/// A single scored emotion from prosody analysis.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionScore {
    pub emotion: String,
    pub score: f64,
}

/// Aggregated emotion analysis for one audio clip.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionResult {
    pub emotions: Vec<EmotionScore>,
    pub dominant_emotion: String,
    pub confidence: f64,
}
