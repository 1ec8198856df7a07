//! Message entity model and DTOs.

use dearai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A message row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub conversation_id: DbId,
    /// `"user"`, `"assistant"`, or `"system"`.
    pub role: String,
    pub content: String,
    /// `"text"` or `"voice"`.
    pub kind: String,
    pub audio_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new message.
#[derive(Debug)]
pub struct CreateMessage {
    pub conversation_id: DbId,
    pub role: String,
    pub content: String,
    pub kind: String,
    pub audio_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
