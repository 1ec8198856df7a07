//! Conversation entity model and DTOs.

use dearai_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A conversation row from the `conversations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub user_id: DbId,
    pub title: Option<String>,
    /// `"friend"` or `"therapy"`.
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new conversation.
#[derive(Debug, Deserialize)]
pub struct CreateConversation {
    pub title: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "friend".to_string()
}

/// DTO for updating a conversation (title only).
#[derive(Debug, Deserialize)]
pub struct UpdateConversation {
    pub title: Option<String>,
}
