//! Repository for the `messages` table.

use dearai_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, conversation_id, role, content, kind, audio_url, metadata, created_at";

/// Provides persistence for conversation messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (conversation_id, role, content, kind, audio_url, metadata)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.conversation_id)
            .bind(&input.role)
            .bind(&input.content)
            .bind(&input.kind)
            .bind(&input.audio_url)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// List all messages of a conversation in chronological order.
    pub async fn list_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE conversation_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch the most recent `limit` messages, returned in chronological
    /// order (oldest of the window first) for direct use as LLM history.
    pub async fn recent_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                SELECT {COLUMNS} FROM messages
                WHERE conversation_id = $1
                ORDER BY created_at DESC
                LIMIT $2
             ) AS recent
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
