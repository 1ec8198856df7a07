//! Repository for the `conversations` table.
//!
//! Every lookup is scoped by `user_id`: a conversation owned by someone
//! else behaves exactly like a missing one.

use dearai_core::types::DbId;
use sqlx::PgPool;

use crate::models::conversation::{Conversation, CreateConversation, UpdateConversation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, kind, created_at, updated_at";

/// Provides CRUD operations for conversations.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert a new conversation for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateConversation,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations (user_id, title, kind)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// List a user's conversations, most recently updated first.
    ///
    /// Returns the page plus the total count across all pages.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Conversation>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM conversations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM conversations
             WHERE user_id = $1
             ORDER BY updated_at DESC
             OFFSET $2 LIMIT $3"
        );
        let conversations = sqlx::query_as::<_, Conversation>(&query)
            .bind(user_id)
            .bind(skip)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok((conversations, total))
    }

    /// Find a conversation owned by the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a conversation's title. Returns `None` if not found/not owned.
    pub async fn update_title(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateConversation,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!(
            "UPDATE conversations SET
                title = COALESCE($3, title),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Bump `updated_at` after new activity (e.g. a chat exchange).
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a conversation owned by the user. Returns `true` if deleted.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
