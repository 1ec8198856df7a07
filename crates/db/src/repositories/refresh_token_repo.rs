//! Repository for the `refresh_tokens` table.
//!
//! Methods take `impl PgExecutor` rather than `&PgPool` so the session
//! service can run revoke + create inside one transaction during token
//! rotation.

use dearai_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::refresh_token::{CreateRefreshToken, RefreshTokenRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, jti, token_hash, expires_at, is_revoked, \
                        created_at, revoked_at";

/// Provides persistence for issued refresh tokens.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Insert a new non-revoked record, returning the created row.
    ///
    /// The `uq_refresh_tokens_jti` constraint rejects a duplicate `jti`.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateRefreshToken,
    ) -> Result<RefreshTokenRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (user_id, jti, token_hash, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshTokenRecord>(&query)
            .bind(input.user_id)
            .bind(&input.jti)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(executor)
            .await
    }

    /// Find an active record by its `jti`.
    ///
    /// Only returns records that are not revoked and not expired; a revoked
    /// or expired record is indistinguishable from an absent one.
    pub async fn find_active_by_jti(
        executor: impl PgExecutor<'_>,
        jti: &str,
    ) -> Result<Option<RefreshTokenRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM refresh_tokens
             WHERE jti = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, RefreshTokenRecord>(&query)
            .bind(jti)
            .fetch_optional(executor)
            .await
    }

    /// Revoke a single record by `jti`. Returns `true` if a row changed.
    ///
    /// Idempotent: revoking an already-revoked record reports a no-op.
    pub async fn revoke(executor: impl PgExecutor<'_>, jti: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = true, revoked_at = NOW()
             WHERE jti = $1 AND is_revoked = false",
        )
        .bind(jti)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active records for a user (e.g. on password change).
    /// Returns the count of revoked records.
    pub async fn revoke_all_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = true, revoked_at = NOW()
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
