//! Refresh token record model and DTOs.

use dearai_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh token row from the `refresh_tokens` table.
///
/// `token_hash` is the SHA-256 hex digest of the raw token -- the
/// plaintext is never stored. `is_revoked` only ever flips false -> true.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub jti: String,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// DTO for persisting a newly issued refresh token.
#[derive(Debug)]
pub struct CreateRefreshToken {
    pub user_id: DbId,
    pub jti: String,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
