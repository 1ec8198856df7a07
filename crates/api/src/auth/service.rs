//! Session-lifecycle orchestration: register, login, refresh, logout.
//!
//! Token rotation is the security-critical path here. A presented refresh
//! token is validated (signature, expiry, kind, active DB record, hash
//! match), then the old record is revoked and a new pair issued inside one
//! transaction. If the transaction aborts after the revoke, the session
//! ends up revoked rather than duplicated -- failures lean toward "more
//! revoked", never "more valid".

use chrono::{Duration, Utc};
use dearai_core::error::CoreError;
use dearai_core::types::DbId;
use dearai_db::models::refresh_token::{CreateRefreshToken, RefreshTokenRecord};
use dearai_db::models::user::{CreateUser, User};
use dearai_db::repositories::refresh_token_repo::RefreshTokenRepo;
use dearai_db::repositories::user_repo::UserRepo;
use dearai_db::DbPool;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::auth::jwt::{self, JwtConfig, TokenKind};
use crate::auth::password;
use crate::error::{AppError, AppResult};

/// Generic message for every credential failure during login. Both the
/// unknown-email and wrong-password paths return this exact string.
const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// An access/refresh token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

/// Input for registering a new user account.
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

/// Create a new user account.
///
/// Registration issues no tokens; the client logs in afterwards. A
/// duplicate email surfaces as a 409 conflict.
pub async fn register(pool: &DbPool, input: RegisterInput) -> AppResult<User> {
    if input.email.trim().is_empty() {
        return Err(CoreError::Validation("Email must not be empty".into()).into());
    }
    if input.password.is_empty() {
        return Err(CoreError::Validation("Password must not be empty".into()).into());
    }

    if UserRepo::find_by_email(pool, &input.email).await?.is_some() {
        return Err(CoreError::Conflict("Email already registered".into()).into());
    }

    let password_hash = password::hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: input.full_name,
            email: input.email,
            password_hash,
            gender: input.gender,
            age: input.age,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}

/// Verify credentials and return the user on success.
///
/// Both failure paths (unknown email, wrong password) return the same
/// `Unauthorized` message so responses do not reveal which accounts exist.
pub async fn authenticate(pool: &DbPool, email: &str, pw: &str) -> AppResult<User> {
    let user = UserRepo::find_by_email(pool, email)
        .await?
        .ok_or_else(|| CoreError::Unauthorized(BAD_CREDENTIALS.into()))?;

    if !password::verify_password(pw, &user.password_hash) {
        return Err(CoreError::Unauthorized(BAD_CREDENTIALS.into()).into());
    }

    Ok(user)
}

/// Issue a fresh access/refresh pair and persist the refresh record.
///
/// Takes an executor so rotation can run this inside the same transaction
/// as the revoke of the previous token.
pub async fn issue_session(
    executor: impl PgExecutor<'_>,
    user_id: DbId,
    config: &JwtConfig,
) -> AppResult<TokenPair> {
    let access_token = jwt::issue_access_token(user_id, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let (refresh_token, jti) = jwt::issue_refresh_token(user_id, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let expires_at = Utc::now() + Duration::days(config.refresh_token_expiry_days);

    let created = RefreshTokenRepo::create(
        executor,
        &CreateRefreshToken {
            user_id,
            jti: jti.clone(),
            token_hash: jwt::hash_refresh_token(&refresh_token),
            expires_at,
        },
    )
    .await;

    if let Err(sqlx::Error::Database(ref db_err)) = created {
        // A v4 UUID collision should never happen; treat it as corruption.
        if db_err.code().as_deref() == Some("23505") {
            tracing::error!(jti = %jti, "Refresh token jti collision");
            return Err(AppError::InternalError("Token identifier collision".into()));
        }
    }
    created?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "bearer",
    })
}

/// Validate a presented refresh token end to end.
///
/// Checks, in order: JWT signature/expiry/kind, an active (non-revoked,
/// non-expired) DB record under the token's `jti`, and a match between
/// the stored hash and the digest of the presented token. Any failure
/// collapses to `None`.
pub async fn validate_refresh_token(
    pool: &DbPool,
    token: &str,
    config: &JwtConfig,
) -> Result<Option<RefreshTokenRecord>, sqlx::Error> {
    let claims = match jwt::decode_token(token, TokenKind::Refresh, config) {
        Some(claims) => claims,
        None => return Ok(None),
    };
    // decode_token guarantees a jti on refresh tokens.
    let jti = claims.jti.as_deref().unwrap_or_default();

    let record = match RefreshTokenRepo::find_active_by_jti(pool, jti).await? {
        Some(record) => record,
        None => return Ok(None),
    };

    if record.token_hash != jwt::hash_refresh_token(token) {
        return Ok(None);
    }

    Ok(Some(record))
}

/// Rotate a refresh token: revoke the old record and issue a new pair.
///
/// The revoke and the insert of the new record commit atomically. The old
/// token is dead the moment this returns; presenting it again yields 401.
pub async fn refresh_session(
    pool: &DbPool,
    token: &str,
    config: &JwtConfig,
) -> AppResult<TokenPair> {
    let record = validate_refresh_token(pool, token, config)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid refresh token".into()))?;

    // The user row can disappear between issuance and refresh.
    let user = UserRepo::find_by_id(pool, record.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid refresh token".into()))?;

    let mut tx = pool.begin().await?;
    // The revoke is a compare-and-set on is_revoked. Two concurrent
    // rotations of the same token both pass validation above; only the
    // one whose revoke flips the row may issue a replacement, otherwise
    // a replayed token would mint two live sessions.
    if !RefreshTokenRepo::revoke(&mut *tx, &record.jti).await? {
        return Err(CoreError::Unauthorized("Invalid refresh token".into()).into());
    }
    let pair = issue_session(&mut *tx, user.id, config).await?;
    tx.commit().await?;

    tracing::debug!(user_id = %user.id, "Refresh token rotated");
    Ok(pair)
}

/// End the session the presented refresh token belongs to.
///
/// Idempotent by design: an invalid, expired, or already-revoked token is
/// a successful logout. The caller wanted the session dead and it is.
pub async fn logout(pool: &DbPool, token: &str, config: &JwtConfig) -> AppResult<()> {
    if let Some(record) = validate_refresh_token(pool, token, config).await? {
        RefreshTokenRepo::revoke(pool, &record.jti).await?;
        tracing::debug!(user_id = %record.user_id, "Session revoked on logout");
    }
    Ok(())
}
