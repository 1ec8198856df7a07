//! JWT issuance and validation for access and refresh tokens.
//!
//! Both token kinds are HS256-signed JWTs. The payload is visible to the
//! holder; integrity is protected by the keyed signature. Refresh tokens
//! additionally carry a `jti` claim (a fresh UUID v4 per issuance) that
//! keys the persisted session record; only the SHA-256 hash of the raw
//! refresh token is stored server-side so a database leak does not
//! compromise active sessions.

use dearai_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Discriminates access tokens from refresh tokens inside the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Which operation context this token is valid for.
    pub kind: TokenKind,
    /// Unique token identifier. Present on refresh tokens only; keys the
    /// persisted session record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Configuration for token generation and validation.
///
/// The signing secret is the single trust root of the session subsystem:
/// it is loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 30).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 30).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `30`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Issue an HS256 access token for the given user.
///
/// Access tokens carry no `jti`: they are bearer-valid until natural
/// expiry and are not individually revocable.
pub fn issue_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + config.access_token_expiry_mins * 60,
        kind: TokenKind::Access,
        jti: None,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Issue an HS256 refresh token for the given user.
///
/// Returns `(token, jti)`. The `jti` is a fresh UUID v4 (122 bits of
/// randomness), distinct from every previously issued one; it is the join
/// key to the persisted session record.
pub fn issue_refresh_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let jti = Uuid::new_v4().to_string();
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + config.refresh_token_expiry_days * 24 * 3600,
        kind: TokenKind::Refresh,
        jti: Some(jti.clone()),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok((token, jti))
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Rejects a bad signature, an elapsed expiry, a `kind` that does not
/// match the operation context, structurally missing fields, and a
/// refresh token without a `jti`. Every rejection collapses to `None`;
/// the caller never learns which check failed.
pub fn decode_token(token: &str, expected_kind: TokenKind, config: &JwtConfig) -> Option<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .ok()?;

    let claims = data.claims;
    if claims.kind != expected_kind {
        return None;
    }
    if claims.kind == TokenKind::Refresh && claims.jti.is_none() {
        return None;
    }
    Some(claims)
}

/// Compute the SHA-256 hex digest of a raw refresh token.
///
/// This digest is what gets persisted; validation recomputes it from the
/// presented token and compares against the stored value.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
