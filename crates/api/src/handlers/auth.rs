//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dearai_db::models::user::UserResponse;
use serde::{Deserialize, Serialize};

use crate::auth::service::{self, RegisterInput, TokenPair};
use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

/// POST /api/v1/auth/register
///
/// Create an account. No tokens are issued; the client logs in next.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = service::register(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = service::authenticate(&state.pool, &input.email, &input.password).await?;
    let pair = service::issue_session(&state.pool, user.id, &state.config.jwt).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(pair))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new pair. The presented token is
/// revoked in the same transaction that records the replacement.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let pair = service::refresh_session(&state.pool, &input.refresh_token, &state.config.jwt)
        .await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/logout
///
/// Revoke the session the refresh token belongs to. Always returns 200
/// with a success message: an invalid or already-revoked token is a
/// successful logout.
pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<LogoutResponse>> {
    service::logout(&state.pool, &input.refresh_token, &state.config.jwt).await?;
    Ok(Json(LogoutResponse {
        message: "Successfully logged out",
    }))
}
