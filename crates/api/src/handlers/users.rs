//! Handlers for the `/users` resource (profile and password management).
//!
//! All routes operate on the authenticated user; there is no way to read
//! or modify another account.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dearai_core::error::CoreError;
use dearai_db::models::user::{UpdateUser, UserResponse};
use dearai_db::repositories::refresh_token_repo::RefreshTokenRepo;
use dearai_db::repositories::user_repo::UserRepo;
use serde::Deserialize;

use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /users/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth_user.user_id))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth_user.user_id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/me/password
///
/// Change the password after verifying the current one, then revoke every
/// active session so stolen refresh tokens die with the old credential.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    if input.new_password.is_empty() {
        return Err(CoreError::Validation("Password must not be empty".into()).into());
    }

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth_user.user_id))?;

    if !password::verify_password(&input.current_password, &user.password_hash) {
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }

    let new_hash = password::hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    let revoked = RefreshTokenRepo::revoke_all_for_user(&state.pool, user.id).await?;
    tracing::info!(user_id = %user.id, revoked, "Password changed, sessions revoked");

    Ok(StatusCode::NO_CONTENT)
}
