//! Handlers for the `/conversations` resource.
//!
//! Ownership is enforced at the query level: every lookup is scoped to
//! the authenticated user, so someone else's conversation 404s.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dearai_core::error::CoreError;
use dearai_core::types::DbId;
use dearai_db::models::conversation::{Conversation, CreateConversation, UpdateConversation};
use dearai_db::models::message::Message;
use dearai_db::repositories::conversation_repo::ConversationRepo;
use dearai_db::repositories::message_repo::MessageRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /conversations`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// Paginated response for `GET /conversations`.
#[derive(Debug, Serialize)]
pub struct ConversationPage {
    pub conversations: Vec<Conversation>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

/// Detail response for `GET /conversations/{id}`: the conversation with
/// its full message history embedded.
#[derive(Debug, Serialize)]
pub struct ConversationWithMessages {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// POST /api/v1/conversations
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateConversation>,
) -> AppResult<(StatusCode, Json<Conversation>)> {
    if input.kind != "friend" && input.kind != "therapy" {
        return Err(
            CoreError::Validation("kind must be \"friend\" or \"therapy\"".into()).into(),
        );
    }
    let conversation = ConversationRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

/// GET /api/v1/conversations?skip=0&limit=20
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ConversationPage>> {
    let skip = params.skip.max(0);
    let limit = params.limit.clamp(1, 100);

    let (conversations, total) =
        ConversationRepo::list_for_user(&state.pool, auth_user.user_id, skip, limit).await?;

    Ok(Json(ConversationPage {
        conversations,
        total,
        skip,
        limit,
    }))
}

/// GET /api/v1/conversations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ConversationWithMessages>> {
    let conversation = ConversationRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Conversation", id))?;
    let messages = MessageRepo::list_for_conversation(&state.pool, id).await?;
    Ok(Json(ConversationWithMessages {
        conversation,
        messages,
    }))
}

/// PATCH /api/v1/conversations/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConversation>,
) -> AppResult<Json<Conversation>> {
    let conversation =
        ConversationRepo::update_title(&state.pool, id, auth_user.user_id, &input)
            .await?
            .ok_or_else(|| CoreError::not_found("Conversation", id))?;
    Ok(Json(conversation))
}

/// DELETE /api/v1/conversations/{id}
///
/// Messages go with it (ON DELETE CASCADE).
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ConversationRepo::delete_for_user(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Conversation", id).into())
    }
}

/// GET /api/v1/conversations/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Message>>> {
    // Ownership check first so foreign conversations 404 instead of
    // leaking an empty message list.
    ConversationRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Conversation", id))?;

    let messages = MessageRepo::list_for_conversation(&state.pool, id).await?;
    Ok(Json(messages))
}
